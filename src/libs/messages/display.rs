//! Display implementation for unitrack application messages.
//!
//! All user-facing text is defined here, in one place, so commands only deal
//! with [`Message`] variants and their parameters.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === PRODUCTION MESSAGES ===
            Message::MachineProduced(ns) => format!("Machine {} produced successfully", ns),
            Message::MachineInserted(ns, at) => format!("Machine {} recorded as produced at {}", ns, at),
            Message::MachineEdited { old_ns, new_ns } => {
                if old_ns == new_ns {
                    format!("Machine {} updated successfully", new_ns)
                } else {
                    format!("Machine {} updated and renamed to {}", old_ns, new_ns)
                }
            }
            Message::EditingMachine(ns) => format!("Editing machine: {}", ns),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::ProductionTableHeader => "Machines in production".to_string(),
            Message::NoProductionRecords => "No machines in production.".to_string(),
            Message::MachinesInPeriod(count) => format!("Machines in period: {}", count),

            // === MAINTENANCE MESSAGES ===
            Message::MaintenanceRegistered(ns) => format!("Machine {} registered for maintenance", ns),
            Message::MachinesReleased(ns_list) => {
                format!("Released and counted in production: {}", ns_list.join(", "))
            }
            Message::NoMachinesInMaintenance => "No machines in maintenance.".to_string(),
            Message::NoMachinesSelected => "Select a machine to release!".to_string(),
            Message::MaintenanceTableHeader => "Machines in maintenance".to_string(),

            // === SUMMARY MESSAGES ===
            Message::SummaryHeader => "Production summary".to_string(),
            Message::DailyCountsHeader => "Machines produced per day".to_string(),
            Message::ProducedTotal(count) => format!("Produced: {}", count),
            Message::MaintenanceTotal(count) => format!("In maintenance: {}", count),

            // === INPUT ERRORS ===
            Message::InvalidDate(value) => format!("Invalid date '{}', expected YYYY-MM-DD", value),
            Message::InvalidTime(value) => format!("Invalid time '{}', expected HH:MM:SS", value),
            Message::SaveFailedDataAtRisk => {
                "Changes were not saved and may not survive a restart. Check the store file and try again.".to_string()
            }
            Message::UnreadableRowsKept(count) => {
                format!("{} stored row(s) could not be read and are kept unchanged", count)
            }

            // === EXPORT / REPORT MESSAGES ===
            Message::ExportingData(format) => format!("Exporting records as {}...", format),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),
            Message::ReportGenerated(path) => format!("Report generated: {}", path),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleStore => "Store settings".to_string(),
            Message::ConfigModuleReport => "Report settings".to_string(),
            Message::StoreLocation(path) => format!("Records are stored in {}", path),
            Message::DataDirectory(path) => format!("Data directory: {}", path),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure (space to select, enter to confirm)".to_string(),
            Message::PromptStorePath => "Store file path (empty for default)".to_string(),
            Message::PromptReportTitle => "Report title".to_string(),
            Message::PromptReportOutputDir => "Output directory (empty for current directory)".to_string(),
            Message::PromptSelectMachinesToRelease => "Select machines to release (space to select, enter to confirm)".to_string(),
            Message::PromptEditNs => "NS".to_string(),
            Message::PromptEditDate => "Date (YYYY-MM-DD)".to_string(),
            Message::PromptEditTime => "Time (HH:MM:SS)".to_string(),
        };
        write!(f, "{}", text)
    }
}
