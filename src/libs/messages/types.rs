#[derive(Debug, Clone)]
pub enum Message {
    // === PRODUCTION MESSAGES ===
    MachineProduced(String),        // NS
    MachineInserted(String, String), // NS, timestamp
    MachineEdited {
        old_ns: String,
        new_ns: String,
    },
    EditingMachine(String), // NS
    NoChangesDetected,
    ProductionTableHeader,
    NoProductionRecords,
    MachinesInPeriod(usize),

    // === MAINTENANCE MESSAGES ===
    MaintenanceRegistered(String), // NS
    MachinesReleased(Vec<String>),
    NoMachinesInMaintenance,
    NoMachinesSelected,
    MaintenanceTableHeader,

    // === SUMMARY MESSAGES ===
    SummaryHeader,
    DailyCountsHeader,
    ProducedTotal(usize),
    MaintenanceTotal(usize),

    // === INPUT ERRORS ===
    InvalidDate(String),
    InvalidTime(String),
    SaveFailedDataAtRisk,
    UnreadableRowsKept(usize),

    // === EXPORT / REPORT MESSAGES ===
    ExportingData(String), // format
    ExportCompleted(String), // path
    ReportGenerated(String), // path

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleStore,
    ConfigModuleReport,
    StoreLocation(String),
    DataDirectory(String),

    // === PROMPTS ===
    PromptSelectModules,
    PromptStorePath,
    PromptReportTitle,
    PromptReportOutputDir,
    PromptSelectMachinesToRelease,
    PromptEditNs,
    PromptEditDate,
    PromptEditTime,
}
