use super::query::SummaryStats;
use super::unit::{format_date, format_time, MaintenanceRecord, ProductionRecord};
use chrono::NaiveDate;
use prettytable::{row, Table};
use std::collections::BTreeMap;

pub struct View {}

impl View {
    pub fn production(records: &[ProductionRecord]) {
        let mut table = Table::new();

        table.add_row(row!["#", "NS", "DATE", "TIME"]);
        for (index, record) in records.iter().enumerate() {
            table.add_row(row![index + 1, record.ns, format_date(record.date), format_time(record.time)]);
        }
        table.printstd();
    }

    pub fn maintenance(records: &[MaintenanceRecord]) {
        let mut table = Table::new();

        table.add_row(row!["#", "NS", "STATUS", "DATE", "TIME"]);
        for (index, record) in records.iter().enumerate() {
            table.add_row(row![
                index + 1,
                record.ns,
                record.status.label(),
                format_date(record.date),
                format_time(record.time)
            ]);
        }
        table.printstd();
    }

    pub fn daily_counts(counts: &BTreeMap<NaiveDate, usize>) {
        let mut table = Table::new();

        table.add_row(row!["DATE", "PRODUCED"]);
        for (date, count) in counts {
            table.add_row(row![format_date(*date), count]);
        }
        table.printstd();
    }

    pub fn summary(stats: &SummaryStats, average_cycle_minutes: f64) {
        let mut table = Table::new();

        table.add_row(row!["PRODUCED", stats.total_produced]);
        table.add_row(row!["LAST NS", stats.last_ns.as_deref().unwrap_or("-")]);
        table.add_row(row!["AVG TIME / MACHINE", format!("{:.2} min", average_cycle_minutes)]);
        table.add_row(row!["DAILY AVERAGE", format!("{:.2}", stats.daily_average)]);
        table.add_row(row!["PRODUCED TODAY", stats.production_today]);
        table.add_row(row!["IN MAINTENANCE", stats.maintenance_count]);
        table.add_row(row!["MAINTENANCE TODAY", stats.maintenance_today]);
        table.printstd();
    }
}
