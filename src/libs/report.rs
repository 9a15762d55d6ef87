//! Production report rendering.
//!
//! A [`ProductionReport`] is a stateless renderer over a snapshot of
//! production records. It writes an Excel workbook with two sheets:
//!
//! - **Relatorio**: title, period, the record list and a summary block
//! - **Diario**: machines produced per day, with a column chart
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unitrack::libs::query::Period;
//! use unitrack::libs::report::ProductionReport;
//! # let records = Vec::new();
//!
//! let report = ProductionReport::new("Controle de Produção", records, Period::default());
//! report.write_xlsx("relatorio.xlsx")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::query::{average_cycle_minutes, daily_counts, Period};
use super::unit::{format_date, format_time, ProductionRecord};
use anyhow::Result;
use chrono::NaiveDate;
use rust_xlsxwriter::{Chart, ChartType, Format, Workbook};
use std::collections::BTreeMap;
use std::path::Path;

const RECORDS_SHEET: &str = "Relatorio";
const DAILY_SHEET: &str = "Diario";

pub struct ProductionReport {
    title: String,
    records: Vec<ProductionRecord>,
    period: Period,
}

impl ProductionReport {
    pub fn new(title: &str, records: Vec<ProductionRecord>, period: Period) -> Self {
        ProductionReport {
            title: title.to_string(),
            records,
            period,
        }
    }

    pub fn records(&self) -> &[ProductionRecord] {
        &self.records
    }

    pub fn daily_counts(&self) -> BTreeMap<NaiveDate, usize> {
        daily_counts(&self.records)
    }

    pub fn average_cycle_minutes(&self) -> f64 {
        average_cycle_minutes(&self.records)
    }

    /// `start .. end`, `since start`, `until end` or `all records`.
    pub fn period_label(&self) -> String {
        self.period.to_string()
    }

    pub fn write_xlsx(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut workbook = Workbook::new();
        let title_format = Format::new().set_bold().set_font_size(16);
        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(RECORDS_SHEET)?;
        worksheet.write_string_with_format(0, 0, &self.title, &title_format)?;
        worksheet.write_string(1, 0, "Period")?;
        worksheet.write_string(1, 1, self.period_label())?;

        let mut row = 3;
        worksheet.write_string_with_format(row, 0, "NS", &header_format)?;
        worksheet.write_string_with_format(row, 1, "Date", &header_format)?;
        worksheet.write_string_with_format(row, 2, "Time", &header_format)?;
        for record in &self.records {
            row += 1;
            worksheet.write_string(row, 0, &record.ns)?;
            worksheet.write_string(row, 1, format_date(record.date))?;
            worksheet.write_string(row, 2, format_time(record.time))?;
        }

        row += 2;
        worksheet.write_string_with_format(row, 0, "SUMMARY", &header_format)?;
        row += 1;
        worksheet.write_string(row, 0, "Produced")?;
        worksheet.write_number(row, 1, self.records.len() as f64)?;
        row += 1;
        worksheet.write_string(row, 0, "Average time per machine (min)")?;
        worksheet.write_number(row, 1, (self.average_cycle_minutes() * 100.0).round() / 100.0)?;
        worksheet.autofit();

        let counts = self.daily_counts();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(DAILY_SHEET)?;
        worksheet.write_string_with_format(0, 0, "Date", &header_format)?;
        worksheet.write_string_with_format(0, 1, "Produced", &header_format)?;
        for (index, (date, count)) in counts.iter().enumerate() {
            let row = index as u32 + 1;
            worksheet.write_string(row, 0, format_date(*date))?;
            worksheet.write_number(row, 1, *count as f64)?;
        }
        worksheet.autofit();

        if !counts.is_empty() {
            let last_row = counts.len() as u32;
            let mut chart = Chart::new(ChartType::Column);
            chart
                .add_series()
                .set_name("Produced")
                .set_categories((DAILY_SHEET, 1, 0, last_row, 0))
                .set_values((DAILY_SHEET, 1, 1, last_row, 1));
            chart.title().set_name("Machines per day");
            chart.legend().set_hidden();
            worksheet.insert_chart(1, 3, &chart)?;
        }

        workbook.save(path.as_ref())?;
        Ok(())
    }
}
