//! Data export for external analysis and backup.
//!
//! Exports read a snapshot of the ledger tables and never write back.
//!
//! ## Formats
//!
//! - **CSV**: the `Producao` table verbatim, with an `NS,Date,Time` header
//! - **JSON**: both tables under their section names
//! - **Excel**: a workbook with a `Producao` and a `Manutencao` sheet
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unitrack::libs::export::{ExportFormat, Exporter};
//! # use unitrack::libs::unit::Tables;
//! # let tables = Tables::default();
//!
//! let exporter = Exporter::new(ExportFormat::Csv, None);
//! exporter.export(&tables)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::unit::{format_date, format_time, Tables};
use anyhow::Result;
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Supported export output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter writing to `output_path`, or to a timestamped
    /// `unitrack_export_YYYYMMDD_HHMMSS.<ext>` file when none is given.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let output_path =
            output_path.unwrap_or_else(|| PathBuf::from(default_file_name("unitrack_export", format.extension())));

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, tables: &Tables) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_csv(tables),
            ExportFormat::Json => self.export_json(tables),
            ExportFormat::Excel => self.export_excel(tables),
        }
    }

    fn export_csv(&self, tables: &Tables) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(&self.output_path)?;
        wtr.write_record(["NS", "Date", "Time"])?;
        for record in &tables.production {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn export_json(&self, tables: &Tables) -> Result<()> {
        let file = BufWriter::new(File::create(&self.output_path)?);
        serde_json::to_writer_pretty(file, tables)?;
        Ok(())
    }

    fn export_excel(&self, tables: &Tables) -> Result<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Producao")?;
        for (col, title) in ["NS", "Date", "Time"].iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }
        for (index, record) in tables.production.iter().enumerate() {
            let row = index as u32 + 1;
            worksheet.write_string(row, 0, &record.ns)?;
            worksheet.write_string(row, 1, format_date(record.date))?;
            worksheet.write_string(row, 2, format_time(record.time))?;
        }
        worksheet.autofit();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Manutencao")?;
        for (col, title) in ["NS", "Status", "Date", "Time"].iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }
        for (index, record) in tables.maintenance.iter().enumerate() {
            let row = index as u32 + 1;
            worksheet.write_string(row, 0, &record.ns)?;
            worksheet.write_string(row, 1, record.status.label())?;
            worksheet.write_string(row, 2, format_date(record.date))?;
            worksheet.write_string(row, 3, format_time(record.time))?;
        }
        worksheet.autofit();

        workbook.save(&self.output_path)?;
        Ok(())
    }
}

/// `<prefix>_YYYYMMDD_HHMMSS.<extension>`
pub fn default_file_name(prefix: &str, extension: &str) -> String {
    format!("{}_{}.{}", prefix, Local::now().format("%Y%m%d_%H%M%S"), extension)
}
