//! Data export command.
//!
//! Writes a snapshot of the records to CSV (production table), JSON (both
//! tables) or Excel (one sheet per table). A period limits the production
//! rows; machines in maintenance are always exported in full.

use super::parse_period;
use crate::{
    db::store::{RecordStore, SqliteStore},
    libs::{
        config::Config,
        export::{default_file_name, ExportFormat, Exporter},
        messages::Message,
        query::QueryView,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    #[arg(short, long)]
    output: Option<PathBuf>,

    /// First day of the period (YYYY-MM-DD or "today")
    #[arg(long)]
    from: Option<String>,

    /// Last day of the period (YYYY-MM-DD or "today")
    #[arg(long)]
    to: Option<String>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let output = args.output.or_else(|| {
        config
            .output_dir()
            .map(|dir| dir.join(default_file_name("unitrack_export", args.format.extension())))
    });

    msg_info!(Message::ExportingData(format!("{:?}", args.format)));

    let mut tables = SqliteStore::open_default()?.load();
    let period = parse_period(args.from.as_deref(), args.to.as_deref())?;
    if !period.is_unbounded() {
        let production = QueryView::new(&tables).filter_by_period(&period);
        tables.production = production;
    }

    let exporter = Exporter::new(args.format, output);
    exporter.export(&tables)?;

    msg_success!(Message::ExportCompleted(exporter.output_path().display().to_string()));
    Ok(())
}
