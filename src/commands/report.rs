//! Production report command.
//!
//! Builds an Excel report from the production records, optionally limited to
//! a date range, with a per-day chart.

use super::parse_period;
use crate::{
    db::store::{RecordStore, SqliteStore},
    libs::{
        config::Config,
        export::default_file_name,
        messages::Message,
        query::QueryView,
        report::ProductionReport,
        view::View,
    },
    msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Output file; defaults to a timestamped .xlsx file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// First day of the period (YYYY-MM-DD or "today")
    #[arg(short, long)]
    from: Option<String>,

    /// Last day of the period (YYYY-MM-DD or "today")
    #[arg(short, long)]
    to: Option<String>,
}

pub fn cmd(args: ReportArgs) -> Result<()> {
    let config = Config::read()?;
    let tables = SqliteStore::open_default()?.load();
    let view = QueryView::new(&tables);

    let period = parse_period(args.from.as_deref(), args.to.as_deref())?;
    let records = view.filter_by_period(&period);

    let title = config.report.clone().unwrap_or_default().title;
    let report = ProductionReport::new(&title, records, period);

    let file_name = default_file_name("relatorio_producao", "xlsx");
    let output = args.output.unwrap_or_else(|| match config.output_dir() {
        Some(dir) => dir.join(&file_name),
        None => PathBuf::from(&file_name),
    });
    report.write_xlsx(&output)?;

    msg_print!(Message::DailyCountsHeader, true);
    View::daily_counts(&report.daily_counts());
    msg_print!(Message::MachinesInPeriod(report.records().len()));
    msg_success!(Message::ReportGenerated(output.display().to_string()));
    Ok(())
}
