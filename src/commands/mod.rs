pub mod edit;
pub mod export;
pub mod init;
pub mod insert;
pub mod list;
pub mod maintenance;
pub mod produce;
pub mod report;
pub mod session;
pub mod stats;

use crate::{
    libs::{
        messages::Message,
        query::Period,
        unit::{DATE_FORMAT, TIME_FORMAT},
    },
    msg_bail_anyhow,
};
use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Count a machine as produced now")]
    Produce(produce::ProduceArgs),
    #[command(about = "Register, release or list machines in maintenance")]
    Maintenance(maintenance::MaintenanceArgs),
    #[command(about = "Record a machine as produced at a given date and time")]
    Insert(insert::InsertArgs),
    #[command(about = "Edit a production record")]
    Edit(edit::EditArgs),
    #[command(about = "List machines in production, optionally for a period")]
    List(list::ListArgs),
    #[command(about = "Show production statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "Export records to CSV, JSON or Excel")]
    Export(export::ExportArgs),
    #[command(about = "Generate a production report")]
    Report(report::ReportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Produce(args) => produce::cmd(args),
            Commands::Maintenance(args) => maintenance::cmd(args),
            Commands::Insert(args) => insert::cmd(args),
            Commands::Edit(args) => edit::cmd(args),
            Commands::List(args) => list::cmd(args),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Report(args) => report::cmd(args),
        }
    }
}

/// Parses `YYYY-MM-DD`, or `today` for the current local date.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    let date_str = date_str.trim();
    if date_str.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    match NaiveDate::parse_from_str(date_str, DATE_FORMAT) {
        Ok(date) => Ok(date),
        Err(_) => msg_bail_anyhow!(Message::InvalidDate(date_str.to_string())),
    }
}

/// Builds a period from optional `--from` and `--to` arguments.
pub fn parse_period(from: Option<&str>, to: Option<&str>) -> Result<Period> {
    let from = from.map(parse_date).transpose()?;
    let to = to.map(parse_date).transpose()?;
    Ok(Period::new(from, to))
}

/// Parses `HH:MM:SS`; `HH:MM` is accepted with zero seconds.
pub fn parse_time(time_str: &str) -> Result<NaiveTime> {
    let time_str = time_str.trim();
    match NaiveTime::parse_from_str(time_str, TIME_FORMAT).or_else(|_| NaiveTime::parse_from_str(time_str, "%H:%M")) {
        Ok(time) => Ok(time),
        Err(_) => msg_bail_anyhow!(Message::InvalidTime(time_str.to_string())),
    }
}
