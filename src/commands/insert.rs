//! Records a machine as produced at a given date and time.
//!
//! Used to backfill production that was not registered when it happened.

use super::{parse_date, parse_time, session::Session};
use crate::{
    libs::{
        messages::Message,
        unit::{format_date, format_time},
    },
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InsertArgs {
    /// Serial number of the machine
    #[arg(required = true)]
    ns: String,

    /// Production date (YYYY-MM-DD or "today")
    #[arg(short, long, default_value = "today")]
    date: String,

    /// Production time (HH:MM:SS)
    #[arg(short, long)]
    time: String,
}

pub fn cmd(args: InsertArgs) -> Result<()> {
    let ns = args.ns.trim();
    let date = parse_date(&args.date)?;
    let time = parse_time(&args.time)?;
    let mut session = Session::open()?;

    session.apply(|ledger| ledger.custom_insert(ns, date, time))?;
    msg_success!(Message::MachineInserted(
        ns.to_string(),
        format!("{} {}", format_date(date), format_time(time))
    ));

    session.close()
}
