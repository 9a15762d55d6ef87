//! Edits a production record: rename the machine or correct its timestamp.
//!
//! Without any of `--ns`, `--date` or `--time` the command prompts for each
//! field, pre-filled with the current values.

use super::{parse_date, parse_time, session::Session};
use crate::{
    libs::{
        error::LedgerError,
        messages::Message,
        unit::{format_date, format_time},
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Serial number of the machine to edit
    #[arg(required = true)]
    ns: String,

    /// New serial number
    #[arg(long = "ns")]
    new_ns: Option<String>,

    /// New production date (YYYY-MM-DD or "today")
    #[arg(short, long)]
    date: Option<String>,

    /// New production time (HH:MM:SS)
    #[arg(short, long)]
    time: Option<String>,
}

pub fn cmd(args: EditArgs) -> Result<()> {
    let old_ns = args.ns.trim().to_string();
    let mut session = Session::open()?;

    let Some(current) = session.ledger().production().into_iter().find(|record| record.ns == old_ns) else {
        return Err(LedgerError::UnknownUnit { ns: old_ns }.into());
    };

    let interactive = args.new_ns.is_none() && args.date.is_none() && args.time.is_none();
    let (new_ns, date, time) = if interactive {
        msg_print!(Message::EditingMachine(old_ns.clone()));
        let new_ns: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptEditNs.to_string())
            .default(current.ns.clone())
            .interact_text()?;
        let date: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptEditDate.to_string())
            .default(format_date(current.date))
            .interact_text()?;
        let time: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptEditTime.to_string())
            .default(format_time(current.time))
            .interact_text()?;
        (new_ns.trim().to_string(), parse_date(&date)?, parse_time(&time)?)
    } else {
        let new_ns = args.new_ns.map(|ns| ns.trim().to_string()).unwrap_or_else(|| old_ns.clone());
        let date = match args.date {
            Some(date) => parse_date(&date)?,
            None => current.date,
        };
        let time = match args.time {
            Some(time) => parse_time(&time)?,
            None => current.time,
        };
        (new_ns, date, time)
    };

    if new_ns == current.ns && date == current.date && time == current.time {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    session.apply(|ledger| ledger.edit(&old_ns, &new_ns, date, time))?;
    msg_success!(Message::MachineEdited { old_ns, new_ns });

    session.close()
}
