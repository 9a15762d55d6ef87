//! Maintenance commands: register a machine, release it back to production,
//! and list the machines currently withdrawn.

use super::session::Session;
use crate::{
    libs::{messages::Message, view::View},
    msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, MultiSelect};

#[derive(Debug, Args)]
pub struct MaintenanceArgs {
    #[command(subcommand)]
    command: MaintenanceCommands,
}

#[derive(Debug, Subcommand)]
enum MaintenanceCommands {
    #[command(about = "Register a machine for maintenance")]
    Register {
        /// Serial number of the machine
        ns: String,

        /// The machine was counted in production and leaves it
        #[arg(short = 'p', long)]
        from_production: bool,
    },
    #[command(about = "Release machines from maintenance back into production")]
    Release {
        /// Serial numbers to release; prompts for a selection when omitted
        ns: Vec<String>,
    },
    #[command(about = "List machines in maintenance")]
    List,
}

pub fn cmd(args: MaintenanceArgs) -> Result<()> {
    match args.command {
        MaintenanceCommands::Register { ns, from_production } => register(ns.trim(), from_production),
        MaintenanceCommands::Release { ns } => release(ns),
        MaintenanceCommands::List => list(),
    }
}

fn register(ns: &str, from_production: bool) -> Result<()> {
    let mut session = Session::open()?;

    session.apply(|ledger| ledger.register_maintenance(ns, from_production))?;
    msg_success!(Message::MaintenanceRegistered(ns.to_string()));

    session.close()
}

fn release(ns: Vec<String>) -> Result<()> {
    let mut session = Session::open()?;

    let selected: Vec<String> = if ns.is_empty() {
        let maintenance = session.ledger().maintenance();
        if maintenance.is_empty() {
            msg_warning!(Message::NoMachinesInMaintenance);
            return Ok(());
        }
        let items: Vec<String> = maintenance
            .iter()
            .map(|record| format!("{} ({})", record.ns, record.status))
            .collect();
        let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectMachinesToRelease.to_string())
            .items(&items)
            .interact()?;
        chosen.into_iter().map(|index| maintenance[index].ns.clone()).collect()
    } else {
        ns.iter().map(|ns| ns.trim().to_string()).collect()
    };

    if selected.is_empty() {
        msg_warning!(Message::NoMachinesSelected);
        return Ok(());
    }

    session.apply(|ledger| ledger.release_many(&selected))?;
    msg_success!(Message::MachinesReleased(selected));

    session.close()
}

fn list() -> Result<()> {
    let session = Session::open()?;
    let maintenance = session.ledger().maintenance();

    if maintenance.is_empty() {
        msg_print!(Message::NoMachinesInMaintenance);
        return Ok(());
    }
    msg_print!(Message::MaintenanceTableHeader, true);
    View::maintenance(&maintenance);
    msg_print!(Message::MaintenanceTotal(maintenance.len()));
    Ok(())
}
