//! Application configuration initialization command.
//!
//! Runs the interactive setup wizard for the store location and the report
//! settings, or prints where records are currently kept.

use crate::{
    db::db::Db,
    libs::{config::Config, data_storage::DataStorage, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Print the resolved store location and exit
    #[arg(short, long)]
    show: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.show {
        msg_info!(Message::DataDirectory(DataStorage::new().base_path().display().to_string()));
        msg_info!(Message::StoreLocation(Db::default_path()?.display().to_string()));
        return Ok(());
    }

    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
