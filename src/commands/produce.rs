use super::session::Session;
use crate::{libs::messages::Message, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ProduceArgs {
    /// Serial number of the produced machine
    #[arg(required = true)]
    ns: String,
}

pub fn cmd(args: ProduceArgs) -> Result<()> {
    let ns = args.ns.trim();
    let mut session = Session::open()?;

    session.apply(|ledger| ledger.produce(ns))?;
    msg_success!(Message::MachineProduced(ns.to_string()));

    session.close()
}
