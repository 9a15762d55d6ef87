use super::parse_period;
use crate::{
    db::store::{RecordStore, SqliteStore},
    libs::{messages::Message, query::QueryView, view::View},
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// First day of the period (YYYY-MM-DD or "today")
    #[arg(short, long)]
    from: Option<String>,

    /// Last day of the period (YYYY-MM-DD or "today")
    #[arg(short, long)]
    to: Option<String>,
}

pub fn cmd(args: ListArgs) -> Result<()> {
    let tables = SqliteStore::open_default()?.load();
    let view = QueryView::new(&tables);

    let period = parse_period(args.from.as_deref(), args.to.as_deref())?;
    if period.is_unbounded() {
        if tables.production.is_empty() {
            msg_print!(Message::NoProductionRecords);
            return Ok(());
        }
        msg_print!(Message::ProductionTableHeader, true);
        View::production(view.production());
        msg_print!(Message::ProducedTotal(tables.production.len()));
        return Ok(());
    }

    let records = view.filter_by_period(&period);

    msg_print!(Message::ProductionTableHeader, true);
    msg_print!(period);
    View::production(&records);
    msg_print!(Message::MachinesInPeriod(records.len()));
    Ok(())
}
