use crate::{
    db::store::{RecordStore, SqliteStore},
    libs::{messages::Message, query::QueryView, view::View},
    msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Also show the number of machines produced per day
    #[arg(short, long)]
    daily: bool,
}

pub fn cmd(args: StatsArgs) -> Result<()> {
    let tables = SqliteStore::open_default()?.load();
    let view = QueryView::new(&tables);
    let stats = view.summary_stats(Local::now().date_naive());

    msg_print!(Message::SummaryHeader, true);
    View::summary(&stats, view.average_cycle_minutes());

    if args.daily {
        let counts = view.daily_counts();
        if !counts.is_empty() {
            msg_print!(Message::DailyCountsHeader, true);
            View::daily_counts(&counts);
        }
    }
    Ok(())
}
