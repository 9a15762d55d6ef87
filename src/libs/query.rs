//! Read-only views derived from the ledger tables.
//!
//! A [`QueryView`] borrows a snapshot of both tables and computes the figures
//! shown on screen and in reports: date-range filtering, per-day counts, the
//! average cycle time and the summary block.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unitrack::libs::query::QueryView;
//! use chrono::Local;
//! # use unitrack::libs::unit::Tables;
//! # let tables = Tables::default();
//!
//! let view = QueryView::new(&tables);
//! let stats = view.summary_stats(Local::now().date_naive());
//! println!("{} produced, {:.2} min per machine", stats.total_produced, view.average_cycle_minutes());
//! ```

use super::unit::{format_date, ProductionRecord, Tables};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// A date range whose bounds may each be left open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Period {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Period {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Period { from, to }
    }

    /// Neither bound is set, so every record matches.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Inclusive bounds, with open ends widened to the whole calendar.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.from.unwrap_or(NaiveDate::MIN), self.to.unwrap_or(NaiveDate::MAX))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from, self.to) {
            (Some(from), Some(to)) => write!(f, "{} .. {}", format_date(from), format_date(to)),
            (Some(from), None) => write!(f, "since {}", format_date(from)),
            (None, Some(to)) => write!(f, "until {}", format_date(to)),
            (None, None) => f.write_str("all records"),
        }
    }
}

/// Aggregate figures for the summary block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_produced: usize,
    /// NS of the last production row by table order.
    pub last_ns: Option<String>,
    pub maintenance_count: usize,
    pub maintenance_today: usize,
    pub production_today: usize,
    /// Machines produced per distinct production day.
    pub daily_average: f64,
}

pub struct QueryView<'a> {
    tables: &'a Tables,
}

impl<'a> QueryView<'a> {
    pub fn new(tables: &'a Tables) -> Self {
        QueryView { tables }
    }

    pub fn production(&self) -> &'a [ProductionRecord] {
        &self.tables.production
    }

    /// Production records with `start <= date <= end`, in table order.
    ///
    /// An inverted range simply matches nothing.
    pub fn filter_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<ProductionRecord> {
        self.tables
            .production
            .iter()
            .filter(|record| start <= record.date && record.date <= end)
            .cloned()
            .collect()
    }

    pub fn filter_by_period(&self, period: &Period) -> Vec<ProductionRecord> {
        let (start, end) = period.bounds();
        self.filter_by_date_range(start, end)
    }

    pub fn count_in_range(&self, start: NaiveDate, end: NaiveDate) -> usize {
        self.tables
            .production
            .iter()
            .filter(|record| start <= record.date && record.date <= end)
            .count()
    }

    pub fn daily_counts(&self) -> BTreeMap<NaiveDate, usize> {
        daily_counts(&self.tables.production)
    }

    /// Spread between the newest and the oldest production timestamp, in
    /// minutes, divided by the number of records.
    ///
    /// Released units re-enter with a fresh timestamp, so this is the spread of
    /// the current table rather than a true per-unit cycle time.
    pub fn average_cycle_minutes(&self) -> f64 {
        average_cycle_minutes(&self.tables.production)
    }

    pub fn summary_stats(&self, today: NaiveDate) -> SummaryStats {
        let production = &self.tables.production;
        let maintenance = &self.tables.maintenance;

        let total_produced = production.len();
        let distinct_days = production.iter().map(|record| record.date).collect::<HashSet<_>>().len();
        let daily_average = if distinct_days > 0 {
            total_produced as f64 / distinct_days as f64
        } else {
            0.0
        };

        SummaryStats {
            total_produced,
            last_ns: production.last().map(|record| record.ns.clone()),
            maintenance_count: maintenance.len(),
            maintenance_today: maintenance.iter().filter(|record| record.date == today).count(),
            production_today: production.iter().filter(|record| record.date == today).count(),
            daily_average,
        }
    }
}

/// Number of production records per day.
pub fn daily_counts(records: &[ProductionRecord]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.date).or_insert(0) += 1;
    }
    counts
}

pub fn average_cycle_minutes(records: &[ProductionRecord]) -> f64 {
    let timestamps = records.iter().map(|record| record.timestamp());
    let (Some(min), Some(max)) = (timestamps.clone().min(), timestamps.max()) else {
        return 0.0;
    };

    let spread_minutes = (max - min).num_seconds() as f64 / 60.0;
    spread_minutes / records.len() as f64
}
