//! Core library modules for the unitrack application.
//!
//! ## Features
//!
//! - **Lifecycle**: the unit ledger and its state model
//! - **Queries**: date filtering, daily counts and summary figures
//! - **Presentation**: console tables, data export and production reports
//! - **Infrastructure**: configuration, data storage paths and messaging
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unitrack::db::store::SqliteStore;
//! use unitrack::libs::ledger::UnitLedger;
//! use unitrack::libs::query::QueryView;
//!
//! let mut ledger = UnitLedger::open(SqliteStore::open_default()?);
//! ledger.produce("SN100")?;
//! let tables = ledger.tables();
//! let counts = QueryView::new(&tables).daily_counts();
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod ledger;
pub mod messages;
pub mod query;
pub mod report;
pub mod unit;
pub mod view;
