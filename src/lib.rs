//! # Unitrack - Unit lifecycle tracking
//!
//! A command-line utility that follows manufactured units (machines,
//! identified by their serial number NS) as they move between production and
//! maintenance.
//!
//! ## Features
//!
//! - **Lifecycle Ledger**: produce, register for maintenance, release, backfill and edit
//! - **Consistent Storage**: both tables saved atomically to one SQLite file
//! - **Queries**: date-range filtering, per-day counts and summary statistics
//! - **Data Export**: CSV, JSON and Excel
//! - **Reports**: Excel production report with a per-day chart
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unitrack::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
