//! Database layer for the unitrack application.
//!
//! Persists the production and maintenance tables in a single SQLite file.
//! The ledger only talks to storage through the [`store::RecordStore`] trait,
//! so the file format stays behind this module.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unitrack::db::store::{RecordStore, SqliteStore};
//!
//! let store = SqliteStore::open_default()?;
//! let tables = store.load();
//! println!("{} machines in production", tables.production.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection management and store path resolution.
pub mod db;

/// Atomic load/save of the `Producao` and `Manutencao` tables.
pub mod store;
