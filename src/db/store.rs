//! Durable storage of the production and maintenance tables.
//!
//! Both tables live in one SQLite file as the named tables `Producao` and
//! `Manutencao`. Every field is stored as text (`YYYY-MM-DD` dates and
//! `HH:MM:SS` times) and row order is kept through the integer row id.
//!
//! ## Guarantees
//!
//! - **Fresh start**: a missing file loads as two empty tables, and a missing
//!   table loads as an empty table
//! - **No silent loss**: rows that cannot be parsed are loaded as
//!   [`UnreadableRow`]s and written back unchanged on every save
//! - **Atomic save**: both tables are replaced inside a single transaction, so a
//!   failed save leaves the previous contents of the file untouched
//! - **Read-protected file**: if the file or one of its tables could not be
//!   read, saving is refused instead of overwriting what was not loaded
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unitrack::db::store::{RecordStore, SqliteStore};
//!
//! let mut store = SqliteStore::new("unitrack.db");
//! let tables = store.load();
//! store.save(&tables)?;
//! # Ok::<(), unitrack::libs::error::StoreError>(())
//! ```

use super::db::Db;
use crate::libs::error::StoreError;
use crate::libs::unit::{
    MaintenanceRecord, MaintenanceStatus, ProductionRecord, Tables, UnreadableRow, DATE_FORMAT, TIME_FORMAT,
};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PRODUCTION_TABLE: &str = "Producao";
const MAINTENANCE_TABLE: &str = "Manutencao";

const SCHEMA_PRODUCTION: &str = "CREATE TABLE IF NOT EXISTS Producao (
    id INTEGER PRIMARY KEY,
    NS TEXT NOT NULL,
    Date TEXT NOT NULL,
    Time TEXT NOT NULL
);";
const SCHEMA_MAINTENANCE: &str = "CREATE TABLE IF NOT EXISTS Manutencao (
    id INTEGER PRIMARY KEY,
    NS TEXT NOT NULL,
    Status TEXT NOT NULL,
    Date TEXT NOT NULL,
    Time TEXT NOT NULL
);";
const TABLE_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)";
const SELECT_PRODUCTION: &str = "SELECT NS, Date, Time FROM Producao ORDER BY id";
const SELECT_MAINTENANCE: &str = "SELECT NS, Status, Date, Time FROM Manutencao ORDER BY id";
const DELETE_PRODUCTION: &str = "DELETE FROM Producao";
const DELETE_MAINTENANCE: &str = "DELETE FROM Manutencao";
const INSERT_PRODUCTION: &str = "INSERT INTO Producao (NS, Date, Time) VALUES (?1, ?2, ?3)";
const INSERT_MAINTENANCE: &str = "INSERT INTO Manutencao (NS, Status, Date, Time) VALUES (?1, ?2, ?3, ?4)";

/// Backing storage for the ledger tables.
pub trait RecordStore {
    /// Reads both tables. Absence of a prior store is a fresh start, not a failure.
    fn load(&self) -> Tables;

    /// Replaces both tables. Either both are written or neither is.
    fn save(&mut self, tables: &Tables) -> Result<(), StoreError>;
}

pub struct SqliteStore {
    path: PathBuf,
    /// Set when the last load could not read everything in the file.
    load_failed: Cell<bool>,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SqliteStore {
            path: path.into(),
            load_failed: Cell::new(false),
        }
    }

    /// Store at the configured or default location.
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::new(Db::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether saving is refused because the last load was incomplete.
    pub fn is_read_protected(&self) -> bool {
        self.load_failed.get()
    }

    fn read(&self) -> Result<Tables, StoreError> {
        let db = Db::open_read_only(&self.path)?;
        let mut tables = Tables::default();

        if table_exists(&db.conn, PRODUCTION_TABLE)? {
            match read_production(&db.conn) {
                Ok((rows, unreadable)) => {
                    tables.production = rows;
                    tables.unreadable.extend(unreadable);
                }
                Err(e) => {
                    warn!(table = PRODUCTION_TABLE, "table unreadable: {}", e);
                    self.load_failed.set(true);
                }
            }
        } else {
            debug!(table = PRODUCTION_TABLE, "table missing, treating as empty");
        }

        if table_exists(&db.conn, MAINTENANCE_TABLE)? {
            match read_maintenance(&db.conn) {
                Ok((rows, unreadable)) => {
                    tables.maintenance = rows;
                    tables.unreadable.extend(unreadable);
                }
                Err(e) => {
                    warn!(table = MAINTENANCE_TABLE, "table unreadable: {}", e);
                    self.load_failed.set(true);
                }
            }
        } else {
            debug!(table = MAINTENANCE_TABLE, "table missing, treating as empty");
        }

        Ok(tables)
    }
}

impl RecordStore for SqliteStore {
    fn load(&self) -> Tables {
        self.load_failed.set(false);
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no store file, starting empty");
            return Tables::default();
        }

        match self.read() {
            Ok(tables) => {
                debug!(
                    path = %self.path.display(),
                    production = tables.production.len(),
                    maintenance = tables.maintenance.len(),
                    unreadable = tables.unreadable.len(),
                    "loaded store"
                );
                tables
            }
            Err(e) => {
                warn!(path = %self.path.display(), "store unreadable, starting empty: {}", e);
                self.load_failed.set(true);
                Tables::default()
            }
        }
    }

    fn save(&mut self, tables: &Tables) -> Result<(), StoreError> {
        if self.load_failed.get() {
            return Err(StoreError::Unreadable { path: self.path.clone() });
        }

        let mut db = Db::open(&self.path)?;
        let tx = db.conn.transaction()?;

        tx.execute(SCHEMA_PRODUCTION, [])?;
        tx.execute(SCHEMA_MAINTENANCE, [])?;
        tx.execute(DELETE_PRODUCTION, [])?;
        tx.execute(DELETE_MAINTENANCE, [])?;
        {
            let mut stmt = tx.prepare(INSERT_PRODUCTION)?;
            for record in &tables.production {
                stmt.execute(params![
                    record.ns,
                    record.date.format(DATE_FORMAT).to_string(),
                    record.time.format(TIME_FORMAT).to_string(),
                ])?;
            }
            for row in &tables.unreadable {
                if let UnreadableRow::Production { ns, date, time } = row {
                    stmt.execute(params![ns, date, time])?;
                }
            }

            let mut stmt = tx.prepare(INSERT_MAINTENANCE)?;
            for record in &tables.maintenance {
                stmt.execute(params![
                    record.ns,
                    record.status.label(),
                    record.date.format(DATE_FORMAT).to_string(),
                    record.time.format(TIME_FORMAT).to_string(),
                ])?;
            }
            for row in &tables.unreadable {
                if let UnreadableRow::Maintenance { ns, status, date, time } = row {
                    stmt.execute(params![ns, status, date, time])?;
                }
            }
        }
        tx.commit()?;

        debug!(
            path = %self.path.display(),
            production = tables.production.len(),
            maintenance = tables.maintenance.len(),
            unreadable = tables.unreadable.len(),
            "saved store"
        );
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let exists: i64 = conn.query_row(TABLE_EXISTS, [table], |row| row.get(0))?;
    Ok(exists == 1)
}

fn read_production(conn: &Connection) -> rusqlite::Result<(Vec<ProductionRecord>, Vec<UnreadableRow>)> {
    let mut records = Vec::new();
    let mut unreadable = Vec::new();

    let mut stmt = conn.prepare(SELECT_PRODUCTION)?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?;
    for row in rows {
        let (ns, date, time) = row?;
        match parse_timestamp(&date, &time) {
            Some((parsed_date, parsed_time)) => records.push(ProductionRecord {
                ns,
                date: parsed_date,
                time: parsed_time,
            }),
            None => {
                warn!(table = PRODUCTION_TABLE, %ns, %date, %time, "row with malformed timestamp kept as stored");
                unreadable.push(UnreadableRow::Production { ns, date, time });
            }
        }
    }
    Ok((records, unreadable))
}

fn read_maintenance(conn: &Connection) -> rusqlite::Result<(Vec<MaintenanceRecord>, Vec<UnreadableRow>)> {
    let mut records = Vec::new();
    let mut unreadable = Vec::new();

    let mut stmt = conn.prepare(SELECT_MAINTENANCE)?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;
    for row in rows {
        let (ns, status, date, time) = row?;
        let parsed = status.parse::<MaintenanceStatus>().ok().zip(parse_timestamp(&date, &time));
        match parsed {
            Some((parsed_status, (parsed_date, parsed_time))) => records.push(MaintenanceRecord {
                ns,
                status: parsed_status,
                date: parsed_date,
                time: parsed_time,
            }),
            None => {
                warn!(table = MAINTENANCE_TABLE, %ns, %status, %date, %time, "unparsable row kept as stored");
                unreadable.push(UnreadableRow::Maintenance { ns, status, date, time });
            }
        }
    }
    Ok((records, unreadable))
}

fn parse_timestamp(date: &str, time: &str) -> Option<(NaiveDate, NaiveTime)> {
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT).ok()?;
    Some((date, time))
}
