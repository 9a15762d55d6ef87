//! Unit lifecycle engine.
//!
//! The ledger owns every tracked unit and is the only place where a unit can
//! change state. Each operation validates its input against the current state,
//! builds the resulting unit list, writes it through the [`RecordStore`] and
//! only then commits it in memory and notifies listeners. A failed operation,
//! including a failed save, leaves the ledger exactly as it was.
//!
//! ## Transitions
//!
//! ```text
//! NotTracked    --produce / custom_insert-------------------> InProduction
//! NotTracked    --register_maintenance(from_production=false)--> InMaintenance(InStock)
//! InProduction  --register_maintenance(from_production=true)---> InMaintenance(InProduction)
//! InMaintenance --release_maintenance--------------------------> InProduction
//! InProduction  --edit (rename / re-date in place)-------------> InProduction
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unitrack::db::store::SqliteStore;
//! use unitrack::libs::ledger::UnitLedger;
//!
//! let mut ledger = UnitLedger::open(SqliteStore::new("unitrack.db"));
//! ledger.produce("SN100")?;
//! ledger.register_maintenance("SN100", true)?;
//! ledger.release_maintenance("SN100")?;
//! # Ok::<(), unitrack::libs::error::LedgerError>(())
//! ```

use super::error::LedgerError;
use super::unit::{MaintenanceRecord, MaintenanceStatus, ProductionRecord, Tables, Unit, UnitState, UnreadableRow};
use crate::db::store::RecordStore;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Source of "now" for new records.
pub type Clock = fn() -> NaiveDateTime;

/// Local wall-clock time truncated to whole seconds.
pub fn local_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

type Listener = Box<dyn FnMut()>;

pub struct UnitLedger<S: RecordStore> {
    store: S,
    units: Vec<Unit>,
    unreadable: Vec<UnreadableRow>,
    clock: Clock,
    listeners: Vec<Listener>,
}

impl<S: RecordStore> UnitLedger<S> {
    /// Loads the ledger from `store`.
    pub fn open(store: S) -> Self {
        Self::with_clock(store, local_now)
    }

    pub fn with_clock(store: S, clock: Clock) -> Self {
        let mut tables = store.load();
        let unreadable = std::mem::take(&mut tables.unreadable);
        if !unreadable.is_empty() {
            warn!(rows = unreadable.len(), "keeping unreadable rows as stored");
        }
        let units = units_from_tables(tables);
        UnitLedger {
            store,
            units,
            unreadable,
            clock,
            listeners: Vec::new(),
        }
    }

    /// Registers a callback invoked once after every committed mutation.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every tracked unit, in insertion order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn find(&self, ns: &str) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.ns == ns)
    }

    pub fn state_of(&self, ns: &str) -> Option<UnitState> {
        self.find(ns).map(|unit| unit.state)
    }

    /// Snapshot of the `Producao` table.
    pub fn production(&self) -> Vec<ProductionRecord> {
        production_table(&self.units)
    }

    /// Snapshot of the `Manutencao` table.
    pub fn maintenance(&self) -> Vec<MaintenanceRecord> {
        maintenance_table(&self.units)
    }

    /// Both tables as they are written to the store.
    pub fn tables(&self) -> Tables {
        tables_from_units(&self.units, &self.unreadable)
    }

    /// Stored rows that could not be parsed and are passed through untouched.
    pub fn unreadable(&self) -> &[UnreadableRow] {
        &self.unreadable
    }

    /// Counts a new unit as produced now.
    pub fn produce(&mut self, ns: &str) -> Result<(), LedgerError> {
        validate_ns(ns)?;
        self.ensure_untracked(ns)?;

        let mut units = self.units.clone();
        units.push(Unit::new(ns, UnitState::InProduction, (self.clock)()));
        self.commit(units, "produce", ns)
    }

    /// Withdraws a unit for maintenance.
    ///
    /// With `from_production` set the unit must currently be in production and
    /// is moved out of it. Without it the unit is registered straight from stock
    /// and must not be tracked yet.
    pub fn register_maintenance(&mut self, ns: &str, from_production: bool) -> Result<(), LedgerError> {
        validate_ns(ns)?;

        let mut units = self.units.clone();
        let status = if from_production {
            match self.state_of(ns) {
                Some(UnitState::InProduction) => {
                    units.retain(|unit| unit.ns != ns);
                    MaintenanceStatus::InProduction
                }
                _ => return Err(LedgerError::UnknownUnit { ns: ns.to_string() }),
            }
        } else {
            self.ensure_untracked(ns)?;
            MaintenanceStatus::InStock
        };

        units.push(Unit::new(ns, UnitState::InMaintenance(status), (self.clock)()));
        self.commit(units, "register_maintenance", ns)
    }

    /// Moves a unit from maintenance back into production with a fresh timestamp.
    pub fn release_maintenance(&mut self, ns: &str) -> Result<(), LedgerError> {
        self.release_many(&[ns])
    }

    /// Releases several units at once. Either all of them move or none do.
    pub fn release_many<T: AsRef<str>>(&mut self, ns_list: &[T]) -> Result<(), LedgerError> {
        if ns_list.is_empty() {
            return Err(LedgerError::validation("no machines selected for release"));
        }

        let now = (self.clock)();
        let mut units = self.units.clone();
        let mut released: Vec<&str> = Vec::with_capacity(ns_list.len());
        for ns in ns_list {
            let ns = ns.as_ref();
            if released.contains(&ns) {
                continue;
            }
            released.push(ns);
            match units.iter().position(|unit| unit.ns == ns && unit.is_in_maintenance()) {
                Some(index) => {
                    units.remove(index);
                    units.push(Unit::new(ns, UnitState::InProduction, now));
                }
                None => return Err(LedgerError::UnknownUnit { ns: ns.to_string() }),
            }
        }

        let label = released.join(", ");
        self.commit(units, "release_maintenance", &label)
    }

    /// Counts a unit as produced at a caller-supplied timestamp.
    pub fn custom_insert(&mut self, ns: &str, date: NaiveDate, time: NaiveTime) -> Result<(), LedgerError> {
        validate_ns(ns)?;
        self.ensure_untracked(ns)?;

        let mut units = self.units.clone();
        units.push(Unit::new(ns, UnitState::InProduction, date.and_time(time)));
        self.commit(units, "custom_insert", ns)
    }

    /// Rewrites a production row in place, possibly renaming the unit.
    pub fn edit(&mut self, old_ns: &str, new_ns: &str, date: NaiveDate, time: NaiveTime) -> Result<(), LedgerError> {
        validate_ns(old_ns)?;
        validate_ns(new_ns)?;

        let index = self
            .units
            .iter()
            .position(|unit| unit.ns == old_ns && unit.is_in_production())
            .ok_or_else(|| LedgerError::UnknownUnit { ns: old_ns.to_string() })?;
        if new_ns != old_ns {
            self.ensure_untracked(new_ns)?;
        }

        let mut units = self.units.clone();
        let unit = &mut units[index];
        unit.ns = new_ns.to_string();
        unit.date = date;
        unit.time = time;
        self.commit(units, "edit", new_ns)
    }

    /// Final write at orderly shutdown.
    pub fn close(mut self) -> Result<(), LedgerError> {
        let tables = self.tables();
        self.store.save(&tables)?;
        debug!(units = self.units.len(), "ledger closed");
        Ok(())
    }

    fn ensure_untracked(&self, ns: &str) -> Result<(), LedgerError> {
        match self.state_of(ns) {
            Some(state) => Err(LedgerError::DuplicateActiveUnit { ns: ns.to_string(), state }),
            None => Ok(()),
        }
    }

    fn commit(&mut self, units: Vec<Unit>, operation: &str, ns: &str) -> Result<(), LedgerError> {
        let tables = tables_from_units(&units, &self.unreadable);
        if let Err(e) = self.store.save(&tables) {
            warn!(operation, ns, "save failed, changes discarded: {}", e);
            return Err(e.into());
        }

        self.units = units;
        info!(
            operation,
            ns,
            production = tables.production.len(),
            maintenance = tables.maintenance.len(),
            "committed"
        );
        for listener in self.listeners.iter_mut() {
            listener();
        }
        Ok(())
    }
}

fn validate_ns(ns: &str) -> Result<(), LedgerError> {
    if ns.is_empty() {
        return Err(LedgerError::validation("NS must not be empty"));
    }
    if ns.trim() != ns {
        return Err(LedgerError::validation(format!("NS '{}' has surrounding whitespace", ns)));
    }
    Ok(())
}

fn production_table(units: &[Unit]) -> Vec<ProductionRecord> {
    units
        .iter()
        .filter(|unit| unit.is_in_production())
        .map(|unit| ProductionRecord {
            ns: unit.ns.clone(),
            date: unit.date,
            time: unit.time,
        })
        .collect()
}

fn maintenance_table(units: &[Unit]) -> Vec<MaintenanceRecord> {
    units
        .iter()
        .filter_map(|unit| match unit.state {
            UnitState::InMaintenance(status) => Some(MaintenanceRecord {
                ns: unit.ns.clone(),
                status,
                date: unit.date,
                time: unit.time,
            }),
            UnitState::InProduction => None,
        })
        .collect()
}

fn tables_from_units(units: &[Unit], unreadable: &[UnreadableRow]) -> Tables {
    Tables {
        production: production_table(units),
        maintenance: maintenance_table(units),
        unreadable: unreadable.to_vec(),
    }
}

/// Rebuilds the unit list from stored tables.
///
/// Files written by older tools can hold the same NS more than once. The
/// maintenance table takes precedence over production and the first row of an
/// NS wins within a table; later duplicates are dropped with a warning.
fn units_from_tables(tables: Tables) -> Vec<Unit> {
    let in_maintenance: HashSet<&str> = tables.maintenance.iter().map(|record| record.ns.as_str()).collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut units = Vec::with_capacity(tables.production.len() + tables.maintenance.len());

    for record in &tables.production {
        if in_maintenance.contains(record.ns.as_str()) || !seen.insert(record.ns.clone()) {
            warn!(ns = %record.ns, "dropping duplicate production row");
            continue;
        }
        units.push(Unit {
            ns: record.ns.clone(),
            state: UnitState::InProduction,
            date: record.date,
            time: record.time,
        });
    }
    for record in &tables.maintenance {
        if !seen.insert(record.ns.clone()) {
            warn!(ns = %record.ns, "dropping duplicate maintenance row");
            continue;
        }
        units.push(Unit {
            ns: record.ns.clone(),
            state: UnitState::InMaintenance(record.status),
            date: record.date,
            time: record.time,
        });
    }
    units
}
