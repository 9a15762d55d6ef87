//! Ledger session shared by the mutating commands.
//!
//! A session loads the ledger once, listens for its "state changed" signal and
//! redraws both tables after a committed mutation, then saves once more when
//! the command finishes.

use crate::{
    db::store::SqliteStore,
    libs::{error::LedgerError, ledger::UnitLedger, messages::Message, view::View},
    msg_debug, msg_print, msg_warning,
};
use anyhow::Result;
use std::cell::Cell;
use std::rc::Rc;

pub struct Session {
    ledger: UnitLedger<SqliteStore>,
    changed: Rc<Cell<bool>>,
}

impl Session {
    pub fn open() -> Result<Self> {
        let store = SqliteStore::open_default()?;
        msg_debug!(Message::StoreLocation(store.path().display().to_string()));

        let mut ledger = UnitLedger::open(store);
        if !ledger.unreadable().is_empty() {
            msg_warning!(Message::UnreadableRowsKept(ledger.unreadable().len()));
        }
        let changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&changed);
        ledger.subscribe(move || flag.set(true));

        Ok(Session { ledger, changed })
    }

    pub fn ledger(&self) -> &UnitLedger<SqliteStore> {
        &self.ledger
    }

    /// Runs a ledger operation, redrawing the tables if it committed.
    pub fn apply<F>(&mut self, operation: F) -> Result<()>
    where
        F: FnOnce(&mut UnitLedger<SqliteStore>) -> Result<(), LedgerError>,
    {
        operation(&mut self.ledger).map_err(failure)?;
        if self.changed.replace(false) {
            self.redraw();
        }
        Ok(())
    }

    pub fn redraw(&self) {
        msg_print!(Message::ProductionTableHeader, true);
        let production = self.ledger.production();
        View::production(&production);
        msg_print!(Message::ProducedTotal(production.len()));

        let maintenance = self.ledger.maintenance();
        if !maintenance.is_empty() {
            msg_print!(Message::MaintenanceTableHeader, true);
            View::maintenance(&maintenance);
        }
    }

    pub fn close(self) -> Result<()> {
        self.ledger.close().map_err(failure)
    }
}

fn failure(e: LedgerError) -> anyhow::Error {
    if e.is_persistence() {
        msg_warning!(Message::SaveFailedDataAtRisk);
    }
    e.into()
}
