//! Error types for the ledger and the record store.
//!
//! Every ledger failure is recoverable: the in-memory state is left exactly as
//! it was before the call and the offending NS is carried in the error so the
//! operator can correct the input and try again.

use super::unit::UnitState;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{} could not be fully read; refusing to overwrite it", path.display())]
    Unreadable { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid input: {reason}")]
    Validation { reason: String },
    #[error("machine with NS {ns} is already {state}")]
    DuplicateActiveUnit { ns: String, state: UnitState },
    #[error("machine with NS {ns} was not found")]
    UnknownUnit { ns: String },
    #[error("failed to save records: {0}")]
    Persistence(#[from] StoreError),
}

impl LedgerError {
    pub fn validation(reason: impl Into<String>) -> Self {
        LedgerError::Validation { reason: reason.into() }
    }

    /// NS the failure refers to, when there is one.
    pub fn ns(&self) -> Option<&str> {
        match self {
            LedgerError::DuplicateActiveUnit { ns, .. } | LedgerError::UnknownUnit { ns } => Some(ns),
            _ => None,
        }
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, LedgerError::Persistence(_))
    }
}
