use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "unitrack.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> rusqlite::Result<Db> {
        let conn = Connection::open(path)?;
        Ok(Db { conn })
    }

    /// Opens an existing database without creating it.
    pub fn open_read_only(path: &Path) -> rusqlite::Result<Db> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX)?;
        Ok(Db { conn })
    }

    /// Resolves the store location: the configured path if one is set,
    /// otherwise `unitrack.db` in the application data directory.
    pub fn default_path() -> Result<PathBuf> {
        let config = Config::read()?;
        match config.store.and_then(|store| store.path) {
            Some(path) => Ok(path),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }
}
