//! Location of the files unitrack keeps between runs.
//!
//! The store (`unitrack.db`) and the configuration (`config.json`) share one
//! per-user directory:
//!
//! - Linux and other Unix: `~/.local/share/unitrack/unitrack`
//! - macOS: `~/Library/Application Support/unitrack/unitrack`
//! - Windows: `%LOCALAPPDATA%\unitrack\unitrack`
//!
//! Setting `UNITRACK_DATA_DIR` replaces the whole directory, which is how a
//! shop-floor machine points several operators at a shared folder.

use anyhow::Result;
use std::env::consts::OS;
use std::env::var_os;
use std::fs;
use std::path::{Path, PathBuf};

pub const VENDOR_NAME: &str = "unitrack";
pub const APP_NAME: &str = "unitrack";

/// Overrides the platform data directory when set.
pub const DATA_DIR_ENV: &str = "UNITRACK_DATA_DIR";

#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        match var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::at(dir),
            _ => Self::at(platform_dir()),
        }
    }

    /// Data directory rooted at `base_path`.
    pub fn at(base_path: impl Into<PathBuf>) -> Self {
        DataStorage {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of `file_name` inside the data directory. The directory is created on first use.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_path)?;
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn platform_dir() -> PathBuf {
    let home = || var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let root = match OS {
        "windows" => var_os("LOCALAPPDATA").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
        "macos" => home().join("Library").join("Application Support"),
        _ => home().join(".local").join("share"),
    };
    root.join(VENDOR_NAME).join(APP_NAME)
}
