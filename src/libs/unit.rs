//! Unit records and lifecycle states.
//!
//! A unit is a manufactured machine identified by its serial number (NS).
//! Every tracked unit lives in exactly one place at a time: it is either
//! counted in production or withdrawn for maintenance. The ledger keeps one
//! [`Unit`] per NS; the two persisted tables are projections of that list.
//!
//! ## Table Projections
//!
//! - [`ProductionRecord`]: `NS, Date, Time` rows of the `Producao` table
//! - [`MaintenanceRecord`]: `NS, Status, Date, Time` rows of the `Manutencao` table
//!
//! ## Usage
//!
//! ```rust
//! use unitrack::libs::unit::{Unit, UnitState};
//! use chrono::{NaiveDate, NaiveTime};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let time = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
//! let unit = Unit::new("SN100", UnitState::InProduction, date.and_time(time));
//! assert!(unit.is_in_production());
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date layout used by the store, the exports and the CLI.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time-of-day layout used by the store, the exports and the CLI.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Where a unit was before it entered maintenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    /// The unit had been counted as produced.
    InProduction,
    /// The unit was registered straight from stock, never counted as produced.
    InStock,
}

impl MaintenanceStatus {
    /// Label written to the `Status` column.
    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceStatus::InProduction => "Produção",
            MaintenanceStatus::InStock => "Estoque",
        }
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MaintenanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Produção" | "Producao" | "InProduction" => Ok(MaintenanceStatus::InProduction),
            "Estoque" | "InStock" => Ok(MaintenanceStatus::InStock),
            other => Err(format!("unknown maintenance status '{}'", other)),
        }
    }
}

/// Current location of a tracked unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    InProduction,
    InMaintenance(MaintenanceStatus),
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitState::InProduction => f.write_str("in production"),
            UnitState::InMaintenance(_) => f.write_str("in maintenance"),
        }
    }
}

/// A tracked unit together with the timestamp of its last transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub ns: String,
    pub state: UnitState,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl Unit {
    pub fn new(ns: &str, state: UnitState, at: NaiveDateTime) -> Self {
        Unit {
            ns: ns.to_string(),
            state,
            date: at.date(),
            time: at.time(),
        }
    }

    pub fn is_in_production(&self) -> bool {
        self.state == UnitState::InProduction
    }

    pub fn is_in_maintenance(&self) -> bool {
        matches!(self.state, UnitState::InMaintenance(_))
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// A row of the `Producao` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionRecord {
    #[serde(rename = "NS")]
    pub ns: String,
    #[serde(rename = "Date", with = "date_format")]
    pub date: NaiveDate,
    #[serde(rename = "Time", with = "time_format")]
    pub time: NaiveTime,
}

impl ProductionRecord {
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// A row of the `Manutencao` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    #[serde(rename = "NS")]
    pub ns: String,
    #[serde(rename = "Status", with = "status_format")]
    pub status: MaintenanceStatus,
    #[serde(rename = "Date", with = "date_format")]
    pub date: NaiveDate,
    #[serde(rename = "Time", with = "time_format")]
    pub time: NaiveTime,
}

/// A stored row whose date, time or status could not be parsed.
///
/// Such rows are not units. They are carried verbatim from load to save so a
/// hand-edited or foreign row is never lost by a write-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreadableRow {
    Production {
        ns: String,
        date: String,
        time: String,
    },
    Maintenance {
        ns: String,
        status: String,
        date: String,
        time: String,
    },
}

impl UnreadableRow {
    pub fn ns(&self) -> &str {
        match self {
            UnreadableRow::Production { ns, .. } | UnreadableRow::Maintenance { ns, .. } => ns,
        }
    }
}

/// Both persisted tables, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    #[serde(rename = "Producao")]
    pub production: Vec<ProductionRecord>,
    #[serde(rename = "Manutencao")]
    pub maintenance: Vec<MaintenanceRecord>,
    /// Rows kept as stored; never exported.
    #[serde(skip)]
    pub unreadable: Vec<UnreadableRow>,
}

impl Tables {
    pub fn is_empty(&self) -> bool {
        self.production.is_empty() && self.maintenance.is_empty() && self.unreadable.is_empty()
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

mod date_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

mod time_format {
    use super::TIME_FORMAT;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

mod status_format {
    use super::MaintenanceStatus;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(status: &MaintenanceStatus, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(status.label())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MaintenanceStatus, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
