//! Temporal cell parsing for the time-series branch.
//!
//! Cells that fail to parse are treated as null by the caller; the shared
//! dataset is never modified.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
];

/// Try to interpret one cell as a date or datetime value.
pub fn parse_temporal(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cell, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cell, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    None
}

/// Axis label for a date-group key.
pub fn format_key(key: &NaiveDateTime) -> String {
    if key.time() == NaiveTime::MIN {
        key.format("%Y-%m-%d").to_string()
    } else {
        key.format("%Y-%m-%d %H:%M").to_string()
    }
}
