use chrono::{DateTime, Utc};

/// Format used by SQLite's `CURRENT_TIMESTAMP` (UTC, second precision).
pub const SQLITE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current UTC time in SQLite `DATETIME` text form.
pub fn now_sqlite_datetime() -> String {
    to_sqlite_datetime(Utc::now())
}

/// Format a UTC instant in SQLite `DATETIME` text form.
pub fn to_sqlite_datetime(at: DateTime<Utc>) -> String {
    at.format(SQLITE_DATETIME_FORMAT).to_string()
}
