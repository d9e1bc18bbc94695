use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date as entered in the add-game form
pub fn parse_game_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("Invalid date '{}': {}", input.trim(), e)))
}

/// Identifier for a record created at `now`.
///
/// Ids are millisecond timestamps. When two records are created within the
/// same millisecond (or the clock went backwards) the id is bumped past the
/// largest existing one so it stays unique within the store.
pub fn next_record_id(now: DateTime<Utc>, current_max: Option<i64>) -> Result<i64> {
    let candidate = now.timestamp_millis();
    match current_max {
        Some(max) if candidate <= max => max
            .checked_add(1)
            .ok_or_else(|| Error::Internal("record id space exhausted".to_string())),
        _ => Ok(candidate),
    }
}
