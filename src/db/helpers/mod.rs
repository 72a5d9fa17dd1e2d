use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

/// Converts a stored rating column back to u8; the schema only ever holds
/// 1-10 so anything else means the row was written outside the app.
pub fn to_rating(value: i64, field: &str) -> Result<u8> {
    u8::try_from(value).map_err(|_| anyhow!("{field} holds out-of-range value {value}"))
}
