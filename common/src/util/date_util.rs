use chrono::{SecondsFormat, Utc};
use mongodb::bson::DateTime;

/// Current instant as a BSON timestamp.
pub fn now() -> DateTime {
    DateTime::now()
}

/// RFC 3339 (UTC, millisecond precision) rendering of a stored timestamp.
pub fn time_to_str(time: DateTime) -> String {
    chrono::DateTime::<Utc>::from_timestamp_millis(time.timestamp_millis())
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
