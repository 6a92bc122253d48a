use chrono::{DateTime, NaiveDateTime, Utc};

/// The two timestamp layouts the API emits for `lastupdated`.
/// Day-first is the documented one; ISO-ish shows up on some endpoints.
const LASTUPDATED_FORMATS: [&str; 2] = ["%d/%m/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Layout the API expects for the `if-modified-since` request header.
const IF_MODIFIED_SINCE_FORMAT: &str = "%d/%m/%Y %I:%M:%S %p";

pub fn now_i64() -> i64 {
    Utc::now().timestamp()
}

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Parse an upstream `lastupdated` value, trying each known layout.
/// Returns `None` for an unrecognized layout rather than failing the
/// whole record; the key itself is still required.
pub fn parse_last_updated(raw: &str) -> Option<NaiveDateTime> {
    LASTUPDATED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

pub fn format_if_modified_since(dt: DateTime<Utc>) -> String {
    dt.format(IF_MODIFIED_SINCE_FORMAT).to_string()
}
