//! Usage: RFC 3339 timestamp helpers for the persisted install record.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub(crate) fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

pub(crate) fn is_valid_rfc3339(value: &str) -> bool {
    OffsetDateTime::parse(value, &Rfc3339).is_ok()
}
