//! Second-precision UTC timestamps (`2024-05-01T09:30:00Z`).

use chrono::{DateTime, Utc};
use serde::Serializer;

/// Wire format for every timestamp in responses.
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Serializes a timestamp in [`FORMAT`].
pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&at.format(FORMAT))
}
