use std::fs::Metadata;
use std::time::SystemTime;

use chrono::{DateTime, Local, Utc};

#[allow(clippy::cast_possible_wrap)]
#[must_use]
pub fn system_time_to_datetime(time: std::io::Result<SystemTime>) -> Option<DateTime<Utc>> {
    time.ok().and_then(|t| {
        t.duration_since(SystemTime::UNIX_EPOCH)
            .ok()
            .and_then(|d| DateTime::from_timestamp(d.as_secs() as i64, d.subsec_nanos()))
    })
}

/// Returns `(created, modified)` in local time.
///
/// Birth time is not available on every filesystem; it falls back to the
/// modification time, which itself falls back to "now".
#[must_use]
pub fn entry_times(metadata: &Metadata) -> (DateTime<Local>, DateTime<Local>) {
    let modified =
        system_time_to_datetime(metadata.modified()).map_or_else(Local::now, |dt| dt.with_timezone(&Local));
    let created =
        system_time_to_datetime(metadata.created()).map_or_else(|| modified, |dt| dt.with_timezone(&Local));

    (created, modified)
}
