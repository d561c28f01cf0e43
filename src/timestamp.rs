//! Conversion of per-line timestamps into epoch milliseconds.
//!
//! Malformed timestamps degrade to `None` instead of failing: a single bad
//! line must never abort a log read.

use chrono::{DateTime, FixedOffset};

use crate::models::LogTimestamp;

const MILLIS_PER_SECOND: i64 = 1000;

/// Accepted when a textual timestamp is not RFC 3339, e.g. `2021-10-27 00:00:00.123+0000`.
const SPACE_SEPARATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%z";

/// Normalize an optional timestamp into milliseconds since the Unix epoch.
///
/// Instants are truncated to whole seconds before scaling, so sub-second
/// precision is dropped (pre-epoch instants round toward negative infinity).
/// Values that are already epoch milliseconds pass through unchanged.
pub fn to_epoch_millis(timestamp: Option<&LogTimestamp>) -> Option<i64> {
    match timestamp? {
        LogTimestamp::EpochMillis(millis) => Some(*millis),
        LogTimestamp::Instant(dt) => instant_to_millis(dt),
        LogTimestamp::Text(text) => match parse_text(text) {
            Some(dt) => instant_to_millis(&dt),
            None => {
                tracing::trace!("Ignoring unrecognized timestamp {:?}", text);
                None
            }
        },
    }
}

fn instant_to_millis(dt: &DateTime<FixedOffset>) -> Option<i64> {
    dt.timestamp().checked_mul(MILLIS_PER_SECOND)
}

/// Must accept at least what `LogTimestamp` decoding (chrono's `FromStr`)
/// accepts, so cached and freshly fetched content normalize alike.
fn parse_text(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    text.parse::<DateTime<FixedOffset>>()
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .or_else(|_| DateTime::parse_from_str(text, SPACE_SEPARATED_FORMAT))
        .ok()
}
