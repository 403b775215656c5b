//! Countdown to the next local midnight of a time zone.
//!
//! All instants are Unix milliseconds. Zones are anything implementing
//! [`chrono::TimeZone`]: a [`FixedOffset`] such as Singapore's UTC+8, or a
//! named IANA zone with the `tz` feature.
//!
//! ```
//! use coverwarp::countdown::{Countdown, SINGAPORE_OFFSET_MINUTES, next_midnight_ms};
//!
//! // 2025-12-31 15:59:59 UTC is one second before midnight in Singapore.
//! let now = 1_767_196_799_000;
//! let target = next_midnight_ms(now, SINGAPORE_OFFSET_MINUTES).unwrap();
//! assert_eq!(Countdown::between(now, target).to_string(), "00:00:01");
//! ```

use core::fmt;

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};

/// UTC+8, no daylight saving.
pub const SINGAPORE_OFFSET_MINUTES: i32 = 8 * 60;

/// Longest daylight-saving gap searched when midnight does not exist.
const MAX_GAP_MINUTES: u32 = 180;

/// The first local midnight strictly after `now_ms` in a zone that is
/// `utc_offset_minutes` ahead of UTC.
///
/// At exactly local midnight the result is the following midnight, 24
/// hours later. `None` when the offset is a day or more, or the instant is
/// outside the representable calendar range.
pub fn next_midnight_ms(now_ms: i64, utc_offset_minutes: i32) -> Option<i64> {
    let offset = FixedOffset::east_opt(utc_offset_minutes.checked_mul(60)?)?;
    next_midnight_in(now_ms, &offset)
}

/// The first local midnight strictly after `now_ms` in `tz`.
///
/// When daylight saving skips midnight, the first local time after the gap
/// is used. When midnight happens twice, the earlier one wins.
///
/// ```
/// use chrono::FixedOffset;
/// use coverwarp::countdown::next_midnight_in;
///
/// let utc = FixedOffset::east_opt(0).unwrap();
/// assert_eq!(next_midnight_in(1, &utc), Some(86_400_000));
/// ```
pub fn next_midnight_in<Tz: TimeZone>(now_ms: i64, tz: &Tz) -> Option<i64> {
    let now = DateTime::<Utc>::from_timestamp_millis(now_ms)?.with_timezone(tz);
    let midnight = now.date_naive().succ_opt()?.and_hms_opt(0, 0, 0)?;
    resolve_local(tz, midnight).map(|dt| dt.timestamp_millis())
}

fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    let mut candidate = local;
    for _ in 0..=MAX_GAP_MINUTES {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(dt) => return Some(dt),
            LocalResult::Ambiguous(earliest, _) => return Some(earliest),
            LocalResult::None => {
                candidate = candidate.checked_add_signed(TimeDelta::minutes(1))?;
            }
        }
    }
    debug!(%local, "no valid local time after midnight gap");
    None
}

/// Whole seconds left until a target instant, never negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Countdown {
    pub total_secs: u64,
}

impl Countdown {
    /// Time left from `now_ms` to `target_ms`, floored to whole seconds and
    /// clamped at zero once the target has passed.
    pub fn between(now_ms: i64, target_ms: i64) -> Self {
        let diff = target_ms.saturating_sub(now_ms).max(0);
        Self {
            total_secs: (diff / 1000) as u64,
        }
    }

    pub fn hours(&self) -> u64 {
        self.total_secs / 3600
    }

    pub fn minutes(&self) -> u64 {
        (self.total_secs % 3600) / 60
    }

    pub fn seconds(&self) -> u64 {
        self.total_secs % 60
    }

    /// Whether the countdown has reached zero.
    pub fn is_finished(&self) -> bool {
        self.total_secs == 0
    }
}

impl fmt::Display for Countdown {
    /// `HH:MM:SS`, zero padded. Hours keep growing past 99.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}
