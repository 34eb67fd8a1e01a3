//! # BCD Clock Core Library
//!
//! This library renders a binary-coded-decimal clock face on small monochrome
//! displays. Every decimal digit of the time is drawn as its own column of dots:
//! a filled dot is a set bit, a hollow dot a clear bit, least-significant bit at
//! the bottom.
//!
//! ## Design Philosophy
//!
//! ### Redraw Only What Changed
//! The face is split into four regions (hours, minutes, seconds, date). On
//! every tick the [`face::ClockFace`] works out which of them actually changed
//! and redraws only those:
//! - **Every second**: the seconds region (two narrow columns)
//! - **Every minute**: minutes as well
//! - **Every hour**: hours as well
//! - **Every midnight**: the date label is re-formatted and redrawn
//!
//! ### Owned State
//! The controller owns a copy of the latest [`TimeSample`] and the computed
//! [`layout::ColumnLayout`]. Nothing lives in statics and nothing references the
//! host's time structure after a tick returns.
//!
//! ### Host Agnostic
//! Drawing goes through `embedded-graphics`, so any
//! `DrawTarget<Color = BinaryColor>` works: an SSD1306 panel, a memory LCD, or
//! the in-memory [`framebuffer::FrameBuffer`] used by the terminal host and
//! the tests.
//!
//! ## Core Types
//! - [`TimeSample`]: one immutable wall-clock snapshot per tick
//! - [`face::ClockFace`]: the invalidation state machine and render entry points
//! - [`digit::BitPattern`]: the dot column for one decimal digit

use chrono::{Datelike, Timelike, Weekday};

pub mod config;
pub mod connectivity;
pub mod date;
pub mod digit;
pub mod error;
pub mod face;
pub mod framebuffer;
pub mod layout;
pub mod region;
pub mod render;

pub use error::ClockError;

/// A wall-clock snapshot taken once per tick.
///
/// Copied out of the tick event and never aliased. A new tick supersedes the
/// previous sample entirely.
///
/// # Example
/// ```
/// use bcd_clock_lib::TimeSample;
/// use chrono::Weekday;
///
/// let sample = TimeSample::try_new(10, 15, 30, Weekday::Wed, 3, 5).unwrap();
/// assert_eq!(sample.hour, 10);
///
/// assert!(TimeSample::try_new(24, 0, 0, Weekday::Wed, 3, 5).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSample {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
    /// Second, 0-59
    pub second: u8,
    pub weekday: Weekday,
    /// Month of year, 1-12
    pub month: u8,
    /// Day of month, 1-31
    pub day: u8,
}

impl TimeSample {
    /// Build a sample, rejecting any field outside its calendar range.
    pub fn try_new(
        hour: u8,
        minute: u8,
        second: u8,
        weekday: Weekday,
        month: u8,
        day: u8,
    ) -> Result<Self, ClockError> {
        check_range("hour", hour, 0, 23)?;
        check_range("minute", minute, 0, 59)?;
        check_range("second", second, 0, 59)?;
        check_range("month", month, 1, 12)?;
        check_range("day", day, 1, 31)?;

        Ok(Self {
            hour,
            minute,
            second,
            weekday,
            month,
            day,
        })
    }

    /// Copy the fields out of any chrono date-time.
    ///
    /// chrono already guarantees every field is in range (leap seconds are
    /// folded into the nanosecond field), so this cannot fail.
    pub fn from_datetime<T: Datelike + Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
            weekday: time.weekday(),
            month: time.month() as u8,
            day: time.day() as u8,
        }
    }

    /// True when every field is inside its calendar range.
    pub fn is_valid(&self) -> bool {
        self.hour < 24
            && self.minute < 60
            && self.second < 60
            && (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
    }
}

fn check_range(field: &'static str, value: u8, min: u8, max: u8) -> Result<(), ClockError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ClockError::TimeOutOfRange {
            field,
            value: value.into(),
        })
    }
}
