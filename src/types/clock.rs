// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clock time and time window types for schedules.
//!
//! # Types
//!
//! - [`TimeOfDay`] - A wall-clock time in strict `HH:MM` 24 hour format
//! - [`TimeWindow`] - An ordered `(from, to)` pair of clock times

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// A wall-clock time with minute precision.
///
/// Parsing is strict: the input must be exactly five characters with a `:`
/// at index 2. `"9:00"` is rejected, `"09:00"` is accepted.
///
/// # Examples
///
/// ```
/// use priceheat_lib::types::TimeOfDay;
///
/// let t: TimeOfDay = "07:05".parse().unwrap();
/// assert_eq!(t.hour(), 7);
/// assert_eq!(t.minute(), 5);
/// assert_eq!(t.to_string(), "07:05");
///
/// assert!("9:00".parse::<TimeOfDay>().is_err());
/// assert!("24:00".parse::<TimeOfDay>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Creates a clock time.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::InvalidTime` if the hour exceeds 23 or the minute
    /// exceeds 59.
    pub fn new(hour: u8, minute: u8) -> Result<Self, FieldError> {
        if hour > 23 || minute > 59 {
            return Err(FieldError::InvalidTime);
        }
        Ok(Self { hour, minute })
    }

    /// Returns the hour (0-23).
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute (0-59).
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Converts to a chrono time at second zero.
    #[must_use]
    pub fn to_naive_time(&self) -> chrono::NaiveTime {
        chrono::NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(chrono::NaiveTime::MIN)
    }
}

fn two_digits(pair: &[u8]) -> Option<u8> {
    match pair {
        [tens, ones] if tens.is_ascii_digit() && ones.is_ascii_digit() => {
            Some((tens - b'0') * 10 + (ones - b'0'))
        }
        _ => None,
    }
}

impl FromStr for TimeOfDay {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(FieldError::InvalidTime);
        }
        let hour = two_digits(&bytes[0..2]).ok_or(FieldError::InvalidTime)?;
        let minute = two_digits(&bytes[3..5]).ok_or(FieldError::InvalidTime)?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A pair of clock times bounding when a schedule rule applies.
///
/// No ordering is enforced between `from` and `to`; a window such as
/// `20:00`-`08:00` is accepted as is. See [`TimeWindow::spans_midnight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window.
    pub from: TimeOfDay,
    /// End of the window.
    pub to: TimeOfDay,
}

impl TimeWindow {
    /// Creates a window from two clock times.
    #[must_use]
    pub const fn new(from: TimeOfDay, to: TimeOfDay) -> Self {
        Self { from, to }
    }

    /// Returns true if the end is earlier than the start.
    ///
    /// Such windows pass validation. Whether the remote service reads them
    /// as overnight spans is not known to this crate.
    #[must_use]
    pub fn spans_midnight(&self) -> bool {
        self.to < self.from
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
