// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for heating schedules and actions.
//!
//! Each type is only constructible in a valid state, so documents built from
//! these types cannot carry malformed values.
//!
//! # Types
//!
//! - [`Weekday`] - `MON`..`SUN`
//! - [`PriceLevel`] - Five tariff-cost buckets, `VeryCheap` to `VeryExpensive`
//! - [`TimeOfDay`] - Strict `HH:MM` 24 hour clock time
//! - [`TimeWindow`] - A `(from, to)` pair of clock times
//! - [`ActionType`] - `ON` / `OFF` for temperature actions
//! - [`Period`] - `day` / `week` / `month` for temperature logs

mod action;
mod clock;
mod price;
mod weekday;

pub use action::{ActionType, Period};
pub use clock::{TimeOfDay, TimeWindow};
pub use price::{CurrentPrice, PriceLevel, PriceLevelTemps};
pub use weekday::Weekday;

/// A closed set of string literals.
///
/// Implemented by enums whose wire representation is one of a fixed list of
/// literals. Used by [`one_of`](crate::validation::field::one_of) to validate
/// raw input against the set.
pub trait ClosedSet: Sized + Copy + 'static {
    /// Every member, in presentation order.
    const ALL: &'static [Self];

    /// Returns the literal for this member.
    fn as_str(&self) -> &'static str;

    /// Looks up the member whose literal is exactly `literal`.
    #[must_use]
    fn from_literal(literal: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.as_str() == literal)
    }

    /// Lists the literals as `"A, B or C"`.
    #[must_use]
    fn describe() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(Self::as_str).collect();
        match names.split_last() {
            Some((last, [])) => (*last).to_string(),
            Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_joins_literals() {
        assert_eq!(ActionType::describe(), "ON or OFF");
        assert_eq!(Period::describe(), "day, week or month");
    }

    #[test]
    fn from_literal_is_exact() {
        assert_eq!(Period::from_literal("day"), Some(Period::Day));
        assert_eq!(Period::from_literal("DAY"), None);
    }
}
