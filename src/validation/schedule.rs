// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validators for schedule-specific fields.
//!
//! These enforce the schedule invariants: a deduplicated set of known
//! weekdays, positionally paired `HH:MM` time windows, and at most one
//! temperature per price level.

use super::ValidationResult;
use super::field;
use crate::error::FieldError;
use crate::types::{PriceLevel, PriceLevelTemps, TimeOfDay, TimeWindow, Weekday};

/// Requires one of the five price level literals.
///
/// # Errors
///
/// Returns `FieldError::PriceLevelRequired` if the value is missing or blank
/// and `FieldError::UnknownPriceLevel` if it is not a known level.
pub fn price_level(raw: Option<&str>) -> ValidationResult<PriceLevel> {
    match raw {
        None => Err(FieldError::PriceLevelRequired),
        Some(value) if value.trim().is_empty() => Err(FieldError::PriceLevelRequired),
        Some(value) => value.parse(),
    }
}

/// Validates the weekday selection of a schedule.
///
/// Entries are uppercased before matching, and repeated days are dropped,
/// keeping the order in which each day first appears.
///
/// # Examples
///
/// ```
/// use priceheat_lib::types::Weekday;
/// use priceheat_lib::validation::schedule::days;
///
/// let raw = ["MON".to_string(), "mon".to_string(), "TUE".to_string()];
/// assert_eq!(days(&raw).unwrap(), vec![Weekday::Mon, Weekday::Tue]);
/// assert!(days(&[]).is_err());
/// ```
///
/// # Errors
///
/// Returns `FieldError::NoDays` if no day is given and
/// `FieldError::UnknownWeekday` if any entry is not `MON`..`SUN`.
pub fn days(raw: &[String]) -> ValidationResult<Vec<Weekday>> {
    if raw.is_empty() {
        return Err(FieldError::NoDays);
    }
    let mut selected = Vec::with_capacity(raw.len().min(7));
    for entry in raw {
        let day: Weekday = entry.trim().to_uppercase().parse()?;
        if !selected.contains(&day) {
            selected.push(day);
        }
    }
    Ok(selected)
}

/// Pairs window start and end times positionally into time windows.
///
/// `from[i]` pairs with `to[i]`. Every entry must be exactly `HH:MM`; the
/// first malformed entry fails the whole list. No ordering is required
/// between the start and end of a window.
///
/// # Errors
///
/// Returns `FieldError::InvalidTimeWindows` if the lists are empty or of
/// different lengths and `FieldError::InvalidTime` for a malformed entry.
pub fn hours(from: &[String], to: &[String]) -> ValidationResult<Vec<TimeWindow>> {
    if from.is_empty() || from.len() != to.len() {
        return Err(FieldError::InvalidTimeWindows);
    }
    from.iter()
        .zip(to)
        .map(|(start, end)| -> ValidationResult<TimeWindow> {
            let start: TimeOfDay = start.parse()?;
            let end: TimeOfDay = end.parse()?;
            Ok(TimeWindow::new(start, end))
        })
        .collect()
}

/// Pairs price levels and temperatures positionally into the level map.
///
/// A blank temperature leaves its level out of the map.
///
/// # Errors
///
/// Returns `FieldError::InvalidTemperatures` if the lists differ in length,
/// the errors of [`price_level`] and [`field::optional_temperature`] for a
/// malformed entry, and `FieldError::DuplicatePriceLevel` if a level is
/// given twice.
pub fn temps(levels: &[String], values: &[String]) -> ValidationResult<PriceLevelTemps> {
    if levels.len() != values.len() {
        return Err(FieldError::InvalidTemperatures);
    }
    let mut temps = PriceLevelTemps::new();
    let mut seen = Vec::with_capacity(levels.len());
    for (level, value) in levels.iter().zip(values) {
        let level = price_level(Some(level))?;
        if seen.contains(&level) {
            return Err(FieldError::DuplicatePriceLevel);
        }
        seen.push(level);
        if let Some(temp) = field::optional_temperature(Some(value))? {
            temps.insert(level, temp);
        }
    }
    Ok(temps)
}
