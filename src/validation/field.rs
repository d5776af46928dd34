// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validators for single form fields.
//!
//! Every validator is a total function from an optional raw value to a
//! [`ValidationResult`]. Blank input (empty or whitespace only) is treated
//! the same as a missing field.

use std::net::Ipv4Addr;
use std::num::NonZeroU32;

use chrono::{NaiveDate, NaiveDateTime};

use super::ValidationResult;
use crate::error::FieldError;
use crate::types::{ClosedSet, TimeOfDay};

/// Returns the trimmed value if it is present and not blank.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Requires a non-blank string and returns it trimmed.
///
/// # Examples
///
/// ```
/// use priceheat_lib::validation::field::non_empty_string;
///
/// assert_eq!(non_empty_string(Some("  Kitchen ")).unwrap(), "Kitchen");
/// assert!(non_empty_string(Some("")).is_err());
/// assert!(non_empty_string(None).is_err());
/// ```
///
/// # Errors
///
/// Returns `FieldError::Required` if the value is missing or blank.
pub fn non_empty_string(raw: Option<&str>) -> ValidationResult<String> {
    present(raw)
        .map(str::to_string)
        .ok_or(FieldError::Required)
}

/// Requires a non-empty list whose elements are all non-blank.
///
/// # Errors
///
/// Returns `FieldError::EmptyList` if the list is missing, empty, or
/// contains a blank element.
pub fn non_empty_list(raw: Option<&[String]>) -> ValidationResult<Vec<String>> {
    match raw {
        Some(items) if !items.is_empty() && items.iter().all(|i| !i.trim().is_empty()) => {
            Ok(items.to_vec())
        }
        _ => Err(FieldError::EmptyList),
    }
}

/// Requires a dotted-quad IPv4 address with every octet in 0-255.
///
/// # Examples
///
/// ```
/// use std::net::Ipv4Addr;
/// use priceheat_lib::validation::field::ipv4_address;
///
/// assert_eq!(ipv4_address(Some("192.168.0.1")).unwrap(), Ipv4Addr::new(192, 168, 0, 1));
/// assert!(ipv4_address(Some("256.1.1.1")).is_err());
/// ```
///
/// # Errors
///
/// Returns `FieldError::IpRequired` if the value is missing or blank and
/// `FieldError::InvalidIpv4` if it is not an IPv4 address.
pub fn ipv4_address(raw: Option<&str>) -> ValidationResult<Ipv4Addr> {
    let value = present(raw).ok_or(FieldError::IpRequired)?;
    value.parse().map_err(|_| FieldError::InvalidIpv4)
}

/// Requires a strictly positive whole number.
///
/// # Errors
///
/// Returns `FieldError::Required` if the value is missing,
/// `FieldError::NotWholeNumber` if it is not an integer that fits in 32
/// bits, and `FieldError::NotPositive` if it is zero or negative.
pub fn positive_non_zero_integer(raw: Option<&str>) -> ValidationResult<NonZeroU32> {
    let value = present(raw).ok_or(FieldError::Required)?;
    let number: i64 = value.parse().map_err(|_| FieldError::NotWholeNumber)?;
    if number <= 0 {
        return Err(FieldError::NotPositive);
    }
    u32::try_from(number)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(FieldError::NotWholeNumber)
}

/// Accepts a blank value as `None`, otherwise requires a finite number.
///
/// # Errors
///
/// Returns `FieldError::NotANumber` if a non-blank value is not a finite
/// decimal number.
pub fn optional_temperature(raw: Option<&str>) -> ValidationResult<Option<f64>> {
    let Some(value) = present(raw) else {
        return Ok(None);
    };
    match value.parse::<f64>() {
        Ok(temp) if temp.is_finite() => Ok(Some(temp)),
        _ => Err(FieldError::NotANumber),
    }
}

/// Combines a `YYYY-MM-DD` date and an `HH:MM` time into one timestamp.
///
/// # Examples
///
/// ```
/// use priceheat_lib::validation::field::date_time;
///
/// let at = date_time(Some("2024-01-15"), Some("22:30")).unwrap();
/// assert_eq!(at.to_string(), "2024-01-15 22:30:00");
/// ```
///
/// # Errors
///
/// Returns `FieldError::Required` if either part is missing,
/// `FieldError::InvalidDate` for a malformed date and
/// `FieldError::InvalidTime` for a malformed time.
pub fn date_time(date: Option<&str>, time: Option<&str>) -> ValidationResult<NaiveDateTime> {
    let date = present(date).ok_or(FieldError::Required)?;
    let time = present(time).ok_or(FieldError::Required)?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| FieldError::InvalidDate)?;
    let time: TimeOfDay = time.parse()?;
    Ok(date.and_time(time.to_naive_time()))
}

/// Like [`date_time`], but an entirely absent pair is valid and yields `None`.
///
/// # Errors
///
/// Returns `FieldError::PartialDateTime` if only one of the parts is present,
/// otherwise the errors of [`date_time`].
pub fn date_time_or_null(
    date: Option<&str>,
    time: Option<&str>,
) -> ValidationResult<Option<NaiveDateTime>> {
    match (present(date), present(time)) {
        (None, None) => Ok(None),
        (Some(_), None) | (None, Some(_)) => Err(FieldError::PartialDateTime),
        (date, time) => date_time(date, time).map(Some),
    }
}

/// Requires the value to be exactly one of the literals of a closed set.
///
/// # Examples
///
/// ```
/// use priceheat_lib::types::ActionType;
/// use priceheat_lib::validation::field::one_of;
///
/// assert_eq!(one_of::<ActionType>(Some("ON")).unwrap(), ActionType::On);
///
/// let err = one_of::<ActionType>(Some("on")).unwrap_err();
/// assert_eq!(err.to_string(), "Must be ON or OFF");
/// ```
///
/// # Errors
///
/// Returns `FieldError::NotOneOf` listing the accepted literals.
pub fn one_of<T: ClosedSet>(raw: Option<&str>) -> ValidationResult<T> {
    raw.and_then(T::from_literal)
        .ok_or_else(|| FieldError::NotOneOf {
            allowed: T::describe(),
        })
}
