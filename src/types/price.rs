// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Electricity price levels.
//!
//! The device-control service buckets the current electricity price into
//! five levels. Schedules map each level to an optional target temperature.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::types::ClosedSet;

/// A discrete tariff-cost bucket.
///
/// Levels are ordered from cheapest to most expensive.
///
/// # Examples
///
/// ```
/// use priceheat_lib::types::PriceLevel;
///
/// let level: PriceLevel = "VeryCheap".parse().unwrap();
/// assert_eq!(level, PriceLevel::VeryCheap);
/// assert!(PriceLevel::Cheap < PriceLevel::Expensive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceLevel {
    /// Well below the average price.
    VeryCheap,
    /// Below the average price.
    Cheap,
    /// Around the average price.
    Normal,
    /// Above the average price.
    Expensive,
    /// Well above the average price.
    VeryExpensive,
}

impl PriceLevel {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VeryCheap => "VeryCheap",
            Self::Cheap => "Cheap",
            Self::Normal => "Normal",
            Self::Expensive => "Expensive",
            Self::VeryExpensive => "VeryExpensive",
        }
    }
}

impl ClosedSet for PriceLevel {
    const ALL: &'static [Self] = &[
        Self::VeryCheap,
        Self::Cheap,
        Self::Normal,
        Self::Expensive,
        Self::VeryExpensive,
    ];

    fn as_str(&self) -> &'static str {
        PriceLevel::as_str(self)
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceLevel {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == s)
            .ok_or(FieldError::UnknownPriceLevel)
    }
}

/// Target temperature per price level.
///
/// Levels without an entry leave the room uncontrolled while that level is
/// active.
pub type PriceLevelTemps = BTreeMap<PriceLevel, f64>;

/// The price currently in effect, as reported by `prices/current`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPrice {
    /// The level bucket of the current price.
    pub level: PriceLevel,
    /// The total price per kWh.
    pub price: f64,
    /// When this price started to apply.
    pub starts_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_level_from_str() {
        assert_eq!("Normal".parse::<PriceLevel>(), Ok(PriceLevel::Normal));
        assert_eq!(
            "VeryExpensive".parse::<PriceLevel>(),
            Ok(PriceLevel::VeryExpensive)
        );
    }

    #[test]
    fn price_level_is_case_sensitive() {
        assert_eq!(
            "normal".parse::<PriceLevel>(),
            Err(FieldError::UnknownPriceLevel)
        );
    }

    #[test]
    fn temps_serialize_as_object() {
        let mut temps = PriceLevelTemps::new();
        temps.insert(PriceLevel::Cheap, 22.0);
        temps.insert(PriceLevel::VeryCheap, 23.5);
        let json = serde_json::to_string(&temps).unwrap();
        assert_eq!(json, r#"{"VeryCheap":23.5,"Cheap":22.0}"#);
    }

    #[test]
    fn current_price_deserializes() {
        let price: CurrentPrice = serde_json::from_str(
            r#"{"level":"Expensive","price":2.31,"starts_at":"2024-01-15T10:00:00+01:00"}"#,
        )
        .unwrap();
        assert_eq!(price.level, PriceLevel::Expensive);
    }
}
