// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Price-driven heating schedules.

use serde::{Deserialize, Serialize};

use crate::document::impl_document;
use crate::types::{PriceLevel, PriceLevelTemps, TimeWindow, Weekday};

/// A heating schedule for a set of rooms.
///
/// While the schedule is active (one of `days`, inside one of
/// `time_windows`), the target temperature of each room follows the current
/// price level through `temps`.
///
/// # Examples
///
/// ```
/// use priceheat_lib::document::Schedule;
/// use priceheat_lib::types::{PriceLevel, Weekday};
///
/// let mut schedule = Schedule::new(vec!["r1".to_string()], vec![Weekday::Sat, Weekday::Sun]);
/// schedule.temps.insert(PriceLevel::VeryCheap, 23.0);
///
/// assert!(schedule.is_always_active());
/// assert_eq!(schedule.temperature_for(PriceLevel::VeryCheap), Some(23.0));
/// assert_eq!(schedule.temperature_for(PriceLevel::Normal), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Server-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Rooms the schedule applies to.
    pub room_ids: Vec<String>,
    /// Days the schedule is active, without duplicates.
    pub days: Vec<Weekday>,
    /// Time windows the schedule is active in. Empty means all day.
    #[serde(default)]
    pub time_windows: Vec<TimeWindow>,
    /// Target temperature per price level.
    #[serde(default)]
    pub temps: PriceLevelTemps,
}

impl Schedule {
    /// Creates an unsaved, all-day schedule with no temperatures.
    #[must_use]
    pub fn new(room_ids: Vec<String>, days: Vec<Weekday>) -> Self {
        Self {
            id: None,
            room_ids,
            days,
            time_windows: Vec::new(),
            temps: PriceLevelTemps::new(),
        }
    }

    /// Returns true if the schedule has no time window restriction.
    #[must_use]
    pub fn is_always_active(&self) -> bool {
        self.time_windows.is_empty()
    }

    /// Returns the target temperature for a price level, if one is set.
    #[must_use]
    pub fn temperature_for(&self, level: PriceLevel) -> Option<f64> {
        self.temps.get(&level).copied()
    }
}

impl_document!(Schedule, "schedules/");
