// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Small closed sets used by temperature actions and temperature logs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ClosedSet;

/// Whether a temperature action forces heating on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionType {
    /// Force heating on.
    On,
    /// Force heating off.
    Off,
}

impl ClosedSet for ActionType {
    const ALL: &'static [Self] = &[Self::On, Self::Off];

    fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation period for room temperature logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// The last 24 hours.
    Day,
    /// The last 7 days.
    Week,
    /// The last 30 days.
    Month,
}

impl ClosedSet for Period {
    const ALL: &'static [Self] = &[Self::Day, Self::Week, Self::Month];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_type_wire_format() {
        assert_eq!(serde_json::to_string(&ActionType::On).unwrap(), r#""ON""#);
        assert_eq!(ActionType::Off.to_string(), "OFF");
    }

    #[test]
    fn period_wire_format() {
        assert_eq!(serde_json::to_string(&Period::Week).unwrap(), r#""week""#);
        assert_eq!(Period::Month.to_string(), "month");
    }
}
