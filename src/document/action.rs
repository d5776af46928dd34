// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temporary temperature overrides.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::document::impl_document;
use crate::types::ActionType;

/// A manual override that forces heating on or off until it expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempAction {
    /// Server-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Rooms affected by the override.
    pub room_ids: Vec<String>,
    /// Whether heating is forced on or off.
    pub action: ActionType,
    /// Target temperature while forced on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
    /// When the override stops applying.
    pub expires_at: NaiveDateTime,
    /// When the override starts applying. `None` means immediately.
    #[serde(default)]
    pub starts_at: Option<NaiveDateTime>,
}

impl TempAction {
    /// Returns true if the override applies at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: NaiveDateTime) -> bool {
        self.starts_at.is_none_or(|start| start <= now) && now < self.expires_at
    }
}

impl_document!(TempAction, "temp_actions/");
