// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notification settings for unreachable plugs.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::document::impl_document;

/// Where and when to notify about a plug that stopped responding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Server-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The watched plug.
    pub plug_id: String,
    /// Topic notifications are published to.
    pub topic: String,
    /// Minutes the plug may stay unreachable before a notification is sent.
    pub max_offline_minutes: NonZeroU32,
}

impl_document!(NotificationSettings, "notification_settings");
