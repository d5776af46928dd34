// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rooms and the devices placed in them.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::document::impl_document;

/// A room whose temperature is controlled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Server-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
}

impl_document!(Room, "rooms/");

/// A smart plug driving a heater.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plug {
    /// Server-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Address of the plug on the local network.
    pub ip: Ipv4Addr,
    /// The room the plug heats.
    pub room_id: String,
    /// Whether schedules may switch the plug.
    #[serde(default)]
    pub scheduled: bool,
}

impl_document!(Plug, "plugs/");

/// A physical push button that triggers plugs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    /// Server-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Address of the button on the local network.
    pub ip: Ipv4Addr,
    /// Plugs toggled by the button.
    pub plug_ids: Vec<String>,
}

impl_document!(Button, "buttons");

/// A temperature sensor reporting for a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempSensor {
    /// Server-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// The room the sensor measures.
    pub room_id: String,
}

impl_document!(TempSensor, "temp_sensors");

/// A single temperature reading from `temperature_logs/{room_id}/{period}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureLog {
    /// When the reading was taken.
    pub time: String,
    /// Measured temperature in degrees Celsius.
    pub temperature: f64,
}
