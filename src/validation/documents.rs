// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Form decoding for each document kind.

use super::{FormErrors, RawFields, field, schedule};
use crate::document::{
    Button, Document, NotificationSettings, Plug, Room, Schedule, TempAction, TempSensor,
};
use crate::types::ActionType;

/// A document that can be built from submitted form fields.
pub trait FromForm: Document + Sized {
    /// Validates every field and builds the document.
    ///
    /// The document id is taken from the `id` field; a blank id means the
    /// document has not been saved yet.
    ///
    /// # Errors
    ///
    /// Returns a [`FormErrors`] holding the error of every invalid field if
    /// at least one field is invalid.
    fn from_form(raw: &RawFields) -> Result<Self, FormErrors<Self>>;
}

impl FromForm for Room {
    fn from_form(raw: &RawFields) -> Result<Self, FormErrors<Self>> {
        let mut errors = FormErrors::new(raw.id());
        let name = errors.check("name", field::non_empty_string(raw.text("name")));

        match name {
            Some(name) => Ok(Self { id: raw.id(), name }),
            None => Err(errors),
        }
    }
}

impl FromForm for Plug {
    fn from_form(raw: &RawFields) -> Result<Self, FormErrors<Self>> {
        let mut errors = FormErrors::new(raw.id());
        let name = errors.check("name", field::non_empty_string(raw.text("name")));
        let ip = errors.check("ip", field::ipv4_address(raw.text("ip")));
        let room_id = errors.check("room_id", field::non_empty_string(raw.text("room_id")));

        match (name, ip, room_id) {
            (Some(name), Some(ip), Some(room_id)) => Ok(Self {
                id: raw.id(),
                name,
                ip,
                room_id,
                scheduled: raw.flag("scheduled"),
            }),
            _ => Err(errors),
        }
    }
}

impl FromForm for Button {
    fn from_form(raw: &RawFields) -> Result<Self, FormErrors<Self>> {
        let mut errors = FormErrors::new(raw.id());
        let name = errors.check("name", field::non_empty_string(raw.text("name")));
        let ip = errors.check("ip", field::ipv4_address(raw.text("ip")));
        let plug_ids = errors.check("plug_ids", field::non_empty_list(raw.list_opt("plug_ids")));

        match (name, ip, plug_ids) {
            (Some(name), Some(ip), Some(plug_ids)) => Ok(Self {
                id: raw.id(),
                name,
                ip,
                plug_ids,
            }),
            _ => Err(errors),
        }
    }
}

impl FromForm for TempSensor {
    fn from_form(raw: &RawFields) -> Result<Self, FormErrors<Self>> {
        let mut errors = FormErrors::new(raw.id());
        let name = errors.check("name", field::non_empty_string(raw.text("name")));
        let room_id = errors.check("room_id", field::non_empty_string(raw.text("room_id")));

        match (name, room_id) {
            (Some(name), Some(room_id)) => Ok(Self {
                id: raw.id(),
                name,
                room_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Reads `room_ids`, `days`, paired `from`/`to` window bounds and paired
/// `level`/`temp` price temperatures.
///
/// Leaving out every window bound makes the schedule active all day.
impl FromForm for Schedule {
    fn from_form(raw: &RawFields) -> Result<Self, FormErrors<Self>> {
        let mut errors = FormErrors::new(raw.id());
        let room_ids = errors.check("room_ids", field::non_empty_list(raw.list_opt("room_ids")));
        let selected_days: Vec<String> = raw
            .list("days")
            .iter()
            .filter(|day| !day.trim().is_empty())
            .cloned()
            .collect();
        let days = errors.check("days", schedule::days(&selected_days));

        let (from, to) = (raw.list("from"), raw.list("to"));
        let time_windows = if from.is_empty() && to.is_empty() {
            Some(Vec::new())
        } else {
            errors.check("time_windows", schedule::hours(from, to))
        };
        let temps = errors.check(
            "temps",
            schedule::temps(raw.list("level"), raw.list("temp")),
        );

        match (room_ids, days, time_windows, temps) {
            (Some(room_ids), Some(days), Some(time_windows), Some(temps)) => Ok(Self {
                id: raw.id(),
                room_ids,
                days,
                time_windows,
                temps,
            }),
            _ => Err(errors),
        }
    }
}

/// Reads `room_ids`, `action`, `temp`, the `expires_date`/`expires_time`
/// pair and the optional `starts_date`/`starts_time` pair.
impl FromForm for TempAction {
    fn from_form(raw: &RawFields) -> Result<Self, FormErrors<Self>> {
        let mut errors = FormErrors::new(raw.id());
        let room_ids = errors.check("room_ids", field::non_empty_list(raw.list_opt("room_ids")));
        let action = errors.check("action", field::one_of::<ActionType>(raw.text("action")));
        let temp = errors.check("temp", field::optional_temperature(raw.text("temp")));
        let expires_at = errors.check(
            "expires_at",
            field::date_time(raw.text("expires_date"), raw.text("expires_time")),
        );
        let starts_at = errors.check(
            "starts_at",
            field::date_time_or_null(raw.text("starts_date"), raw.text("starts_time")),
        );

        if let (Some(Some(start)), Some(end)) = (starts_at, expires_at)
            && start >= end
        {
            errors.set_other("Start must be before expiry");
        }

        match (room_ids, action, temp, expires_at, starts_at) {
            (Some(room_ids), Some(action), Some(temp), Some(expires_at), Some(starts_at))
                if errors.is_empty() =>
            {
                Ok(Self {
                    id: raw.id(),
                    room_ids,
                    action,
                    temp,
                    expires_at,
                    starts_at,
                })
            }
            _ => Err(errors),
        }
    }
}

impl FromForm for NotificationSettings {
    fn from_form(raw: &RawFields) -> Result<Self, FormErrors<Self>> {
        let mut errors = FormErrors::new(raw.id());
        let plug_id = errors.check("plug_id", field::non_empty_string(raw.text("plug_id")));
        let topic = errors.check("topic", field::non_empty_string(raw.text("topic")));
        let max_offline_minutes = errors.check(
            "max_offline_minutes",
            field::positive_non_zero_integer(raw.text("max_offline_minutes")),
        );

        match (plug_id, topic, max_offline_minutes) {
            (Some(plug_id), Some(topic), Some(max_offline_minutes)) => Ok(Self {
                id: raw.id(),
                plug_id,
                topic,
                max_offline_minutes,
            }),
            _ => Err(errors),
        }
    }
}
