// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Domain documents stored by the device-control service.
//!
//! Every document carries an optional, server-assigned `id`. Documents built
//! client-side have no id until they are persisted, and the id is omitted
//! from the JSON body in that case.
//!
//! # Documents
//!
//! | Type | Collection |
//! |---|---|
//! | [`Room`] | `rooms/` |
//! | [`Plug`] | `plugs/` |
//! | [`Button`] | `buttons` |
//! | [`Schedule`] | `schedules/` |
//! | [`TempSensor`] | `temp_sensors` |
//! | [`TempAction`] | `temp_actions/` |
//! | [`NotificationSettings`] | `notification_settings` |

mod action;
mod devices;
mod notification;
mod schedule;

pub use action::TempAction;
pub use devices::{Button, Plug, Room, TempSensor, TemperatureLog};
pub use notification::NotificationSettings;
pub use schedule::Schedule;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A domain entity stored in a collection of the remote service.
pub trait Document: Serialize + DeserializeOwned {
    /// Path of the collection, relative to the service base URL.
    ///
    /// Some collections end with `/` and some do not; both forms are
    /// accepted when joining an id.
    const COLLECTION: &'static str;

    /// Returns the server-assigned id, or `None` for an unsaved document.
    fn id(&self) -> Option<&str>;
}

/// Implements [`Document`] for a struct with an `id: Option<String>` field.
macro_rules! impl_document {
    ($ty:ty, $collection:literal) => {
        impl $crate::document::Document for $ty {
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }
        }
    };
}
pub(crate) use impl_document;
