// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entry point bundling one transport and the typed repositories.

use crate::document::{
    Button, NotificationSettings, Plug, Room, Schedule, TempAction, TempSensor,
};
use crate::protocol::RetryingTransport;
use crate::repository::{ReadOnlyResources, ResourceRepository};

/// Client for the device-control service.
///
/// Repositories handed out by a client share its transport and are cheap to
/// create.
///
/// # Examples
///
/// ```no_run
/// use priceheat_lib::ClientConfig;
/// use priceheat_lib::types::Period;
///
/// # async fn example() -> priceheat_lib::Result<()> {
/// let client = ClientConfig::from_env()?.into_client()?;
///
/// let price = client.read_only().current_price().await?;
/// println!("{} ({})", price.price, price.level);
///
/// let logs = client.read_only().temperature_logs("r1", Period::Day).await?;
/// println!("{} readings", logs.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    transport: RetryingTransport,
}

impl Client {
    /// Creates a client over an existing transport.
    #[must_use]
    pub fn new(transport: RetryingTransport) -> Self {
        Self { transport }
    }

    /// Returns the base URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &RetryingTransport {
        &self.transport
    }

    fn repository<D: crate::document::Document>(&self) -> ResourceRepository<D> {
        ResourceRepository::new(self.transport.clone())
    }

    /// Repository for rooms.
    #[must_use]
    pub fn rooms(&self) -> ResourceRepository<Room> {
        self.repository()
    }

    /// Repository for smart plugs.
    #[must_use]
    pub fn plugs(&self) -> ResourceRepository<Plug> {
        self.repository()
    }

    /// Repository for buttons.
    #[must_use]
    pub fn buttons(&self) -> ResourceRepository<Button> {
        self.repository()
    }

    /// Repository for heating schedules.
    #[must_use]
    pub fn schedules(&self) -> ResourceRepository<Schedule> {
        self.repository()
    }

    /// Repository for temperature sensors.
    #[must_use]
    pub fn temp_sensors(&self) -> ResourceRepository<TempSensor> {
        self.repository()
    }

    /// Repository for temporary overrides.
    #[must_use]
    pub fn temp_actions(&self) -> ResourceRepository<TempAction> {
        self.repository()
    }

    /// Repository for plug offline notifications.
    #[must_use]
    pub fn notification_settings(&self) -> ResourceRepository<NotificationSettings> {
        self.repository()
    }

    /// Read access to prices and temperature history.
    #[must_use]
    pub fn read_only(&self) -> ReadOnlyResources {
        ReadOnlyResources::new(self.transport.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::RetryPolicy;

    #[test]
    fn repositories_are_bound_to_collections() {
        let client = Client::new(RetryingTransport::new(
            reqwest::Client::new(),
            "http://localhost:8080",
            RetryPolicy::none(),
        ));
        assert_eq!(client.rooms().path(), "rooms/");
        assert_eq!(client.buttons().path(), "buttons");
        assert_eq!(client.temp_actions().path(), "temp_actions/");
        assert_eq!(client.notification_settings().path(), "notification_settings");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
