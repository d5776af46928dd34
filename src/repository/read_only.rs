// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resources the service computes and the client only reads.

use serde::de::DeserializeOwned;

use crate::document::TemperatureLog;
use crate::error::RepositoryError;
use crate::protocol::{Method, RetryingTransport};
use crate::repository::join_path;
use crate::types::{CurrentPrice, Period};

/// Read access to current prices and temperature history.
#[derive(Debug, Clone)]
pub struct ReadOnlyResources {
    transport: RetryingTransport,
}

impl ReadOnlyResources {
    const CURRENT_PRICE: &'static str = "prices/current";
    const TEMPERATURE_LOGS: &'static str = "temperature_logs";

    /// Creates read-only access over the given transport.
    #[must_use]
    pub fn new(transport: RetryingTransport) -> Self {
        Self { transport }
    }

    /// Fetches the current electricity price and its level.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Fetch` if the request fails and
    /// `RepositoryError::Decode` if the body has an unexpected shape.
    pub async fn current_price(&self) -> Result<CurrentPrice, RepositoryError> {
        self.get(Self::CURRENT_PRICE).await
    }

    /// Fetches the temperature readings of a room over a period.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Fetch` if the request fails and
    /// `RepositoryError::Decode` if the body has an unexpected shape.
    pub async fn temperature_logs(
        &self,
        room_id: &str,
        period: Period,
    ) -> Result<Vec<TemperatureLog>, RepositoryError> {
        let path = format!(
            "{}/{period}",
            join_path(Self::TEMPERATURE_LOGS, room_id)
        );
        self.get(&path).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RepositoryError> {
        let response = self
            .transport
            .execute(Method::Get, path, None)
            .await
            .map_err(|source| RepositoryError::Fetch {
                path: path.to_string(),
                source,
            })?;

        response.parse().map_err(|source| RepositoryError::Decode {
            path: path.to_string(),
            source,
        })
    }
}
