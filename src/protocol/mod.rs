// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the device-control service.
//!
//! - [`RetryingTransport`]: sends JSON requests and retries transient failures
//! - [`RetryPolicy`]: attempt budget and jittered exponential backoff

mod http;
mod retry;

pub use http::{Method, RetryingTransport};
pub use retry::RetryPolicy;

/// A successful response from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: u16,
    body: String,
}

impl HttpResponse {
    /// Creates a response with the given status and body.
    #[must_use]
    pub fn new(status: u16, body: String) -> Self {
        Self { status, body }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the body as JSON into the target type.
    ///
    /// # Errors
    ///
    /// Returns error if the body is not valid JSON for the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
