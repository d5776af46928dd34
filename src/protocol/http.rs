// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Retrying HTTP transport for the device-control service.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};

use crate::error::{LastFailure, TransportError};
use crate::protocol::{HttpResponse, RetryPolicy};

/// HTTP methods used by the device-control service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read a resource or collection.
    Get,
    /// Create or replace a document.
    Post,
    /// Remove a document.
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Result of one attempt inside the retry loop.
enum Attempt {
    Done(HttpResponse),
    Retry(LastFailure),
    Fatal(TransportError),
}

/// HTTP client that retries server errors and network failures.
///
/// Each call to [`execute`](Self::execute) makes at most
/// [`RetryPolicy::max_attempts`] attempts. Statuses in the 5xx range and
/// failures below the HTTP layer (refused connections, DNS errors, timeouts)
/// are retried after a jittered backoff. Any other non-success status fails
/// immediately. The transport keeps no state between calls.
///
/// # Examples
///
/// ```no_run
/// use priceheat_lib::protocol::{Method, RetryPolicy, RetryingTransport};
///
/// # async fn example() -> Result<(), priceheat_lib::error::TransportError> {
/// let transport = RetryingTransport::new(
///     reqwest::Client::new(),
///     "http://192.168.1.10:8080",
///     RetryPolicy::default(),
/// );
/// let response = transport.execute(Method::Get, "rooms/", None).await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RetryingTransport {
    client: Client,
    base_url: String,
    policy: RetryPolicy,
}

impl RetryingTransport {
    /// Creates a transport sending requests relative to `base_url`.
    ///
    /// The per-attempt timeout is the timeout configured on `client`.
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            policy,
        }
    }

    /// Returns the base URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the retry policy.
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Builds the absolute URL for a resource path.
    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends a request, retrying server errors and network failures.
    ///
    /// `body` is sent as JSON. It is ignored for [`Method::Delete`], which
    /// never carries a body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Status` for a non-success status outside the
    /// 5xx range, `TransportError::RetriesExhausted` once every attempt has
    /// failed, and `TransportError::Request` if the request cannot be built.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.build_url(path);
        let mut attempts = 0;

        loop {
            attempts += 1;
            let last = match self.attempt(method, &url, body).await {
                Attempt::Done(response) => return Ok(response),
                Attempt::Fatal(error) => return Err(error),
                Attempt::Retry(last) => last,
            };

            if !self.policy.should_retry(attempts) {
                tracing::warn!(
                    url = %url,
                    attempts,
                    last = %last,
                    "Giving up on request"
                );
                return Err(TransportError::RetriesExhausted { attempts, last });
            }

            let delay = self.policy.jittered_delay(attempts - 1);
            tracing::warn!(
                url = %url,
                attempt = attempts,
                last = %last,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn attempt(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Attempt {
        tracing::debug!(method = ?method, url = %url, "Sending HTTP request");

        let mut request = self
            .client
            .request(method.as_reqwest(), url)
            .header(CONTENT_TYPE, "application/json");
        if method != Method::Delete
            && let Some(body) = body
        {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(error) if error.is_builder() => {
                return Attempt::Fatal(TransportError::Request(error));
            }
            Err(error) => return Attempt::Retry(LastFailure::Transport(error)),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => return Attempt::Retry(LastFailure::Transport(error)),
        };

        tracing::debug!(status = status.as_u16(), body = %body, "Received HTTP response");

        if status.is_success() {
            Attempt::Done(HttpResponse::new(status.as_u16(), body))
        } else if status.is_server_error() {
            Attempt::Retry(LastFailure::Status(status.as_u16()))
        } else {
            Attempt::Fatal(status_error(status, body))
        }
    }
}

fn status_error(status: StatusCode, body: String) -> TransportError {
    TransportError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        body,
    }
}
