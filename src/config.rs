// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client configuration.

use std::time::Duration;

use crate::client::Client;
use crate::error::{ConfigError, TransportError};
use crate::protocol::{RetryPolicy, RetryingTransport};

/// Configuration for connecting to the device-control service.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use priceheat_lib::ClientConfig;
/// use priceheat_lib::protocol::RetryPolicy;
///
/// // Simple configuration
/// let config = ClientConfig::new("http://192.168.1.10:8080");
///
/// // With all options
/// let config = ClientConfig::new("https://heating.example.org/api")
///     .with_timeout(Duration::from_secs(5))
///     .with_retry_policy(RetryPolicy::new().with_max_retries(2));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl ClientConfig {
    /// Default per-attempt request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Environment variable holding the service base URL.
    pub const ENV_API_URL: &'static str = "PRICEHEAT_API_URL";
    /// Environment variable holding the per-attempt timeout in seconds.
    pub const ENV_TIMEOUT_SECS: &'static str = "PRICEHEAT_TIMEOUT_SECS";
    /// Environment variable holding the number of retries after the first attempt.
    pub const ENV_MAX_RETRIES: &'static str = "PRICEHEAT_MAX_RETRIES";

    /// Creates a configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Self::DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// `PRICEHEAT_API_URL` is required. `PRICEHEAT_TIMEOUT_SECS` and
    /// `PRICEHEAT_MAX_RETRIES` override the defaults when set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVar` if the URL is not set and
    /// `ConfigError::InvalidVar` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(Self::ENV_API_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingVar(Self::ENV_API_URL))?;
        let mut config = Self::new(base_url.trim());

        if let Some(secs) = parse_var::<u64>(&lookup, Self::ENV_TIMEOUT_SECS)? {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = parse_var::<u32>(&lookup, Self::ENV_MAX_RETRIES)? {
            let policy = config.retry_policy.clone().with_max_retries(retries);
            config = config.with_retry_policy(policy);
        }

        Ok(config)
    }

    /// Sets the per-attempt request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-attempt timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Creates a [`Client`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the base URL is not an
    /// `http://` or `https://` URL, and a transport error if the HTTP client
    /// cannot be created.
    pub fn into_client(self) -> crate::Result<Client> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url).into());
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(TransportError::Request)?;

        tracing::debug!(
            base_url = %self.base_url,
            timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            max_attempts = self.retry_policy.max_attempts(),
            "Creating client"
        );

        Ok(Client::new(RetryingTransport::new(
            http,
            self.base_url,
            self.retry_policy,
        )))
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidVar { name, value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::Error;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn default_values() {
        let config = ClientConfig::new("http://localhost:8080");
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.retry_policy(), &RetryPolicy::default());
    }

    #[test]
    fn builder_chain() {
        let config = ClientConfig::new("http://localhost")
            .with_timeout(Duration::from_secs(3))
            .with_retry_policy(RetryPolicy::none());
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.retry_policy().max_attempts(), 1);
    }

    #[test]
    fn from_lookup_requires_url() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("PRICEHEAT_API_URL"));

        let err = ClientConfig::from_lookup(lookup(&[("PRICEHEAT_API_URL", " ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("PRICEHEAT_API_URL"));
    }

    #[test]
    fn from_lookup_reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("PRICEHEAT_API_URL", "http://10.0.0.2:3000"),
            ("PRICEHEAT_TIMEOUT_SECS", "4"),
            ("PRICEHEAT_MAX_RETRIES", "2"),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), "http://10.0.0.2:3000");
        assert_eq!(config.timeout(), Duration::from_secs(4));
        assert_eq!(config.retry_policy().max_attempts(), 3);
    }

    #[test]
    fn from_lookup_rejects_bad_number() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("PRICEHEAT_API_URL", "http://10.0.0.2"),
            ("PRICEHEAT_MAX_RETRIES", "many"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidVar {
                name: "PRICEHEAT_MAX_RETRIES",
                value: "many".to_string(),
            }
        );
    }

    #[test]
    fn into_client_rejects_non_http_url() {
        let err = ClientConfig::new("ftp://10.0.0.2").into_client().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidBaseUrl(url)) if url == "ftp://10.0.0.2"
        ));
    }

    #[test]
    fn into_client_keeps_base_url() {
        let client = ClientConfig::new("http://10.0.0.2:8080/")
            .into_client()
            .unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.2:8080");
    }
}
