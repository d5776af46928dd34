// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `PriceHeat` library.
//!
//! This module provides the error hierarchy for the library: field
//! validation, HTTP transport, resource repositories, form decoding and
//! configuration.
//!
//! Field validation errors never reach the network. They are collected into
//! a [`FormErrors`](crate::validation::FormErrors) and rendered next to the
//! form that produced them. Everything else propagates to the caller.

use thiserror::Error;

use crate::submission::Intent;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while talking to the device-control service.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error occurred in a resource repository operation.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Submitted form data could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A validation failure for a single form field.
///
/// The display text of each variant is the message shown to the user next
/// to the offending field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A required value is missing or blank.
    #[error("Required")]
    Required,

    /// A list is missing, empty, or contains a blank element.
    #[error("Can't be empty")]
    EmptyList,

    /// The IP address field is missing.
    #[error("IP address is required")]
    IpRequired,

    /// The value is not a dotted-quad IPv4 address.
    #[error("Not a valid IPv4 address")]
    InvalidIpv4,

    /// The value is not a whole number.
    #[error("Must be a whole number")]
    NotWholeNumber,

    /// The value is zero or negative.
    #[error("Must be greater than zero")]
    NotPositive,

    /// The value is not a decimal number.
    #[error("Must be a number")]
    NotANumber,

    /// The date part of a timestamp is malformed.
    #[error("Invalid date, should be YYYY-MM-DD")]
    InvalidDate,

    /// Only one of the date and time parts was provided.
    #[error("Both date and time are required")]
    PartialDateTime,

    /// The value is not one of a closed set of literals.
    #[error("Must be {allowed}")]
    NotOneOf {
        /// Human-readable list of the accepted literals.
        allowed: String,
    },

    /// The price level field is missing.
    #[error("Price level is required")]
    PriceLevelRequired,

    /// The price level is not one of the known levels.
    #[error("Unknown price level")]
    UnknownPriceLevel,

    /// The same price level was given more than once.
    #[error("Price level can only be set once")]
    DuplicatePriceLevel,

    /// Price levels and temperatures are not positionally paired.
    #[error("Invalid temperatures")]
    InvalidTemperatures,

    /// No weekday was selected.
    #[error("Minimum one day is required")]
    NoDays,

    /// A weekday is outside `MON`..`SUN`.
    #[error("Unknown weekday")]
    UnknownWeekday,

    /// Window start and end lists are empty or of unequal length.
    #[error("Invalid time windows")]
    InvalidTimeWindows,

    /// A clock time is not `HH:MM` on a 24 hour clock.
    #[error("Invalid time, should be HH:MM on 24h format")]
    InvalidTime,
}

/// The last failure observed before a request ran out of attempts.
#[derive(Debug, Error)]
pub enum LastFailure {
    /// The service answered with a server error status.
    #[error("HTTP {0}")]
    Status(u16),
    /// The request failed below the HTTP layer (connect, DNS, timeout).
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
}

impl LastFailure {
    /// Returns the underlying network error, if the last failure was one.
    #[must_use]
    pub fn transport_error(&self) -> Option<&reqwest::Error> {
        match self {
            Self::Transport(error) => Some(error),
            Self::Status(_) => None,
        }
    }

    /// Returns true if the last attempt timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.transport_error().is_some_and(reqwest::Error::is_timeout)
    }
}

/// Errors raised by the retrying HTTP transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be built or the request could not be formed.
    #[error("HTTP request could not be built: {0}")]
    Request(#[source] reqwest::Error),

    /// The service answered with a status that is not retried.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The canonical reason phrase for the status.
        reason: String,
        /// The raw response body.
        body: String,
    },

    /// Every attempt failed with a server error or a network failure.
    #[error("request failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Total number of attempts made, including the first one.
        attempts: u32,
        /// The failure observed on the final attempt.
        #[source]
        last: LastFailure,
    },
}

impl TransportError {
    /// Returns the HTTP status carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::RetriesExhausted {
                last: LastFailure::Status(status),
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

/// Errors related to resource repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Listing or reading a resource failed.
    #[error("failed to fetch {path}: {source}")]
    Fetch {
        /// The resource path.
        path: String,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The service rejected a new document with a 400 response.
    #[error("{path} rejected the document: {body}")]
    Rejected {
        /// The collection path.
        path: String,
        /// The explanatory text returned by the service.
        body: String,
    },

    /// A create, update or delete call failed.
    #[error("failed to {intent} {path}: {source}")]
    Mutation {
        /// The kind of mutation that failed.
        intent: Intent,
        /// The resource path.
        path: String,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// An update was requested for a document that was never persisted.
    #[error("cannot update {path}: document has no id")]
    MissingId {
        /// The collection path.
        path: String,
    },

    /// The response body did not match the expected shape.
    #[error("invalid response from {path}: {source}")]
    Decode {
        /// The resource path.
        path: String,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A document could not be serialized.
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors related to decoding submitted form data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A key or value is not valid UTF-8 once percent-decoded.
    #[error("invalid percent-encoding in form segment: {0}")]
    InvalidEncoding(String),

    /// A pair has an empty key.
    #[error("form segment without a field name: {0}")]
    MissingKey(String),
}

/// Errors related to client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    /// An environment variable holds an unusable value.
    #[error("invalid value for {name}: {value}")]
    InvalidVar {
        /// The variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The base URL does not use an HTTP scheme.
    #[error("base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
