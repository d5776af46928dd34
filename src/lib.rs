// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `PriceHeat` Lib - Data access and form handling for a price-driven
//! heating dashboard.
//!
//! The dashboard turns smart plugs on and off according to the current
//! electricity price. This library is the core behind its pages:
//!
//! - **Data access**: typed repositories over the JSON collections of the
//!   device-control service, with bounded retries of transient failures
//! - **Validation**: turns untyped form fields into typed documents, or into
//!   per-field error messages attributed to the submitted document
//! - **Submission tracking**: tells each of several same-kind forms whether
//!   the mutation in flight targets it
//!
//! # Documents
//!
//! Rooms, plugs, buttons, schedules, temperature sensors, temporary actions
//! and notification settings. See [`document`].
//!
//! # Quick Start
//!
//! ## Listing and creating documents
//!
//! ```no_run
//! use priceheat_lib::ClientConfig;
//! use priceheat_lib::document::Room;
//!
//! #[tokio::main]
//! async fn main() -> priceheat_lib::Result<()> {
//!     let client = ClientConfig::new("http://192.168.1.10:8080").into_client()?;
//!
//!     client.rooms().create(&Room { id: None, name: "Kitchen".into() }).await?;
//!
//!     for room in client.rooms().list().await? {
//!         println!("{:?}: {}", room.id, room.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Handling a submitted form
//!
//! ```no_run
//! use priceheat_lib::{ClientConfig, FromForm, RawFields};
//! use priceheat_lib::document::Schedule;
//!
//! #[tokio::main]
//! async fn main() -> priceheat_lib::Result<()> {
//!     let client = ClientConfig::from_env()?.into_client()?;
//!
//!     let raw = RawFields::from_urlencoded(
//!         "room_ids=r1&days=MON&days=TUE&from=06:00&to=08:00&level=Cheap&temp=22",
//!     )?;
//!     match Schedule::from_form(&raw) {
//!         Ok(schedule) => client.schedules().create(&schedule).await?,
//!         Err(errors) => eprintln!("{errors}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Tracking the mutation in flight
//!
//! ```
//! use priceheat_lib::document::Plug;
//! use priceheat_lib::submission::{PendingMutation, SubmissionStatus};
//!
//! let pending = PendingMutation::delete("p1");
//! let status = SubmissionStatus::derive::<Plug>(Some(&pending), None);
//! assert!(!status.is_deleting);
//! assert!(status.is_new);
//! ```

mod client;
mod config;
pub mod document;
pub mod error;
pub mod protocol;
pub mod repository;
pub mod submission;
pub mod types;
pub mod validation;

pub use client::Client;
pub use config::ClientConfig;
pub use document::Document;
pub use error::{
    ConfigError, DecodeError, Error, FieldError, RepositoryError, Result, TransportError,
};
pub use protocol::{RetryPolicy, RetryingTransport};
pub use repository::{Listing, ReadOnlyResources, ResourceRepository};
pub use submission::{Intent, PendingMutation, SubmissionStatus};
pub use validation::{FormErrors, FromForm, RawFields, ValidationResult};
