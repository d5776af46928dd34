// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed access to the collections of the device-control service.
//!
//! A [`ResourceRepository`] is bound to one document kind and its collection
//! path. Every operation goes through the [`RetryingTransport`] and inherits
//! its retry and failure classification.
//!
//! # Examples
//!
//! ```no_run
//! use priceheat_lib::ClientConfig;
//! use priceheat_lib::document::Room;
//!
//! # async fn example() -> priceheat_lib::Result<()> {
//! let client = ClientConfig::new("http://192.168.1.10:8080").into_client()?;
//! let rooms = client.rooms();
//!
//! rooms.create(&Room { id: None, name: "Kitchen".into() }).await?;
//! for room in rooms.list().await? {
//!     println!("{}", room.name);
//! }
//! # Ok(())
//! # }
//! ```

mod read_only;

pub use read_only::ReadOnlyResources;

use std::marker::PhantomData;

use serde::{Serialize, Serializer};

use crate::document::Document;
use crate::error::{RepositoryError, TransportError};
use crate::protocol::{Method, RetryingTransport};
use crate::submission::Intent;

/// Outcome of a lenient listing.
///
/// Serializes as the list itself, or as the string `"ERROR"` when the
/// collection could not be fetched.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<D> {
    /// The collection was fetched.
    Items(Vec<D>),
    /// The collection could not be fetched; the failure has been logged.
    Unavailable,
}

impl<D> Listing<D> {
    /// Returns the items, or `None` if the collection was unavailable.
    #[must_use]
    pub fn items(&self) -> Option<&[D]> {
        match self {
            Self::Items(items) => Some(items),
            Self::Unavailable => None,
        }
    }

    /// Returns true if the collection could not be fetched.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// Returns the items, or an empty list if the collection was unavailable.
    #[must_use]
    pub fn unwrap_or_default(self) -> Vec<D> {
        match self {
            Self::Items(items) => items,
            Self::Unavailable => Vec::new(),
        }
    }
}

impl<D: Serialize> Serialize for Listing<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Items(items) => items.serialize(serializer),
            Self::Unavailable => serializer.serialize_str("ERROR"),
        }
    }
}

/// CRUD operations for one collection.
#[derive(Debug, Clone)]
pub struct ResourceRepository<D> {
    transport: RetryingTransport,
    document: PhantomData<fn() -> D>,
}

impl<D: Document> ResourceRepository<D> {
    /// Creates a repository for `D` over the given transport.
    #[must_use]
    pub fn new(transport: RetryingTransport) -> Self {
        Self {
            transport,
            document: PhantomData,
        }
    }

    /// Returns the collection path.
    #[must_use]
    pub fn path(&self) -> &'static str {
        D::COLLECTION
    }

    /// Fetches every document of the collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Fetch` if the request fails and
    /// `RepositoryError::Decode` if the body is not a list of documents.
    pub async fn list(&self) -> Result<Vec<D>, RepositoryError> {
        let response = self
            .transport
            .execute(Method::Get, D::COLLECTION, None)
            .await
            .map_err(|source| RepositoryError::Fetch {
                path: D::COLLECTION.to_string(),
                source,
            })?;

        response.parse().map_err(|source| RepositoryError::Decode {
            path: D::COLLECTION.to_string(),
            source,
        })
    }

    /// Like [`list`](Self::list), but never fails.
    ///
    /// A failure is logged and reported as [`Listing::Unavailable`].
    pub async fn list_or_error(&self) -> Listing<D> {
        match self.list().await {
            Ok(items) => Listing::Items(items),
            Err(error) => {
                tracing::warn!(
                    path = D::COLLECTION,
                    error = %error,
                    "Listing unavailable"
                );
                Listing::Unavailable
            }
        }
    }

    /// Persists a new document.
    ///
    /// Any `id` on the document is left out of the request body.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Rejected` with the service's explanation if
    /// it answers 400, and `RepositoryError::Mutation` for any other failure.
    pub async fn create(&self, document: &D) -> Result<(), RepositoryError> {
        let body = encode_without_id(document)?;

        match self
            .transport
            .execute(Method::Post, D::COLLECTION, Some(&body))
            .await
        {
            Ok(_) => {
                tracing::debug!(path = D::COLLECTION, "Document created");
                Ok(())
            }
            Err(TransportError::Status {
                status: 400, body, ..
            }) => Err(RepositoryError::Rejected {
                path: D::COLLECTION.to_string(),
                body,
            }),
            Err(source) => Err(RepositoryError::Mutation {
                intent: Intent::Create,
                path: D::COLLECTION.to_string(),
                source,
            }),
        }
    }

    /// Replaces an existing document.
    ///
    /// The document is posted to `collection/{id}` with the id left out of
    /// the body.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingId` if the document has no id and
    /// `RepositoryError::Mutation` if the request fails.
    pub async fn update(&self, document: &D) -> Result<(), RepositoryError> {
        let id = document.id().ok_or_else(|| RepositoryError::MissingId {
            path: D::COLLECTION.to_string(),
        })?;
        let path = join_path(D::COLLECTION, id);
        let body = encode_without_id(document)?;

        self.transport
            .execute(Method::Post, &path, Some(&body))
            .await
            .map_err(|source| RepositoryError::Mutation {
                intent: Intent::Update,
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path, "Document updated");
        Ok(())
    }

    /// Removes the document with the given id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Mutation` if the request fails.
    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let path = join_path(D::COLLECTION, id);

        self.transport
            .execute(Method::Delete, &path, None)
            .await
            .map_err(|source| RepositoryError::Mutation {
                intent: Intent::Delete,
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path, "Document deleted");
        Ok(())
    }
}

/// Joins a collection path and a document id with exactly one `/`.
///
/// The id is percent-encoded.
pub(crate) fn join_path(collection: &str, id: &str) -> String {
    format!(
        "{}/{}",
        collection.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}

/// Serializes a document to a JSON object without its `id` key.
fn encode_without_id<D: Document>(document: &D) -> Result<serde_json::Value, RepositoryError> {
    let mut body = serde_json::to_value(document).map_err(RepositoryError::Encode)?;
    if let Some(object) = body.as_object_mut() {
        object.remove("id");
    }
    Ok(body)
}
