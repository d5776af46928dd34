// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-document submission status.
//!
//! A page may render many forms of the same kind at once. Each form must
//! only show itself busy for the mutation that targets it, not for any
//! mutation of its kind. [`SubmissionStatus::derive`] computes that from the
//! identity of the single pending mutation.
//!
//! This only drives UI state (disabled submit buttons, spinners). It does
//! not serialize mutations; two requests against the same document can
//! still race at the service.
//!
//! # Examples
//!
//! ```
//! use priceheat_lib::document::Room;
//! use priceheat_lib::submission::{PendingMutation, SubmissionStatus};
//!
//! let kitchen = Room { id: Some("r1".into()), name: "Kitchen".into() };
//! let hall = Room { id: Some("r2".into()), name: "Hall".into() };
//! let pending = PendingMutation::update("r1");
//!
//! assert!(SubmissionStatus::derive(Some(&pending), Some(&kitchen)).is_updating);
//! assert!(!SubmissionStatus::derive(Some(&pending), Some(&hall)).is_busy());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// The kind of mutation requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Persist a new document.
    Create,
    /// Replace an existing document.
    Update,
    /// Remove an existing document.
    Delete,
}

impl Intent {
    /// Returns the lowercase name of the intent.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown intent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intent: {0}")]
pub struct UnknownIntent(String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(UnknownIntent(other.to_string())),
        }
    }
}

/// Identity of the mutation currently in flight.
///
/// Exists only while a request is outstanding. The surrounding framework
/// clears it once the request settles, successfully or not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingMutation {
    /// What the mutation does.
    pub intent: Intent,
    /// Id of the targeted document; `None` when creating.
    pub target_id: Option<String>,
}

impl PendingMutation {
    /// A pending creation of a new document.
    #[must_use]
    pub fn create() -> Self {
        Self {
            intent: Intent::Create,
            target_id: None,
        }
    }

    /// A pending update of the document with `id`.
    #[must_use]
    pub fn update(id: impl Into<String>) -> Self {
        Self {
            intent: Intent::Update,
            target_id: Some(id.into()),
        }
    }

    /// A pending deletion of the document with `id`.
    #[must_use]
    pub fn delete(id: impl Into<String>) -> Self {
        Self {
            intent: Intent::Delete,
            target_id: Some(id.into()),
        }
    }
}

/// In-flight state of one document's form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct SubmissionStatus {
    /// The pending mutation creates this document.
    pub is_creating: bool,
    /// The pending mutation updates this document.
    pub is_updating: bool,
    /// The pending mutation deletes this document.
    pub is_deleting: bool,
    /// The form is for a document that does not exist yet.
    pub is_new: bool,
}

impl SubmissionStatus {
    /// Derives the status of `document`'s form from the pending mutation.
    ///
    /// Pass `None` as the document for the "new document" form. A pending
    /// creation matches a document whose id equals the pending target id,
    /// which for a brand-new document means both are `None`. Updates and
    /// deletions require the exact same id on both sides.
    #[must_use]
    pub fn derive<D: Document>(pending: Option<&PendingMutation>, document: Option<&D>) -> Self {
        let document_id = document.and_then(Document::id);
        let targets = |intent: Intent, require_id: bool| {
            pending.is_some_and(|p| {
                p.intent == intent
                    && p.target_id.as_deref() == document_id
                    && (!require_id || document_id.is_some())
            })
        };

        Self {
            is_creating: targets(Intent::Create, false),
            is_updating: targets(Intent::Update, true),
            is_deleting: targets(Intent::Delete, true),
            is_new: document.is_none(),
        }
    }

    /// Returns true if a mutation targeting this document is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.is_creating || self.is_updating || self.is_deleting
    }
}
