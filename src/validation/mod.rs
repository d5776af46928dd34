// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Form validation for domain documents.
//!
//! Validation turns untyped form input into typed documents in three steps:
//!
//! 1. [`RawFields::from_urlencoded`] decodes the submitted body.
//! 2. Each field is checked on its own by a validator from [`field`] or
//!    [`schedule`], producing a [`ValidationResult`].
//! 3. [`FromForm::from_form`] combines the results. If any field failed, the
//!    caller gets a [`FormErrors`] carrying every field error, not only the
//!    first, together with the id of the submitted document.
//!
//! The document id matters when several forms of the same kind are shown at
//! once: errors are attributed to the form whose id matches, never to its
//! siblings.
//!
//! # Examples
//!
//! ```
//! use priceheat_lib::document::Plug;
//! use priceheat_lib::validation::{FromForm, RawFields};
//!
//! let raw = RawFields::from_urlencoded("id=p7&name=&ip=300.1.1.1&room_id=r1").unwrap();
//! let errors = Plug::from_form(&raw).unwrap_err();
//!
//! assert_eq!(errors.id(), Some("p7"));
//! assert_eq!(errors.field("name").unwrap().to_string(), "Required");
//! assert_eq!(errors.field("ip").unwrap().to_string(), "Not a valid IPv4 address");
//! assert!(errors.field("room_id").is_none());
//! ```

mod documents;
pub mod field;
mod raw;
pub mod schedule;

pub use documents::FromForm;
pub use raw::RawFields;

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::FieldError;

/// Outcome of validating a single field: the typed value or the reason it
/// was rejected.
pub type ValidationResult<T> = Result<T, FieldError>;

/// Every validation failure of one submitted form.
///
/// Errors are keyed by field name. Failures that cannot be attributed to a
/// single field go into the `other` slot. The id of the submitted document
/// is kept so the errors can be matched back to the right form.
///
/// A `FormErrors` returned from [`FromForm::from_form`] always holds at
/// least one error.
pub struct FormErrors<D> {
    id: Option<String>,
    fields: BTreeMap<&'static str, FieldError>,
    other: Option<String>,
    document: PhantomData<fn() -> D>,
}

impl<D> FormErrors<D> {
    /// Creates an empty error set for the document with the given id.
    #[must_use]
    pub fn new(id: Option<String>) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
            other: None,
            document: PhantomData,
        }
    }

    /// Records the error of a field result and returns its value, if any.
    pub fn check<T>(&mut self, field: &'static str, result: ValidationResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.add(field, error);
                None
            }
        }
    }

    /// Records an error for a field, replacing any earlier one.
    pub fn add(&mut self, field: &'static str, error: FieldError) {
        self.fields.insert(field, error);
    }

    /// Records an error that belongs to no single field.
    pub fn set_other(&mut self, message: impl Into<String>) {
        self.other = Some(message.into());
    }

    /// Returns the id of the document the errors belong to.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns true if these errors belong to the form of `document_id`.
    ///
    /// `None` matches the form of a document that has not been saved yet.
    #[must_use]
    pub fn belongs_to(&self, document_id: Option<&str>) -> bool {
        self.id.as_deref() == document_id
    }

    /// Returns the error recorded for a field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldError> {
        self.fields.get(name)
    }

    /// Returns the error that belongs to no single field.
    #[must_use]
    pub fn other(&self) -> Option<&str> {
        self.other.as_deref()
    }

    /// Iterates over the field errors in field name order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.fields.iter().map(|(name, error)| (*name, error))
    }

    /// Returns the number of recorded errors, including the `other` slot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len() + usize::from(self.other.is_some())
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<D> fmt::Debug for FormErrors<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormErrors")
            .field("id", &self.id)
            .field("fields", &self.fields)
            .field("other", &self.other)
            .finish()
    }
}

impl<D> Clone for FormErrors<D> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            fields: self.fields.clone(),
            other: self.other.clone(),
            document: PhantomData,
        }
    }
}

impl<D> PartialEq for FormErrors<D> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.fields == other.fields && self.other == other.other
    }
}

impl<D> fmt::Display for FormErrors<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, error) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{name}: {error}")?;
            first = false;
        }
        if let Some(other) = &self.other {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(other)?;
        }
        Ok(())
    }
}

impl<D> std::error::Error for FormErrors<D> {}

/// Serializes as a flat object: `id`, `other` and one message per field.
impl<D> Serialize for FormErrors<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("other", &self.other)?;
        for (name, error) in &self.fields {
            map.serialize_entry(name, &error.to_string())?;
        }
        map.end()
    }
}
