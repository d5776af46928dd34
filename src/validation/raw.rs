// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed access to submitted form data.
//!
//! Forms arrive as `application/x-www-form-urlencoded` bodies. Decoding them
//! into [`RawFields`] happens once, before any validator runs, so validators
//! only ever see well-formed optional strings.

use std::collections::BTreeMap;

use crate::error::DecodeError;

/// Decoded form fields, keyed by field name.
///
/// A field may repeat (multi-selects, checkbox groups, paired time window
/// inputs); all values are kept in submission order. A trailing `[]` on a
/// field name is dropped, so `days[]=MON` and `days=MON` are the same field.
///
/// # Examples
///
/// ```
/// use priceheat_lib::validation::RawFields;
///
/// let raw = RawFields::from_urlencoded("name=Living+room&days=MON&days=tue").unwrap();
/// assert_eq!(raw.text("name"), Some("Living room"));
/// assert_eq!(raw.list("days"), ["MON", "tue"]);
/// assert!(raw.text("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    fields: BTreeMap<String, Vec<String>>,
}

impl RawFields {
    /// Creates an empty set of fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an urlencoded form body.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidEncoding` if a segment is not valid UTF-8
    /// once percent-decoded, and `DecodeError::MissingKey` if a segment has a
    /// value but no field name.
    pub fn from_urlencoded(body: &str) -> Result<Self, DecodeError> {
        let mut raw = Self::new();
        for segment in body.split('&').filter(|s| !s.is_empty()) {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            let key = decode_component(key, segment)?;
            if key.is_empty() {
                return Err(DecodeError::MissingKey(segment.to_string()));
            }
            let value = decode_component(value, segment)?;
            raw.insert(key, value);
        }
        Ok(raw)
    }

    /// Appends a value to a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let mut key = key.into();
        if key.ends_with("[]") {
            key.truncate(key.len() - 2);
        }
        self.fields.entry(key).or_default().push(value.into());
    }

    /// Appends a value to a field, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the first value of a field.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns every value of a field, or an empty slice if it is absent.
    #[must_use]
    pub fn list(&self, key: &str) -> &[String] {
        self.fields
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns every value of a field, or `None` if it is absent.
    #[must_use]
    pub fn list_opt(&self, key: &str) -> Option<&[String]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    /// Returns true if a checkbox field was submitted as checked.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.text(key), Some("on" | "true" | "1"))
    }

    /// Returns the document id carried by the form, if it is not blank.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.text("id")
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    /// Returns true if no field was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut raw = Self::new();
        for (key, value) in iter {
            raw.insert(key, value);
        }
        raw
    }
}

fn decode_component(component: &str, segment: &str) -> Result<String, DecodeError> {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| DecodeError::InvalidEncoding(segment.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_and_plus() {
        let raw = RawFields::from_urlencoded("name=Caf%C3%A9+bar&ip=10.0.0.1").unwrap();
        assert_eq!(raw.text("name"), Some("Café bar"));
        assert_eq!(raw.text("ip"), Some("10.0.0.1"));
    }

    #[test]
    fn keeps_repeated_values_in_order() {
        let raw = RawFields::from_urlencoded("from=06%3A00&to=08%3A00&from=17%3A00&to=21%3A00")
            .unwrap();
        assert_eq!(raw.list("from"), ["06:00", "17:00"]);
        assert_eq!(raw.list("to"), ["08:00", "21:00"]);
    }

    #[test]
    fn bracket_suffix_is_dropped() {
        let raw = RawFields::from_urlencoded("days%5B%5D=MON&days[]=TUE").unwrap();
        assert_eq!(raw.list("days"), ["MON", "TUE"]);
    }

    #[test]
    fn segment_without_value_is_empty_string() {
        let raw = RawFields::from_urlencoded("name&&id=").unwrap();
        assert_eq!(raw.text("name"), Some(""));
        assert_eq!(raw.id(), None);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let result = RawFields::from_urlencoded("name=%FF%FE");
        assert!(matches!(result, Err(DecodeError::InvalidEncoding(_))));
    }

    #[test]
    fn missing_key_is_rejected() {
        let result = RawFields::from_urlencoded("=value");
        assert_eq!(result, Err(DecodeError::MissingKey("=value".to_string())));
    }

    #[test]
    fn flag_reads_checkbox_values() {
        let raw = RawFields::new().with("scheduled", "on");
        assert!(raw.flag("scheduled"));
        assert!(!raw.flag("other"));
    }

    #[test]
    fn collects_from_pairs() {
        let raw: RawFields = [("id", " r1 "), ("name", "Hall")].into_iter().collect();
        assert_eq!(raw.id(), Some("r1".to_string()));
        assert!(raw.list_opt("missing").is_none());
        assert!(!raw.is_empty());
    }
}
