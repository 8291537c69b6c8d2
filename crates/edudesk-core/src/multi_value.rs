//! Multi-valued label fields (tags, sources, course interests).
//!
//! The API stores these as a single delimited string (`"A, B, C"`); forms edit
//! them as an ordered list of distinct labels. [`decode`] and [`encode`] convert
//! between the two and [`toggle`] is the only edit operation.
//!
//! # Example
//!
//! ```
//! use edudesk_core::multi_value::{decode, encode, toggle};
//!
//! let tags = decode(Some("Hot, Callback"));
//! let tags = toggle(&tags, "Walk-in");
//! assert_eq!(encode(&tags), "Hot, Callback, Walk-in");
//! ```

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Separator used when joining values into the wire representation.
pub const SEPARATOR: &str = ", ";

/// Split a wire string into trimmed, non-empty labels, keeping their order.
pub fn decode(wire: Option<&str>) -> Vec<String> {
    match wire {
        None => Vec::new(),
        Some(s) => s
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Join labels into the wire representation.
pub fn encode<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Remove every occurrence of `value` if present, otherwise append it.
///
/// Returns a new list; `current` is left untouched.
pub fn toggle<S: AsRef<str>>(current: &[S], value: &str) -> Vec<String> {
    let present = current.iter().any(|v| v.as_ref() == value);
    let mut next: Vec<String> = current
        .iter()
        .map(|v| v.as_ref().to_string())
        .filter(|v| !present || v != value)
        .collect();
    if !present {
        next.push(value.to_string());
    }
    next
}

/// Edit representation of a multi-valued field.
///
/// Deserializes from the delimited string the API returns, from a JSON array,
/// or from `null`. Always serializes as a JSON array; the server re-joins it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MultiValue(Vec<String>);

impl MultiValue {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_wire(wire: &str) -> Self {
        Self(decode(Some(wire)))
    }

    pub fn to_wire(&self) -> String {
        encode(&self.0)
    }

    /// Toggle `value` in place.
    pub fn toggle(&mut self, value: &str) {
        self.0 = toggle(&self.0, value);
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for MultiValue {
    /// Normalizes the list: trims labels, drops empties and repeats.
    fn from(values: Vec<String>) -> Self {
        let mut out: Vec<String> = Vec::with_capacity(values.len());
        for v in values {
            let v = v.trim();
            if !v.is_empty() && !out.iter().any(|o| o == v) {
                out.push(v.to_string());
            }
        }
        Self(out)
    }
}

impl<'a> From<&'a [&'a str]> for MultiValue {
    fn from(values: &'a [&'a str]) -> Self {
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .into()
    }
}

impl fmt::Display for MultiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl<'a> IntoIterator for &'a MultiValue {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for MultiValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

struct MultiValueVisitor;

impl<'de> Visitor<'de> for MultiValueVisitor {
    type Value = MultiValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a comma separated string, a list of strings, or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(MultiValue::from_wire(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(MultiValue::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(MultiValue::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::new();
        while let Some(v) = seq.next_element::<String>()? {
            values.push(v);
        }
        Ok(values.into())
    }
}

impl<'de> Deserialize<'de> for MultiValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MultiValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_and_none() {
        assert!(decode(None).is_empty());
        assert!(decode(Some("")).is_empty());
        assert!(decode(Some(" , ,")).is_empty());
    }

    #[test]
    fn test_decode_trims_and_drops_empty_segments() {
        assert_eq!(decode(Some("A, B, C")), vec!["A", "B", "C"]);
        assert_eq!(decode(Some("A,B,,C")), vec!["A", "B", "C"]);
        assert_eq!(decode(Some("  Walk-in ,Referral")), vec!["Walk-in", "Referral"]);
    }

    #[test]
    fn test_toggle_removes_present_value() {
        assert_eq!(toggle(&["A", "B"], "A"), vec!["B"]);
    }

    #[test]
    fn test_toggle_appends_absent_value() {
        assert_eq!(toggle(&["A", "B"], "C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_toggle_removes_all_occurrences() {
        assert_eq!(toggle(&["A", "B", "A"], "A"), vec!["B"]);
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let original = vec!["A".to_string(), "B".to_string()];
        let once = toggle(&original, "Z");
        let twice = toggle(&once, "Z");
        assert_eq!(twice, original);
    }

    #[test]
    fn test_toggle_does_not_mutate_input() {
        let original = vec!["A".to_string()];
        let _ = toggle(&original, "A");
        assert_eq!(original, vec!["A"]);
    }

    #[test]
    fn test_encode_is_left_inverse_of_decode() {
        let lists: Vec<Vec<&str>> = vec![vec![], vec!["One"], vec!["Web", "Facebook Ads", "Walk-in"]];
        for list in lists {
            assert_eq!(decode(Some(&encode(&list))), list);
        }
    }

    #[test]
    fn test_multi_value_deserialize_from_string() {
        let v: MultiValue = serde_json::from_str(r#""X, Y""#).unwrap();
        assert_eq!(v.as_slice(), ["X", "Y"]);
    }

    #[test]
    fn test_multi_value_deserialize_from_array_and_null() {
        let v: MultiValue = serde_json::from_str(r#"["X", " Y ", "X"]"#).unwrap();
        assert_eq!(v.as_slice(), ["X", "Y"]);
        let v: MultiValue = serde_json::from_str("null").unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_multi_value_option_field_defaults() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default)]
            tags: MultiValue,
        }
        let row: Row = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(row.tags.is_empty());
        let row: Row = serde_json::from_str("{}").unwrap();
        assert!(row.tags.is_empty());
    }

    #[test]
    fn test_multi_value_serializes_as_array() {
        let mut v = MultiValue::from_wire("X, Y");
        v.toggle("Z");
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"["X","Y","Z"]"#);
        assert_eq!(v.to_string(), "X, Y, Z");
    }
}
