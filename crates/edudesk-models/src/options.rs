//! Dropdown options.
//!
//! Option lists come back from the API in several shapes: `{id, name}`
//! objects, `{value, label}` objects, `{id, title}` objects, or bare strings.
//! They are normalized into [`SelectOption`] once, when fetched, and never
//! inspected again at render time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::reference::Reference;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option whose value and label are the same text.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: text.clone(),
            label: text,
        }
    }

    /// Normalize one raw option. Returns `None` for shapes that carry no value.
    pub fn from_json(raw: &Value) -> Option<Self> {
        match raw {
            Value::String(s) if !s.trim().is_empty() => Some(Self::plain(s.trim())),
            Value::Number(n) => Some(Self::plain(n.to_string())),
            Value::Object(map) => {
                let value = ["value", "id"]
                    .iter()
                    .find_map(|k| map.get(*k).and_then(scalar_text))?;
                let label = ["label", "name", "title"]
                    .iter()
                    .find_map(|k| map.get(*k).and_then(scalar_text))
                    .unwrap_or_else(|| value.clone());
                Some(Self { value, label })
            }
            _ => None,
        }
    }

    /// Normalize a list, dropping entries without a value.
    pub fn from_json_list(raw: &[Value]) -> Vec<Self> {
        raw.iter().filter_map(Self::from_json).collect()
    }

    /// Parse the value as an integer id, for options feeding a reference field.
    pub fn id(&self) -> Option<i64> {
        self.value.parse().ok()
    }
}

impl<Id: ToString> From<Reference<Id>> for SelectOption {
    fn from(r: Reference<Id>) -> Self {
        Self::new(r.id.to_string(), r.label)
    }
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_id_name_object() {
        let opt = SelectOption::from_json(&json!({"id": 4, "name": "Python"})).unwrap();
        assert_eq!(opt, SelectOption::new("4", "Python"));
        assert_eq!(opt.id(), Some(4));
    }

    #[test]
    fn test_from_value_label_object() {
        let opt = SelectOption::from_json(&json!({"value": "web", "label": "Website"})).unwrap();
        assert_eq!(opt, SelectOption::new("web", "Website"));
    }

    #[test]
    fn test_from_title_object() {
        let opt = SelectOption::from_json(&json!({"id": 2, "title": "Weekend"})).unwrap();
        assert_eq!(opt.label, "Weekend");
    }

    #[test]
    fn test_from_bare_string() {
        let opt = SelectOption::from_json(&json!(" Walk-in ")).unwrap();
        assert_eq!(opt, SelectOption::plain("Walk-in"));
    }

    #[test]
    fn test_object_without_label_uses_value() {
        let opt = SelectOption::from_json(&json!({"id": 11})).unwrap();
        assert_eq!(opt.label, "11");
    }

    #[test]
    fn test_unusable_shapes_dropped() {
        let raw = vec![json!(null), json!(""), json!({"name": "no id"}), json!("Ok")];
        assert_eq!(SelectOption::from_json_list(&raw), vec![SelectOption::plain("Ok")]);
    }
}
