//! Value parsers for command-line arguments.

use serde_json::Value;

/// Parse `key=value`. The value may be empty, the key may not.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// A reference field choice given as `field=id:label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub field: String,
    pub id: i64,
    pub label: String,
}

pub fn parse_selection(raw: &str) -> Result<Selection, String> {
    let (field, rest) = parse_key_value(raw)?;
    let (id, label) = rest
        .split_once(':')
        .ok_or_else(|| format!("expected field=id:label, got `{raw}`"))?;
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid id in `{raw}`: {e}"))?;
    let label = label.trim();
    if label.is_empty() {
        return Err(format!("missing label in `{raw}`"));
    }
    Ok(Selection {
        field,
        id,
        label: label.to_string(),
    })
}

/// Interpret a `--set` value: JSON when it parses, plain text otherwise.
///
/// `--set fee=2500` sends a number and `--set name=Rust` a string. Quote the
/// value (`--set 'code="101"'`) to force a string.
pub fn field_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
