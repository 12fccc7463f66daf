//! Records returned by the remote service and the decoding step that admits
//! them into the model.
//!
//! The records service answers with loosely shaped JSON (`gr_no` here,
//! `displayLabel` there, numbers where strings are expected). Nothing reaches
//! the workflow without going through `decode_pool` or `decode_detail`, which
//! either produce a well-formed value or a `DecodeError` the caller reports as
//! a failed fetch.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry in the selectable pool of an upload type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleRecord {
    pub id: String,
    #[serde(rename = "displayLabel")]
    pub display_label: String,
}

/// Descriptive fields shown after a record is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDetail {
    pub id: String,
    pub fields: BTreeMap<String, String>,
}

impl RecordDetail {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Fields in display order: `preferred` keys first (when present), then
    /// the remaining fields alphabetically.
    pub fn display_fields<'a>(&'a self, preferred: &[&str]) -> Vec<(&'a str, &'a str)> {
        let mut ordered: Vec<(&str, &str)> = preferred
            .iter()
            .filter_map(|key| self.fields.get_key_value(*key))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        ordered.extend(
            self.fields
                .iter()
                .filter(|(k, _)| !preferred.contains(&k.as_str()))
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        ordered
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("expected a JSON {expected}, got {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("pool entry {index} has no usable identifier")]
    MissingIdentifier { index: usize },
    #[error("identifier {0} appears more than once in the pool")]
    DuplicateIdentifier(String),
    #[error("detail for {requested} was answered with the record {received}")]
    MismatchedDetail { requested: String, received: String },
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn identifier_of(object: &Map<String, Value>) -> Option<String> {
    ["id", "gr_no"]
        .iter()
        .filter_map(|key| object.get(*key))
        .filter_map(scalar_text)
        .find(|id| !id.is_empty())
}

/// Decodes the body of `GET /pool/{kind}`. Server order is kept.
pub fn decode_pool(body: &Value) -> Result<Vec<EligibleRecord>, DecodeError> {
    let entries = body.as_array().ok_or(DecodeError::UnexpectedShape {
        expected: "array",
        found: kind_of(body),
    })?;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let object = entry.as_object().ok_or(DecodeError::UnexpectedShape {
            expected: "object",
            found: kind_of(entry),
        })?;
        let id = identifier_of(object).ok_or(DecodeError::MissingIdentifier { index })?;
        if !seen.insert(id.clone()) {
            return Err(DecodeError::DuplicateIdentifier(id));
        }

        let display_label = object
            .get("displayLabel")
            .and_then(scalar_text)
            .filter(|label| !label.is_empty())
            .or_else(|| {
                object
                    .get("name")
                    .and_then(scalar_text)
                    .filter(|name| !name.is_empty())
                    .map(|name| format!("{} - {}", id, name))
            })
            .unwrap_or_else(|| id.clone());

        records.push(EligibleRecord { id, display_label });
    }
    Ok(records)
}

/// Decodes the body of `GET /detail/{id}` for the record `requested`.
pub fn decode_detail(requested: &str, body: &Value) -> Result<RecordDetail, DecodeError> {
    let object = body.as_object().ok_or(DecodeError::UnexpectedShape {
        expected: "object",
        found: kind_of(body),
    })?;

    if let Some(received) = identifier_of(object) {
        if received != requested {
            return Err(DecodeError::MismatchedDetail {
                requested: requested.to_string(),
                received,
            });
        }
    }

    let fields = object
        .iter()
        .filter_map(|(key, value)| scalar_text(value).map(|text| (key.clone(), text)))
        .collect();

    Ok(RecordDetail {
        id: requested.to_string(),
        fields,
    })
}
