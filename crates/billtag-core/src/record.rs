//! Bill records and feature/label extraction.
//!
//! A bill is a loosely-structured JSON object: different upstream sources
//! (OpenStates, Congress.gov, Plural Policy) disagree on which text fields
//! exist and which key carries the subject tags. Extraction is total — any
//! JSON object yields a text blob and a topic list, with missing fields
//! contributing empty strings or empty lists rather than errors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Text-bearing fields, concatenated in this fixed order.
///
/// The order is load-bearing: downstream tokenization must see identical
/// input for identical records across runs.
const TEXT_FIELDS: &[&str] = &[
    "title",
    "summary",
    "description",
    "body",
    "full_text",
    "geminiSummary",
];

/// Topic-bearing fields, probed in priority order; first hit wins.
const TOPIC_FIELDS: &[&str] = &["subjects", "subject", "topics", "labels"];

/// A raw bill record: an arbitrary JSON object keyed by field name.
///
/// No field is required. Kept as a generic key-value map so that topic
/// lookup can probe keys that vary by source, per [`TOPIC_FIELDS`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillRecord(pub Map<String, Value>);

impl BillRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a field, consuming and returning the record.
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }
}

/// Derived training pair: one per [`BillRecord`], immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    /// Space-joined text blob from all text-bearing fields.
    pub text: String,
    /// Subject tags; empty when the record carries none.
    pub topics: Vec<String>,
}

/// Extract the (text, topics) pair from one record. Never fails.
pub fn extract_example(bill: &BillRecord) -> TrainingExample {
    let mut parts: Vec<String> = TEXT_FIELDS
        .iter()
        .map(|field| bill.get(field).map(value_to_text).unwrap_or_default())
        .collect();
    parts.push(abstracts_text(bill));

    TrainingExample {
        text: parts.join(" "),
        topics: extract_topics(bill),
    }
}

/// Extract examples for a whole split, preserving record order.
pub fn extract_examples(bills: &[BillRecord]) -> Vec<TrainingExample> {
    bills.iter().map(extract_example).collect()
}

/// Join the text of every entry in the `abstracts` list.
///
/// Structured entries contribute their `"abstract"` field; anything else
/// contributes its plain string form. A missing or non-list `abstracts`
/// field contributes the empty string.
fn abstracts_text(bill: &BillRecord) -> String {
    let Some(Value::Array(entries)) = bill.get("abstracts") else {
        return String::new();
    };

    entries
        .iter()
        .map(|entry| match entry {
            Value::Object(obj) => obj.get("abstract").map(value_to_text).unwrap_or_default(),
            other => value_to_text(other),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Probe the topic-bearing fields in priority order.
///
/// A bare string becomes a one-element list; a list is taken element-wise;
/// an object contributes its keys (its natural iteration order); any other
/// scalar becomes a one-element list. Null, empty strings, and empty lists
/// count as absent and probing continues to the next field.
fn extract_topics(bill: &BillRecord) -> Vec<String> {
    for field in TOPIC_FIELDS {
        match bill.get(field) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) if s.is_empty() => continue,
            Some(Value::Array(items)) if items.is_empty() => continue,
            Some(Value::String(s)) => return vec![s.clone()],
            Some(Value::Array(items)) => return items.iter().map(value_to_text).collect(),
            Some(Value::Object(obj)) => return obj.keys().cloned().collect(),
            Some(other) => return vec![value_to_text(other)],
        }
    }
    vec![]
}

/// Natural string form of a JSON value.
///
/// Strings are taken verbatim (no quoting), null is empty, and composite
/// values fall back to their compact JSON text.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        composite => composite.to_string(),
    }
}
