//! Provider list-shape detection.
//!
//! The provider wraps its record lists differently per endpoint. Shapes are
//! tried in a fixed order and the first match wins:
//! 1. the payload is itself a list
//! 2. `results` is a list
//! 3. `titles` is a list
//! 4. `data.results` is a list
//! 5. `data.titles` is a list
//! 6. the payload is an object whose values may each carry a `titles` list;
//!    those lists are concatenated in key order
//!
//! Anything else yields an empty list.

use cinedex_core::types::Record;
use serde_json::Value;
use tracing::debug;

/// A recognized way of embedding a record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    TopLevel,
    Results,
    Titles,
    DataResults,
    DataTitles,
    Grouped,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLevel => "top_level",
            Self::Results => "results",
            Self::Titles => "titles",
            Self::DataResults => "data.results",
            Self::DataTitles => "data.titles",
            Self::Grouped => "grouped",
        }
    }

    /// Classify `raw`, or `None` when no shape applies.
    pub fn detect(raw: &Value) -> Option<Self> {
        if raw.is_array() {
            return Some(Self::TopLevel);
        }
        let obj = raw.as_object()?;

        if obj.get("results").is_some_and(Value::is_array) {
            Some(Self::Results)
        } else if obj.get("titles").is_some_and(Value::is_array) {
            Some(Self::Titles)
        } else if nested(raw, "results").is_some() {
            Some(Self::DataResults)
        } else if nested(raw, "titles").is_some() {
            Some(Self::DataTitles)
        } else {
            Some(Self::Grouped)
        }
    }

    /// Borrow the records this shape selects from `raw`.
    fn records(self, raw: &Value) -> Vec<&Record> {
        let list = match self {
            Self::TopLevel => raw.as_array(),
            Self::Results => raw.get("results").and_then(Value::as_array),
            Self::Titles => raw.get("titles").and_then(Value::as_array),
            Self::DataResults => nested(raw, "results"),
            Self::DataTitles => nested(raw, "titles"),
            Self::Grouped => {
                return raw
                    .as_object()
                    .into_iter()
                    .flat_map(|obj| obj.values())
                    .filter_map(|group| group.get("titles").and_then(Value::as_array))
                    .flatten()
                    .collect();
            }
        };
        list.map(|items| items.iter().collect()).unwrap_or_default()
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn nested<'a>(raw: &'a Value, field: &str) -> Option<&'a Vec<Value>> {
    raw.get("data")?.get(field)?.as_array()
}

/// Extract the record list from a provider payload.
///
/// Never fails: an unrecognized payload produces an empty list. The input is
/// left untouched and records are copied out unexamined.
pub fn normalize(raw: &Value) -> Vec<Record> {
    let Some(shape) = Shape::detect(raw) else {
        debug!("payload has no list shape");
        return Vec::new();
    };

    let records: Vec<Record> = shape.records(raw).into_iter().cloned().collect();
    debug!(shape = %shape, records = records.len(), "normalized payload");
    records
}
