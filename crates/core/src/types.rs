use serde::{Deserialize, Serialize};

/// An opaque provider record (title, person, genre, country...).
///
/// Records are passed through untouched; only the list around them is reshaped.
pub type Record = serde_json::Value;

/// Uniform wrapper returned by every paginated operation.
///
/// `total` is the length of the normalized list before slicing, not any
/// count the provider may report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Record> {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub data: Vec<T>,
}

/// Query parameter names consumed locally and never forwarded upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageField {
    Limit,
    Offset,
}

impl PageField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Offset => "offset",
        }
    }
}

impl std::fmt::Display for PageField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
