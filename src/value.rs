//! Value module: the closed set of scalar kinds a filter leaf may carry.

use serde::{Deserialize, Serialize};

/// A filter leaf value.
///
/// The wire format is plain JSON, so `{"value": 80}` and `{"value": "GET"}`
/// both deserialize without any tagging. Lists are only ever lists of
/// scalars; nesting a list inside a list is not meaningful for any backend
/// and is rejected by the compilers through operator arity rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Human-readable kind name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
        }
    }

    /// Borrow the value as a string if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Unquoted textual form used by the search-engine target, where values
    /// are embedded directly into the filter string. Lists render as their
    /// comma-joined elements without brackets; the compiler adds those.
    pub fn render(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
            Self::List(items) => items
                .iter()
                .map(Self::render)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for FilterValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for FilterValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
