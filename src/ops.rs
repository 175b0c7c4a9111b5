//! Operator catalog shared by all compiler backends.
//!
//! Operators arrive as lowercase tokens inside the filter expression wire
//! format. Each backend maps a [`FilterOp`] to its own symbol; an operator a
//! backend cannot express is that backend's error to report.

use crate::QueryError;

/// The shared filter operator vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Like,
    Fuzzy,
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
    In,
    Nin,
}

impl FilterOp {
    /// Resolve a wire token. Unknown tokens are left to the compilers to
    /// report so the error carries the offending string.
    pub fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "like" => Self::Like,
            "fuzzy" => Self::Fuzzy,
            "gt" => Self::Gt,
            "ge" => Self::Ge,
            "lt" => Self::Lt,
            "le" => Self::Le,
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "in" => Self::In,
            "nin" => Self::Nin,
            _ => return None,
        })
    }

    /// `in`/`nin` take a list of values; everything else takes one.
    pub fn is_multi_value(self) -> bool {
        matches!(self, Self::In | Self::Nin)
    }

    /// Operators that require the column to carry the search capability.
    pub fn is_search_class(self) -> bool {
        matches!(self, Self::Like | Self::Fuzzy)
    }
}

/// Boolean combinator of a filter expression group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// Resolve the group's `operation` token. Anything but the exact tokens
    /// `AND`/`OR` is a hard error.
    pub fn parse(token: &str) -> Result<Self, QueryError> {
        match token {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            other => Err(QueryError::UnknownBoolOp(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}
