//! Siftql: a backend-agnostic query expression compiler.
//!
//! This crate turns a recursive boolean filter language (plus a compact
//! sort/pagination language) into backend-specific query fragments. Two
//! targets are supported out of the box:
//!
//! - SQL: a parameterized `WHERE` fragment with positional `?` placeholders
//!   and an argument list, plus an `ORDER BY` clause.
//! - Search engines (Typesense-style): a flat `filter_by` string, a
//!   `query_by` field list and a shared full-text query term.
//!
//! Compilation is driven by a [`Schema`] that declares, per record type,
//! which public columns exist, what they map to internally, and which
//! capabilities (filter/sort/search/index) they carry. The compilers are
//! stateless and never execute queries; embedding the output into a driver
//! call is the caller's job.
//!
//! ```
//! use siftql::{ColumnSpec, FilterExpr, SchemaBuilder, SqlCompiler};
//!
//! let schema = SchemaBuilder::new()
//!     .column("port", ColumnSpec::new("port"))
//!     .column("name", ColumnSpec::new("user_name").searchable())
//!     .build();
//!
//! let expr = FilterExpr::from_user_input(
//!     r#"{"operation":"AND","properties":[{"column":"port","op":"eq","value":80}]}"#,
//!     false,
//! ).unwrap();
//!
//! let out = SqlCompiler.compile(&expr, &schema).unwrap();
//! assert_eq!(out.clause, "( port = ? )");
//! ```

mod expr;
mod ops;
mod page;
mod schema;
mod search;
mod sort;
mod sql;
mod value;

pub use expr::*;
pub use ops::*;
pub use page::*;
pub use schema::*;
pub use search::*;
pub use sort::*;
pub use sql::*;
pub use value::*;

use thiserror::Error;

/// Unified error type for all siftql operations.
///
/// Every failure mode is a distinct variant so callers can tell a bad user
/// expression apart from a schema authorization problem without string
/// matching.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueryError {
    // schema errors
    #[error("column '{0}' does not exist")]
    UnknownColumn(String),
    #[error("column '{0}' does not support filtering")]
    ColumnNotFilterable(String),
    #[error("column '{0}' does not support searching")]
    ColumnNotSearchable(String),
    #[error("column '{0}' does not support sorting")]
    ColumnNotSortable(String),
    #[error("column '{0}' is not fuzzy searchable, it must carry an index")]
    SearchColumnNotIndexed(String),

    // syntax errors
    #[error("sort segment '{0}' is malformed, expected `col::<ASC|DESC>`")]
    MalformedSort(String),
    #[error("sort direction '{0}' is invalid, expected ASC or DESC")]
    InvalidSortDirection(String),
    #[error("expected page to be a non-negative number, got '{0}'")]
    InvalidPage(String),
    #[error("expected size to be a non-negative number, got '{0}'")]
    InvalidSize(String),
    #[error("no value bound for variable '{variable}' on column '{column}'")]
    UnboundVariable { column: String, variable: String },
    #[error("invalid filter expression: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid base64 filter expression: {0}")]
    Base64(#[from] base64::DecodeError),

    // semantic errors
    #[error("unsupported boolean operation '{0}', expected AND or OR")]
    UnknownBoolOp(String),
    #[error("operator '{0}' is not supported")]
    UnknownOperator(String),
    #[error("column '{0}' must set exactly one of value or variable")]
    ValueVariableExclusive(String),
    #[error("malformed filter node (column '{0}'): a leaf needs column and op, a group needs properties, not a mix")]
    MalformedNode(String),
    #[error("all fuzzy operations in one expression must share the same search term")]
    FuzzyTermMismatch,
    #[error("fuzzy operation on column '{0}' requires a string value")]
    FuzzyTermNotString(String),
    #[error("search target cannot have more than 1 level of filter nesting")]
    SearchNestingTooDeep,
    #[error("search target cannot express OR logic")]
    SearchCannotExpressOr,
    #[error("operator 'like' is not supported by the search target, use 'fuzzy'")]
    SearchLikeUnsupported,
}
