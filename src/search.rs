//! Search-engine target: compiles filter and sort expressions into a
//! Typesense-style search request.
//!
//! Search engines model full-text querying separately from structured
//! filters, so the output splits into a `filter_by` string, a `query_by`
//! field list and a single shared query term. The target is structurally
//! weaker than SQL: only one level of nesting, no OR logic, no plain
//! `like`.

use crate::{
    Capability, FilterExpr, FilterOp, FilterValue, LogicalOp, QueryError, Schema, SortExpr,
};

/// A compiled search request fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// `&&`-joined structured filter fragments.
    pub filter_by: String,
    /// Comma-joined field list the query term applies to.
    pub query_by: String,
    /// The shared full-text search term, empty when no fuzzy leaf is present.
    pub query_term: String,
}

/// Stateless search-engine filter/sort compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchCompiler;

impl SearchCompiler {
    /// Compile an expression into a [`SearchQuery`].
    ///
    /// Fuzzy leaves must target indexed columns, carry string values, and
    /// agree on a single search term; their columns accumulate into
    /// `query_by`. Everything else becomes a `filter_by` fragment.
    pub fn compile(&self, expr: &FilterExpr, schema: &Schema) -> Result<SearchQuery, QueryError> {
        expr.require_group_shape()?;
        if LogicalOp::parse(&expr.binary_operation)? == LogicalOp::Or {
            return Err(QueryError::SearchCannotExpressOr);
        }

        let mut query_fields: Vec<&str> = Vec::new();
        let mut query_term = String::new();
        let mut filters = Vec::new();

        for child in &expr.properties {
            if child.is_group() {
                return Err(QueryError::SearchNestingTooDeep);
            }
            if child.is_empty_group() {
                // an empty sub-group is "no filter", nothing to emit
                continue;
            }
            if !child.is_leaf() {
                // e.g. a column without an op: the predicate must not
                // silently vanish from the query
                return Err(QueryError::MalformedNode(child.column.clone()));
            }
            if !schema.column_exists(&child.column) {
                return Err(QueryError::UnknownColumn(child.column.clone()));
            }
            if !schema.has_capability(&child.column, Capability::Filter) {
                return Err(QueryError::ColumnNotFilterable(child.column.clone()));
            }
            let value = Self::leaf_value(child)?;
            let op = FilterOp::parse(&child.op)
                .ok_or_else(|| QueryError::UnknownOperator(child.op.clone()))?;

            if op == FilterOp::Fuzzy {
                if !schema.has_capability(&child.column, Capability::Index) {
                    return Err(QueryError::SearchColumnNotIndexed(child.column.clone()));
                }
                let term = value
                    .as_str()
                    .ok_or_else(|| QueryError::FuzzyTermNotString(child.column.clone()))?;
                if query_term.is_empty() {
                    query_term = term.to_string();
                } else if term != query_term {
                    return Err(QueryError::FuzzyTermMismatch);
                }
                query_fields.push(&child.column);
            } else {
                let sym = Self::filter_symbol(op)?;
                let fragment = if op.is_multi_value() {
                    format!("{}{sym}[{}]", child.column, value.render())
                } else {
                    format!("{}{sym}{}", child.column, value.render())
                };
                filters.push(fragment);
            }
        }

        Ok(SearchQuery {
            filter_by: filters.join("&&"),
            query_by: query_fields.join(","),
            query_term,
        })
    }

    /// Validate by compiling and discarding the output, so validation and
    /// compilation can never disagree on this target.
    pub fn validate(&self, expr: &FilterExpr, schema: &Schema) -> Result<(), QueryError> {
        self.compile(expr, schema).map(|_| ())
    }

    /// Compile a sort expression to `col:dir,col:dir`, lower-cased, with no
    /// leading keyword.
    pub fn compile_sort(&self, sort: &SortExpr, schema: &Schema) -> Result<String, QueryError> {
        let mut clauses = Vec::new();
        for (col, dir) in sort.pairs() {
            if !schema.column_exists(col) {
                return Err(QueryError::UnknownColumn(col.clone()));
            }
            if !schema.has_capability(col, Capability::Sort) {
                return Err(QueryError::ColumnNotSortable(col.clone()));
            }
            clauses.push(format!("{col}:{}", dir.as_lower_str()));
        }
        Ok(clauses.join(","))
    }

    fn leaf_value(leaf: &FilterExpr) -> Result<FilterValue, QueryError> {
        match (&leaf.value, &leaf.variable) {
            (Some(_), Some(_)) | (None, None) => {
                Err(QueryError::ValueVariableExclusive(leaf.column.clone()))
            }
            (Some(value), None) => Ok(value.clone()),
            (None, Some(variable)) => Err(QueryError::UnboundVariable {
                column: leaf.column.clone(),
                variable: variable.clone(),
            }),
        }
    }

    fn filter_symbol(op: FilterOp) -> Result<&'static str, QueryError> {
        Ok(match op {
            FilterOp::Gt => ":>",
            FilterOp::Ge => ":>=",
            FilterOp::Lt => ":<",
            FilterOp::Le => ":<=",
            FilterOp::Eq => ":=",
            FilterOp::Ne => ":!=",
            FilterOp::In => ":",
            FilterOp::Nin => ":!",
            // exists in the shared catalog but this target cannot express it
            FilterOp::Like => return Err(QueryError::SearchLikeUnsupported),
            FilterOp::Fuzzy => unreachable!("fuzzy is aggregated, not mapped"),
        })
    }
}
