//! SQL target: compiles filter and sort expressions into parameterized
//! SQL fragments.
//!
//! The output is a boolean fragment with `?` placeholders plus the bind
//! values in left-to-right occurrence order. The compiler never touches a
//! database; the caller embeds the fragment into its own statement.

use crate::{
    Capability, FilterExpr, FilterOp, FilterValue, LogicalOp, QueryError, Schema, SortExpr,
};

/// A compiled SQL boolean fragment.
///
/// `clause` is empty for an expression with no leaves; callers embedding it
/// must guard with a tautology such as `1=1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFilter {
    pub clause: String,
    pub args: Vec<FilterValue>,
}

/// Stateless SQL filter/sort compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlCompiler;

impl SqlCompiler {
    /// Check an expression against the schema without producing output.
    /// Anything `validate` accepts, [`compile`](Self::compile) accepts too,
    /// except leaves whose variables were never bound to a value.
    pub fn validate(&self, expr: &FilterExpr, schema: &Schema) -> Result<(), QueryError> {
        expr.require_group_shape()?;
        LogicalOp::parse(&expr.binary_operation)?;
        for child in &expr.properties {
            if child.is_leaf() {
                Self::check_leaf(child, schema)?;
                if child.value.is_some() == child.variable.is_some() {
                    return Err(QueryError::ValueVariableExclusive(child.column.clone()));
                }
            } else if child.is_group() {
                self.validate(child, schema)?;
            } else if !child.is_empty_group() {
                return Err(QueryError::MalformedNode(child.column.clone()));
            }
        }
        Ok(())
    }

    /// Compile to a parenthesized boolean fragment and positional args.
    /// Children are emitted strictly in list order.
    pub fn compile(&self, expr: &FilterExpr, schema: &Schema) -> Result<SqlFilter, QueryError> {
        expr.require_group_shape()?;
        let bool_op = LogicalOp::parse(&expr.binary_operation)?;
        let mut fragments = Vec::new();
        let mut args = Vec::new();

        for child in &expr.properties {
            if child.is_leaf() {
                let op = Self::check_leaf(child, schema)?;
                let value = Self::leaf_value(child)?;
                let internal = schema
                    .internal_name(&child.column)
                    .ok_or_else(|| QueryError::UnknownColumn(child.column.clone()))?;
                fragments.push(Self::render_leaf(internal, op, &value, &mut args));
            } else if child.is_group() {
                let inner = self.compile(child, schema)?;
                if !inner.clause.is_empty() {
                    fragments.push(inner.clause);
                    args.extend(inner.args);
                }
            } else if !child.is_empty_group() {
                return Err(QueryError::MalformedNode(child.column.clone()));
            }
        }

        let clause = if fragments.is_empty() {
            String::new()
        } else {
            let sep = format!(" {} ", bool_op.as_str());
            format!("( {} )", fragments.join(sep.as_str()))
        };
        Ok(SqlFilter { clause, args })
    }

    /// Compile a sort expression to an `ORDER BY` clause; empty sorts yield
    /// an empty string.
    pub fn compile_sort(&self, sort: &SortExpr, schema: &Schema) -> Result<String, QueryError> {
        let mut clauses = Vec::new();
        for (col, dir) in sort.pairs() {
            let internal = schema
                .internal_name(col)
                .ok_or_else(|| QueryError::UnknownColumn(col.clone()))?;
            if !schema.has_capability(col, Capability::Sort) {
                return Err(QueryError::ColumnNotSortable(col.clone()));
            }
            clauses.push(format!("{internal} {}", dir.as_str()));
        }
        if clauses.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("ORDER BY {}", clauses.join(", ")))
    }

    fn check_leaf(leaf: &FilterExpr, schema: &Schema) -> Result<FilterOp, QueryError> {
        if !schema.column_exists(&leaf.column) {
            return Err(QueryError::UnknownColumn(leaf.column.clone()));
        }
        if !schema.has_capability(&leaf.column, Capability::Filter) {
            return Err(QueryError::ColumnNotFilterable(leaf.column.clone()));
        }
        let op = FilterOp::parse(&leaf.op)
            .ok_or_else(|| QueryError::UnknownOperator(leaf.op.clone()))?;
        if op.is_search_class() && !schema.has_capability(&leaf.column, Capability::Search) {
            return Err(QueryError::ColumnNotSearchable(leaf.column.clone()));
        }
        Ok(op)
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

    fn render_leaf(
        internal: &str,
        op: FilterOp,
        value: &FilterValue,
        args: &mut Vec<FilterValue>,
    ) -> String {
        match op {
            FilterOp::Fuzzy => {
                args.push(value.clone());
                format!("LOWER({internal}) LIKE LOWER(?)")
            }
            FilterOp::In | FilterOp::Nin => {
                let keyword = if op == FilterOp::In { "IN" } else { "NOT IN" };
                // one placeholder per list element; a scalar gets a single slot
                let placeholders = match value {
                    FilterValue::List(items) => {
                        args.extend(items.iter().cloned());
                        vec!["?"; items.len()].join(", ")
                    }
                    scalar => {
                        args.push(scalar.clone());
                        "?".to_string()
                    }
                };
                format!("{internal} {keyword} ({placeholders})")
            }
            _ => {
                let sym = match op {
                    FilterOp::Like => "LIKE",
                    FilterOp::Gt => ">",
                    FilterOp::Ge => ">=",
                    FilterOp::Lt => "<",
                    FilterOp::Le => "<=",
                    FilterOp::Eq => "=",
                    FilterOp::Ne => "<>",
                    FilterOp::Fuzzy | FilterOp::In | FilterOp::Nin => unreachable!(),
                };
                args.push(value.clone());
                format!("{internal} {sym} ?")
            }
        }
    }
}
