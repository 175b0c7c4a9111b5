//! Expression module: the recursive boolean filter tree.
//!
//! A [`FilterExpr`] node is either a leaf (`column` + `op` + exactly one of
//! `value`/`variable`) or a group (`properties` combined with the `operation`
//! token AND/OR). Trees arrive as JSON, optionally base64-wrapped, and are
//! validated by the compilers rather than at parse time so that every
//! backend can report its own structural restrictions.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{FilterValue, QueryError};

/// The identity expression: an AND group with no children, i.e. "no filter".
const EMPTY_EXPRESSION: &str = r#"{"operation":"AND"}"#;

/// A recursive filter expression.
///
/// The wire format uses the REST query language keys: `column`,
/// `op`, `value`, `variable`, `properties`, `operation`. All keys are
/// optional in the JSON; which ones must be present for a node to be
/// meaningful is the compilers' business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterExpr {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub column: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub op: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FilterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<FilterExpr>,
    #[serde(rename = "operation", default, skip_serializing_if = "String::is_empty")]
    pub binary_operation: String,
}

impl Default for FilterExpr {
    /// An empty AND group, representing "no filter".
    fn default() -> Self {
        Self {
            column: String::new(),
            op: String::new(),
            value: None,
            variable: None,
            properties: Vec::new(),
            binary_operation: "AND".to_string(),
        }
    }
}

impl FilterExpr {
    /// Parse raw textual filter input. `is_base64` first unwraps a base64
    /// layer around the JSON document. Empty input yields the identity
    /// expression (AND, no children).
    pub fn from_user_input(expr: &str, is_base64: bool) -> Result<Self, QueryError> {
        if expr.is_empty() {
            return Ok(serde_json::from_str(EMPTY_EXPRESSION)?);
        }
        if is_base64 {
            let bytes = base64::engine::general_purpose::STANDARD.decode(expr)?;
            let decoded = String::from_utf8_lossy(&bytes).into_owned();
            return Ok(serde_json::from_str(&decoded)?);
        }
        Ok(serde_json::from_str(expr)?)
    }

    /// Build an expression from an already-decoded JSON value, the generic
    /// key/value-mapping form.
    pub fn from_value(value: serde_json::Value) -> Result<Self, QueryError> {
        Ok(serde_json::from_value(value)?)
    }

    /// A leaf carries a column and an operator and no children.
    pub fn is_leaf(&self) -> bool {
        !self.column.is_empty() && !self.op.is_empty() && self.properties.is_empty()
    }

    /// A group combines one or more child nodes with AND/OR.
    ///
    /// A node carrying both leaf fields and children classifies as a group;
    /// the compilers reject that mix outright rather than pick a reading.
    pub fn is_group(&self) -> bool {
        !self.properties.is_empty()
    }

    /// An empty group: no leaf fields, no value, no children. This is the
    /// identity expression ("no filter") and compiles to nothing; any other
    /// node that is neither a leaf nor a group is malformed.
    pub fn is_empty_group(&self) -> bool {
        self.column.is_empty()
            && self.op.is_empty()
            && self.value.is_none()
            && self.variable.is_none()
            && self.properties.is_empty()
    }

    /// A node is either a leaf or a group; one that combines leaf fields
    /// with child properties is malformed, not a group whose leaf half is
    /// ignored. Compilers call this on every node they treat as a group.
    pub(crate) fn require_group_shape(&self) -> Result<(), QueryError> {
        if !self.column.is_empty()
            || !self.op.is_empty()
            || self.value.is_some()
            || self.variable.is_some()
        {
            return Err(QueryError::MalformedNode(self.column.clone()));
        }
        Ok(())
    }

    /// Replace every leaf's late-bound variable with a concrete value from
    /// `vars`, looked up by name. A name missing from the map aborts the
    /// whole walk with [`QueryError::UnboundVariable`].
    ///
    /// This mutates the tree in place; the exclusive borrow prevents
    /// binding and compiling the same tree concurrently.
    pub fn bind_variables(
        &mut self,
        vars: &HashMap<String, FilterValue>,
    ) -> Result<(), QueryError> {
        if self.is_leaf() && self.value.is_none() {
            if let Some(name) = self.variable.take() {
                match vars.get(&name) {
                    Some(val) => self.value = Some(val.clone()),
                    None => {
                        let column = self.column.clone();
                        // put the name back so the tree is still inspectable
                        self.variable = Some(name.clone());
                        return Err(QueryError::UnboundVariable {
                            column,
                            variable: name,
                        });
                    }
                }
            }
        }
        for child in &mut self.properties {
            child.bind_variables(vars)?;
        }
        Ok(())
    }
}
