//! Schema module: the per-record-type registry of queryable columns.
//!
//! A [`Schema`] decides which public column names a caller may filter, sort
//! or search on, and what each maps to internally. It is built once per
//! record type through [`SchemaBuilder`] and is immutable afterwards, so it
//! can be cached in a `LazyLock` and shared across threads.

use std::collections::HashMap;

/// A capability a column may carry.
///
/// Columns registered through [`ColumnSpec::new`] are filterable and
/// sortable by default; search and index are opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Capability {
    /// Usable in filter expression leaves.
    Filter,
    /// Usable in sort expressions.
    Sort,
    /// Usable with the `like`/`fuzzy` operator class.
    Search,
    /// Backed by a full-text index on the search-engine target.
    Index,
}

/// Descriptor for a single column: its internal (storage) name plus the
/// capabilities it carries.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    internal_name: String,
    filterable: bool,
    sortable: bool,
    searchable: bool,
    indexed: bool,
}

impl ColumnSpec {
    pub fn new(internal_name: impl Into<String>) -> Self {
        Self {
            internal_name: internal_name.into(),
            filterable: true,
            sortable: true,
            searchable: false,
            indexed: false,
        }
    }

    /// Allow `like`/`fuzzy` operators against this column.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Mark the column as full-text indexed on the search-engine target.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    fn has(&self, cap: Capability) -> bool {
        match cap {
            Capability::Filter => self.filterable,
            Capability::Sort => self.sortable,
            Capability::Search => self.searchable,
            Capability::Index => self.indexed,
        }
    }
}

/// Immutable mapping from public column name to [`ColumnSpec`].
#[derive(Debug, Clone, Default)]
pub struct Schema {
    columns: HashMap<String, ColumnSpec>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Whether the public column name is known at all. Absence is a normal
    /// negative result, not an error.
    pub fn column_exists(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Internal (storage) name for a public column.
    pub fn internal_name(&self, name: &str) -> Option<&str> {
        self.columns.get(name).map(|c| c.internal_name.as_str())
    }

    pub fn has_capability(&self, name: &str, cap: Capability) -> bool {
        self.columns.get(name).is_some_and(|c| c.has(cap))
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

/// Builder for [`Schema`]. Fields a record type does not want exposed are
/// simply never registered; there is no runtime reflection.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    columns: HashMap<String, ColumnSpec>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a column under its public name. Registering the same name
    /// twice keeps the last spec.
    pub fn column(mut self, public_name: impl Into<String>, spec: ColumnSpec) -> Self {
        self.columns.insert(public_name.into(), spec);
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            columns: self.columns,
        }
    }
}

/// Seam for record types that expose a queryable schema.
///
/// Implementations should be cheap to call; callers that compile many
/// expressions against the same type are expected to memoize the result
/// (e.g. behind a `std::sync::LazyLock`).
pub trait Queryable {
    fn schema() -> Schema;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        SchemaBuilder::new()
            .column("id", ColumnSpec::new("id"))
            .column("name", ColumnSpec::new("user_name").searchable().indexed())
            .column("secret", ColumnSpec::new("secret_hash").not_filterable().not_sortable())
            .build()
    }

    #[test]
    fn test_column_registration_and_lookup() {
        let s = schema();
        assert!(s.column_exists("id"));
        assert!(s.column_exists("name"));
        assert!(!s.column_exists("missing"));
        assert_eq!(s.internal_name("name"), Some("user_name"));
        assert_eq!(s.internal_name("missing"), None);
    }

    #[test]
    fn test_default_capabilities() {
        let s = schema();
        assert!(s.has_capability("id", Capability::Filter));
        assert!(s.has_capability("id", Capability::Sort));
        assert!(!s.has_capability("id", Capability::Search));
        assert!(!s.has_capability("id", Capability::Index));
    }

    #[test]
    fn test_opt_in_and_opt_out_capabilities() {
        let s = schema();
        assert!(s.has_capability("name", Capability::Search));
        assert!(s.has_capability("name", Capability::Index));
        assert!(!s.has_capability("secret", Capability::Filter));
        assert!(!s.has_capability("secret", Capability::Sort));
    }

    #[test]
    fn test_missing_column_has_no_capabilities() {
        let s = schema();
        assert!(!s.has_capability("missing", Capability::Filter));
    }

    #[test]
    fn test_duplicate_registration_last_wins() {
        let s = SchemaBuilder::new()
            .column("a", ColumnSpec::new("first"))
            .column("a", ColumnSpec::new("second"))
            .build();
        assert_eq!(s.internal_name("a"), Some("second"));
        assert_eq!(s.num_columns(), 1);
    }

    #[test]
    fn test_queryable_trait() {
        struct Event;
        impl Queryable for Event {
            fn schema() -> Schema {
                SchemaBuilder::new()
                    .column("kind", ColumnSpec::new("kind"))
                    .build()
            }
        }
        let s = Event::schema();
        assert!(s.column_exists("kind"));
    }
}
