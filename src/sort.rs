//! Sort module: the `col::DIR,col::DIR` ordering language.
//!
//! Directions and arity are checked at parse time so compilers only have to
//! authorize columns. The expression keeps an ordered list of pairs, not a
//! map, so multi-column ORDER BY precedence is stable.

use crate::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    fn parse(token: &str) -> Result<Self, QueryError> {
        match token {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(QueryError::InvalidSortDirection(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Lowercase form used by the search-engine target.
    pub fn as_lower_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// An ordered sequence of `(column, direction)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortExpr {
    pairs: Vec<(String, SortDir)>,
}

impl SortExpr {
    /// Parse `col::DIR,col::DIR,...`; empty input yields an empty sort.
    pub fn from_user_input(sort_str: &str) -> Result<Self, QueryError> {
        if sort_str.is_empty() {
            return Ok(Self::default());
        }
        let mut pairs = Vec::new();
        for segment in sort_str.split(',') {
            let mut kv = segment.split("::");
            let (Some(col), Some(dir), None) = (kv.next(), kv.next(), kv.next()) else {
                return Err(QueryError::MalformedSort(segment.to_string()));
            };
            if col.is_empty() {
                return Err(QueryError::MalformedSort(segment.to_string()));
            }
            pairs.push((col.to_string(), SortDir::parse(dir)?));
        }
        Ok(Self { pairs })
    }

    pub fn pairs(&self) -> &[(String, SortDir)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn push(&mut self, column: impl Into<String>, dir: SortDir) {
        self.pairs.push((column.into(), dir));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let sort = SortExpr::from_user_input("").unwrap();
        assert!(sort.is_empty());
    }

    #[test]
    fn test_two_columns_in_order() {
        let sort = SortExpr::from_user_input("col::ASC,other::DESC").unwrap();
        assert_eq!(
            sort.pairs(),
            &[
                ("col".to_string(), SortDir::Asc),
                ("other".to_string(), SortDir::Desc)
            ]
        );
    }

    #[test]
    fn test_invalid_direction() {
        assert!(matches!(
            SortExpr::from_user_input("col::UP"),
            Err(QueryError::InvalidSortDirection(tok)) if tok == "UP"
        ));
        // direction tokens are case sensitive
        assert!(SortExpr::from_user_input("col::asc").is_err());
    }

    #[test]
    fn test_wrong_arity() {
        assert!(matches!(
            SortExpr::from_user_input("col"),
            Err(QueryError::MalformedSort(_))
        ));
        assert!(SortExpr::from_user_input("col::ASC::extra").is_err());
        assert!(SortExpr::from_user_input("::ASC").is_err());
    }

    #[test]
    fn test_push_preserves_order() {
        let mut sort = SortExpr::default();
        sort.push("b", SortDir::Desc);
        sort.push("a", SortDir::Asc);
        assert_eq!(sort.pairs()[0].0, "b");
        assert_eq!(sort.pairs()[1].0, "a");
    }
}
