//! Pagination module: `(page, size)` parsed from raw query-string text.

use crate::QueryError;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_SIZE: u64 = 10;

/// A validated pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageExpr {
    page: u64,
    size: u64,
}

impl PageExpr {
    /// Parse raw page/size text. Blank inputs fall back to page 1, size 10;
    /// anything that is not a non-negative integer is a user error.
    pub fn from_user_input(page: &str, size: &str) -> Result<Self, QueryError> {
        let page = if page.is_empty() {
            DEFAULT_PAGE
        } else {
            page.parse()
                .map_err(|_| QueryError::InvalidPage(page.to_string()))?
        };
        let size = if size.is_empty() {
            DEFAULT_SIZE
        } else {
            size.parse()
                .map_err(|_| QueryError::InvalidSize(size.to_string()))?
        };
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Row offset for a 1-based page number; page 0 clamps to offset 0.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.size
    }
}
