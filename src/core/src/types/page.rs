//! Pagination window

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Limit/offset window over an ordered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    /// Build a page, using `default_limit` when none is given
    ///
    /// `limit` must fall within `1..=max_limit`.
    pub fn resolve(
        limit: Option<u32>,
        offset: u32,
        default_limit: u32,
        max_limit: u32,
    ) -> Result<Self, CoreError> {
        let limit = limit.unwrap_or(default_limit);
        if limit == 0 || limit > max_limit {
            return Err(CoreError::invalid_page(format!(
                "limit must be between 1 and {}, got {}",
                max_limit, limit
            )));
        }
        Ok(Self { limit, offset })
    }

    /// Slice bounds for a collection of `len` items
    pub fn bounds(&self, len: usize) -> std::ops::Range<usize> {
        let start = (self.offset as usize).min(len);
        let end = start.saturating_add(self.limit as usize).min(len);
        start..end
    }
}
