//! Offset/limit parameters for list operations.

use serde::Deserialize;

use crate::config::{DEFAULT_LIST_LIMIT, DEFAULT_LIST_OFFSET, MAX_LIST_BOUND};

/// Pagination parameters (DRY - reusable across all list operations).
///
/// Both bounds are capped at `MAX_LIST_BOUND`, the largest value the
/// database drivers bind as a signed 64-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "RawListParams")]
pub struct ListParams {
    pub offset: u64,
    pub limit: u64,
}

#[derive(Deserialize)]
struct RawListParams {
    #[serde(default = "default_offset")]
    offset: u64,
    #[serde(default = "default_limit")]
    limit: u64,
}

fn default_offset() -> u64 {
    DEFAULT_LIST_OFFSET
}

fn default_limit() -> u64 {
    DEFAULT_LIST_LIMIT
}

impl From<RawListParams> for ListParams {
    fn from(raw: RawListParams) -> Self {
        Self::new(raw.offset, raw.limit)
    }
}

impl ListParams {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset: offset.min(MAX_LIST_BOUND),
            limit: limit.min(MAX_LIST_BOUND),
        }
    }

    /// Re-apply the bounds, for values built field by field
    pub fn bounded(self) -> Self {
        Self::new(self.offset, self.limit)
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(DEFAULT_LIST_OFFSET, DEFAULT_LIST_LIMIT)
    }
}
