//! List filters.

use serde::Deserialize;

/// Cultivation list filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CultivationFilter {
    /// Restrict to one owner
    pub owner_id: Option<i32>,
    /// Substring of name, type or description; empty means no filter
    pub query: Option<String>,
}

impl CultivationFilter {
    pub fn owned_by(owner_id: i32) -> Self {
        Self {
            owner_id: Some(owner_id),
            query: None,
        }
    }

    pub fn matching(query: impl Into<String>) -> Self {
        Self {
            owner_id: None,
            query: Some(query.into()),
        }
    }
}
