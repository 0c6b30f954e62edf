//! Cultivation domain entity and related types.

use serde::Serialize;
use validator::Validate;

/// Cultivation (crop) owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cultivation {
    pub id: i32,
    pub name: String,
    /// Free-text category
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub owner_id: i32,
}

/// Owner fields embedded in a cultivation read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Cultivation with its owner eagerly attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CultivationWithOwner {
    #[serde(flatten)]
    pub cultivation: Cultivation,
    pub owner: OwnerSummary,
}

/// Cultivation creation data
#[derive(Debug, Clone, Validate)]
pub struct NewCultivation {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    #[validate(length(max = 100, message = "Type must be at most 100 characters"))]
    pub kind: String,
    pub description: Option<String>,
    pub owner_id: i32,
}

/// Partial cultivation update.
///
/// `description` is presence-aware: `None` leaves it untouched,
/// `Some(None)` clears it and `Some(Some(text))` replaces it.
#[derive(Debug, Clone, Default, Validate)]
pub struct CultivationChanges {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "Type must be at most 100 characters"))]
    pub kind: Option<String>,
    pub description: Option<Option<String>>,
    pub owner_id: Option<i32>,
}

impl CultivationChanges {
    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.kind.is_none()
            && self.description.is_none()
            && self.owner_id.is_none()
    }
}
