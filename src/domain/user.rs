//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::cultivation::Cultivation;
use crate::config::{ROLE_ADMIN, ROLE_GUEST, ROLE_USER};
use crate::errors::AppError;

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
    Guest,
}

impl UserRole {
    /// Stored representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::User => ROLE_USER,
            UserRole::Guest => ROLE_GUEST,
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_USER => Ok(UserRole::User),
            ROLE_GUEST => Ok(UserRole::Guest),
            other => Err(AppError::validation(format!(
                "Unknown role '{}' (expected admin, user or guest)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity.
///
/// Carries no credential material: the stored hash never leaves the
/// persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// User with its owned cultivations eagerly attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWithCultivations {
    #[serde(flatten)]
    pub user: User,
    pub cultivations: Vec<Cultivation>,
}

impl UserWithCultivations {
    pub fn new(user: User, cultivations: Vec<Cultivation>) -> Self {
        Self { user, cultivations }
    }
}

/// User creation data
#[derive(Clone, Validate)]
pub struct NewUser {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"), length(max = 255))]
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

// Never print the plaintext password
impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// Partial user update. `None` leaves the field untouched.
#[derive(Clone, Default, Validate)]
pub struct UserChanges {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"), length(max = 255))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

impl UserChanges {
    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
    }
}

impl std::fmt::Debug for UserChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserChanges")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("role", &self.role)
            .finish()
    }
}
