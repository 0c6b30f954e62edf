//! Domain layer - Core business entities and logic
//!
//! Entities and value types independent of infrastructure concerns.
//! Reads never carry credential material.

pub mod cultivation;
pub mod password;
pub mod user;

pub use cultivation::{
    Cultivation, CultivationChanges, CultivationWithOwner, NewCultivation, OwnerSummary,
};
pub use password::{Argon2Hasher, CredentialHasher};
pub use user::{NewUser, User, UserChanges, UserRole, UserWithCultivations};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockCredentialHasher;
