//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod cultivation_repository;
pub(crate) mod entities;
mod user_repository;

pub use cultivation_repository::CultivationRepository;
pub use user_repository::{UserPatch, UserRepository};
