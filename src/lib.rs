//! Cultivos - Users and their cultivations with referential integrity
//!
//! Two related entities kept consistent under concurrent access: email
//! uniqueness for users, an existing owner for every cultivation and an
//! explicit transactional cascade when a user is deleted.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and credential hashing
//! - **services**: Application use cases and business logic
//! - **infra**: Database, migrations, repositories and Unit of Work
//! - **types**: Shared types (pagination, filters)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Create a user and a cultivation
//! cargo run -- users create --name Ana --email ana@example.com --password secret
//! cargo run -- cultivations create --name Huerta --type hortaliza --owner 1
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{Cultivation, User, UserRole};
pub use errors::{AppError, AppResult};
pub use services::{CultivationService, ServiceContainer, Services, UserService};
