//! Infrastructure layer - External systems integration
//!
//! - Database connections and migrations
//! - Repositories over the `usuarios` and `cultivos` tables
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{CultivationRepository, UserPatch, UserRepository};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};
