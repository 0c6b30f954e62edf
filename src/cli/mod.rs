//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `migrate` - Database migrations
//! - `users` - User administration
//! - `cultivations` - Cultivation administration

pub mod args;

pub use args::{Cli, Commands};
