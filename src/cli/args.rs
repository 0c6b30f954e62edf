//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::MAX_LIST_BOUND;

/// Cultivos - Operator tool for users and their cultivations
#[derive(Parser, Debug)]
#[command(name = "cultivos")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Env file to load before reading configuration
    #[arg(short, long, global = true, env = "CULTIVOS_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Manage users
    Users(UsersArgs),

    /// Manage cultivations
    Cultivations(CultivationsArgs),
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

fn list_bound() -> clap::builder::RangedU64ValueParser<u64> {
    clap::value_parser!(u64).range(0..=MAX_LIST_BOUND)
}

/// Offset and limit shared by the list commands
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Number of records to skip
    #[arg(long, default_value_t = 0, value_parser = list_bound())]
    pub offset: u64,

    /// Maximum number of records to return (defaults to DEFAULT_PAGE_LIMIT)
    #[arg(long, value_parser = list_bound())]
    pub limit: Option<u64>,
}

/// Arguments for the users command
#[derive(Parser, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub action: UserAction,
}

/// User actions
#[derive(Subcommand, Debug)]
pub enum UserAction {
    /// List users with their cultivations
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Substring of name or email
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one user by ID, or by email with --email
    Get {
        /// User ID
        #[arg(required_unless_present = "email")]
        id: Option<i32>,

        /// Look the user up by exact email instead
        #[arg(long, conflicts_with = "id")]
        email: Option<String>,
    },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "CULTIVOS_USER_PASSWORD", hide_env_values = true)]
        password: String,

        /// admin, user or guest
        #[arg(long)]
        role: Option<String>,
    },
    /// Update the supplied fields of a user
    Update {
        /// User ID
        id: i32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,

        /// admin, user or guest
        #[arg(long)]
        role: Option<String>,
    },
    /// Delete a user and all its cultivations
    Delete {
        /// User ID
        id: i32,
    },
}

/// Arguments for the cultivations command
#[derive(Parser, Debug)]
pub struct CultivationsArgs {
    #[command(subcommand)]
    pub action: CultivationAction,
}

/// Cultivation actions
#[derive(Subcommand, Debug)]
pub enum CultivationAction {
    /// List cultivations with their owner
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only cultivations of this owner
        #[arg(long)]
        owner: Option<i32>,

        /// Substring of name, type or description
        #[arg(long)]
        query: Option<String>,
    },
    /// Show one cultivation
    Get {
        /// Cultivation ID
        id: i32,
    },
    /// Create a cultivation
    Create {
        #[arg(long)]
        name: String,

        /// Cultivation type
        #[arg(long = "type")]
        kind: String,

        #[arg(long)]
        description: Option<String>,

        /// Owner user ID
        #[arg(long)]
        owner: i32,
    },
    /// Update the supplied fields of a cultivation
    Update {
        /// Cultivation ID
        id: i32,

        #[arg(long)]
        name: Option<String>,

        /// Cultivation type
        #[arg(long = "type")]
        kind: Option<String>,

        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,

        /// Remove the description
        #[arg(long)]
        clear_description: bool,

        /// Move the cultivation to another owner
        #[arg(long)]
        owner: Option<i32>,
    },
    /// Delete a cultivation
    Delete {
        /// Cultivation ID
        id: i32,
    },
}
