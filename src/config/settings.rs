//! Application settings loaded from environment variables.

use std::env;
use std::path::Path;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB,
    DEFAULT_HASH_PARALLELISM, DEFAULT_LIST_LIMIT, DEFAULT_MAX_CONNECTIONS,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub default_list_limit: u64,
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
    pub hash_parallelism: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("default_list_limit", &self.default_list_limit)
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("hash_iterations", &self.hash_iterations)
            .field("hash_parallelism", &self.hash_parallelism)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads `.env` from the working directory when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_process_env()
    }

    /// Load configuration from an explicit env file, then the process environment.
    pub fn from_env_file(path: &Path) -> Self {
        if let Err(e) = dotenvy::from_path(path) {
            tracing::warn!("Could not read env file {}: {}", path.display(), e);
        }
        Self::from_process_env()
    }

    fn from_process_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            default_list_limit: parse_var("DEFAULT_PAGE_LIMIT").unwrap_or(DEFAULT_LIST_LIMIT),
            hash_memory_kib: parse_var("HASH_MEMORY_KIB").unwrap_or(DEFAULT_HASH_MEMORY_KIB),
            hash_iterations: parse_var("HASH_ITERATIONS").unwrap_or(DEFAULT_HASH_ITERATIONS),
            hash_parallelism: parse_var("HASH_PARALLELISM").unwrap_or(DEFAULT_HASH_PARALLELISM),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            default_list_limit: DEFAULT_LIST_LIMIT,
            hash_memory_kib: DEFAULT_HASH_MEMORY_KIB,
            hash_iterations: DEFAULT_HASH_ITERATIONS,
            hash_parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
