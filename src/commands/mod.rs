//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.

pub mod cultivations;
pub mod migrate;
pub mod users;

use serde::Serialize;

use crate::cli::args::PageArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::types::ListParams;

/// Print a value to stdout as pretty JSON
pub(crate) fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to render output: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

/// Resolve list paging flags against the configured default limit
pub(crate) fn list_params(page: PageArgs, config: &Config) -> ListParams {
    ListParams::new(page.offset, page.limit.unwrap_or(config.default_list_limit))
}

/// Run validator rules and surface the first failure as a validation error
pub(crate) fn validate<T: validator::Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
