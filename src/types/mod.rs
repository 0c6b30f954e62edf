//! Shared types for DRY compliance.

mod filter;
mod pagination;

pub use filter::CultivationFilter;
pub use pagination::ListParams;
