// Shared helpers

pub mod constants;
pub mod format;
pub mod query;
pub mod serde_helpers;
pub mod validation;

pub use constants::*;
