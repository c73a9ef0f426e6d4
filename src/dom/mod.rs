// ============================================================================
// DOM MODULE - Helpers over the server-rendered page
// ============================================================================

pub mod element;
pub mod builder;
pub mod events;

pub use element::*;
pub use builder::*;
pub use events::*;
