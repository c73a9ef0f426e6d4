// ============================================================================
// STATE MODULE - Client-side persistence (localStorage / sessionStorage)
// ============================================================================

pub mod storage;
pub mod session;

pub use storage::{ClientStorage, KeyValueStore, MemoryStore, StorageError, StorageKey};
pub use session::{FlashMessage, SessionState, Theme};
