//! Process-local store implementations, used by the "fake" backends and tests.

mod like_repo_memory;
mod session_store_memory;

pub use like_repo_memory::*;
pub use session_store_memory::*;
