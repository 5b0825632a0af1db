// store

mod session_store;

pub use session_store::*;

// repo

mod like_repo;

pub use like_repo::*;
