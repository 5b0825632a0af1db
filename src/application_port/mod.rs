mod auth_service;
mod like_service;

pub use auth_service::*;
pub use like_service::*;
