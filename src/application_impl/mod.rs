mod auth_service_fake;
mod auth_service_impl;
mod like_service_impl;

pub use auth_service_fake::*;
pub use auth_service_impl::*;
pub use like_service_impl::*;
