mod like;
mod session;
mod user;

pub use like::*;
pub use session::*;
pub use user::*;
