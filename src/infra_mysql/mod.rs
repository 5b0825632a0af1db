mod like_repo_mysql;

pub use like_repo_mysql::*;

mod util;
