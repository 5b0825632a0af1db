//! TOML settings with environment overrides.
//! `bin/issue_token.rs` and `main.rs` both load them through `parse_settings`.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
