use super::Parser;

#[derive(Parser, Debug)]
#[command(about = "Likes and session backend for the podcast frontend")]
pub struct Cli {
    /// Path to a settings TOML file.
    #[arg(long)]
    pub settings: Option<String>,
}
