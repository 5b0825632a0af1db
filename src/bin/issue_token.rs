//! Mints a credential and records its session, standing in for the account
//! service's login during local development.
//!
//! $ cargo run --bin issue_token -- --settings=settings/local.toml --user=u1

use clap::Parser;
use podcast_bff::application_impl::{JwtConfig, JwtHs256Codec};
use podcast_bff::application_port::TokenCodec;
use podcast_bff::domain_model::{SessionId, SessionKey, UserId};
use podcast_bff::domain_port::SessionStore;
use podcast_bff::infra_redis::RedisSessionStore;
use podcast_bff::settings::parse_settings;
use std::time::Duration;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    settings: Option<String>,
    #[arg(long)]
    user: String,
    /// Credential lifetime.
    #[arg(long, default_value_t = 30 * 60)]
    access_ttl_secs: u64,
    /// Session record lifetime.
    #[arg(long, default_value_t = 7 * 24 * 60 * 60)]
    session_ttl_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = parse_settings(args.settings.as_deref())?;
    if settings.auth.jwt_secret.is_empty() {
        return Err(anyhow::anyhow!("auth.jwt_secret is not set"));
    }

    let codec = JwtHs256Codec::new(JwtConfig {
        signing_key: settings.auth.jwt_secret.into_bytes(),
    });
    let redis_manager = redis::Client::open(settings.session.redis_url.as_str())?
        .get_connection_manager()
        .await?;
    let store = RedisSessionStore::new(redis_manager);

    let key = SessionKey::new(UserId(args.user), SessionId::generate());
    let (token, expires_at) = codec
        .issue(
            &key.user_id,
            &key.session_id,
            Duration::from_secs(args.access_ttl_secs),
        )
        .await?;
    store
        .save(
            &key,
            "issued-by-cli",
            Duration::from_secs(args.session_ttl_secs),
        )
        .await?;

    println!("session: {}", key.session_id);
    println!("expires: {}", expires_at);
    println!("token:   {}", token.0);
    Ok(())
}
