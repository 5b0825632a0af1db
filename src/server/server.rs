use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// Services shared by every request, built once at startup.
pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub like_service: Arc<dyn LikeService>,
    pool: Option<MySqlPool>,
}

impl Server {
    pub fn new(auth_service: Arc<dyn AuthService>, like_service: Arc<dyn LikeService>) -> Self {
        Self {
            auth_service,
            like_service,
            pool: None,
        }
    }

    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let auth_service: Arc<dyn AuthService> = match settings.auth.backend.as_str() {
            "fake" => Arc::new(FakeAuthService::new()),
            "real" => {
                if settings.auth.jwt_secret.is_empty() {
                    return Err(anyhow::anyhow!("auth.jwt_secret must be set for the real backend"));
                }
                let redis_client = redis::Client::open(settings.session.redis_url.as_str())?;
                let redis_manager = redis_client.get_connection_manager().await?;
                let session_store: Arc<dyn SessionStore> =
                    Arc::new(RedisSessionStore::new(redis_manager));
                let token_codec: Arc<dyn TokenCodec> = Arc::new(JwtHs256Codec::new(JwtConfig {
                    signing_key: settings.auth.jwt_secret.clone().into_bytes(),
                }));
                Arc::new(RealAuthService::new(
                    token_codec,
                    session_store,
                    Duration::from_millis(settings.session.timeout_ms),
                ))
            }
            other => return Err(anyhow::anyhow!("Unknown auth backend: {}", other)),
        };

        let like_timeout = Duration::from_millis(settings.likes.timeout_ms);
        let (like_repo, pool): (Arc<dyn LikeRepo>, Option<MySqlPool>) =
            match settings.likes.backend.as_str() {
                "memory" => (Arc::new(MemoryLikeRepo::new()), None),
                "mysql" => {
                    let pool = MySqlPoolOptions::new()
                        .max_connections(settings.likes.max_connections)
                        .acquire_timeout(like_timeout)
                        .connect(&settings.likes.mysql_url)
                        .await?;
                    (Arc::new(MySqlLikeRepo::new(pool.clone())), Some(pool))
                }
                other => return Err(anyhow::anyhow!("Unknown likes backend: {}", other)),
            };
        let like_service: Arc<dyn LikeService> =
            Arc::new(RealLikeService::new(like_repo, like_timeout));

        info!(
            auth = %settings.auth.backend,
            likes = %settings.likes.backend,
            "server initialized"
        );

        Ok(Self {
            auth_service,
            like_service,
            pool,
        })
    }

    pub async fn shutdown(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            debug!("mysql pool closed");
        }
    }
}
