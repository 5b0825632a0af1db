use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;

pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager) -> Self {
        RedisSessionStore { conn }
    }

    /// Key layout written by the account service at login.
    fn key(key: &SessionKey) -> String {
        format!("user_{} | {}", key.user_id, key.session_id)
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn save(&self, key: &SessionKey, marker: &str, ttl: Duration) -> Result<(), AuthError> {
        let key = Self::key(key);
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(&key, marker, ttl.as_secs().max(1))
            .await
            .map_err(|e| AuthError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    async fn exists(&self, key: &SessionKey) -> Result<bool, AuthError> {
        let key = Self::key(key);
        let mut conn = self.conn.clone();
        let found: bool = conn
            .exists(&key)
            .await
            .map_err(|e| AuthError::StoreUnavailable(e.to_string()))?;
        Ok(found)
    }

    async fn remove(&self, key: &SessionKey) -> Result<bool, AuthError> {
        let key = Self::key(key);
        let mut conn = self.conn.clone();
        let removed: u64 = conn
            .del(&key)
            .await
            .map_err(|e| AuthError::StoreUnavailable(e.to_string()))?;
        Ok(removed > 0)
    }
}
