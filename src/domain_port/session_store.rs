use crate::application_port::*;
use crate::domain_model::*;
use std::time::Duration;

#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Record a live session. Written by the account service at login; used here by tooling and tests.
    async fn save(&self, key: &SessionKey, marker: &str, ttl: Duration) -> Result<(), AuthError>;
    async fn exists(&self, key: &SessionKey) -> Result<bool, AuthError>;
    /// Delete the record, returning whether a live one was present.
    async fn remove(&self, key: &SessionKey) -> Result<bool, AuthError>;
}
