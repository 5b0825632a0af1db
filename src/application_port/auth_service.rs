use crate::domain_model::{SessionId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Failure kinds of credential checks. The three credential variants stay
/// distinct here and are collapsed into one "unauthorized" by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("credential is malformed or its signature does not verify")]
    MalformedCredential,
    #[error("credential expired")]
    ExpiredCredential,
    #[error("session revoked or unknown")]
    RevokedOrUnknownSession,
    #[error("not logged in")]
    NotLoggedIn,
    #[error("session store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessToken(pub String);

/// Decoded credential claims. Claim names are shared with the account service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub expires_at: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait TokenCodec: Send + Sync {
    /// Sign a credential for `user` valid for `ttl`.
    async fn issue(
        &self,
        user: &UserId,
        session: &SessionId,
        ttl: Duration,
    ) -> Result<(AccessToken, DateTime<Utc>), AuthError>;

    /// Verify the signature and decode. Does not look at expiry.
    async fn decode(&self, token: &AccessToken) -> Result<Claims, AuthError>;
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Signature, expiry and session presence must all hold.
    async fn validate(&self, token: &str) -> Result<UserId, AuthError>;
    /// Identification only: no session lookup, `None` on any failure.
    async fn extract_user_id(&self, token: &str) -> Option<UserId>;
    /// Logout. Revoking an already revoked session is `NotLoggedIn`.
    async fn revoke(&self, token: &str) -> Result<(), AuthError>;
}
