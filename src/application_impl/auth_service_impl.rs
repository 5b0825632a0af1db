use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Width of the `liked_podcast.user_id` column.
pub const MAX_USER_ID_LEN: usize = 128;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub signing_key: Vec<u8>,
}

/// Wire shape of the token payload, as issued by the account service.
#[derive(Debug, Serialize, Deserialize)]
struct CredentialClaims {
    user_id: String,
    jti: String,
    exp: i64,
}

pub struct JwtHs256Codec {
    cfg: JwtConfig,
}

impl JwtHs256Codec {
    pub fn new(cfg: JwtConfig) -> Self {
        JwtHs256Codec { cfg }
    }

    fn validation() -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        // Expiry is judged by the caller with a strict `exp <= now` rule.
        v.validate_exp = false;
        v
    }
}

#[async_trait::async_trait]
impl TokenCodec for JwtHs256Codec {
    async fn issue(
        &self,
        user: &UserId,
        session: &SessionId,
        ttl: Duration,
    ) -> Result<(AccessToken, DateTime<Utc>), AuthError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AuthError::InternalError(e.to_string()))?;
        let exp_dt = Utc::now() + ttl;
        let claims = CredentialClaims {
            user_id: user.0.clone(),
            jti: session.0.clone(),
            exp: exp_dt.timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.cfg.signing_key),
        )
        .map_err(|e| AuthError::InternalError(e.to_string()))?;
        Ok((AccessToken(token), exp_dt))
    }

    async fn decode(&self, token: &AccessToken) -> Result<Claims, AuthError> {
        let data = decode::<CredentialClaims>(
            &token.0,
            &DecodingKey::from_secret(&self.cfg.signing_key),
            &Self::validation(),
        )
        .map_err(|_| AuthError::MalformedCredential)?;

        let CredentialClaims { user_id, jti, exp } = data.claims;
        if user_id.is_empty() || jti.is_empty() || user_id.len() > MAX_USER_ID_LEN {
            return Err(AuthError::MalformedCredential);
        }
        let expires_at =
            DateTime::<Utc>::from_timestamp(exp, 0).ok_or(AuthError::MalformedCredential)?;

        Ok(Claims {
            user_id: UserId(user_id),
            session_id: SessionId(jti),
            expires_at,
        })
    }
}

/// Token validator backed by the shared session store.
pub struct RealAuthService {
    token_codec: Arc<dyn TokenCodec>,
    session_store: Arc<dyn SessionStore>,
    store_timeout: Duration,
}

impl RealAuthService {
    pub fn new(
        token_codec: Arc<dyn TokenCodec>,
        session_store: Arc<dyn SessionStore>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            token_codec,
            session_store,
            store_timeout,
        }
    }

    /// Signature and expiry checks, no store access.
    async fn verified_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self
            .token_codec
            .decode(&AccessToken(token.to_string()))
            .await?;
        if claims.expires_at <= Utc::now() {
            return Err(AuthError::ExpiredCredential);
        }
        Ok(claims)
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn validate(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = self.verified_claims(token).await?;
        let key = SessionKey::new(claims.user_id, claims.session_id);

        let lookup = tokio::time::timeout(self.store_timeout, self.session_store.exists(&key)).await;
        match lookup {
            Ok(Ok(true)) => Ok(key.user_id),
            Ok(Ok(false)) => {
                debug!(user_id = %key.user_id, "session revoked or unknown");
                Err(AuthError::RevokedOrUnknownSession)
            }
            Ok(Err(e)) => {
                warn!("session lookup failed: {}", e);
                Err(e)
            }
            // Fail closed.
            Err(_) => {
                warn!("session lookup timed out after {:?}", self.store_timeout);
                Err(AuthError::RevokedOrUnknownSession)
            }
        }
    }

    async fn extract_user_id(&self, token: &str) -> Option<UserId> {
        self.verified_claims(token)
            .await
            .ok()
            .map(|claims| claims.user_id)
    }

    async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.verified_claims(token).await?;
        let key = SessionKey::new(claims.user_id, claims.session_id);

        let removed = tokio::time::timeout(self.store_timeout, self.session_store.remove(&key))
            .await
            .map_err(|_| AuthError::StoreUnavailable("session delete timed out".to_string()))??;
        if !removed {
            return Err(AuthError::NotLoggedIn);
        }

        info!(user_id = %key.user_id, "session revoked");
        Ok(())
    }
}
