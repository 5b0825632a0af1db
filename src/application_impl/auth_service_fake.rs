use crate::application_port::*;
use crate::domain_model::UserId;
use dashmap::DashSet;

const FAKE_TOKEN_PREFIX: &str = "fake-access-token:";

/// Accepts `fake-access-token:{user}` until that user logs out once.
#[derive(Debug, Default)]
pub struct FakeAuthService {
    revoked: DashSet<String>,
}

impl FakeAuthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_for(user: &str) -> String {
        format!("{}{}", FAKE_TOKEN_PREFIX, user)
    }
}

#[async_trait::async_trait]
impl AuthService for FakeAuthService {
    async fn validate(&self, token: &str) -> Result<UserId, AuthError> {
        let user = token
            .strip_prefix(FAKE_TOKEN_PREFIX)
            .filter(|user| !user.is_empty())
            .ok_or(AuthError::MalformedCredential)?;
        if self.revoked.contains(user) {
            return Err(AuthError::RevokedOrUnknownSession);
        }
        Ok(UserId::from(user))
    }

    async fn extract_user_id(&self, token: &str) -> Option<UserId> {
        token
            .strip_prefix(FAKE_TOKEN_PREFIX)
            .filter(|user| !user.is_empty())
            .map(UserId::from)
    }

    async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        let user = self
            .extract_user_id(token)
            .await
            .ok_or(AuthError::MalformedCredential)?;
        if !self.revoked.insert(user.0) {
            return Err(AuthError::NotLoggedIn);
        }
        Ok(())
    }
}
