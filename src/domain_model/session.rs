use serde::{Deserialize, Serialize};
use std::fmt;

use super::UserId;

/// Per-login session handle (the `jti` claim).
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        SessionId(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId(s.to_string())
    }
}

/// Identifies one session record. Unique per login, so no two sessions share a key.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SessionKey {
    pub user_id: UserId,
    pub session_id: SessionId,
}

impl SessionKey {
    pub fn new(user_id: UserId, session_id: SessionId) -> Self {
        SessionKey {
            user_id,
            session_id,
        }
    }
}
