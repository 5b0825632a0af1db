use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Process-local session store with lazy TTL expiry.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<SessionKey, Instant>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, key: &SessionKey, _marker: &str, ttl: Duration) -> Result<(), AuthError> {
        self.sessions.insert(key.clone(), Instant::now() + ttl);
        Ok(())
    }

    async fn exists(&self, key: &SessionKey) -> Result<bool, AuthError> {
        let now = Instant::now();
        let live = match self.sessions.get(key) {
            Some(deadline) => *deadline.value() > now,
            None => return Ok(false),
        };
        if !live {
            self.sessions.remove_if(key, |_, deadline| *deadline <= now);
        }
        Ok(live)
    }

    async fn remove(&self, key: &SessionKey) -> Result<bool, AuthError> {
        let now = Instant::now();
        Ok(self
            .sessions
            .remove(key)
            .is_some_and(|(_, deadline)| deadline > now))
    }
}
