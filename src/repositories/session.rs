use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::session::StoredSession,
};

/// Where sessions and CSRF tokens live between requests.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: Uuid) -> Result<Option<StoredSession>>;
    async fn save(&self, session_id: Uuid, session: &StoredSession, ttl_secs: u64) -> Result<()>;
    async fn remove(&self, session_id: Uuid) -> Result<()>;
    async fn save_csrf(&self, token: &str, ttl_secs: u64) -> Result<()>;
    async fn csrf_exists(&self, token: &str) -> Result<bool>;
    async fn remove_csrf(&self, token: &str) -> Result<()>;
}

fn session_key(session_id: Uuid) -> String {
    format!("session:{}", session_id)
}

fn csrf_key(token: &str) -> String {
    format!("csrf:{}", token)
}

/// Redis-backed store. Keys expire on their own TTL.
#[derive(Clone)]
pub struct RedisSessionStore {
    redis: ConnectionManager,
}

impl RedisSessionStore {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;
        Ok(Self { redis })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: Uuid) -> Result<Option<StoredSession>> {
        let mut redis = self.redis.clone();
        let session_json: Option<String> = redis.get(session_key(session_id)).await?;

        match session_json {
            Some(json) => {
                let session: StoredSession = sonic_rs::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Invalid session JSON: {}", e))
                })?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, session_id: Uuid, session: &StoredSession, ttl_secs: u64) -> Result<()> {
        let session_json = sonic_rs::to_string(session)
            .map_err(|e| AppError::Internal(format!("Session serialization failed: {}", e)))?;

        let mut redis = self.redis.clone();
        let _: () = redis
            .set_ex(session_key(session_id), session_json, ttl_secs)
            .await?;
        Ok(())
    }

    async fn remove(&self, session_id: Uuid) -> Result<()> {
        let mut redis = self.redis.clone();
        let _: () = redis.del(session_key(session_id)).await?;
        Ok(())
    }

    async fn save_csrf(&self, token: &str, ttl_secs: u64) -> Result<()> {
        let mut redis = self.redis.clone();
        let _: () = redis.set_ex(csrf_key(token), "valid", ttl_secs).await?;
        Ok(())
    }

    async fn csrf_exists(&self, token: &str) -> Result<bool> {
        let mut redis = self.redis.clone();
        let value: Option<String> = redis.get(csrf_key(token)).await?;
        Ok(value.is_some())
    }

    async fn remove_csrf(&self, token: &str) -> Result<()> {
        let mut redis = self.redis.clone();
        let _: () = redis.del(csrf_key(token)).await?;
        Ok(())
    }
}

/// Process-local store. Expiry is checked on read.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<Uuid, (StoredSession, Instant)>>,
    csrf_tokens: Mutex<HashMap<String, Instant>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_id: Uuid) -> Result<Option<StoredSession>> {
        let mut sessions = self.sessions.lock().await;
        let expired = match sessions.get(&session_id) {
            Some((_, deadline)) => *deadline <= Instant::now(),
            None => return Ok(None),
        };
        if expired {
            sessions.remove(&session_id);
            return Ok(None);
        }
        Ok(sessions.get(&session_id).map(|(session, _)| session.clone()))
    }

    async fn save(&self, session_id: Uuid, session: &StoredSession, ttl_secs: u64) -> Result<()> {
        let deadline = Instant::now() + Duration::from_secs(ttl_secs);
        self.sessions
            .lock()
            .await
            .insert(session_id, (session.clone(), deadline));
        Ok(())
    }

    async fn remove(&self, session_id: Uuid) -> Result<()> {
        self.sessions.lock().await.remove(&session_id);
        Ok(())
    }

    async fn save_csrf(&self, token: &str, ttl_secs: u64) -> Result<()> {
        let deadline = Instant::now() + Duration::from_secs(ttl_secs);
        self.csrf_tokens
            .lock()
            .await
            .insert(token.to_string(), deadline);
        Ok(())
    }

    async fn csrf_exists(&self, token: &str) -> Result<bool> {
        let mut tokens = self.csrf_tokens.lock().await;
        let live = match tokens.get(token) {
            Some(deadline) => *deadline > Instant::now(),
            None => return Ok(false),
        };
        if !live {
            tokens.remove(token);
        }
        Ok(live)
    }

    async fn remove_csrf(&self, token: &str) -> Result<()> {
        self.csrf_tokens.lock().await.remove(token);
        Ok(())
    }
}
