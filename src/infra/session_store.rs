//! Server-side session storage in Redis.
//!
//! The browser only ever holds an opaque random token; the record it points
//! at (`session:<token>`) carries the user id and expires with the session.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{Config, SESSION_KEY_PREFIX, SESSION_TOKEN_BYTES};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Session store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a session for `user_id` and return its token
    async fn create(&self, user_id: Uuid) -> AppResult<String>;

    /// User behind a live session token
    async fn resolve(&self, token: &str) -> AppResult<Option<Uuid>>;

    /// Revoke a session. Unknown tokens are ignored.
    async fn destroy(&self, token: &str) -> AppResult<()>;
}

/// What Redis stores per session
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

/// Redis-backed session store with connection pooling.
#[derive(Clone)]
pub struct RedisSessionStore {
    connection: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    /// Connect to Redis.
    pub async fn connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis session store connected");

        Ok(Self {
            connection,
            ttl_seconds: config.session_ttl_seconds,
        })
    }

    fn key(token: &str) -> String {
        format!("{}{}", SESSION_KEY_PREFIX, token)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, user_id: Uuid) -> AppResult<String> {
        let token = generate_token();
        let record = SessionRecord {
            user_id,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&record)
            .map_err(|e| AppError::internal(format!("Session serialization error: {}", e)))?;

        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(Self::key(&token), json, self.ttl_seconds)
            .await?;

        Ok(token)
    }

    async fn resolve(&self, token: &str) -> AppResult<Option<Uuid>> {
        if !is_well_formed(token) {
            return Ok(None);
        }

        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(Self::key(token)).await?;

        // A record we can't read is treated as no session at all.
        Ok(value
            .and_then(|json| serde_json::from_str::<SessionRecord>(&json).ok())
            .map(|record| record.user_id))
    }

    async fn destroy(&self, token: &str) -> AppResult<()> {
        if !is_well_formed(token) {
            return Ok(());
        }

        let mut conn = self.connection.clone();
        let _: () = conn.del(Self::key(token)).await?;
        Ok(())
    }
}

/// 256 bits from the OS RNG, hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Shape check before a cookie value is used as part of a Redis key.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == SESSION_TOKEN_BYTES * 2 && hex::decode(token).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert!(is_well_formed(&token));
        assert_eq!(hex::decode(&token).unwrap().len(), SESSION_TOKEN_BYTES);
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("abc"));
        assert!(!is_well_formed(&"z".repeat(64)));
        assert!(!is_well_formed(&format!("{}*", "a".repeat(63))));
    }

    #[test]
    fn test_record_roundtrip_keeps_user() {
        let user_id = Uuid::new_v4();
        let json = serde_json::to_string(&SessionRecord {
            user_id,
            created_at: Utc::now(),
        })
        .unwrap();

        let record: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.user_id, user_id);
    }
}
