use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Keys of the device-local cache.
///
/// These mirror the browser local-storage keys the web client used, so a
/// cache exported from one can be read by the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Token,
    User,
}

impl CacheKey {
    pub const ALL: [CacheKey; 2] = [CacheKey::Token, CacheKey::User];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::User => "user",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "token" => Some(Self::Token),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cached string value with the time it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedValue {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository contract for the device-local key/value cache.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: CacheKey) -> Result<Option<CachedValue>, StorageError>;

    /// Insert or replace a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set(&self, key: CacheKey, value: &str, at: DateTime<Utc>)
    -> Result<(), StorageError>;

    /// Delete a value. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove(&self, key: CacheKey) -> Result<(), StorageError>;

    /// Delete every known key.
    ///
    /// # Errors
    ///
    /// Returns the first `StorageError` encountered.
    async fn clear(&self) -> Result<(), StorageError> {
        for key in CacheKey::ALL {
            self.remove(key).await?;
        }
        Ok(())
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<CacheKey, CachedValue>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalStore for InMemoryRepository {
    async fn get(&self, key: CacheKey) -> Result<Option<CachedValue>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    async fn set(
        &self,
        key: CacheKey,
        value: &str,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            key,
            CachedValue {
                value: value.to_owned(),
                updated_at: at,
            },
        );
        Ok(())
    }

    async fn remove(&self, key: CacheKey) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&key);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub local: Arc<dyn LocalStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let local: Arc<dyn LocalStore> = Arc::new(InMemoryRepository::new());
        Self { local }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[tokio::test]
    async fn set_then_get_returns_latest_value() {
        let repo = InMemoryRepository::new();
        repo.set(CacheKey::Token, "abc", at(10)).await.unwrap();
        repo.set(CacheKey::Token, "def", at(20)).await.unwrap();

        let cached = repo.get(CacheKey::Token).await.unwrap().unwrap();
        assert_eq!(cached.value, "def");
        assert_eq!(cached.updated_at, at(20));
        assert!(repo.get(CacheKey::User).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_removes_every_key() {
        let repo = InMemoryRepository::new();
        repo.set(CacheKey::Token, "abc", at(1)).await.unwrap();
        repo.set(CacheKey::User, "{}", at(1)).await.unwrap();

        repo.clear().await.unwrap();

        assert!(repo.get(CacheKey::Token).await.unwrap().is_none());
        assert!(repo.get(CacheKey::User).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn removing_missing_key_is_ok() {
        let repo = InMemoryRepository::new();
        repo.remove(CacheKey::User).await.unwrap();
    }

    #[test]
    fn cache_keys_round_trip_through_names() {
        for key in CacheKey::ALL {
            assert_eq!(CacheKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(CacheKey::parse("theme"), None);
    }
}
