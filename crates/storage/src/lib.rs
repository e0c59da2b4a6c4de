#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{CacheKey, CachedValue, InMemoryRepository, LocalStore, Storage, StorageError};
