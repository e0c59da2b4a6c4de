use std::fmt;
use std::sync::{Arc, Mutex};

use assesify_core::Clock;
use assesify_core::model::User;
use storage::repository::{CacheKey, LocalStore, StorageError};
use tokio::sync::watch;

/// Bearer token issued by the API at login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Changes to the signed-in identity, published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// Nothing has happened since startup.
    Started,
    SignedIn,
    SignedOut,
    /// The API rejected the token (401/422); cached credentials were dropped.
    Invalidated { status: u16 },
}

#[derive(Default)]
struct Cached {
    token: Option<AccessToken>,
    user: Option<User>,
}

/// The signed-in identity: token and user, cached locally and in memory.
///
/// Holds the only copy of credentials the rest of the app reads from.
pub struct SessionContext {
    store: Arc<dyn LocalStore>,
    clock: Clock,
    cached: Mutex<Cached>,
    events: watch::Sender<AuthEvent>,
}

impl SessionContext {
    #[must_use]
    pub fn new(store: Arc<dyn LocalStore>, clock: Clock) -> Self {
        let (events, _rx) = watch::channel(AuthEvent::Started);
        Self {
            store,
            clock,
            cached: Mutex::new(Cached::default()),
            events,
        }
    }

    /// Load token and user from the local store into memory.
    ///
    /// A user entry that no longer parses is dropped rather than failing startup.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn restore(&self) -> Result<(), StorageError> {
        let token = self
            .store
            .get(CacheKey::Token)
            .await?
            .map(|cached| AccessToken::new(cached.value));

        let user = match self.store.get(CacheKey::User).await? {
            Some(cached) => match serde_json::from_str::<User>(&cached.value) {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::warn!(error = %err, "dropping unreadable cached user");
                    self.store.remove(CacheKey::User).await?;
                    None
                }
            },
            None => None,
        };

        tracing::debug!(has_token = token.is_some(), has_user = user.is_some(), "session restored");
        self.update(|cached| {
            cached.token = token;
            cached.user = user;
        });
        Ok(())
    }

    #[must_use]
    pub fn token(&self) -> Option<AccessToken> {
        self.read(|cached| cached.token.clone())
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.read(|cached| cached.user.clone())
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.read(|cached| cached.token.is_some())
    }

    /// Persist a fresh token (and the user, when the login response carried one).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    pub async fn sign_in(&self, token: AccessToken, user: Option<User>) -> Result<(), StorageError> {
        let now = self.clock.now();
        self.store.set(CacheKey::Token, token.as_str(), now).await?;
        if let Some(user) = &user {
            self.store.set(CacheKey::User, &encode_user(user)?, now).await?;
        }
        self.update(|cached| {
            cached.token = Some(token);
            if user.is_some() {
                cached.user = user;
            }
        });
        self.events.send_replace(AuthEvent::SignedIn);
        Ok(())
    }

    /// Replace the cached user, e.g. after a profile refresh.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    pub async fn store_user(&self, user: User) -> Result<(), StorageError> {
        self.store
            .set(CacheKey::User, &encode_user(&user)?, self.clock.now())
            .await?;
        self.update(|cached| cached.user = Some(user));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be cleared.
    pub async fn sign_out(&self) -> Result<(), StorageError> {
        self.update(|cached| *cached = Cached::default());
        self.store.clear().await?;
        self.events.send_replace(AuthEvent::SignedOut);
        Ok(())
    }

    /// Drop credentials after the API rejected them and tell subscribers.
    ///
    /// Memory is cleared even when the store cannot be.
    pub async fn invalidate(&self, status: u16) {
        self.update(|cached| *cached = Cached::default());
        if let Err(err) = self.store.clear().await {
            tracing::error!(error = %err, "failed to clear cached credentials");
        }
        tracing::info!(status, "session invalidated by API");
        self.events.send_replace(AuthEvent::Invalidated { status });
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    fn read<T>(&self, f: impl FnOnce(&Cached) -> T) -> T
    where
        T: Default,
    {
        self.cached.lock().map(|guard| f(&guard)).unwrap_or_default()
    }

    fn update(&self, f: impl FnOnce(&mut Cached)) {
        match self.cached.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("signed_in", &self.is_signed_in())
            .finish_non_exhaustive()
    }
}

fn encode_user(user: &User) -> Result<String, StorageError> {
    serde_json::to_string(user).map_err(|err| StorageError::Serialization(err.to_string()))
}
