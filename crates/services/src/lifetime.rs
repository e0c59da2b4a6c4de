//! Page-scoped cancellation for in-flight requests.

use std::future::Future;

use tokio::sync::watch;

/// Owned by a page; dropping it ends every token handed out.
#[derive(Debug)]
pub struct Lifetime {
    ended: watch::Sender<bool>,
}

/// Cheap handle that observes a `Lifetime`.
#[derive(Debug, Clone)]
pub struct LifetimeToken {
    ended: watch::Receiver<bool>,
}

impl Lifetime {
    #[must_use]
    pub fn new() -> Self {
        let (ended, _rx) = watch::channel(false);
        Self { ended }
    }

    #[must_use]
    pub fn token(&self) -> LifetimeToken {
        LifetimeToken {
            ended: self.ended.subscribe(),
        }
    }

    pub fn end(&self) {
        self.ended.send_replace(true);
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        self.end();
    }
}

impl LifetimeToken {
    #[must_use]
    pub fn is_ended(&self) -> bool {
        *self.ended.borrow()
    }

    /// Resolves once the owning `Lifetime` has ended or been dropped.
    pub async fn ended(&self) {
        let mut ended = self.ended.clone();
        // An error means the sender is gone, which also ends the lifetime.
        let _ = ended.wait_for(|ended| *ended).await;
    }

    /// Run `fut` unless the lifetime ends first. A result produced after the end
    /// is discarded.
    pub async fn run<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        if self.is_ended() {
            return None;
        }
        tokio::select! {
            biased;
            () = self.ended() => None,
            output = fut => (!self.is_ended()).then_some(output),
        }
    }
}
