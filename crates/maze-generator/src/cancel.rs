//! Cooperative cancellation for in-flight generator calls.
//!
//! A [`CancellationSource`] hands out cloneable [`CancellationToken`]s.
//! Tokens can be polled or awaited; dropping the source does not cancel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Control handle that triggers cancellation.
#[derive(Debug, Default)]
pub struct CancellationSource {
    inner: Arc<Inner>,
}

impl CancellationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Signal cancellation and wake every task awaiting a token.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }
}

/// Observer side of a [`CancellationSource`].
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    /// A token whose source is already gone; it never fires.
    pub fn never() -> Self {
        CancellationSource::new().token()
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a concurrent cancel is not missed.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn cancel_is_visible_to_all_tokens() {
        let source = CancellationSource::new();
        let first = source.token();
        let second = first.clone();
        assert!(!first.is_cancelled());
        source.cancel();
        assert!(first.is_cancelled());
        assert!(second.is_cancelled());
        assert!(source.is_cancelled());
    }

    #[tokio::test]
    async fn awaiting_token_wakes_on_cancel() {
        let source = CancellationSource::new();
        let token = source.token();
        let waiter = tokio::spawn(async move { token.cancelled().await });
        tokio::task::yield_now().await;
        source.cancel();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("token should wake")
            .expect("task should not panic");
    }

    #[tokio::test]
    async fn already_cancelled_token_resolves_immediately() {
        let source = CancellationSource::new();
        source.cancel();
        source.token().cancelled().await;
    }

    #[tokio::test]
    async fn never_token_does_not_fire() {
        let token = CancellationToken::never();
        let outcome = tokio::time::timeout(Duration::from_millis(20), token.cancelled()).await;
        assert!(outcome.is_err());
    }
}
