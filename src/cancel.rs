//! Cooperative cancellation
//!
//! A [`CancelSource`] owns the flag; any number of [`CancelSignal`]s observe it.
//! Network calls and delays are raced against the signal so a cancelled
//! collection stops at its next suspension point with [`Error::Cancelled`].

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

/// Owner side of a cancellation flag
#[derive(Debug)]
pub struct CancelSource {
    tx: watch::Sender<bool>,
}

impl CancelSource {
    /// Create a new, not yet cancelled, source
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Get a signal observing this source
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: Some(self.tx.subscribe()),
        }
    }

    /// Cancel every operation observing this source
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Check if cancel() has been called
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for CancelSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        Self { rx: None }
    }

    /// Check if cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Fail fast with `Error::Cancelled` if cancellation has been requested
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Resolve once cancellation is requested (never, if the source is gone)
    pub async fn cancelled(&self) {
        let Some(rx) = &self.rx else {
            return std::future::pending().await;
        };

        let mut rx = rx.clone();
        let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }

    /// Run a future, abandoning it if cancellation is requested first
    pub async fn guard<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;

        tokio::select! {
            biased;
            () = self.cancelled() => {
                info!("Cancellation requested, abandoning in-flight work");
                Err(Error::Cancelled)
            }
            result = fut => result,
        }
    }

    /// Sleep for `duration` unless cancelled first
    pub async fn sleep(&self, duration: Duration) -> Result<()> {
        if duration.is_zero() {
            return self.check();
        }
        self.guard(async {
            tokio::time::sleep(duration).await;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_is_not_cancelled() {
        let signal = CancelSignal::never();
        assert!(!signal.is_cancelled());
        assert!(signal.check().is_ok());
    }

    #[test]
    fn test_cancel_is_observed_by_all_signals() {
        let source = CancelSource::new();
        let a = source.signal();
        let b = a.clone();

        source.cancel();

        assert!(source.is_cancelled());
        assert!(a.is_cancelled());
        assert!(matches!(b.check(), Err(Error::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_interrupted_by_cancel() {
        let source = CancelSource::new();
        let signal = source.signal();

        let handle = tokio::spawn(async move { signal.sleep(Duration::from_secs(60)).await });
        tokio::time::sleep(Duration::from_secs(1)).await;
        source.cancel();

        let result = handle.await.unwrap();
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_guard_passes_result_through() {
        let source = CancelSource::new();
        let signal = source.signal();

        let value = signal.guard(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);

        let err = signal
            .guard(async { Err::<(), _>(Error::http_status(500, "")) })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_guard_after_cancel_does_not_poll() {
        let source = CancelSource::new();
        let signal = source.signal();
        source.cancel();

        let result: Result<()> = signal
            .guard(async { panic!("future must not be polled") })
            .await;
        assert!(result.unwrap_err().is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_source_never_cancels() {
        let source = CancelSource::new();
        let signal = source.signal();
        drop(source);

        signal.sleep(Duration::from_millis(50)).await.unwrap();
        assert!(!signal.is_cancelled());
    }
}
