//! Request-scoped context with cancellation and deadlines
//!
//! Passed as the first parameter to every async trait method so long-running
//! provider work can observe host-initiated cancellation.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::time;

#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    deadline: Option<Instant>,
    done: watch::Receiver<bool>,
    done_tx: watch::Sender<bool>,
}

impl Context {
    pub fn new() -> Self {
        let (done_tx, done_rx) = watch::channel(false);
        Self {
            inner: Arc::new(ContextInner {
                deadline: None,
                done: done_rx,
                done_tx,
            }),
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        let (done_tx, done_rx) = watch::channel(false);

        let expire_tx = done_tx.clone();
        tokio::spawn(async move {
            time::sleep_until(deadline.into()).await;
            let _ = expire_tx.send(true);
        });

        Self {
            inner: Arc::new(ContextInner {
                deadline: Some(deadline),
                done: done_rx,
                done_tx,
            }),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.done.borrow()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Channel that flips to true when work on behalf of this context
    /// should stop.
    pub fn done(&self) -> watch::Receiver<bool> {
        self.inner.done.clone()
    }

    pub fn cancel(&self) {
        let _ = self.inner.done_tx.send(true);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn timeout_cancels_context() {
        let ctx = Context::new().with_timeout(Duration::from_millis(50));
        assert!(!ctx.is_cancelled());

        sleep(Duration::from_millis(100)).await;
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn manual_cancel() {
        let ctx = Context::new();
        assert!(!ctx.is_cancelled());

        ctx.cancel();
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn deadline_only_set_with_timeout() {
        let ctx = Context::new();
        assert!(ctx.deadline().is_none());
        assert!(ctx.with_timeout(Duration::from_secs(1)).deadline().is_some());
    }
}
