use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Single-slot scheduler for the delayed advance after an answer.
///
/// At most one callback is pending at a time; scheduling replaces any
/// previous slot. `cancel` aborts the pending task before its sleep
/// completes, so a cancelled callback does not run. The engine's advance
/// token covers the remaining window where a task has already woken but
/// not yet acquired the session lock.
#[derive(Debug, Default)]
pub struct FeedbackTimer {
    handle: Option<JoinHandle<()>>,
}

impl FeedbackTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` after `delay` on the current runtime.
    pub fn schedule<F>(&mut self, delay: Duration, callback: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback.await;
        }));
    }

    /// Abort the pending callback, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for FeedbackTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn callback_fires_after_the_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timer = FeedbackTimer::new();

        let counter = Arc::clone(&fired);
        timer.schedule(Duration::from_secs(1), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_callback_never_runs() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timer = FeedbackTimer::new();

        let counter = Arc::clone(&fired);
        timer.schedule(Duration::from_secs(1), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        timer.cancel();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_the_pending_slot() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timer = FeedbackTimer::new();

        for _ in 0..3 {
            let counter = Arc::clone(&fired);
            timer.schedule(Duration::from_secs(1), async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1, "only the last slot fires");
    }
}
