// ABOUTME: One-shot cancellable redirect timer for the success state.
// ABOUTME: Schedules navigation after a delay; cancelled on teardown or manual return.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::environment::HostEnvironment;

/// Handle to a scheduled redirect.
///
/// Dropping the handle cancels the pending navigation, so tearing down the
/// flow before the timer fires never navigates.
pub struct RedirectHandle {
    cancel_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RedirectHandle {
    /// Arm a one-shot timer that navigates to `url` after `delay`.
    pub fn schedule(
        environment: Arc<dyn HostEnvironment>,
        url: String,
        delay: Duration,
    ) -> Self {
        let (cancel_tx, mut cancel_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    log::info!("[redirect] Timer fired, navigating");
                    environment.navigate(&url);
                }
                _ = &mut cancel_rx => {
                    log::debug!("[redirect] Cancelled before firing");
                }
            }
        });

        Self {
            cancel_tx: Some(cancel_tx),
            task,
        }
    }

    /// Cancel the pending navigation.
    pub fn cancel(mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Wait until the timer fires (or was cancelled elsewhere).
    pub async fn join(mut self) {
        // Keep the cancel sender alive while waiting, otherwise the drop
        // would cancel the timer we are waiting for.
        let _ = (&mut self.task).await;
        self.cancel_tx.take();
    }
}

impl Drop for RedirectHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingEnvironment {
        navigations: Mutex<Vec<String>>,
    }

    impl RecordingEnvironment {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                navigations: Mutex::new(Vec::new()),
            })
        }
    }

    impl HostEnvironment for RecordingEnvironment {
        fn navigate(&self, url: &str) {
            self.navigations.lock().unwrap().push(url.to_string());
        }

        fn reset_persisted_state(&self) -> Result<(), String> {
            Ok(())
        }

        fn reload(&self) {}
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_navigates_after_delay() {
        let env = RecordingEnvironment::new();
        let started = tokio::time::Instant::now();

        let handle = RedirectHandle::schedule(
            env.clone(),
            "https://app.example.com?page=profile".into(),
            Duration::from_secs(3),
        );
        handle.join().await;

        assert_eq!(started.elapsed(), Duration::from_secs(3));
        assert_eq!(
            *env.navigations.lock().unwrap(),
            vec!["https://app.example.com?page=profile".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_navigation() {
        let env = RecordingEnvironment::new();

        let handle = RedirectHandle::schedule(
            env.clone(),
            "https://app.example.com?page=profile".into(),
            Duration::from_secs(3),
        );
        handle.cancel();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(env.navigations.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_the_timer() {
        let env = RecordingEnvironment::new();

        {
            let _handle = RedirectHandle::schedule(
                env.clone(),
                "https://app.example.com?page=profile".into(),
                Duration::from_secs(3),
            );
        }

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(env.navigations.lock().unwrap().is_empty());
    }
}
