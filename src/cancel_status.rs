use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use crate::sampler::Error;

/// Cancellation flag shared between the termination signal handler and the
/// sampling loop. Waiters blocked in `wait_timeout` are woken as soon as the
/// flag is set.
#[derive(Clone, Default)]
pub struct CancelStatus {
    state: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route SIGINT, SIGTERM and SIGHUP (or the console control events on
    /// Windows) to `cancel`. Can only be done once per process.
    pub fn activate_termination_handler(&self) -> Result<(), Error> {
        let status = self.clone();
        ctrlc::set_handler(move || status.cancel())?;
        Ok(())
    }

    pub fn cancel(&self) {
        let (canceled, wake) = &*self.state;
        *canceled.lock().unwrap_or_else(PoisonError::into_inner) = true;
        wake.notify_all();
    }

    pub fn is_canceled(&self) -> bool {
        let (canceled, _) = &*self.state;
        *canceled.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block for up to `timeout`, returning early with `true` if the status
    /// is (or becomes) canceled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (canceled, wake) = &*self.state;
        let guard = canceled.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = wake
            .wait_timeout_while(guard, timeout, |canceled| !*canceled)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_not_canceled_initially() {
        let status = CancelStatus::new();

        assert!(!status.is_canceled());
    }

    #[test]
    fn test_clones_share_state() {
        let status = CancelStatus::new();
        let handler_side = status.clone();

        handler_side.cancel();

        assert!(status.is_canceled());
    }

    #[test]
    fn test_wait_times_out_when_not_canceled() {
        let status = CancelStatus::new();
        let start = Instant::now();

        assert!(!status.wait_timeout(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_wait_returns_immediately_when_already_canceled() {
        let status = CancelStatus::new();
        status.cancel();
        let start = Instant::now();

        assert!(status.wait_timeout(Duration::from_secs(30)));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_cancel_wakes_waiter() {
        let status = CancelStatus::new();
        let handler_side = status.clone();
        let start = Instant::now();

        let canceller = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            handler_side.cancel();
        });

        assert!(status.wait_timeout(Duration::from_secs(30)));
        assert!(start.elapsed() < Duration::from_secs(5));
        canceller.join().unwrap();
    }
}
