//! Cooperative shutdown shared by every worker.
//!
//! Polling loops check [`Shutdown::is_triggered`] or sleep through
//! [`Shutdown::wait_timeout`]. Loops that block inside the OS register a
//! waker with [`Shutdown::on_trigger`] that posts a quit message to
//! their own queue.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

type Waker = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct Inner {
    triggered: Mutex<bool>,
    cvar: Condvar,
    wakers: Mutex<Vec<Waker>>,
}

/// A cloneable cancellation handle.
#[derive(Clone, Default)]
pub struct Shutdown {
    inner: Arc<Inner>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown. Only the first call has any effect.
    pub fn trigger(&self) {
        {
            let mut triggered = lock(&self.inner.triggered);
            if *triggered {
                return;
            }
            *triggered = true;
        }
        self.inner.cvar.notify_all();

        let wakers = std::mem::take(&mut *lock(&self.inner.wakers));
        for wake in wakers {
            wake();
        }
    }

    /// Returns whether shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        *lock(&self.inner.triggered)
    }

    /// Sleeps for up to `timeout`, returning early on shutdown.
    ///
    /// Returns `true` if shutdown was requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = lock(&self.inner.triggered);
        match self
            .inner
            .cvar
            .wait_timeout_while(guard, timeout, |triggered| !*triggered)
        {
            Ok((triggered, _)) => *triggered,
            Err(poisoned) => *poisoned.into_inner().0,
        }
    }

    /// Runs `wake` once when shutdown is requested.
    ///
    /// If shutdown was already requested, `wake` runs immediately on the
    /// calling thread.
    pub fn on_trigger(&self, wake: impl FnOnce() + Send + 'static) {
        {
            let triggered = lock(&self.inner.triggered);
            if !*triggered {
                lock(&self.inner.wakers).push(Box::new(wake));
                return;
            }
        }
        wake();
    }
}

/// Locks a mutex, recovering the data if another thread panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Instant;

    use super::*;

    #[test]
    fn starts_untriggered() {
        // Assert
        assert!(!Shutdown::new().is_triggered());
    }

    #[test]
    fn trigger_is_visible_to_clones() {
        // Arrange
        let shutdown = Shutdown::new();
        let clone = shutdown.clone();

        // Act
        shutdown.trigger();

        // Assert
        assert!(clone.is_triggered());
    }

    #[test]
    fn wakers_run_exactly_once() {
        // Arrange
        let shutdown = Shutdown::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        shutdown.on_trigger(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // Act
        shutdown.trigger();
        shutdown.trigger();

        // Assert
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn late_waker_runs_immediately() {
        // Arrange
        let shutdown = Shutdown::new();
        shutdown.trigger();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        // Act
        shutdown.on_trigger(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // Assert
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wait_times_out_without_trigger() {
        // Act
        let triggered = Shutdown::new().wait_timeout(Duration::from_millis(10));

        // Assert
        assert!(!triggered);
    }

    #[test]
    fn wait_returns_early_on_trigger() {
        // Arrange
        let shutdown = Shutdown::new();
        let remote = shutdown.clone();
        let started = Instant::now();

        // Act
        let trigger = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.trigger();
        });
        let triggered = shutdown.wait_timeout(Duration::from_secs(10));
        trigger.join().unwrap();

        // Assert
        assert!(triggered);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
