//! Nonce sources.
//!
//! Action nonces are millisecond timestamps. The exchange keeps a window of
//! recent nonces per signer, so every nonce must be unique and should sit
//! close to server time.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tracing::warn;

use crate::error::NonceError;

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Anything that can hand out action nonces.
pub trait NonceSource: Send + Sync {
    fn next_nonce(&self) -> i64;
}

/// Always returns the same nonce. For replaying a known request.
#[derive(Debug, Clone, Copy)]
pub struct FixedNonce(pub i64);

impl NonceSource for FixedNonce {
    fn next_nonce(&self) -> i64 {
        self.0
    }
}

/// Strictly increasing nonces that follow (approximate) server time.
///
/// `next_nonce()` returns `max(last + 1, local_now + server_offset)`, so a
/// clock step backwards never produces a repeated or smaller nonce.
pub struct NonceManager<C: Clock> {
    last: AtomicI64,
    /// server_time - local_time (positive = server ahead)
    server_offset_ms: AtomicI64,
    clock: C,
}

impl<C: Clock> NonceManager<C> {
    /// Offset magnitude that gets a warning.
    pub const DRIFT_WARN_MS: i64 = 2_000;
    /// Offset magnitude that is refused.
    pub const DRIFT_MAX_MS: i64 = 5_000;

    pub fn new(clock: C) -> Self {
        let now = clock.now_ms();
        Self {
            last: AtomicI64::new(now.saturating_sub(1)),
            server_offset_ms: AtomicI64::new(0),
            clock,
        }
    }

    pub fn approx_server_time_ms(&self) -> i64 {
        self.clock
            .now_ms()
            .saturating_add(self.server_offset_ms.load(Ordering::Acquire))
    }

    /// Record the server's clock.
    ///
    /// # Errors
    /// `TimeDriftTooLarge` when local and server clocks differ by more than
    /// [`Self::DRIFT_MAX_MS`]; the previous offset is kept.
    pub fn sync_with_server(&self, server_time_ms: i64) -> Result<(), NonceError> {
        let offset = server_time_ms.saturating_sub(self.clock.now_ms());

        if offset.abs() > Self::DRIFT_MAX_MS {
            return Err(NonceError::TimeDriftTooLarge(offset));
        }
        if offset.abs() > Self::DRIFT_WARN_MS {
            warn!(offset_ms = offset, "Significant clock drift against server");
        }

        self.server_offset_ms.store(offset, Ordering::Release);
        // never hand out a nonce behind the server clock after a sync
        self.last
            .fetch_max(server_time_ms.saturating_sub(1), Ordering::AcqRel);
        Ok(())
    }

    pub fn server_offset_ms(&self) -> i64 {
        self.server_offset_ms.load(Ordering::Acquire)
    }
}

impl<C: Clock> NonceSource for NonceManager<C> {
    fn next_nonce(&self) -> i64 {
        let target = self.approx_server_time_ms();
        let mut current = self.last.load(Ordering::Acquire);
        loop {
            let next = current.saturating_add(1).max(target);
            match self
                .last
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }
}

impl NonceManager<SystemClock> {
    pub fn with_system_clock() -> Self {
        Self::new(SystemClock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    struct ManualClock(AtomicI64);

    impl ManualClock {
        fn at(ms: i64) -> Arc<Self> {
            Arc::new(Self(AtomicI64::new(ms)))
        }

        fn set(&self, ms: i64) {
            self.0.store(ms, Ordering::Release);
        }
    }

    impl Clock for Arc<ManualClock> {
        fn now_ms(&self) -> i64 {
            self.0.load(Ordering::Acquire)
        }
    }

    const T0: i64 = 1_758_570_668_100;

    #[test]
    fn test_first_nonce_is_current_time() {
        let manager = NonceManager::new(ManualClock::at(T0));
        assert_eq!(manager.next_nonce(), T0);
        assert_eq!(manager.next_nonce(), T0 + 1);
    }

    #[test]
    fn test_follows_clock_forward() {
        let clock = ManualClock::at(T0);
        let manager = NonceManager::new(Arc::clone(&clock));
        manager.next_nonce();

        clock.set(T0 + 60_000);
        assert_eq!(manager.next_nonce(), T0 + 60_000);
    }

    #[test]
    fn test_clock_regression_never_decreases() {
        let clock = ManualClock::at(T0);
        let manager = NonceManager::new(Arc::clone(&clock));
        let before = manager.next_nonce();

        clock.set(T0 - 10_000);
        let after = manager.next_nonce();
        assert!(after > before);
    }

    #[test]
    fn test_sync_applies_offset() {
        let manager = NonceManager::new(ManualClock::at(T0));
        manager.sync_with_server(T0 + 1_500).unwrap();

        assert_eq!(manager.server_offset_ms(), 1_500);
        assert_eq!(manager.approx_server_time_ms(), T0 + 1_500);
        assert!(manager.next_nonce() >= T0 + 1_500);
    }

    #[test]
    fn test_sync_warn_range_is_accepted() {
        let manager = NonceManager::new(ManualClock::at(T0));
        assert!(manager.sync_with_server(T0 - 3_000).is_ok());
        assert_eq!(manager.server_offset_ms(), -3_000);
    }

    #[test]
    fn test_sync_rejects_large_drift() {
        let manager = NonceManager::new(ManualClock::at(T0));
        assert_eq!(
            manager.sync_with_server(T0 + 5_001),
            Err(NonceError::TimeDriftTooLarge(5_001))
        );
        assert_eq!(
            manager.sync_with_server(T0 - 5_001),
            Err(NonceError::TimeDriftTooLarge(-5_001))
        );
        assert_eq!(manager.server_offset_ms(), 0);
    }

    #[test]
    fn test_concurrent_nonces_are_unique() {
        let manager = Arc::new(NonceManager::new(ManualClock::at(T0)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                thread::spawn(move || (0..500).map(|_| manager.next_nonce()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn test_fixed_nonce() {
        let source = FixedNonce(42);
        assert_eq!(source.next_nonce(), 42);
        assert_eq!(source.next_nonce(), 42);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // after 2020-01-01
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
