use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Source of the current time for the limiter.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Fixed-window limiter: admits at most `max_calls` attempts within any
/// `period`. Denied attempts are not recorded.
pub struct RateLimiter {
    calls: Mutex<VecDeque<Instant>>,
    max_calls: usize,
    period: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(max_calls: usize, period: Duration) -> Self {
        Self::with_clock(max_calls, period, Arc::new(SystemClock))
    }

    pub fn with_clock(max_calls: usize, period: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            calls: Mutex::new(VecDeque::with_capacity(max_calls)),
            max_calls,
            period,
            clock,
        }
    }

    pub fn attempt(&self) -> bool {
        // The prune/check/append sequence must happen under one lock.
        // A poisoned lock still holds a valid queue, so keep using it.
        let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();

        while let Some(oldest) = calls.front() {
            if now.saturating_duration_since(*oldest) >= self.period {
                calls.pop_front();
            } else {
                break;
            }
        }

        if calls.len() < self.max_calls {
            calls.push_back(now);
            true
        } else {
            tracing::debug!(
                in_window = calls.len(),
                max_calls = self.max_calls,
                "rate limiter denied attempt"
            );
            false
        }
    }
}

/// Clock that only moves when told to.
#[cfg(test)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn limiter() -> (RateLimiter, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let limiter = RateLimiter::with_clock(5, Duration::from_secs(30), clock.clone());
        (limiter, clock)
    }

    #[test]
    fn admits_up_to_max_calls_in_window() {
        let (limiter, clock) = limiter();
        for _ in 0..5 {
            assert!(limiter.attempt());
            clock.advance(Duration::from_secs(1));
        }
    }

    #[test]
    fn sixth_call_within_window_is_denied() {
        let (limiter, clock) = limiter();
        for _ in 0..5 {
            assert!(limiter.attempt());
        }
        clock.advance(Duration::from_secs(29));
        assert!(!limiter.attempt());
    }

    #[test]
    fn admits_again_once_oldest_call_leaves_window() {
        let (limiter, clock) = limiter();
        assert!(limiter.attempt());
        clock.advance(Duration::from_secs(10));
        for _ in 0..4 {
            assert!(limiter.attempt());
        }
        assert!(!limiter.attempt());

        // Oldest call is now exactly one period old and no longer counts.
        clock.advance(Duration::from_secs(20));
        assert!(limiter.attempt());
        assert!(!limiter.attempt());
    }

    #[test]
    fn denied_attempts_are_not_recorded() {
        let (limiter, clock) = limiter();
        for _ in 0..5 {
            assert!(limiter.attempt());
        }
        for _ in 0..10 {
            clock.advance(Duration::from_secs(2));
            assert!(!limiter.attempt());
        }
        // 30s after the admitted burst; the denials above must not extend the window.
        clock.advance(Duration::from_secs(10));
        for _ in 0..5 {
            assert!(limiter.attempt());
        }
    }

    #[test]
    fn concurrent_attempts_never_exceed_max_calls() {
        let limiter = Arc::new(RateLimiter::new(5, Duration::from_secs(3600)));
        let admitted = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                let admitted = Arc::clone(&admitted);
                std::thread::spawn(move || {
                    if limiter.attempt() {
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(admitted.load(Ordering::SeqCst), 5);
    }
}
