//! The `Clock` collaborator the core consumes for order and trade
//! timestamps. The core never reads the wall clock directly — callers
//! wire in whichever [`Clock`] fits their deployment.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of monotonic-ish Unix milliseconds.
///
/// Price-time priority ties are broken by timestamp, so a clock that ever
/// runs backwards can invert priority between two orders at the same
/// price (see spec §9, "Clock monotonicity"). Implementers should prefer
/// [`SystemClock`] or a per-book sequence counter over a raw wall clock.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// A wall-clock-backed [`Clock`] that ratchets forward: if `SystemTime`
/// ever reports a millisecond value at or before the last one returned,
/// the counter is bumped by one instead of going backwards.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            last: AtomicI64::new(0),
        }
    }

    fn wall_clock_ms() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        let wall = Self::wall_clock_ms();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = if wall > prev { wall } else { prev + 1 };
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

/// A [`Clock`] that always returns a fixed, externally-advanced value.
/// Useful in tests that need to control arrival order precisely.
#[derive(Debug)]
pub struct FixedClock {
    value: AtomicI64,
}

impl FixedClock {
    pub fn new(start: i64) -> Self {
        FixedClock {
            value: AtomicI64::new(start),
        }
    }

    /// Advance the clock by one tick and return the new value, matching
    /// the "strictly increasing" requirement tests rely on without racing
    /// a real wall clock.
    pub fn tick(&self) -> i64 {
        self.value.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}
