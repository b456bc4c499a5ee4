//! Time sources for the bounded driver loop.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Time provider, injectable for testing.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Deterministic clock for tests and replays.
///
/// Time only moves when [`ManualClock::advance`] is called, or, for a
/// stepping clock, by a fixed amount after every reading.
///
/// # Example
///
/// ```rust
/// use flowtable::engine::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::stepping(Duration::from_millis(10));
/// let first = clock.now();
/// let second = clock.now();
/// assert_eq!(second - first, Duration::from_millis(10));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Cell<Duration>,
    step: Duration,
}

impl ManualClock {
    /// A clock that stands still until advanced.
    pub fn new() -> Self {
        Self::stepping(Duration::ZERO)
    }

    /// A clock that moves forward by `step` after every reading.
    pub fn stepping(step: Duration) -> Self {
        Self {
            origin: Instant::now(),
            offset: Cell::new(Duration::ZERO),
            step,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// Total time this clock has moved since creation.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = self.offset.get();
        self.offset.set(offset + self.step);
        self.origin + offset
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_stands_still() {
        let clock = ManualClock::new();
        let a = clock.now();
        let b = clock.now();
        assert_eq!(a, b);
    }

    #[test]
    fn manual_clock_advances_on_demand() {
        let clock = ManualClock::new();
        let start = clock.now();
        clock.advance(Duration::from_millis(25));
        assert_eq!(clock.now() - start, Duration::from_millis(25));
        assert_eq!(clock.elapsed(), Duration::from_millis(25));
    }

    #[test]
    fn stepping_clock_moves_after_each_reading() {
        let clock = ManualClock::stepping(Duration::from_millis(5));
        let readings: Vec<Instant> = (0..3).map(|_| clock.now()).collect();
        assert_eq!(readings[1] - readings[0], Duration::from_millis(5));
        assert_eq!(readings[2] - readings[0], Duration::from_millis(10));
    }

    #[test]
    fn shared_clock_sees_advances() {
        let clock = Rc::new(ManualClock::new());
        let shared = Rc::clone(&clock);
        let start = shared.now();
        clock.advance(Duration::from_millis(7));
        assert_eq!(shared.now() - start, Duration::from_millis(7));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
