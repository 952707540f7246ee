//! Trailing-edge debouncing driven by caller-supplied time.
//!
//! Scroll and resize fire far more often than a frame, and a class toggle
//! can produce a burst of mutation records. The [`Debouncer`] collapses each
//! burst into a single pass: every `schedule` supersedes whatever was pending
//! and pushes the deadline out to `now + delay`, so only the last call in a
//! window ever fires.
//!
//! The debouncer owns no timer. Hosts pass `now` in and call
//! [`Debouncer::fire_due`] from their own loop (or sleep until
//! [`Debouncer::deadline`]), which keeps it deterministic under test.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use navtone::Debouncer;
//!
//! let start = Instant::now();
//! let ms = |n| start + Duration::from_millis(n);
//!
//! let mut debouncer = Debouncer::new(Duration::from_millis(16));
//! debouncer.schedule("first", ms(0));
//! debouncer.schedule("second", ms(5));
//!
//! assert_eq!(debouncer.fire_due(ms(20)), None);
//! assert_eq!(debouncer.fire_due(ms(21)), Some("second"));
//! assert!(!debouncer.is_pending());
//! ```

use std::time::{Duration, Instant};

/// Collapses bursts of scheduled inputs into the last one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    input: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `input` to fire at `now + delay`, returning the input it
    /// superseded, if any.
    pub fn schedule(&mut self, input: T, now: Instant) -> Option<T> {
        let previous = self.pending.replace(Pending {
            input,
            deadline: now + self.delay,
        });
        previous.map(|p| p.input)
    }

    /// Takes the pending input once its deadline has been reached.
    pub fn fire_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.input),
            _ => None,
        }
    }

    /// When the pending input will fire.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Drops the pending input without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.input)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> impl Fn(u64) -> Instant {
        let start = Instant::now();
        move |ms| start + Duration::from_millis(ms)
    }

    #[test]
    fn test_fires_once_after_delay() {
        let at = clock();
        let mut d = Debouncer::new(Duration::from_millis(16));
        assert!(d.schedule(1, at(0)).is_none());

        assert_eq!(d.fire_due(at(15)), None);
        assert_eq!(d.fire_due(at(16)), Some(1));
        assert_eq!(d.fire_due(at(100)), None);
    }

    #[test]
    fn test_burst_collapses_to_last_input() {
        let at = clock();
        let mut d = Debouncer::new(Duration::from_millis(16));
        let mut superseded = 0;
        for i in 0..10u64 {
            if d.schedule(i, at(i)).is_some() {
                superseded += 1;
            }
        }
        assert_eq!(superseded, 9);

        let mut fired = Vec::new();
        for t in 0..100 {
            if let Some(input) = d.fire_due(at(t)) {
                fired.push((t, input));
            }
        }
        assert_eq!(fired, vec![(25, 9)]);
    }

    #[test]
    fn test_schedule_rearms_deadline() {
        let at = clock();
        let mut d = Debouncer::new(Duration::from_millis(16));
        d.schedule((), at(0));
        assert_eq!(d.deadline(), Some(at(16)));
        d.schedule((), at(10));
        assert_eq!(d.deadline(), Some(at(26)));
    }

    #[test]
    fn test_cancel() {
        let at = clock();
        let mut d = Debouncer::new(Duration::from_millis(16));
        d.schedule("x", at(0));
        assert_eq!(d.cancel(), Some("x"));
        assert!(!d.is_pending());
        assert_eq!(d.fire_due(at(50)), None);
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn test_separate_windows_fire_separately() {
        let at = clock();
        let mut d = Debouncer::new(Duration::from_millis(16));
        d.schedule('a', at(0));
        assert_eq!(d.fire_due(at(16)), Some('a'));
        d.schedule('b', at(40));
        assert_eq!(d.fire_due(at(56)), Some('b'));
    }
}
