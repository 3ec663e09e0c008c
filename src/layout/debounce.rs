//! Cancel-and-reschedule timer for coalescing layout triggers.
//!
//! Time is passed in rather than read, so the event loop and tests share one
//! clock.

use std::time::{Duration, Instant};

/// A single pending deadline. Scheduling again replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Debouncer {
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create an idle debouncer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending deadline and schedule a new one `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline, zero if overdue.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consume the deadline if it has passed.
    ///
    /// Returns `true` exactly once per scheduled burst.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    #[test]
    fn idle_debouncer_never_fires() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.fire(Instant::now()));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn waits_for_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new();
        debouncer.schedule(start, DELAY);

        assert!(!debouncer.fire(start + Duration::from_millis(50)));
        assert!(debouncer.fire(start + DELAY));
        assert!(!debouncer.fire(start + DELAY * 2), "fires once per burst");
    }

    #[test]
    fn reschedule_pushes_deadline_back() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new();
        debouncer.schedule(start, DELAY);
        debouncer.schedule(start + Duration::from_millis(80), DELAY);

        assert!(!debouncer.fire(start + DELAY));
        assert!(debouncer.fire(start + Duration::from_millis(180)));
    }

    #[test]
    fn cancel_drops_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new();
        debouncer.schedule(start, DELAY);
        debouncer.cancel();
        assert!(!debouncer.fire(start + DELAY * 2));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new();
        assert_eq!(debouncer.remaining(start), None);
        debouncer.schedule(start, DELAY);
        assert_eq!(debouncer.remaining(start), Some(DELAY));
        assert_eq!(debouncer.remaining(start + DELAY * 3), Some(Duration::ZERO));
    }
}
