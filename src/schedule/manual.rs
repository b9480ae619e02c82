use std::time::Duration;

use super::Scheduler;

/// Scheduler that only records what was asked of it.
///
/// Ticks are delivered by the caller, which makes game flow fully
/// deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManualScheduler {
    armed: Option<Duration>,
    arm_count: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay of the outstanding request, if any
    pub fn armed_delay(&self) -> Option<Duration> {
        self.armed
    }

    /// How many times `arm` has been called
    pub fn arm_count(&self) -> usize {
        self.arm_count
    }

    /// Consume the outstanding request. Returns true if one was pending.
    pub fn fire(&mut self) -> bool {
        self.armed.take().is_some()
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self, delay: Duration) {
        self.armed = Some(delay);
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.armed = None;
    }

    fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_and_fire() {
        let mut scheduler = ManualScheduler::new();
        assert!(!scheduler.is_armed());
        assert!(!scheduler.fire());

        scheduler.arm(Duration::from_millis(150));
        assert_eq!(scheduler.armed_delay(), Some(Duration::from_millis(150)));
        assert!(scheduler.fire());
        assert!(!scheduler.is_armed());
        assert_eq!(scheduler.arm_count(), 1);
    }

    #[test]
    fn test_rearm_replaces() {
        let mut scheduler = ManualScheduler::new();
        scheduler.arm(Duration::from_millis(150));
        scheduler.arm(Duration::from_millis(148));
        assert_eq!(scheduler.armed_delay(), Some(Duration::from_millis(148)));

        scheduler.disarm();
        assert!(!scheduler.fire());
        assert_eq!(scheduler.arm_count(), 2);
    }
}
