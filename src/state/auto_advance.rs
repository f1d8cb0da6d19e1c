//! Deferred stage advance scheduled after a selection

use super::forms::FormStage;
use std::time::{Duration, Instant};

/// An advance requested from a given stage, due at a point in time.
///
/// The schedule is keyed to the stage it was created on: once the form has
/// left that stage the advance no longer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    /// Stage the advance was scheduled from
    pub from: FormStage,
    /// When the advance becomes due
    pub due: Instant,
}

impl ScheduledAdvance {
    /// Default delay between the selection and the advance
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

    pub fn new(from: FormStage, now: Instant, delay: Duration) -> Self {
        Self {
            from,
            due: now + delay,
        }
    }

    /// Check if the advance is due at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Check if the advance still applies to `stage`
    pub fn applies_to(&self, stage: FormStage) -> bool {
        self.from == stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_delay() {
        let now = Instant::now();
        let scheduled = ScheduledAdvance::new(FormStage::AgeRange, now, Duration::from_millis(200));
        assert!(!scheduled.is_due(now));
        assert!(!scheduled.is_due(now + Duration::from_millis(199)));
    }

    #[test]
    fn test_due_at_and_after_delay() {
        let now = Instant::now();
        let scheduled = ScheduledAdvance::new(FormStage::AgeRange, now, Duration::from_millis(200));
        assert!(scheduled.is_due(now + Duration::from_millis(200)));
        assert!(scheduled.is_due(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_applies_only_to_origin_stage() {
        let scheduled =
            ScheduledAdvance::new(FormStage::Location, Instant::now(), ScheduledAdvance::DEFAULT_DELAY);
        assert!(scheduled.applies_to(FormStage::Location));
        assert!(!scheduled.applies_to(FormStage::AgeRange));
        assert!(!scheduled.applies_to(FormStage::Contact));
    }

    #[test]
    fn test_default_delay_constant() {
        assert_eq!(ScheduledAdvance::DEFAULT_DELAY.as_millis(), 200);
    }
}
