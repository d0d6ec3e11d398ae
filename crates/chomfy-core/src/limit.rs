//! Emission caps and the lifecycle shared by the sequencer and the counter.

/// Where a stateful node is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No successful call yet, or the last reload failed before any state existed.
    Uninitialized,
    /// The next call emits a new value.
    Ready,
    /// The cap is reached; without auto-reset the next call repeats the last output.
    Exhausted,
}

/// Optional cap on the number of emissions between resets.
///
/// Built from the host's `max_steps` input, where any negative value means
/// the sequence never ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepLimit(Option<u64>);

impl StepLimit {
    pub const UNLIMITED: Self = Self(None);

    pub fn from_max_steps(max_steps: i64) -> Self {
        Self(u64::try_from(max_steps).ok())
    }

    pub fn max_steps(&self) -> Option<u64> {
        self.0
    }

    /// True once `emitted` emissions have used up the cap.
    pub fn is_reached(&self, emitted: u64) -> bool {
        self.0.is_some_and(|max| emitted >= max)
    }

    pub(crate) fn phase(&self, emitted: u64) -> Phase {
        if self.is_reached(emitted) {
            Phase::Exhausted
        } else {
            Phase::Ready
        }
    }
}

impl Default for StepLimit {
    fn default() -> Self {
        Self::UNLIMITED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_is_unlimited() {
        assert_eq!(StepLimit::from_max_steps(-1), StepLimit::UNLIMITED);
        assert_eq!(StepLimit::from_max_steps(-40).max_steps(), None);
        assert!(!StepLimit::from_max_steps(-1).is_reached(u64::MAX));
    }

    #[test]
    fn test_zero_is_reached_immediately() {
        let limit = StepLimit::from_max_steps(0);
        assert!(limit.is_reached(0));
        assert_eq!(limit.phase(0), Phase::Exhausted);
    }

    #[test]
    fn test_cap() {
        let limit = StepLimit::from_max_steps(2);
        assert_eq!(limit.phase(1), Phase::Ready);
        assert!(limit.is_reached(2));
        assert!(limit.is_reached(3));
    }
}
