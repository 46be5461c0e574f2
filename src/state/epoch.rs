use crate::error::RegulatorError;

/// Epoch counter plus the marker of the last epoch a supply step was applied to
#[odra::odra_type]
pub struct EpochClock {
    /// Epoch the next step regulates
    pub current: u64,
    /// Last epoch a step committed for, `None` before the first step
    pub last_regulated: Option<u64>,
}

impl EpochClock {
    /// Create a clock at epoch zero that has never regulated
    pub fn new() -> Self {
        Self {
            current: 0,
            last_regulated: None,
        }
    }

    /// Move to the next epoch
    pub fn advance(&mut self) -> Result<u64, RegulatorError> {
        self.current = self
            .current
            .checked_add(1)
            .ok_or(RegulatorError::EpochOverflow)?;
        Ok(self.current)
    }

    /// True once a step has committed for the current epoch
    pub fn is_regulated(&self) -> bool {
        self.last_regulated == Some(self.current)
    }

    /// Record that the current epoch has been regulated
    pub fn mark_regulated(&mut self) {
        self.last_regulated = Some(self.current);
    }

    /// Epochs `1..=period` run on the bootstrapping price; a zero period disables it
    pub fn is_bootstrapping(&self, period: u64) -> bool {
        period > 0 && self.current <= period
    }
}

impl Default for EpochClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn marker_follows_current_epoch() {
        let mut clock = EpochClock::new();
        assert!(!clock.is_regulated());
        clock.mark_regulated();
        assert!(clock.is_regulated());
        assert_eq!(clock.advance().ok(), Some(1));
        assert!(!clock.is_regulated());
        assert_eq!(clock.last_regulated, Some(0));
    }

    #[test]
    fn advance_overflow_is_reported() {
        let mut clock = EpochClock {
            current: u64::MAX,
            last_regulated: None,
        };
        assert!(matches!(clock.advance(), Err(RegulatorError::EpochOverflow)));
        assert_eq!(clock.current, u64::MAX);
    }

    #[test]
    fn bootstrapping_window() {
        let mut clock = EpochClock::new();
        assert!(!clock.is_bootstrapping(0));
        let _ = clock.advance();
        assert!(clock.is_bootstrapping(2));
        let _ = clock.advance();
        assert!(clock.is_bootstrapping(2));
        let _ = clock.advance();
        assert!(!clock.is_bootstrapping(2));
        assert!(!clock.is_bootstrapping(0));
    }
}
