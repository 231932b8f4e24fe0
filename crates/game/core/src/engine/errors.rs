//! Errors surfaced by the trial engine.

use crate::action::ActionError;
use crate::env::RngError;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TrialError {
    #[error("trial level {0} is outside 1..=12")]
    InvalidLevel(u8),

    #[error("action rejected: {0}")]
    Action(#[from] ActionError),

    #[error("intent draw failed: {0}")]
    Rng(#[from] RngError),
}

impl TrialError {
    /// Whether the trial and generator are untouched and another action may
    /// be submitted.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Action(err) if !matches!(err, ActionError::Rng(_)))
    }
}

impl GameError for TrialError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidLevel(_) => ErrorSeverity::Validation,
            Self::Action(err) => err.severity(),
            Self::Rng(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLevel(_) => "TRIAL_INVALID_LEVEL",
            Self::Action(err) => err.error_code(),
            Self::Rng(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_delegates_to_the_source() {
        let locked = TrialError::from(ActionError::SurgeLocked { weak: 1 });
        assert_eq!(locked.severity(), ErrorSeverity::Recoverable);
        assert_eq!(locked.error_code(), "ACTION_SURGE_LOCKED");
        assert!(locked.is_rejection());

        let dry = TrialError::from(ActionError::Rng(RngError::Exhausted { drawn: 2 }));
        assert_eq!(dry.severity(), ErrorSeverity::Fatal);
        assert_eq!(dry.error_code(), "RNG_EXHAUSTED");
        assert!(!dry.is_rejection());

        let level = TrialError::InvalidLevel(13);
        assert_eq!(level.severity(), ErrorSeverity::Validation);
        assert_eq!(level.error_code(), "TRIAL_INVALID_LEVEL");
    }
}
