//! Action rejection and parsing errors.

use crate::env::{PillId, RngError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::PillRef;

/// Reasons an action cannot be resolved.
///
/// Every variant except [`ActionError::Rng`] is raised before any random
/// draw is consumed, leaving the trial and the generator untouched.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("no {0} left in the inventory")]
    PillUnavailable(PillRef),

    #[error("pill '{0}' has no effect configuration")]
    UnknownPill(PillId),

    #[error("surge is unavailable while weakened ({weak} stacks)")]
    SurgeLocked { weak: u8 },

    #[error("the trial has already concluded")]
    TrialConcluded,

    #[error(transparent)]
    Rng(#[from] RngError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            PillUnavailable(_) | SurgeLocked { .. } => ErrorSeverity::Recoverable,
            UnknownPill(_) | TrialConcluded => ErrorSeverity::Validation,
            Rng(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            PillUnavailable(_) => "ACTION_PILL_UNAVAILABLE",
            UnknownPill(_) => "ACTION_UNKNOWN_PILL",
            SurgeLocked { .. } => "ACTION_SURGE_LOCKED",
            TrialConcluded => "ACTION_TRIAL_CONCLUDED",
            Rng(err) => err.error_code(),
        }
    }
}

/// Errors parsing a [`TrialAction`](super::TrialAction) from text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    #[error("unknown action '{0}' (expected steady, guard, surge or pill:<id>[:<quality>])")]
    UnknownAction(String),

    #[error("pill action '{0}' is missing a pill id")]
    MissingPillId(String),

    #[error("unknown pill quality '{0}'")]
    UnknownQuality(String),
}
