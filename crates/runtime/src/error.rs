//! Error types surfaced by the session API.

use thiserror::Error;
use trial_core::{ErrorSeverity, GameError, TrialError};

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Trial(#[from] TrialError),

    #[error("no trial is in progress")]
    NoActiveTrial,

    #[error("trial {level} is still in progress")]
    TrialInProgress { level: u8 },

    #[error("all stages have been cleared")]
    AllStagesCleared,

    #[error("the player has no hp left to enter a trial")]
    Incapacitated,

    #[error("recorded trial continues past its conclusion at action {index}")]
    ReplayOverrun { index: usize },
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Trial(err) => err.severity(),
            Self::NoActiveTrial | Self::TrialInProgress { .. } => ErrorSeverity::Recoverable,
            Self::AllStagesCleared | Self::Incapacitated => ErrorSeverity::Validation,
            Self::ReplayOverrun { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Trial(err) => err.error_code(),
            Self::NoActiveTrial => "SESSION_NO_ACTIVE_TRIAL",
            Self::TrialInProgress { .. } => "SESSION_TRIAL_IN_PROGRESS",
            Self::AllStagesCleared => "SESSION_ALL_STAGES_CLEARED",
            Self::Incapacitated => "SESSION_INCAPACITATED",
            Self::ReplayOverrun { .. } => "SESSION_REPLAY_OVERRUN",
        }
    }
}
