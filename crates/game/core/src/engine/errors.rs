//! Rejections surfaced by the turn step and the crisis sub-machine.

use crate::error::{ErrorSeverity, GameError};
use crate::state::TerminalReason;

/// Why a normal turn was not applied. The state is returned unchanged and no
/// PRNG draw is consumed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepError {
    #[error("run already ended ({reason})")]
    Terminal { reason: TerminalReason },

    #[error("crisis '{crisis_id}' must be resolved before the next turn")]
    CrisisPending { crisis_id: String },

    #[error("unknown action '{action_id}'")]
    UnknownAction { action_id: String },
}

impl GameError for StepError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Terminal { .. } | Self::CrisisPending { .. } => ErrorSeverity::Recoverable,
            Self::UnknownAction { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Terminal { .. } => "STEP_TERMINAL",
            Self::CrisisPending { .. } => "STEP_CRISIS_PENDING",
            Self::UnknownAction { .. } => "STEP_UNKNOWN_ACTION",
        }
    }
}

/// Why a crisis resolution was not applied. The state is never mutated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrisisError {
    #[error("run already ended ({reason})")]
    Terminal { reason: TerminalReason },

    #[error("no crisis is pending")]
    NoPendingCrisis,

    #[error("crisis '{crisis_id}' has no option '{option_id}'")]
    UnknownOption {
        crisis_id: String,
        option_id: String,
    },

    #[error("pending crisis '{crisis_id}' is not in the catalog")]
    UnknownCrisis { crisis_id: String },
}

impl GameError for CrisisError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Terminal { .. } | Self::NoPendingCrisis => ErrorSeverity::Recoverable,
            Self::UnknownOption { .. } => ErrorSeverity::Validation,
            Self::UnknownCrisis { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Terminal { .. } => "CRISIS_TERMINAL",
            Self::NoPendingCrisis => "CRISIS_NONE_PENDING",
            Self::UnknownOption { .. } => "CRISIS_UNKNOWN_OPTION",
            Self::UnknownCrisis { .. } => "CRISIS_NOT_IN_CATALOG",
        }
    }
}
