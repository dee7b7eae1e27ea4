//! Boundary errors raised by the verifier and the submission store.
//!
//! A score that falls outside the tolerance band is not an error: it comes
//! back as a rejected [`crate::Verification`]. These variants cover payloads
//! that cannot be replayed at all.

use game_core::{CrisisError, ErrorSeverity, GameError, StepError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("submission contains no actions")]
    EmptyActions,

    #[error("submission has {count} actions, at most {limit} allowed")]
    TooManyActions { count: usize, limit: usize },

    #[error("unknown season '{0}'")]
    UnknownSeason(String),

    #[error("action #{index} '{action_id}' was not on the sampled menu")]
    OffMenuAction { index: usize, action_id: String },

    #[error("action #{index} rejected during replay: {source}")]
    Replay {
        index: usize,
        #[source]
        source: StepError,
    },

    #[error("crisis resolution rejected during replay: {0}")]
    Crisis(#[from] CrisisError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("submission store lock was poisoned")]
    LockPoisoned,
}

impl ServerError {
    /// Classification of the engine rejection behind a replay failure.
    ///
    /// Payload checks that never reach the engine have no engine severity.
    pub fn engine_severity(&self) -> Option<ErrorSeverity> {
        match self {
            Self::Replay { source, .. } => Some(source.severity()),
            Self::Crisis(err) => Some(err.severity()),
            _ => None,
        }
    }

    /// Stable identifier for logs; engine failures keep the engine's code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyActions => "SUBMISSION_EMPTY",
            Self::TooManyActions { .. } => "SUBMISSION_TOO_LONG",
            Self::UnknownSeason(_) => "SUBMISSION_UNKNOWN_SEASON",
            Self::OffMenuAction { .. } => "SUBMISSION_OFF_MENU",
            Self::Replay { source, .. } => source.error_code(),
            Self::Crisis(err) => err.error_code(),
            Self::Json(_) => "SUBMISSION_MALFORMED",
            Self::Serialization(_) => "SERIALIZATION",
            Self::LockPoisoned => "STORE_LOCK_POISONED",
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
