//! Common error infrastructure for game-core.
//!
//! The engine never panics or throws on player input: rejected calls come
//! back as typed errors next to an unchanged state. This module provides the
//! shared classification used by every such error so that callers (UI,
//! verifier, CLI) can decide how loudly to report them.

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Expected during normal play; the caller can retry with another input.
    ///
    /// Examples: step while a crisis is pending, resolve with no crisis
    Recoverable,

    /// Invalid input that will never succeed unchanged.
    ///
    /// Examples: unknown action id, unknown crisis option
    Validation,

    /// Catalog and state disagree; indicates a content bug.
    ///
    /// Examples: pending crisis id missing from the catalog
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the error variant, for metrics and tests.
    fn error_code(&self) -> &'static str;
}
