//! Structured per-turn records.
//!
//! Scoring combos and ending predicates consume these typed tags instead of
//! pattern-matching the human-readable log, so narrative copy can change
//! without touching game logic.

use crate::env::ActionCategory;

/// Outcome of the six-sided severity roll made for every applied action.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Severity {
    /// Faces 1-2.
    Glancing,
    /// Faces 3-5.
    Normal,
    /// Face 6.
    Critical,
}

impl Severity {
    pub const DIE_SIDES: u32 = 6;

    /// Maps a die face (1..=6) onto a severity band.
    pub const fn from_face(face: u32) -> Self {
        match face {
            6.. => Severity::Critical,
            0..=2 => Severity::Glancing,
            _ => Severity::Normal,
        }
    }

    /// Multiplier applied to every meter delta of the action.
    pub const fn multiplier(self) -> f64 {
        match self {
            Severity::Glancing => 0.7,
            Severity::Normal => 1.0,
            Severity::Critical => 1.35,
        }
    }

    /// Upper-case tag used in log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Glancing => "GLANCING",
            Severity::Normal => "NORMAL",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// How the engine found the chosen action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LookupSource {
    /// The id was on the current menu.
    Menu,
    /// The id was not on the menu but exists in the catalog.
    CatalogFallback,
}

/// Why a run ended.
///
/// Declaration order mirrors the termination check: the first matching
/// condition wins.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TerminalReason {
    /// Unrest reached 100.
    Revolt,
    /// Oversight reached 100.
    Shutdown,
    /// Trust fell to 0.
    Collapse,
    /// Reserves ran out.
    Insolvency,
    /// The run survived every turn.
    Completed,
}

impl TerminalReason {
    pub const fn is_failure(self) -> bool {
        !matches!(self, TerminalReason::Completed)
    }
}

/// Typed tags of one applied turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRecord {
    pub turn: u32,
    pub action_id: String,
    pub category: ActionCategory,
    pub severity: Severity,
    pub backfired: bool,
    pub lookup: LookupSource,
    /// Crisis rolled at the end of this turn, if any.
    pub crisis_id: Option<String>,
    /// Event fired during this turn, if any.
    pub event_id: Option<String>,
}

/// A crisis that has been rolled but not yet resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrisisRecord {
    pub crisis_id: String,
    /// Turn on which the crisis fired.
    pub turn: u32,
}

/// A crisis together with the option that resolved it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedCrisis {
    pub crisis_id: String,
    pub option_id: String,
    pub turn: u32,
}
