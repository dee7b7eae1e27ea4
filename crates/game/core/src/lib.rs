//! Deterministic simulation core shared by the interactive client and the
//! replay verifier.
//!
//! `game-core` defines the canonical rules (PRNG, run state, catalog shapes,
//! turn step, crisis resolution, scoring) and exposes pure APIs: every
//! transition takes a [`RunState`] by reference and returns a new value. All
//! state mutation flows through [`engine::GameEngine`]; static content is
//! supplied by an implementation of [`env::ContentOracle`].
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod scoring;
pub mod state;

pub use config::{GameConfig, StartingValues};
pub use engine::{
    CrisisError, CrisisResolution, GameEngine, MarketMove, StepError, StepOutcome, TurnReport,
};
pub use env::{
    ActionCategory, ActionDef, ComboDef, ContentOracle, CrisisDef, CrisisOption, CrisisOutcome,
    EndingDef, EventDef, GameEnv, Prng, SeasonId, SeasonModifiers,
};
pub use error::{ErrorSeverity, GameError};
pub use scoring::{
    ComboHit, EndingChoice, EndingSource, FallbackTier, ScoreBreakdown, ScoreEvaluator,
};
pub use state::{
    CrisisRecord, Hidden, LookupSource, Market, Meter, Meters, ResolvedCrisis, RunState,
    Severity, TerminalReason, TurnRecord,
};
