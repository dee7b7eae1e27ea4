//! Turn step and crisis resolution.
//!
//! The [`GameEngine`] is the authoritative reducer for [`RunState`]. Every
//! transition takes the current state by reference and hands back a new one,
//! so callers can keep any earlier snapshot for undo, replay or comparison.
//! All randomness flows through the [`Prng`] passed to each call; given the
//! same seed, state and inputs the engine produces the same result on every
//! platform.

mod crisis;
mod drift;
mod errors;
mod menu;
mod select;
mod turns;

pub use crisis::CrisisResolution;
pub use drift::MarketMove;
pub use errors::{CrisisError, StepError};
pub use select::{pick_index, sample_without_replacement, select_index};
pub use turns::{TurnReport, crisis_chance, event_chance, termination_reason};

use crate::env::{ActionDef, GameEnv, Prng, SeasonId};
use crate::state::{LookupSource, RunState, TerminalReason};

/// Outcome of a normal-turn request.
///
/// A rejected request carries the input state unchanged and has consumed no
/// PRNG draws.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    Applied { state: RunState, report: TurnReport },
    Rejected { state: RunState, error: StepError },
}

impl StepOutcome {
    /// The resulting state, whether or not the turn was applied.
    pub fn state(&self) -> &RunState {
        match self {
            StepOutcome::Applied { state, .. } | StepOutcome::Rejected { state, .. } => state,
        }
    }

    pub fn into_state(self) -> RunState {
        match self {
            StepOutcome::Applied { state, .. } | StepOutcome::Rejected { state, .. } => state,
        }
    }

    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            StepOutcome::Applied { report, .. } => Some(report),
            StepOutcome::Rejected { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&StepError> {
        match self {
            StepOutcome::Applied { .. } => None,
            StepOutcome::Rejected { error, .. } => Some(error),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, StepOutcome::Applied { .. })
    }

    /// Converts into a `Result`, dropping the unchanged state on rejection.
    pub fn into_result(self) -> Result<(RunState, TurnReport), StepError> {
        match self {
            StepOutcome::Applied { state, report } => Ok((state, report)),
            StepOutcome::Rejected { error, .. } => Err(error),
        }
    }
}

/// Game engine bound to a content oracle and a configuration.
///
/// The engine holds no run state of its own; it is cheap to copy and can
/// drive any number of runs.
#[derive(Clone, Copy, Debug)]
pub struct GameEngine<'a> {
    env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &GameEnv<'a> {
        &self.env
    }

    /// Creates a fresh run and samples its first menu.
    ///
    /// Consumes one draw per menu pick.
    pub fn initial_state(
        &self,
        display_name: impl Into<String>,
        season: SeasonId,
        rng: &mut Prng,
    ) -> RunState {
        let mut state = RunState::new(display_name, season, self.env.config());
        state.available_action_ids = menu::sample_menu(&self.env, &state, rng);
        state.push_log(format!("Run started: {} ({season})", state.display_name));
        state
    }

    /// Applies one player action.
    ///
    /// Rejects, without consuming draws, when the run is over, a crisis is
    /// pending, or the id names no action in the catalog. An id that exists in
    /// the catalog but not on the current menu is still applied and tagged
    /// [`LookupSource::CatalogFallback`].
    pub fn step(&self, state: &RunState, action_id: &str, rng: &mut Prng) -> StepOutcome {
        if let Err(error) = self.check_step(state) {
            return StepOutcome::Rejected {
                state: state.clone(),
                error,
            };
        }
        let Some(action) = self.env.content().action(action_id) else {
            return StepOutcome::Rejected {
                state: state.clone(),
                error: StepError::UnknownAction {
                    action_id: action_id.to_string(),
                },
            };
        };

        let mut next = state.clone();
        if next.available_action_ids.is_empty() {
            next.available_action_ids = menu::sample_menu(&self.env, &next, rng);
        }
        let lookup = if next.available_action_ids.iter().any(|id| id == action_id) {
            LookupSource::Menu
        } else {
            LookupSource::CatalogFallback
        };

        let report = turns::play_turn(&self.env, &mut next, action, lookup, rng);
        StepOutcome::Applied {
            state: next,
            report,
        }
    }

    /// Resolves the pending crisis with the chosen option.
    ///
    /// Does not advance the turn counter. The returned state is checked for
    /// termination, so an outcome that pushes a meter over the edge ends the
    /// run immediately.
    pub fn resolve_crisis(
        &self,
        state: &RunState,
        option_id: &str,
        rng: &mut Prng,
    ) -> Result<CrisisResolution, CrisisError> {
        crisis::resolve(&self.env, state, option_id, rng)
    }

    /// Catalog entries of the current menu, in menu order.
    pub fn menu(&self, state: &RunState) -> Vec<&'a ActionDef> {
        let content = self.env.content();
        state
            .available_action_ids
            .iter()
            .filter_map(|id| content.action(id))
            .collect()
    }

    fn check_step(&self, state: &RunState) -> Result<(), StepError> {
        if state.terminal {
            return Err(StepError::Terminal {
                reason: state.terminal_reason.unwrap_or(TerminalReason::Completed),
            });
        }
        if let Some(pending) = &state.pending_crisis {
            return Err(StepError::CrisisPending {
                crisis_id: pending.crisis_id.clone(),
            });
        }
        Ok(())
    }
}
