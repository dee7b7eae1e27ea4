//! Crisis resolution.

use crate::env::{GameEnv, Prng};
use crate::state::{ResolvedCrisis, RunState, TerminalReason};

use super::errors::CrisisError;
use super::turns::settle_termination;

/// Result of resolving a pending crisis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrisisResolution {
    pub crisis_id: String,
    pub option_id: String,
    pub narrative: String,
    /// Set when the outcome itself ended the run.
    pub terminal_reason: Option<TerminalReason>,
    pub state: RunState,
}

pub(crate) fn resolve(
    env: &GameEnv<'_>,
    state: &RunState,
    option_id: &str,
    rng: &mut Prng,
) -> Result<CrisisResolution, CrisisError> {
    if state.terminal {
        return Err(CrisisError::Terminal {
            reason: state.terminal_reason.unwrap_or(TerminalReason::Completed),
        });
    }
    let pending = state
        .pending_crisis
        .as_ref()
        .ok_or(CrisisError::NoPendingCrisis)?;
    let crisis = env
        .content()
        .crisis(&pending.crisis_id)
        .ok_or_else(|| CrisisError::UnknownCrisis {
            crisis_id: pending.crisis_id.clone(),
        })?;
    let option = crisis
        .option(option_id)
        .ok_or_else(|| CrisisError::UnknownOption {
            crisis_id: crisis.id.to_string(),
            option_id: option_id.to_string(),
        })?;

    let mut next = state.clone();
    let outcome = (option.resolve)(&next, rng);
    (outcome.apply)(&mut next);

    next.pending_crisis = None;
    next.resolved_crises.push(ResolvedCrisis {
        crisis_id: crisis.id.to_string(),
        option_id: option.id.to_string(),
        turn: pending.turn,
    });
    next.push_log(format!(
        "Crisis resolved ({}): {}",
        crisis.name, outcome.narrative
    ));
    let terminal_reason = settle_termination(&mut next);

    Ok(CrisisResolution {
        crisis_id: crisis.id.to_string(),
        option_id: option.id.to_string(),
        narrative: outcome.narrative,
        terminal_reason,
        state: next,
    })
}
