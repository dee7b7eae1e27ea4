//! The normal-turn pipeline.
//!
//! A turn consumes PRNG draws in a fixed order that every implementation must
//! reproduce: severity, backfire (only for risky actions), price noise,
//! infrastructure noise, crisis gate and pick, event gate and pick, and
//! finally the menu for the next turn.

use crate::config::GameConfig;
use crate::env::{ActionDef, GameEnv, Prng, SeasonModifiers};
use crate::state::{
    CrisisRecord, LookupSource, Meter, RunState, Severity, TerminalReason, TurnRecord,
};

use super::drift::{self, MarketMove};
use super::menu::sample_menu;
use super::select::pick_index;

/// Everything that happened during one applied turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: u32,
    pub action_id: String,
    pub lookup: LookupSource,
    pub die_face: u32,
    pub severity: Severity,
    pub backfired: bool,
    pub market: MarketMove,
    pub crisis_id: Option<String>,
    pub event_id: Option<String>,
    pub terminal_reason: Option<TerminalReason>,
    /// PRNG draws consumed by this turn, including menu resampling.
    pub draws: u64,
}

/// Chance that a crisis fires at the end of a turn.
pub fn crisis_chance(config: &GameConfig, state: &RunState, season: &SeasonModifiers) -> f64 {
    let audit = state.hidden.audit_risk().min(1.0);
    let chance = (config.base_crisis_chance + audit * config.audit_risk_crisis_bonus)
        * season.crisis_factor;
    chance.min(config.max_crisis_chance)
}

/// Chance that an event fires during a turn.
pub fn event_chance(config: &GameConfig, season: &SeasonModifiers) -> f64 {
    (config.base_event_chance * season.event_factor).min(1.0)
}

/// First matching end condition, in priority order.
pub fn termination_reason(state: &RunState) -> Option<TerminalReason> {
    let meters = &state.meters;
    if meters.unrest() >= 100.0 {
        Some(TerminalReason::Revolt)
    } else if meters.oversight() >= 100.0 {
        Some(TerminalReason::Shutdown)
    } else if meters.trust() <= 0.0 {
        Some(TerminalReason::Collapse)
    } else if meters.reserves() <= 0.0 {
        Some(TerminalReason::Insolvency)
    } else if state.turn >= state.max_turns {
        Some(TerminalReason::Completed)
    } else {
        None
    }
}

/// Marks the run terminal when an end condition holds. Idempotent: a run
/// that is already terminal keeps its original reason.
pub(crate) fn settle_termination(state: &mut RunState) -> Option<TerminalReason> {
    if state.terminal {
        return state.terminal_reason;
    }
    let reason = termination_reason(state)?;
    state.terminal = true;
    state.terminal_reason = Some(reason);
    state.push_log(format!("Run ended: {reason}"));
    Some(reason)
}

/// Applies one action to the working copy.
///
/// The caller has already rejected terminal runs, pending crises and ids
/// missing from the catalog, and has sampled the menu if it was empty.
pub(crate) fn play_turn(
    env: &GameEnv<'_>,
    state: &mut RunState,
    action: &ActionDef,
    lookup: LookupSource,
    rng: &mut Prng,
) -> TurnReport {
    let season = env.season(state.season);
    let draws_before = rng.draws();

    state.turn += 1;
    let turn = state.turn;

    // 1. severity-scaled action effect
    let die_face = rng.roll_die(Severity::DIE_SIDES);
    let severity = Severity::from_face(die_face);
    apply_scaled(state, action, severity);

    // 2. backfire
    let backfired = action.risk > 0.0 && rng.chance(action.risk);
    if backfired {
        if let Some(backfire) = action.backfire {
            backfire(state);
        }
    }

    state.used_action_ids.push(action.id.to_string());
    state.push_log(format!("Turn {turn}: [{}] {}", severity.label(), action.name));
    if backfired {
        state.push_log(format!("Turn {turn}: {} backfired", action.name));
    }

    // 3. drift and market
    drift::apply_drift(state, &season);
    let market = drift::apply_market(state, &season, rng);

    // 4. crisis
    let crisis_id = roll_crisis(env, state, &season, rng);

    // 5. event
    let event_id = roll_event(env, state, &season, rng);

    state.history.push(TurnRecord {
        turn,
        action_id: action.id.to_string(),
        category: action.category,
        severity,
        backfired,
        lookup,
        crisis_id: crisis_id.clone(),
        event_id: event_id.clone(),
    });

    // 6. next menu
    state.available_action_ids = sample_menu(env, state, rng);

    // 7. termination
    let terminal_reason = settle_termination(state);

    TurnReport {
        turn,
        action_id: action.id.to_string(),
        lookup,
        die_face,
        severity,
        backfired,
        market,
        crisis_id,
        event_id,
        terminal_reason,
        draws: rng.draws() - draws_before,
    }
}

/// Runs the action effect and rescales every meter delta by the severity
/// multiplier. Hidden modifiers and market scalars are not rescaled.
fn apply_scaled(state: &mut RunState, action: &ActionDef, severity: Severity) {
    let before = state.meters.clone();
    (action.effect)(state);

    let multiplier = severity.multiplier();
    for meter in Meter::ALL {
        let prior = before.get(meter);
        let raw = state.meters.get(meter);
        state.meters.set(meter, prior + (raw - prior) * multiplier);
    }
}

fn roll_crisis(
    env: &GameEnv<'_>,
    state: &mut RunState,
    season: &SeasonModifiers,
    rng: &mut Prng,
) -> Option<String> {
    let config = env.config();
    if state.pending_crisis.is_some() || state.turn <= config.crisis_grace_turns {
        return None;
    }
    if !rng.chance(crisis_chance(config, state, season)) {
        return None;
    }

    let candidates: Vec<_> = env
        .content()
        .crises()
        .iter()
        .map(|crisis| (crisis, crisis.weight_in(state, season)))
        .filter(|(_, weight)| *weight > 0.0)
        .collect();
    let weights: Vec<f64> = candidates.iter().map(|(_, weight)| *weight).collect();
    let (crisis, _) = candidates[pick_index(&weights, rng)?];

    state.pending_crisis = Some(CrisisRecord {
        crisis_id: crisis.id.to_string(),
        turn: state.turn,
    });
    state.push_log(format!("Turn {}: CRISIS - {}", state.turn, crisis.name));
    Some(crisis.id.to_string())
}

fn roll_event(
    env: &GameEnv<'_>,
    state: &mut RunState,
    season: &SeasonModifiers,
    rng: &mut Prng,
) -> Option<String> {
    if !rng.chance(event_chance(env.config(), season)) {
        return None;
    }

    let candidates: Vec<_> = env
        .content()
        .events()
        .iter()
        .map(|event| (event, event.weight_in(state, season)))
        .filter(|(_, weight)| *weight > 0.0)
        .collect();
    let weights: Vec<f64> = candidates.iter().map(|(_, weight)| *weight).collect();
    let (event, _) = candidates[pick_index(&weights, rng)?];

    (event.effect)(state);
    state.push_log(format!("Turn {}: {}", state.turn, event.name));
    Some(event.id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ActionCategory, SeasonId};
    use crate::state::Meters;

    fn fresh() -> RunState {
        RunState::new("turns", SeasonId::Accumulation, &GameConfig::default())
    }

    #[test]
    fn termination_checks_run_in_priority_order() {
        let mut state = fresh();
        assert_eq!(termination_reason(&state), None);

        state.meters.set(Meter::Trust, 0.0);
        state.meters.set(Meter::Oversight, 100.0);
        assert_eq!(termination_reason(&state), Some(TerminalReason::Shutdown));

        state.meters.set(Meter::Unrest, 100.0);
        assert_eq!(termination_reason(&state), Some(TerminalReason::Revolt));
    }

    #[test]
    fn completion_only_after_the_last_turn() {
        let mut state = fresh();
        state.turn = state.max_turns - 1;
        assert_eq!(termination_reason(&state), None);
        state.turn = state.max_turns;
        assert_eq!(termination_reason(&state), Some(TerminalReason::Completed));
    }

    #[test]
    fn failure_outranks_completion() {
        let mut state = fresh();
        state.turn = state.max_turns;
        state.meters.set(Meter::Reserves, 0.0);
        assert_eq!(termination_reason(&state), Some(TerminalReason::Insolvency));
    }

    #[test]
    fn settling_is_idempotent() {
        let mut state = fresh();
        state.meters.set(Meter::Unrest, 100.0);
        assert_eq!(settle_termination(&mut state), Some(TerminalReason::Revolt));
        let log_len = state.log.len();

        state.meters.set(Meter::Unrest, 10.0);
        state.meters.set(Meter::Trust, 0.0);
        assert_eq!(settle_termination(&mut state), Some(TerminalReason::Revolt));
        assert_eq!(state.log.len(), log_len);
    }

    #[test]
    fn crisis_chance_grows_with_audit_risk_and_is_capped() {
        let config = GameConfig::default();
        let mut state = fresh();
        let neutral = SeasonModifiers::NEUTRAL;
        assert!((crisis_chance(&config, &state, &neutral) - 0.10).abs() < 1e-12);

        state.hidden.set_audit_risk(1.0);
        assert!((crisis_chance(&config, &state, &neutral) - 0.35).abs() < 1e-12);

        // Audit risk above 1 does not raise the odds further.
        state.hidden.set_audit_risk(1.8);
        assert!((crisis_chance(&config, &state, &neutral) - 0.35).abs() < 1e-12);

        let hot = SeasonModifiers {
            crisis_factor: 3.0,
            ..SeasonModifiers::NEUTRAL
        };
        assert_eq!(crisis_chance(&config, &state, &hot), config.max_crisis_chance);
    }

    #[test]
    fn event_chance_scales_with_season() {
        let config = GameConfig::default();
        let quiet = SeasonModifiers {
            event_factor: 0.5,
            ..SeasonModifiers::NEUTRAL
        };
        assert!((event_chance(&config, &quiet) - 0.175).abs() < 1e-12);
        let loud = SeasonModifiers {
            event_factor: 10.0,
            ..SeasonModifiers::NEUTRAL
        };
        assert_eq!(event_chance(&config, &loud), 1.0);
    }

    fn surge(state: &mut RunState) {
        state.meters.adjust(Meter::Reserves, 1_000.0);
        state.meters.adjust(Meter::Legacy, 200.0);
        state.meters.adjust(Meter::Unrest, 20.0);
        state.meters.adjust(Meter::Oversight, -10.0);
        state.meters.adjust(Meter::Trust, 4.0);
    }

    fn flat(_: &RunState, _: &SeasonModifiers) -> f64 {
        1.0
    }

    #[test]
    fn critical_hits_scale_every_meter_delta() {
        let action = ActionDef {
            id: "surge",
            name: "Surge",
            category: ActionCategory::Development,
            applies: None,
            weight: flat,
            effect: surge,
            risk: 0.0,
            backfire: None,
        };
        let mut state = fresh();
        state.meters.set(Meter::Reserves, 10_000.0);
        state.meters.set(Meter::Legacy, 0.0);
        state.meters.set(Meter::Unrest, 90.0);
        state.meters.set(Meter::Oversight, 50.0);
        state.meters.set(Meter::Trust, 40.0);
        state.meters.set(Meter::Momentum, 30.0);

        apply_scaled(&mut state, &action, Severity::Critical);

        let close = |meter: Meter, expected: f64| {
            let actual = state.meters.get(meter);
            assert!((actual - expected).abs() < 1e-9, "{meter:?}: {actual} != {expected}");
        };
        close(Meter::Reserves, 10_000.0 + 1_000.0 * 1.35);
        close(Meter::Legacy, 200.0 * 1.35);
        // 90 + 10 * 1.35 overshoots the percent ceiling.
        close(Meter::Unrest, Meters::PERCENT_MAX);
        close(Meter::Oversight, 50.0 - 10.0 * 1.35);
        close(Meter::Trust, 40.0 + 4.0 * 1.35);
        close(Meter::Momentum, 30.0);
    }
}
