//! Authoritative run state representation.
//!
//! This module owns the data structures that describe one run: meters,
//! market scalars, hidden modifiers, menu and history bookkeeping, and the
//! crisis and termination flags. Callers clone or query this state but
//! advance it exclusively through [`crate::engine::GameEngine`], which hands
//! back a new value per transition.
mod meters;
mod turn;

pub use meters::{Hidden, Market, Meter, Meters};
pub use turn::{
    CrisisRecord, LookupSource, ResolvedCrisis, Severity, TerminalReason, TurnRecord,
};

use crate::config::GameConfig;
use crate::env::{ActionCategory, SeasonId};

/// Canonical snapshot of one run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunState {
    pub display_name: String,
    pub season: SeasonId,

    /// Completed turns.
    pub turn: u32,
    /// Constant per run.
    pub max_turns: u32,

    pub meters: Meters,
    pub market: Market,
    pub hidden: Hidden,

    /// Menu sampled for the current turn only.
    pub available_action_ids: Vec<String>,
    /// Every applied action, oldest first. Append-only.
    pub used_action_ids: Vec<String>,
    /// Human-readable trace, most recent first. Cosmetic only.
    pub log: Vec<String>,
    /// Typed tags of every applied turn, oldest first.
    pub history: Vec<TurnRecord>,
    /// Crises resolved so far, oldest first.
    pub resolved_crises: Vec<ResolvedCrisis>,

    /// Set while a rolled crisis awaits resolution; blocks normal turns.
    pub pending_crisis: Option<CrisisRecord>,

    /// Once set, the state is frozen.
    pub terminal: bool,
    pub terminal_reason: Option<TerminalReason>,
}

impl RunState {
    /// Creates a fresh run from the configured starting values.
    ///
    /// The menu is left empty; [`crate::engine::GameEngine::initial_state`]
    /// samples it from the run PRNG.
    pub fn new(display_name: impl Into<String>, season: SeasonId, config: &GameConfig) -> Self {
        let start = &config.starting;
        Self {
            display_name: display_name.into(),
            season,
            turn: 0,
            max_turns: config.max_turns,
            meters: Meters::new(
                start.reserves,
                start.legacy,
                start.unrest,
                start.oversight,
                start.trust,
                start.momentum,
            ),
            market: Market::new(start.price, start.infrastructure_value),
            hidden: Hidden::new(
                start.audit_risk,
                start.founder_stability,
                start.community_memory,
            ),
            available_action_ids: Vec::new(),
            used_action_ids: Vec::new(),
            log: Vec::new(),
            history: Vec::new(),
            resolved_crises: Vec::new(),
            pending_crisis: None,
            terminal: false,
            terminal_reason: None,
        }
    }

    /// Prepends a line to the log (most recent first).
    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.insert(0, line.into());
    }

    /// True when the run survived every turn.
    pub fn completed(&self) -> bool {
        self.terminal_reason == Some(TerminalReason::Completed)
    }

    pub fn has_pending_crisis(&self) -> bool {
        self.pending_crisis.is_some()
    }

    /// Number of applied turns in the given category.
    pub fn category_count(&self, category: ActionCategory) -> usize {
        self.history
            .iter()
            .filter(|record| record.category == category)
            .count()
    }

    /// Number of times an action id was played.
    pub fn action_count(&self, action_id: &str) -> usize {
        self.used_action_ids
            .iter()
            .filter(|id| id.as_str() == action_id)
            .count()
    }

    pub fn backfire_count(&self) -> usize {
        self.history.iter().filter(|record| record.backfired).count()
    }

    pub fn severity_count(&self, severity: Severity) -> usize {
        self.history
            .iter()
            .filter(|record| record.severity == severity)
            .count()
    }

    /// Longest run of consecutive turns in the given category.
    pub fn longest_category_streak(&self, category: ActionCategory) -> usize {
        let mut best = 0;
        let mut current = 0;
        for record in &self.history {
            if record.category == category {
                current += 1;
                best = best.max(current);
            } else {
                current = 0;
            }
        }
        best
    }

    /// Category of the most recent applied turn.
    pub fn last_category(&self) -> Option<ActionCategory> {
        self.history.last().map(|record| record.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(turn: u32, category: ActionCategory, backfired: bool) -> TurnRecord {
        TurnRecord {
            turn,
            action_id: format!("action_{turn}"),
            category,
            severity: Severity::Normal,
            backfired,
            lookup: LookupSource::Menu,
            crisis_id: None,
            event_id: None,
        }
    }

    #[test]
    fn new_run_uses_starting_values() {
        let state = RunState::new("tester", SeasonId::Bull, &GameConfig::default());
        assert_eq!(state.meters.reserves(), 1_000_000_000.0);
        assert_eq!(state.meters.unrest(), 20.0);
        assert_eq!(state.meters.oversight(), 10.0);
        assert_eq!(state.meters.trust(), 60.0);
        assert_eq!(state.meters.momentum(), 40.0);
        assert_eq!(state.max_turns, GameConfig::DEFAULT_MAX_TURNS);
        assert!(state.available_action_ids.is_empty());
        assert!(!state.terminal);
    }

    #[test]
    fn log_is_most_recent_first() {
        let mut state = RunState::new("tester", SeasonId::default(), &GameConfig::default());
        state.push_log("first");
        state.push_log("second");
        assert_eq!(state.log, vec!["second".to_string(), "first".to_string()]);
    }

    #[test]
    fn streaks_reset_on_other_categories() {
        let mut state = RunState::new("tester", SeasonId::default(), &GameConfig::default());
        state.history = vec![
            record(1, ActionCategory::Extraction, false),
            record(2, ActionCategory::Extraction, true),
            record(3, ActionCategory::Compliance, false),
            record(4, ActionCategory::Extraction, false),
        ];
        assert_eq!(state.longest_category_streak(ActionCategory::Extraction), 2);
        assert_eq!(state.category_count(ActionCategory::Extraction), 3);
        assert_eq!(state.backfire_count(), 1);
        assert_eq!(state.last_category(), Some(ActionCategory::Extraction));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_uses_snake_case_tags() {
        let mut state = RunState::new("tester", SeasonId::default(), &GameConfig::default());
        state.terminal = true;
        state.terminal_reason = Some(TerminalReason::Insolvency);
        state.history.push(record(1, ActionCategory::Community, false));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["terminal_reason"], "insolvency");
        assert_eq!(json["history"][0]["category"], "community");
        assert_eq!(json["history"][0]["severity"], "normal");

        let back: RunState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
