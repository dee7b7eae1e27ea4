//! Post-run scoring and ending selection.
//!
//! Everything here is a pure function of a (normally terminal) [`RunState`].
//! The only randomness is the ending tie-break, which draws from a flavor RNG
//! injected by the caller and never from the run PRNG, so the simulation
//! stream stays reproducible from the seed alone.

use rand::RngCore;

use crate::engine::select_index;
use crate::env::{ComboDef, EndingDef, GameEnv, unit_draw};
use crate::state::RunState;

/// Default ending used when no scripted ending matches.
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
#[strum(serialize_all = "snake_case")]
pub enum FallbackTier {
    /// Survived every turn with legacy at or above the success threshold.
    Success,
    /// Survived every turn.
    Neutral,
    /// Ended early.
    Failure,
}

impl FallbackTier {
    pub const fn title(self) -> &'static str {
        match self {
            FallbackTier::Success => "A Quiet Fortune",
            FallbackTier::Neutral => "Still Standing",
            FallbackTier::Failure => "Lights Out",
        }
    }

    pub fn for_state(state: &RunState, success_threshold: f64) -> Self {
        if !state.completed() {
            FallbackTier::Failure
        } else if state.meters.legacy() >= success_threshold {
            FallbackTier::Success
        } else {
            FallbackTier::Neutral
        }
    }
}

/// Where a chosen ending came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EndingSource {
    Scripted,
    Fallback(FallbackTier),
}

/// The ending a run resolved to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndingChoice {
    pub id: String,
    pub title: String,
    pub multiplier: f64,
    pub source: EndingSource,
}

impl EndingChoice {
    fn scripted(def: &EndingDef) -> Self {
        Self {
            id: def.id.to_string(),
            title: def.title.to_string(),
            multiplier: def.multiplier,
            source: EndingSource::Scripted,
        }
    }

    fn fallback(tier: FallbackTier) -> Self {
        Self {
            id: tier.to_string(),
            title: tier.title().to_string(),
            multiplier: 1.0,
            source: EndingSource::Fallback(tier),
        }
    }
}

/// A combo that matched the run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboHit {
    pub id: String,
    pub name: String,
    pub multiplier: f64,
}

impl From<&ComboDef> for ComboHit {
    fn from(def: &ComboDef) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            multiplier: def.multiplier,
        }
    }
}

/// Full derivation of a final score.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    /// Legacy at the end of the run.
    pub base: f64,
    pub combos: Vec<ComboHit>,
    /// Product of every combo multiplier (1.0 when none matched).
    pub combo_multiplier: f64,
    pub survival_multiplier: f64,
    pub ending: EndingChoice,
    pub score: u64,
}

impl ScoreBreakdown {
    pub fn total_multiplier(&self) -> f64 {
        self.combo_multiplier * self.survival_multiplier * self.ending.multiplier
    }
}

/// Evaluates finished runs against the content oracle.
#[derive(Clone, Copy, Debug)]
pub struct ScoreEvaluator<'a> {
    env: GameEnv<'a>,
}

impl<'a> ScoreEvaluator<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    /// Every combo whose pattern matches, in catalog order.
    pub fn matching_combos(&self, state: &RunState) -> Vec<&'a ComboDef> {
        self.env
            .content()
            .combos()
            .iter()
            .filter(|combo| (combo.matches)(state))
            .collect()
    }

    /// Survival bonus when the run reached the last turn, 1.0 otherwise.
    pub fn survival_multiplier(&self, state: &RunState) -> f64 {
        if state.completed() {
            self.env.config().survival_bonus
        } else {
            1.0
        }
    }

    /// Every scripted ending whose predicate holds, in catalog order.
    pub fn matching_endings(&self, state: &RunState) -> Vec<&'a EndingDef> {
        self.env
            .content()
            .endings()
            .iter()
            .filter(|ending| (ending.matches)(state))
            .collect()
    }

    pub fn fallback_tier(&self, state: &RunState) -> FallbackTier {
        FallbackTier::for_state(state, self.env.config().success_legacy_threshold)
    }

    /// Picks the ending, breaking ties among matches with one flavor draw
    /// weighted by each ending's static weight.
    pub fn select_ending<R: RngCore + ?Sized>(
        &self,
        state: &RunState,
        flavor: &mut R,
    ) -> EndingChoice {
        let matches = self.matching_endings(state);
        match matches.as_slice() {
            [] => EndingChoice::fallback(self.fallback_tier(state)),
            [only] => EndingChoice::scripted(only),
            several => {
                let weights: Vec<f64> = several.iter().map(|ending| ending.weight).collect();
                let index = select_index(&weights, unit_draw(flavor)).unwrap_or(0);
                EndingChoice::scripted(several[index])
            }
        }
    }

    /// Deterministic choice: the matching ending with the highest weight
    /// (earliest on ties), or the fallback tier.
    pub fn heaviest_ending(&self, state: &RunState) -> EndingChoice {
        let mut best: Option<&EndingDef> = None;
        for ending in self.matching_endings(state) {
            if best.is_none_or(|current| ending.weight > current.weight) {
                best = Some(ending);
            }
        }
        match best {
            Some(ending) => EndingChoice::scripted(ending),
            None => EndingChoice::fallback(self.fallback_tier(state)),
        }
    }

    /// Resolves a claimed ending id if it is consistent with the state: one of
    /// the matching scripted endings, or the fallback tier when none match.
    pub fn claimed_ending(&self, state: &RunState, ending_id: &str) -> Option<EndingChoice> {
        let matches = self.matching_endings(state);
        if matches.is_empty() {
            let tier = self.fallback_tier(state);
            return (tier.as_ref() == ending_id).then(|| EndingChoice::fallback(tier));
        }
        self.env
            .content()
            .ending(ending_id)
            .filter(|ending| (ending.matches)(state))
            .map(EndingChoice::scripted)
    }

    /// Scores the run with an already chosen ending.
    pub fn score_with(&self, state: &RunState, ending: EndingChoice) -> ScoreBreakdown {
        let combos: Vec<ComboHit> = self
            .matching_combos(state)
            .into_iter()
            .map(ComboHit::from)
            .collect();
        let combo_multiplier = combos.iter().map(|combo| combo.multiplier).product();
        let survival_multiplier = self.survival_multiplier(state);
        let base = state.meters.legacy();
        let score = final_score(
            base,
            combo_multiplier * survival_multiplier * ending.multiplier,
        );

        ScoreBreakdown {
            base,
            combos,
            combo_multiplier,
            survival_multiplier,
            ending,
            score,
        }
    }

    /// Selects an ending with the flavor RNG and scores the run.
    pub fn evaluate<R: RngCore + ?Sized>(&self, state: &RunState, flavor: &mut R) -> ScoreBreakdown {
        let ending = self.select_ending(state, flavor);
        self.score_with(state, ending)
    }
}

/// `round(base × multiplier)`, saturating at zero.
pub fn final_score(base: f64, multiplier: f64) -> u64 {
    let raw = (base * multiplier).round();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        raw as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{
        ActionDef, ContentOracle, CrisisDef, EventDef, Prng, SeasonId, SeasonModifiers,
    };
    use crate::state::{Meter, TerminalReason};

    fn rich(state: &RunState) -> bool {
        state.meters.legacy() >= 100.0
    }

    fn calm(state: &RunState) -> bool {
        state.meters.unrest() < 50.0
    }

    fn never(_: &RunState) -> bool {
        false
    }

    fn always(_: &RunState) -> bool {
        true
    }

    static ENDINGS: [EndingDef; 3] = [
        EndingDef {
            id: "tycoon",
            title: "Tycoon",
            weight: 1.0,
            multiplier: 1.5,
            matches: rich,
        },
        EndingDef {
            id: "peacekeeper",
            title: "Peacekeeper",
            weight: 3.0,
            multiplier: 1.1,
            matches: calm,
        },
        EndingDef {
            id: "ghost",
            title: "Ghost",
            weight: 10.0,
            multiplier: 9.0,
            matches: never,
        },
    ];

    static COMBOS: [ComboDef; 2] = [
        ComboDef {
            id: "double",
            name: "Double",
            multiplier: 2.0,
            matches: always,
        },
        ComboDef {
            id: "half_more",
            name: "Half more",
            multiplier: 1.5,
            matches: always,
        },
    ];

    struct Fixture;

    impl ContentOracle for Fixture {
        fn actions(&self) -> &[ActionDef] {
            &[]
        }
        fn events(&self) -> &[EventDef] {
            &[]
        }
        fn crises(&self) -> &[CrisisDef] {
            &[]
        }
        fn endings(&self) -> &[EndingDef] {
            &ENDINGS
        }
        fn combos(&self) -> &[ComboDef] {
            &COMBOS
        }
        fn season(&self, _: SeasonId) -> SeasonModifiers {
            SeasonModifiers::NEUTRAL
        }
    }

    fn finished(legacy: f64, unrest: f64, reason: TerminalReason) -> RunState {
        let mut state = RunState::new("score", SeasonId::default(), &GameConfig::default());
        state.meters.set(Meter::Legacy, legacy);
        state.meters.set(Meter::Unrest, unrest);
        state.terminal = true;
        state.terminal_reason = Some(reason);
        state
    }

    #[test]
    fn multipliers_stack_multiplicatively() {
        let config = GameConfig::default();
        let env = GameEnv::new(&Fixture, &config);
        let scorer = ScoreEvaluator::new(env);

        // Only "tycoon" matches (unrest too high for peacekeeper).
        let state = finished(1_000.0, 80.0, TerminalReason::Completed);
        let breakdown = scorer.evaluate(&state, &mut Prng::new(0));
        assert_eq!(breakdown.ending.id, "tycoon");
        assert_eq!(breakdown.combo_multiplier, 3.0);
        assert_eq!(breakdown.survival_multiplier, 1.25);
        // 1000 * 3.0 * 1.25 * 1.5
        assert_eq!(breakdown.score, 5_625);
    }

    #[test]
    fn no_survival_bonus_for_early_exit() {
        let config = GameConfig::default();
        let scorer = ScoreEvaluator::new(GameEnv::new(&Fixture, &config));
        let state = finished(10.0, 100.0, TerminalReason::Revolt);
        assert_eq!(scorer.survival_multiplier(&state), 1.0);
        let breakdown = scorer.evaluate(&state, &mut Prng::new(0));
        assert_eq!(breakdown.ending.source, EndingSource::Fallback(FallbackTier::Failure));
        assert_eq!(breakdown.score, 30);
    }

    #[test]
    fn fallback_tiers_cover_every_unmatched_state() {
        let config = GameConfig::default();
        let scorer = ScoreEvaluator::new(GameEnv::new(&Fixture, &config));
        let threshold = config.success_legacy_threshold;

        // legacy below 100 and unrest >= 50: nothing scripted matches.
        let neutral = finished(50.0, 90.0, TerminalReason::Completed);
        assert_eq!(scorer.heaviest_ending(&neutral).id, "neutral");

        let failed = finished(50.0, 90.0, TerminalReason::Collapse);
        assert_eq!(scorer.heaviest_ending(&failed).id, "failure");

        let wealthy = finished(threshold, 90.0, TerminalReason::Completed);
        assert_eq!(
            FallbackTier::for_state(&wealthy, threshold),
            FallbackTier::Success
        );
    }

    #[test]
    fn heaviest_ending_prefers_weight() {
        let config = GameConfig::default();
        let scorer = ScoreEvaluator::new(GameEnv::new(&Fixture, &config));
        let state = finished(1_000.0, 10.0, TerminalReason::Completed);
        assert_eq!(scorer.matching_endings(&state).len(), 2);
        assert_eq!(scorer.heaviest_ending(&state).id, "peacekeeper");
    }

    #[test]
    fn flavor_draw_breaks_ties_by_weight() {
        let config = GameConfig::default();
        let scorer = ScoreEvaluator::new(GameEnv::new(&Fixture, &config));
        let state = finished(1_000.0, 10.0, TerminalReason::Completed);

        // Weights 1 and 3: a draw below 0.25 picks tycoon.
        let mut seen = std::collections::HashSet::new();
        for seed in 0..64 {
            let choice = scorer.select_ending(&state, &mut Prng::new(seed));
            seen.insert(choice.id);
        }
        assert!(seen.contains("tycoon"));
        assert!(seen.contains("peacekeeper"));
        assert!(!seen.contains("ghost"));
    }

    #[test]
    fn claimed_endings_must_be_consistent() {
        let config = GameConfig::default();
        let scorer = ScoreEvaluator::new(GameEnv::new(&Fixture, &config));
        let state = finished(1_000.0, 10.0, TerminalReason::Completed);
        assert!(scorer.claimed_ending(&state, "tycoon").is_some());
        assert!(scorer.claimed_ending(&state, "ghost").is_none());
        assert!(scorer.claimed_ending(&state, "neutral").is_none());

        let plain = finished(5.0, 90.0, TerminalReason::Completed);
        assert!(scorer.claimed_ending(&plain, "neutral").is_some());
    }

    #[test]
    fn final_score_rounds_and_saturates() {
        assert_eq!(final_score(10.4, 1.0), 10);
        assert_eq!(final_score(10.5, 1.0), 11);
        assert_eq!(final_score(-3.0, 2.0), 0);
    }
}
