//! Catalog entry shapes for actions, events, crises, endings and combos.
//!
//! Entries are polymorphic only through their function pointers: an id plus
//! an applicability predicate, a weight function and an effect. There is no
//! type hierarchy; content crates build static tables of these records.
//!
//! Effects receive a working copy of the run owned by the engine. The input
//! state handed to [`crate::engine::GameEngine`] is never touched, so effects
//! are observably pure.

use crate::env::{Prng, SeasonModifiers};
use crate::state::RunState;

/// Mutates the engine's private working copy of a run.
pub type Effect = fn(&mut RunState);

/// Selection weight of an entry given the current run and season.
pub type WeightFn = fn(&RunState, &SeasonModifiers) -> f64;

/// Pure predicate over a run.
pub type Predicate = fn(&RunState) -> bool;

/// Resolves a crisis option, drawing from the run PRNG as the option needs.
pub type ResolveFn = fn(&RunState, &mut Prng) -> CrisisOutcome;

/// Menu category of an action.
///
/// Menu sampling is stratified by category: the largest category contributes
/// the primary pick count, every other category the secondary count.
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
pub enum ActionCategory {
    Extraction,
    Development,
    Promotion,
    Compliance,
    Community,
}

impl ActionCategory {
    /// Canonical bucket order used by menu sampling.
    pub const ALL: [ActionCategory; 5] = [
        ActionCategory::Extraction,
        ActionCategory::Development,
        ActionCategory::Promotion,
        ActionCategory::Compliance,
        ActionCategory::Community,
    ];
}

/// Normalizes a raw weight: negative and NaN weights count as zero.
#[inline]
pub fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_nan() || weight <= 0.0 { 0.0 } else { weight }
}

/// A player action.
#[derive(Clone, Copy, Debug)]
pub struct ActionDef {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ActionCategory,
    /// Defaults to always applicable when `None`.
    pub applies: Option<Predicate>,
    pub weight: WeightFn,
    pub effect: Effect,
    /// Probability that the action backfires after it resolved. Zero means
    /// the backfire roll is skipped entirely and consumes no draw.
    pub risk: f64,
    pub backfire: Option<Effect>,
}

impl ActionDef {
    pub fn is_applicable(&self, state: &RunState) -> bool {
        self.applies.is_none_or(|applies| applies(state))
    }

    /// Menu weight, zero when the action does not apply.
    pub fn weight_in(&self, state: &RunState, season: &SeasonModifiers) -> f64 {
        if !self.is_applicable(state) {
            return 0.0;
        }
        sanitize_weight((self.weight)(state, season))
    }
}

/// A narrative event; at most one fires per turn.
#[derive(Clone, Copy, Debug)]
pub struct EventDef {
    pub id: &'static str,
    pub name: &'static str,
    pub applies: Option<Predicate>,
    pub weight: WeightFn,
    pub effect: Effect,
}

impl EventDef {
    pub fn weight_in(&self, state: &RunState, season: &SeasonModifiers) -> f64 {
        if !self.applies.is_none_or(|applies| applies(state)) {
            return 0.0;
        }
        sanitize_weight((self.weight)(state, season))
    }
}

/// What a resolved crisis option did.
#[derive(Clone, Debug)]
pub struct CrisisOutcome {
    pub narrative: String,
    pub apply: Effect,
}

impl CrisisOutcome {
    pub fn new(narrative: impl Into<String>, apply: Effect) -> Self {
        Self {
            narrative: narrative.into(),
            apply,
        }
    }
}

/// One way out of a crisis.
#[derive(Clone, Copy, Debug)]
pub struct CrisisOption {
    pub id: &'static str,
    pub label: &'static str,
    pub resolve: ResolveFn,
}

/// A blocking multi-option branch.
#[derive(Clone, Copy, Debug)]
pub struct CrisisDef {
    pub id: &'static str,
    pub name: &'static str,
    pub applies: Option<Predicate>,
    pub weight: WeightFn,
    /// Three to five options; the first one is the default resolution used
    /// when a replay carries no explicit choice.
    pub options: &'static [CrisisOption],
}

impl CrisisDef {
    pub fn weight_in(&self, state: &RunState, season: &SeasonModifiers) -> f64 {
        if !self.applies.is_none_or(|applies| applies(state)) {
            return 0.0;
        }
        sanitize_weight((self.weight)(state, season))
    }

    pub fn option(&self, option_id: &str) -> Option<&CrisisOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    pub fn default_option(&self) -> Option<&CrisisOption> {
        self.options.first()
    }
}

/// A scripted ending, evaluated once the run is terminal.
#[derive(Clone, Copy, Debug)]
pub struct EndingDef {
    pub id: &'static str,
    pub title: &'static str,
    /// Static tie-break weight among several matching endings.
    pub weight: f64,
    pub multiplier: f64,
    pub matches: Predicate,
}

/// A post-run scoring multiplier triggered by a pattern in the run history.
#[derive(Clone, Copy, Debug)]
pub struct ComboDef {
    pub id: &'static str,
    pub name: &'static str,
    pub multiplier: f64,
    pub matches: Predicate,
}
