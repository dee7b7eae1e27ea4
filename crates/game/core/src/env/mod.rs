//! Read-only inputs of the simulation.
//!
//! The content oracle exposes the static catalogs (actions, events, crises,
//! endings, combos) and the season table. The [`GameEnv`] aggregate bundles the
//! oracle with the run configuration so the engine can reach everything it
//! needs without hard coupling to a concrete content crate.
mod catalog;
mod rng;
mod season;

pub use catalog::{
    ActionCategory, ActionDef, ComboDef, CrisisDef, CrisisOption, CrisisOutcome, Effect,
    EndingDef, EventDef, Predicate, ResolveFn, WeightFn, sanitize_weight,
};
pub use rng::{Prng, unit_draw};
pub use season::{SeasonId, SeasonModifiers};

use crate::config::GameConfig;

/// Static catalogs consumed by the engine and the scoring evaluator.
///
/// Catalog order is significant: weighted selection walks entries in the
/// order returned here, so two implementations only agree on outcomes when
/// they expose identical orderings.
pub trait ContentOracle: Send + Sync {
    fn actions(&self) -> &[ActionDef];

    fn events(&self) -> &[EventDef];

    fn crises(&self) -> &[CrisisDef];

    fn endings(&self) -> &[EndingDef];

    fn combos(&self) -> &[ComboDef];

    /// Modifier table of a season.
    fn season(&self, id: SeasonId) -> SeasonModifiers;

    /// Looks up an action anywhere in the catalog.
    fn action(&self, id: &str) -> Option<&ActionDef> {
        self.actions().iter().find(|action| action.id == id)
    }

    fn crisis(&self, id: &str) -> Option<&CrisisDef> {
        self.crises().iter().find(|crisis| crisis.id == id)
    }

    fn ending(&self, id: &str) -> Option<&EndingDef> {
        self.endings().iter().find(|ending| ending.id == id)
    }
}

/// Aggregates the content oracle and run configuration.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    content: &'a dyn ContentOracle,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(content: &'a dyn ContentOracle, config: &'a GameConfig) -> Self {
        Self { content, config }
    }

    pub fn content(&self) -> &'a dyn ContentOracle {
        self.content
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Modifiers of the given season.
    pub fn season(&self, id: SeasonId) -> SeasonModifiers {
        self.content.season(id)
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("actions", &self.content.actions().len())
            .field("events", &self.content.events().len())
            .field("crises", &self.content.crises().len())
            .field("endings", &self.content.endings().len())
            .field("config", self.config)
            .finish()
    }
}
