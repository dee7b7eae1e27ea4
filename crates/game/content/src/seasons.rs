//! Built-in season table.
//!
//! `data/seasons.ron` mirrors these values; the `loaders` feature can read an
//! edited copy to override them.

use game_core::{SeasonId, SeasonModifiers};

pub const ACCUMULATION: SeasonModifiers = SeasonModifiers::NEUTRAL;

pub const BULL: SeasonModifiers = SeasonModifiers {
    unrest_drift: -0.2,
    oversight_drift: 0.0,
    trust_drift: 0.3,
    momentum_drift: 1.0,
    sentiment_bias: 0.01,
    volatility: 1.2,
    crisis_factor: 0.9,
    event_factor: 1.1,
    extraction_weight: 1.2,
};

pub const BEAR: SeasonModifiers = SeasonModifiers {
    unrest_drift: 0.5,
    oversight_drift: 0.0,
    trust_drift: -0.3,
    momentum_drift: -1.0,
    sentiment_bias: -0.01,
    volatility: 1.4,
    crisis_factor: 1.2,
    event_factor: 1.0,
    extraction_weight: 0.8,
};

pub const HALVING: SeasonModifiers = SeasonModifiers {
    unrest_drift: 0.0,
    oversight_drift: 0.3,
    trust_drift: 0.0,
    momentum_drift: 0.0,
    sentiment_bias: 0.005,
    volatility: 1.6,
    crisis_factor: 1.1,
    event_factor: 1.2,
    extraction_weight: 0.9,
};

/// Per-season modifiers indexed by [`SeasonId`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonTable {
    pub accumulation: SeasonModifiers,
    pub bull: SeasonModifiers,
    pub bear: SeasonModifiers,
    pub halving: SeasonModifiers,
}

impl SeasonTable {
    pub const fn builtin() -> Self {
        Self {
            accumulation: ACCUMULATION,
            bull: BULL,
            bear: BEAR,
            halving: HALVING,
        }
    }

    pub fn get(&self, id: SeasonId) -> &SeasonModifiers {
        match id {
            SeasonId::Accumulation => &self.accumulation,
            SeasonId::Bull => &self.bull,
            SeasonId::Bear => &self.bear,
            SeasonId::Halving => &self.halving,
        }
    }
}

impl Default for SeasonTable {
    fn default() -> Self {
        Self::builtin()
    }
}
