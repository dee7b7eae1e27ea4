//! Passive per-turn drift and the market model.

use crate::env::{Prng, SeasonModifiers};
use crate::state::{Meter, RunState};

const UNREST_DRIFT: f64 = 1.5;
const OVERSIGHT_DRIFT: f64 = 1.0;
const TRUST_DRIFT: f64 = -0.5;
const MOMENTUM_DRIFT: f64 = -2.0;

const AUDIT_RISK_RETENTION: f64 = 0.95;
const AUDIT_RISK_PER_OVERSIGHT: f64 = 1.0 / 1000.0;
const COMMUNITY_MEMORY_RETENTION: f64 = 0.9;

const SENTIMENT_SCALE: f64 = 300.0;
const SENTIMENT_WEIGHT: f64 = 0.05;
const PRICE_NOISE: f64 = 0.08;
const PRICE_CAP: f64 = 0.10;
const INFRA_CORRELATION: f64 = 0.6;
const INFRA_NOISE: f64 = 0.04;
/// Share of reserves re-priced by the realized price change.
const VOLATILE_SHARE: f64 = 0.5;

/// Fixed decay/growth of the social meters plus hidden-modifier relaxation.
/// Consumes no draws.
pub(crate) fn apply_drift(state: &mut RunState, season: &SeasonModifiers) {
    state
        .meters
        .adjust(Meter::Unrest, UNREST_DRIFT + season.unrest_drift);
    state
        .meters
        .adjust(Meter::Oversight, OVERSIGHT_DRIFT + season.oversight_drift);
    state
        .meters
        .adjust(Meter::Trust, TRUST_DRIFT + season.trust_drift);
    state
        .meters
        .adjust(Meter::Momentum, MOMENTUM_DRIFT + season.momentum_drift);

    let audit_risk = state.hidden.audit_risk() * AUDIT_RISK_RETENTION
        + state.meters.oversight() * AUDIT_RISK_PER_OVERSIGHT;
    state.hidden.set_audit_risk(audit_risk);
    let memory = state.hidden.community_memory() * COMMUNITY_MEMORY_RETENTION;
    state.hidden.set_community_memory(memory);
}

/// Result of one market sub-step.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketMove {
    pub sentiment: f64,
    /// Realized relative price change (after the price floor).
    pub price_change: f64,
    pub reserves_change: f64,
}

/// Market drift. Consumes exactly two draws: price noise, then
/// infrastructure noise.
pub(crate) fn apply_market(
    state: &mut RunState,
    season: &SeasonModifiers,
    rng: &mut Prng,
) -> MarketMove {
    let sentiment = (state.meters.trust() - state.meters.unrest() + state.meters.momentum())
        / SENTIMENT_SCALE;
    let noise = (rng.next_f64() - 0.5) * PRICE_NOISE * season.volatility;
    let pct = (sentiment * SENTIMENT_WEIGHT + season.sentiment_bias + noise)
        .clamp(-PRICE_CAP, PRICE_CAP);

    let old_price = state.market.price();
    state.market.set_price(old_price * (1.0 + pct));
    let realized = state.market.price() / old_price - 1.0;

    let infra_noise = (rng.next_f64() - 0.5) * INFRA_NOISE;
    let infra = state.market.infrastructure_value();
    state
        .market
        .set_infrastructure_value(infra * (1.0 + realized * INFRA_CORRELATION + infra_noise));

    let before = state.meters.reserves();
    let volatile = before * VOLATILE_SHARE;
    state.meters.adjust(Meter::Reserves, volatile * realized);

    MarketMove {
        sentiment,
        price_change: realized,
        reserves_change: state.meters.reserves() - before,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::SeasonId;
    use crate::state::Market;

    fn fresh() -> RunState {
        RunState::new("drift", SeasonId::Accumulation, &GameConfig::default())
    }

    #[test]
    fn neutral_drift_moves_social_meters() {
        let mut state = fresh();
        apply_drift(&mut state, &SeasonModifiers::NEUTRAL);
        assert_eq!(state.meters.unrest(), 21.5);
        assert_eq!(state.meters.oversight(), 11.0);
        assert_eq!(state.meters.trust(), 59.5);
        assert_eq!(state.meters.momentum(), 38.0);
        assert!((state.hidden.audit_risk() - 0.011).abs() < 1e-12);
    }

    #[test]
    fn season_deltas_add_to_drift() {
        let mut state = fresh();
        let season = SeasonModifiers {
            unrest_drift: 1.0,
            momentum_drift: 3.0,
            ..SeasonModifiers::NEUTRAL
        };
        apply_drift(&mut state, &season);
        assert_eq!(state.meters.unrest(), 22.5);
        assert_eq!(state.meters.momentum(), 41.0);
    }

    #[test]
    fn market_consumes_two_draws_and_caps_price_moves() {
        let mut state = fresh();
        let mut rng = Prng::new(17);
        let season = SeasonModifiers {
            sentiment_bias: 5.0,
            ..SeasonModifiers::NEUTRAL
        };
        let moved = apply_market(&mut state, &season, &mut rng);
        assert_eq!(rng.draws(), 2);
        assert!((moved.price_change - 0.10).abs() < 1e-12);
        assert!((state.market.price() - 1.1).abs() < 1e-12);
        // Half the reserves re-priced by +10%.
        assert!((state.meters.reserves() - 1_050_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn falling_market_never_drives_price_to_zero() {
        let mut state = fresh();
        state.market.set_price(Market::PRICE_FLOOR);
        let mut rng = Prng::new(1);
        let season = SeasonModifiers {
            sentiment_bias: -5.0,
            ..SeasonModifiers::NEUTRAL
        };
        apply_market(&mut state, &season, &mut rng);
        assert!(state.market.price() > 0.0);
        assert!(state.meters.reserves() >= 0.0);
    }
}
