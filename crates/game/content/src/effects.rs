//! Small building blocks shared by effect functions.

use game_core::{Meter, RunState};

pub const MILLION: f64 = 1_000_000.0;

/// Moves a share of current reserves into legacy.
pub(crate) fn cash_out(state: &mut RunState, share: f64) {
    let take = state.meters.reserves() * share;
    state.meters.adjust(Meter::Reserves, -take);
    state.meters.adjust(Meter::Legacy, take);
}

/// Spends a flat amount of reserves.
pub(crate) fn spend(state: &mut RunState, amount: f64) {
    state.meters.adjust(Meter::Reserves, -amount);
}

/// Removes a share of accumulated legacy.
pub(crate) fn forfeit_legacy(state: &mut RunState, share: f64) {
    let loss = state.meters.legacy() * share;
    state.meters.adjust(Meter::Legacy, -loss);
}

/// Scales the market price by `factor`.
pub(crate) fn reprice(state: &mut RunState, factor: f64) {
    let price = state.market.price();
    state.market.set_price(price * factor);
}
