//! Narrative events. At most one fires per turn.

use game_core::{EventDef, Meter, RunState, SeasonModifiers};

use crate::effects::reprice;

pub static EVENTS: [EventDef; 10] = [
    EventDef {
        id: "whale_accumulation",
        name: "A whale quietly accumulates",
        applies: None,
        weight: whale_accumulation_weight,
        effect: whale_accumulation,
    },
    EventDef {
        id: "exploit_rumor",
        name: "Exploit rumors spread",
        applies: None,
        weight: exploit_rumor_weight,
        effect: exploit_rumor,
    },
    EventDef {
        id: "regulator_speech",
        name: "A regulator gives a pointed speech",
        applies: None,
        weight: regulator_speech_weight,
        effect: regulator_speech,
    },
    EventDef {
        id: "viral_meme",
        name: "A meme goes viral",
        applies: None,
        weight: unit_weight,
        effect: viral_meme,
    },
    EventDef {
        id: "exchange_listing",
        name: "A major exchange lists the token",
        applies: Some(has_momentum),
        weight: unit_weight,
        effect: exchange_listing,
    },
    EventDef {
        id: "miner_strike",
        name: "Miners go on strike",
        applies: None,
        weight: miner_strike_weight,
        effect: miner_strike,
    },
    EventDef {
        id: "partnership_announcement",
        name: "A partnership is announced",
        applies: None,
        weight: unit_weight,
        effect: partnership_announcement,
    },
    EventDef {
        id: "tax_audit_notice",
        name: "A tax audit notice arrives",
        applies: Some(past_opening),
        weight: tax_audit_notice_weight,
        effect: tax_audit_notice,
    },
    EventDef {
        id: "community_meetup",
        name: "The community meets up",
        applies: None,
        weight: unit_weight,
        effect: community_meetup,
    },
    EventDef {
        id: "market_crash_scare",
        name: "A market crash scare",
        applies: None,
        weight: market_crash_scare_weight,
        effect: market_crash_scare,
    },
];

fn has_momentum(state: &RunState) -> bool {
    state.meters.momentum() >= 40.0
}

fn past_opening(state: &RunState) -> bool {
    state.turn >= 5
}

fn unit_weight(_: &RunState, _: &SeasonModifiers) -> f64 {
    1.0
}

fn whale_accumulation_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    1.0 + state.meters.momentum() / 100.0
}

fn exploit_rumor_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    1.0 + state.hidden.audit_risk()
}

fn regulator_speech_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    1.0 + state.meters.oversight() / 100.0
}

fn miner_strike_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    0.5 + state.meters.unrest() / 100.0
}

fn tax_audit_notice_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    0.5 + state.hidden.audit_risk()
}

fn market_crash_scare_weight(_: &RunState, season: &SeasonModifiers) -> f64 {
    0.5 * season.volatility
}

fn whale_accumulation(state: &mut RunState) {
    reprice(state, 1.05);
    state.meters.adjust(Meter::Momentum, 3.0);
}

fn exploit_rumor(state: &mut RunState) {
    state.meters.adjust(Meter::Trust, -4.0);
    state.meters.adjust(Meter::Unrest, 3.0);
}

fn regulator_speech(state: &mut RunState) {
    state.meters.adjust(Meter::Oversight, 4.0);
}

fn viral_meme(state: &mut RunState) {
    state.meters.adjust(Meter::Momentum, 6.0);
}

fn exchange_listing(state: &mut RunState) {
    state.meters.adjust(Meter::Momentum, 4.0);
    state.meters.adjust(Meter::Trust, 2.0);
    reprice(state, 1.04);
}

fn miner_strike(state: &mut RunState) {
    state.meters.adjust(Meter::Unrest, 5.0);
    let loss = state.meters.reserves() * 0.01;
    state.meters.adjust(Meter::Reserves, -loss);
}

fn partnership_announcement(state: &mut RunState) {
    state.meters.adjust(Meter::Trust, 3.0);
    state.meters.adjust(Meter::Momentum, 2.0);
}

fn tax_audit_notice(state: &mut RunState) {
    state.meters.adjust(Meter::Oversight, 3.0);
    state.hidden.adjust_audit_risk(0.05);
}

fn community_meetup(state: &mut RunState) {
    state.meters.adjust(Meter::Unrest, -3.0);
    state.meters.adjust(Meter::Trust, 2.0);
    state.hidden.adjust_community_memory(0.5);
}

fn market_crash_scare(state: &mut RunState) {
    reprice(state, 0.95);
    state.meters.adjust(Meter::Momentum, -4.0);
}
