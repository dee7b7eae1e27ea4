//! Scripted endings and scoring combos.
//!
//! Predicates read typed turn records, resolved crises, the action-id history
//! and the meters. None of them look at the narrative log.

use game_core::{ActionCategory, ComboDef, EndingDef, RunState, Severity, TerminalReason};

use crate::effects::MILLION;

pub static ENDINGS: [EndingDef; 10] = [
    EndingDef {
        id: "exit_liquidity",
        title: "Exit Liquidity",
        weight: 2.0,
        multiplier: 1.5,
        matches: exit_liquidity,
    },
    EndingDef {
        id: "benevolent_builder",
        title: "The Benevolent Builder",
        weight: 3.0,
        multiplier: 1.3,
        matches: benevolent_builder,
    },
    EndingDef {
        id: "regulatory_darling",
        title: "Regulatory Darling",
        weight: 2.0,
        multiplier: 1.2,
        matches: regulatory_darling,
    },
    EndingDef {
        id: "peoples_chain",
        title: "The People's Chain",
        weight: 3.0,
        multiplier: 1.25,
        matches: peoples_chain,
    },
    EndingDef {
        id: "crisis_survivor",
        title: "Crisis Survivor",
        weight: 2.0,
        multiplier: 1.2,
        matches: crisis_survivor,
    },
    EndingDef {
        id: "hype_machine",
        title: "The Hype Machine",
        weight: 2.0,
        multiplier: 1.15,
        matches: hype_machine,
    },
    EndingDef {
        id: "the_rug",
        title: "The Rug",
        weight: 2.0,
        multiplier: 1.4,
        matches: the_rug,
    },
    EndingDef {
        id: "shut_down",
        title: "Cease and Desist",
        weight: 1.0,
        multiplier: 0.8,
        matches: shut_down,
    },
    EndingDef {
        id: "ghost_chain",
        title: "Ghost Chain",
        weight: 1.0,
        multiplier: 0.8,
        matches: ghost_chain,
    },
    EndingDef {
        id: "bankrupt_visionary",
        title: "Bankrupt Visionary",
        weight: 1.0,
        multiplier: 1.0,
        matches: bankrupt_visionary,
    },
];

pub static COMBOS: [ComboDef; 7] = [
    ComboDef {
        id: "relentless_extractor",
        name: "Relentless Extractor",
        multiplier: 1.20,
        matches: relentless_extractor,
    },
    ComboDef {
        id: "master_builder",
        name: "Master Builder",
        multiplier: 1.15,
        matches: master_builder,
    },
    ComboDef {
        id: "lucky_streak",
        name: "Lucky Streak",
        multiplier: 1.10,
        matches: lucky_streak,
    },
    ComboDef {
        id: "clean_hands",
        name: "Clean Hands",
        multiplier: 1.10,
        matches: clean_hands,
    },
    ComboDef {
        id: "full_spectrum",
        name: "Full Spectrum",
        multiplier: 1.05,
        matches: full_spectrum,
    },
    ComboDef {
        id: "crisis_veteran",
        name: "Crisis Veteran",
        multiplier: 1.10,
        matches: crisis_veteran,
    },
    ComboDef {
        id: "lawyered_up",
        name: "Lawyered Up",
        multiplier: 1.05,
        matches: lawyered_up,
    },
];

// ============================================================================
// Ending predicates
// ============================================================================

fn ended_by(state: &RunState, reason: TerminalReason) -> bool {
    state.terminal_reason == Some(reason)
}

fn exit_liquidity(state: &RunState) -> bool {
    state.completed() && state.meters.legacy() >= 500.0 * MILLION
}

fn benevolent_builder(state: &RunState) -> bool {
    state.completed()
        && state.category_count(ActionCategory::Development) >= 8
        && state.meters.trust() >= 60.0
}

fn regulatory_darling(state: &RunState) -> bool {
    state.completed()
        && state.meters.oversight() <= 20.0
        && state.category_count(ActionCategory::Compliance) >= 3
}

fn peoples_chain(state: &RunState) -> bool {
    state.completed() && state.meters.trust() >= 75.0 && state.meters.unrest() <= 30.0
}

fn crisis_survivor(state: &RunState) -> bool {
    state.completed() && state.resolved_crises.len() >= 4
}

fn hype_machine(state: &RunState) -> bool {
    state.completed() && state.meters.momentum() >= 80.0
}

fn the_rug(state: &RunState) -> bool {
    ended_by(state, TerminalReason::Revolt) && state.meters.legacy() >= 200.0 * MILLION
}

fn shut_down(state: &RunState) -> bool {
    ended_by(state, TerminalReason::Shutdown)
}

fn ghost_chain(state: &RunState) -> bool {
    ended_by(state, TerminalReason::Collapse)
}

fn bankrupt_visionary(state: &RunState) -> bool {
    ended_by(state, TerminalReason::Insolvency)
        && state.category_count(ActionCategory::Development) >= 5
}

// ============================================================================
// Combo predicates
// ============================================================================

fn relentless_extractor(state: &RunState) -> bool {
    state.longest_category_streak(ActionCategory::Extraction) >= 3
}

fn master_builder(state: &RunState) -> bool {
    state.category_count(ActionCategory::Development) >= 5
}

fn lucky_streak(state: &RunState) -> bool {
    state.severity_count(Severity::Critical) >= 3
}

fn clean_hands(state: &RunState) -> bool {
    state.completed() && state.backfire_count() == 0
}

fn full_spectrum(state: &RunState) -> bool {
    ActionCategory::ALL
        .iter()
        .all(|category| state.category_count(*category) > 0)
}

fn crisis_veteran(state: &RunState) -> bool {
    state.resolved_crises.len() >= 3
}

fn lawyered_up(state: &RunState) -> bool {
    state.action_count("legal_counsel") >= 3
}
