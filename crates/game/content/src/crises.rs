//! Crisis catalog.
//!
//! Every crisis offers three to five options. The first option is the
//! conservative default used when a replay carries no explicit choice.
//! Options that gamble consume exactly one draw; the rest consume none.

use game_core::{
    CrisisDef, CrisisOption, CrisisOutcome, Meter, Prng, RunState, SeasonModifiers,
};

use crate::effects::{MILLION, forfeit_legacy, spend};

pub static CRISES: [CrisisDef; 6] = [
    CrisisDef {
        id: "regulatory_subpoena",
        name: "Regulatory Subpoena",
        applies: None,
        weight: subpoena_weight,
        options: &[
            CrisisOption {
                id: "cooperate",
                label: "Cooperate fully",
                resolve: subpoena_cooperate,
            },
            CrisisOption {
                id: "stonewall",
                label: "Stonewall",
                resolve: subpoena_stonewall,
            },
            CrisisOption {
                id: "settle",
                label: "Settle quietly",
                resolve: subpoena_settle,
            },
            CrisisOption {
                id: "lawyer_up",
                label: "Lawyer up",
                resolve: subpoena_lawyer_up,
            },
        ],
    },
    CrisisDef {
        id: "protocol_exploit",
        name: "Protocol Exploit",
        applies: None,
        weight: exploit_weight,
        options: &[
            CrisisOption {
                id: "reimburse",
                label: "Reimburse victims",
                resolve: exploit_reimburse,
            },
            CrisisOption {
                id: "blame_users",
                label: "Blame the users",
                resolve: exploit_blame_users,
            },
            CrisisOption {
                id: "pause_chain",
                label: "Pause the chain",
                resolve: exploit_pause_chain,
            },
            CrisisOption {
                id: "bounty",
                label: "Offer the hacker a bounty",
                resolve: exploit_bounty,
            },
        ],
    },
    CrisisDef {
        id: "whistleblower",
        name: "Whistleblower",
        applies: None,
        weight: whistleblower_weight,
        options: &[
            CrisisOption {
                id: "come_clean",
                label: "Come clean",
                resolve: whistleblower_come_clean,
            },
            CrisisOption {
                id: "pay_off",
                label: "Pay them off",
                resolve: whistleblower_pay_off,
            },
            CrisisOption {
                id: "deny",
                label: "Deny everything",
                resolve: whistleblower_deny,
            },
        ],
    },
    CrisisDef {
        id: "liquidity_crunch",
        name: "Liquidity Crunch",
        applies: None,
        weight: liquidity_weight,
        options: &[
            CrisisOption {
                id: "inject_reserves",
                label: "Inject reserves",
                resolve: liquidity_inject,
            },
            CrisisOption {
                id: "freeze_withdrawals",
                label: "Freeze withdrawals",
                resolve: liquidity_freeze,
            },
            CrisisOption {
                id: "emergency_raise",
                label: "Emergency raise",
                resolve: liquidity_raise,
            },
        ],
    },
    CrisisDef {
        id: "governance_revolt",
        name: "Governance Revolt",
        applies: Some(restless),
        weight: revolt_weight,
        options: &[
            CrisisOption {
                id: "concede",
                label: "Concede to the demands",
                resolve: revolt_concede,
            },
            CrisisOption {
                id: "crackdown",
                label: "Crack down",
                resolve: revolt_crackdown,
            },
            CrisisOption {
                id: "fork_negotiation",
                label: "Negotiate a fork",
                resolve: revolt_fork,
            },
            CrisisOption {
                id: "buy_loyalty",
                label: "Buy loyalty",
                resolve: revolt_buy_loyalty,
            },
            CrisisOption {
                id: "ignore",
                label: "Ignore it",
                resolve: revolt_ignore,
            },
        ],
    },
    CrisisDef {
        id: "founder_scandal",
        name: "Founder Scandal",
        applies: None,
        weight: scandal_weight,
        options: &[
            CrisisOption {
                id: "apologize",
                label: "Apologize publicly",
                resolve: scandal_apologize,
            },
            CrisisOption {
                id: "step_back",
                label: "Step back from the spotlight",
                resolve: scandal_step_back,
            },
            CrisisOption {
                id: "spin",
                label: "Spin the story",
                resolve: scandal_spin,
            },
            CrisisOption {
                id: "double_down",
                label: "Double down",
                resolve: scandal_double_down,
            },
        ],
    },
];

// ============================================================================
// Weights
// ============================================================================

fn restless(state: &RunState) -> bool {
    state.meters.unrest() >= 40.0
}

fn subpoena_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    1.0 + state.meters.oversight() / 50.0
}

fn exploit_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    1.0 + state.hidden.audit_risk()
}

fn whistleblower_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    0.5 + state.hidden.audit_risk() * 1.5
}

fn liquidity_weight(_: &RunState, season: &SeasonModifiers) -> f64 {
    0.5 * season.volatility
}

fn revolt_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    state.meters.unrest() / 40.0
}

fn scandal_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    1.0 - state.hidden.founder_stability() * 0.5
}

// ============================================================================
// Regulatory subpoena
// ============================================================================

fn subpoena_cooperate(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("You hand over the records and pay the fees.", |state| {
        spend(state, 30.0 * MILLION);
        state.meters.adjust(Meter::Oversight, -10.0);
        state.meters.adjust(Meter::Trust, 3.0);
    })
}

fn subpoena_stonewall(_: &RunState, rng: &mut Prng) -> CrisisOutcome {
    if rng.chance(0.5) {
        CrisisOutcome::new("The investigators lose interest.", |state| {
            state.meters.adjust(Meter::Oversight, -5.0);
        })
    } else {
        CrisisOutcome::new("The investigators escalate.", |state| {
            state.meters.adjust(Meter::Oversight, 15.0);
            state.hidden.adjust_audit_risk(0.1);
        })
    }
}

fn subpoena_settle(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("A quiet settlement closes the file.", |state| {
        spend(state, 80.0 * MILLION);
        state.meters.adjust(Meter::Oversight, -20.0);
    })
}

fn subpoena_lawyer_up(_: &RunState, rng: &mut Prng) -> CrisisOutcome {
    if rng.chance(0.7) {
        CrisisOutcome::new("Your lawyers bury them in motions.", |state| {
            spend(state, 40.0 * MILLION);
            state.meters.adjust(Meter::Oversight, -12.0);
        })
    } else {
        CrisisOutcome::new("The judge is unimpressed.", |state| {
            spend(state, 40.0 * MILLION);
            state.meters.adjust(Meter::Oversight, 5.0);
        })
    }
}

// ============================================================================
// Protocol exploit
// ============================================================================

fn exploit_reimburse(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("Victims are made whole from the treasury.", |state| {
        spend(state, 100.0 * MILLION);
        state.meters.adjust(Meter::Trust, 5.0);
    })
}

fn exploit_blame_users(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("You tell users to practice better security.", |state| {
        state.meters.adjust(Meter::Trust, -12.0);
        state.meters.adjust(Meter::Unrest, 8.0);
    })
}

fn exploit_pause_chain(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("Block production halts while the bug is patched.", |state| {
        state.meters.adjust(Meter::Momentum, -10.0);
        state.meters.adjust(Meter::Unrest, 4.0);
        state.meters.adjust(Meter::Trust, 2.0);
    })
}

fn exploit_bounty(_: &RunState, rng: &mut Prng) -> CrisisOutcome {
    if rng.chance(0.5) {
        CrisisOutcome::new("The hacker returns the funds for a bounty.", |state| {
            spend(state, 20.0 * MILLION);
            state.meters.adjust(Meter::Trust, 4.0);
        })
    } else {
        CrisisOutcome::new("The hacker takes the bounty and the funds.", |state| {
            spend(state, 20.0 * MILLION);
            state.meters.adjust(Meter::Trust, -6.0);
            state.meters.adjust(Meter::Unrest, 4.0);
        })
    }
}

// ============================================================================
// Whistleblower
// ============================================================================

fn whistleblower_come_clean(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("You publish everything and return part of the take.", |state| {
        forfeit_legacy(state, 0.10);
        state.meters.adjust(Meter::Trust, 4.0);
        state.meters.adjust(Meter::Oversight, 6.0);
    })
}

fn whistleblower_pay_off(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("The story never runs.", |state| {
        spend(state, 50.0 * MILLION);
        state.hidden.adjust_audit_risk(0.1);
    })
}

fn whistleblower_deny(_: &RunState, rng: &mut Prng) -> CrisisOutcome {
    if rng.chance(0.6) {
        CrisisOutcome::new("The denial holds, barely.", |state| {
            state.meters.adjust(Meter::Trust, -3.0);
        })
    } else {
        CrisisOutcome::new("The documents leak anyway.", |state| {
            state.meters.adjust(Meter::Trust, -10.0);
            state.meters.adjust(Meter::Oversight, 10.0);
        })
    }
}

// ============================================================================
// Liquidity crunch
// ============================================================================

fn liquidity_inject(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("Reserves backstop the pools.", |state| {
        let injection = state.meters.reserves() * 0.15;
        spend(state, injection);
        state.meters.adjust(Meter::Trust, 6.0);
    })
}

fn liquidity_freeze(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("Withdrawals are frozen until further notice.", |state| {
        state.meters.adjust(Meter::Unrest, 12.0);
        state.meters.adjust(Meter::Trust, -8.0);
    })
}

fn liquidity_raise(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("A discounted raise refills the treasury.", |state| {
        state.meters.adjust(Meter::Reserves, 50.0 * MILLION);
        forfeit_legacy(state, 0.05);
        state.meters.adjust(Meter::Momentum, -5.0);
    })
}

// ============================================================================
// Governance revolt
// ============================================================================

fn revolt_concede(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("The treasury changes hands, a little.", |state| {
        forfeit_legacy(state, 0.03);
        state.meters.adjust(Meter::Unrest, -15.0);
    })
}

fn revolt_crackdown(_: &RunState, rng: &mut Prng) -> CrisisOutcome {
    if rng.chance(0.4) {
        CrisisOutcome::new("The ringleaders are silenced.", |state| {
            state.meters.adjust(Meter::Unrest, -12.0);
            state.meters.adjust(Meter::Oversight, 4.0);
        })
    } else {
        CrisisOutcome::new("The crackdown makes martyrs.", |state| {
            state.meters.adjust(Meter::Unrest, 8.0);
            state.meters.adjust(Meter::Oversight, 4.0);
        })
    }
}

fn revolt_fork(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("The dissidents leave with a fork.", |state| {
        state.meters.adjust(Meter::Momentum, -6.0);
        state.meters.adjust(Meter::Unrest, -8.0);
        state.meters.adjust(Meter::Trust, 2.0);
    })
}

fn revolt_buy_loyalty(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("Delegates discover new enthusiasm.", |state| {
        spend(state, 60.0 * MILLION);
        state.meters.adjust(Meter::Unrest, -10.0);
    })
}

fn revolt_ignore(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("The forum burns without you.", |state| {
        state.meters.adjust(Meter::Unrest, 6.0);
        state.meters.adjust(Meter::Trust, -4.0);
    })
}

// ============================================================================
// Founder scandal
// ============================================================================

fn scandal_apologize(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("The apology lands.", |state| {
        state.meters.adjust(Meter::Trust, 2.0);
        state.meters.adjust(Meter::Unrest, -3.0);
    })
}

fn scandal_step_back(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("A new face fronts the project.", |state| {
        state.hidden.adjust_founder_stability(-0.2);
        state.meters.adjust(Meter::Trust, 5.0);
        state.meters.adjust(Meter::Momentum, -4.0);
    })
}

fn scandal_spin(_: &RunState, rng: &mut Prng) -> CrisisOutcome {
    if rng.chance(0.5) {
        CrisisOutcome::new("The spin works; it was all a misunderstanding.", |state| {
            state.meters.adjust(Meter::Momentum, 3.0);
        })
    } else {
        CrisisOutcome::new("Nobody buys the spin.", |state| {
            state.meters.adjust(Meter::Trust, -8.0);
        })
    }
}

fn scandal_double_down(_: &RunState, _: &mut Prng) -> CrisisOutcome {
    CrisisOutcome::new("You go on every podcast that will have you.", |state| {
        state.meters.adjust(Meter::Momentum, 5.0);
        state.meters.adjust(Meter::Unrest, 6.0);
        state.meters.adjust(Meter::Oversight, 4.0);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{GameConfig, SeasonId};

    #[test]
    fn every_crisis_offers_three_to_five_options() {
        for crisis in &CRISES {
            assert!(
                (3..=5).contains(&crisis.options.len()),
                "{} has {} options",
                crisis.id,
                crisis.options.len()
            );
            assert!(crisis.default_option().is_some());
        }
    }

    #[test]
    fn deterministic_options_consume_no_draws() {
        let state = RunState::new("crisis", SeasonId::default(), &GameConfig::default());
        let mut rng = Prng::new(5);
        let outcome = subpoena_settle(&state, &mut rng);
        assert_eq!(rng.draws(), 0);

        let mut next = state.clone();
        (outcome.apply)(&mut next);
        assert_eq!(next.meters.reserves(), 920.0 * MILLION);
        assert_eq!(next.meters.oversight(), 0.0);
    }

    #[test]
    fn gambles_consume_one_draw() {
        let state = RunState::new("crisis", SeasonId::default(), &GameConfig::default());
        let mut rng = Prng::new(5);
        let _ = subpoena_stonewall(&state, &mut rng);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn revolt_needs_restless_community() {
        let mut state = RunState::new("crisis", SeasonId::default(), &GameConfig::default());
        let season = SeasonModifiers::NEUTRAL;
        let revolt = CRISES.iter().find(|c| c.id == "governance_revolt").unwrap();
        assert_eq!(revolt.weight_in(&state, &season), 0.0);
        state.meters.set(Meter::Unrest, 60.0);
        assert_eq!(revolt.weight_in(&state, &season), 1.5);
    }
}
