//! Player action catalog.
//!
//! Order matters: menu sampling walks each category bucket in the order the
//! entries appear here.

use game_core::{ActionCategory, ActionDef, Meter, RunState, SeasonModifiers};

use crate::effects::{MILLION, cash_out, reprice, spend};

pub static ACTIONS: [ActionDef; 19] = [
    // ===== extraction =====
    ActionDef {
        id: "mining_acceleration",
        name: "Mining Acceleration",
        category: ActionCategory::Extraction,
        applies: None,
        weight: extraction_weight,
        effect: mining_acceleration,
        risk: 0.0,
        backfire: None,
    },
    ActionDef {
        id: "token_unlock",
        name: "Token Unlock",
        category: ActionCategory::Extraction,
        applies: None,
        weight: extraction_weight,
        effect: token_unlock,
        risk: 0.15,
        backfire: Some(token_unlock_backfire),
    },
    ActionDef {
        id: "treasury_skim",
        name: "Treasury Skim",
        category: ActionCategory::Extraction,
        applies: None,
        weight: treasury_skim_weight,
        effect: treasury_skim,
        risk: 0.20,
        backfire: Some(treasury_skim_backfire),
    },
    ActionDef {
        id: "fee_hike",
        name: "Fee Hike",
        category: ActionCategory::Extraction,
        applies: None,
        weight: extraction_weight,
        effect: fee_hike,
        risk: 0.0,
        backfire: None,
    },
    ActionDef {
        id: "yield_farming",
        name: "Yield Farming",
        category: ActionCategory::Extraction,
        applies: None,
        weight: yield_farming_weight,
        effect: yield_farming,
        risk: 0.10,
        backfire: Some(yield_farming_backfire),
    },
    ActionDef {
        id: "insider_allocation",
        name: "Insider Allocation",
        category: ActionCategory::Extraction,
        applies: Some(founder_in_control),
        weight: insider_allocation_weight,
        effect: insider_allocation,
        risk: 0.25,
        backfire: Some(insider_allocation_backfire),
    },
    // ===== development =====
    ActionDef {
        id: "tech_milestone",
        name: "Tech Milestone",
        category: ActionCategory::Development,
        applies: None,
        weight: flat_weight,
        effect: tech_milestone,
        risk: 0.0,
        backfire: None,
    },
    ActionDef {
        id: "protocol_upgrade",
        name: "Protocol Upgrade",
        category: ActionCategory::Development,
        applies: None,
        weight: flat_weight,
        effect: protocol_upgrade,
        risk: 0.10,
        backfire: Some(protocol_upgrade_backfire),
    },
    ActionDef {
        id: "infrastructure_expansion",
        name: "Infrastructure Expansion",
        category: ActionCategory::Development,
        applies: Some(can_fund_expansion),
        weight: flat_weight,
        effect: infrastructure_expansion,
        risk: 0.0,
        backfire: None,
    },
    ActionDef {
        id: "security_audit",
        name: "Security Audit",
        category: ActionCategory::Development,
        applies: None,
        weight: security_audit_weight,
        effect: security_audit,
        risk: 0.0,
        backfire: None,
    },
    // ===== promotion =====
    ActionDef {
        id: "hype_campaign",
        name: "Hype Campaign",
        category: ActionCategory::Promotion,
        applies: None,
        weight: flat_weight,
        effect: hype_campaign,
        risk: 0.10,
        backfire: Some(hype_campaign_backfire),
    },
    ActionDef {
        id: "influencer_deal",
        name: "Influencer Deal",
        category: ActionCategory::Promotion,
        applies: None,
        weight: flat_weight,
        effect: influencer_deal,
        risk: 0.15,
        backfire: Some(influencer_deal_backfire),
    },
    ActionDef {
        id: "exchange_roadshow",
        name: "Exchange Roadshow",
        category: ActionCategory::Promotion,
        applies: None,
        weight: exchange_roadshow_weight,
        effect: exchange_roadshow,
        risk: 0.0,
        backfire: None,
    },
    // ===== compliance =====
    ActionDef {
        id: "legal_counsel",
        name: "Legal Counsel",
        category: ActionCategory::Compliance,
        applies: None,
        weight: legal_counsel_weight,
        effect: legal_counsel,
        risk: 0.0,
        backfire: None,
    },
    ActionDef {
        id: "lobbying",
        name: "Lobbying",
        category: ActionCategory::Compliance,
        applies: None,
        weight: flat_weight,
        effect: lobbying,
        risk: 0.20,
        backfire: Some(lobbying_backfire),
    },
    ActionDef {
        id: "regulatory_filing",
        name: "Regulatory Filing",
        category: ActionCategory::Compliance,
        applies: None,
        weight: flat_weight,
        effect: regulatory_filing,
        risk: 0.0,
        backfire: None,
    },
    // ===== community =====
    ActionDef {
        id: "community_grants",
        name: "Community Grants",
        category: ActionCategory::Community,
        applies: None,
        weight: community_grants_weight,
        effect: community_grants,
        risk: 0.0,
        backfire: None,
    },
    ActionDef {
        id: "governance_vote",
        name: "Governance Vote",
        category: ActionCategory::Community,
        applies: None,
        weight: flat_weight,
        effect: governance_vote,
        risk: 0.0,
        backfire: None,
    },
    ActionDef {
        id: "token_buyback",
        name: "Token Buyback",
        category: ActionCategory::Community,
        applies: Some(can_fund_buyback),
        weight: flat_weight,
        effect: token_buyback,
        risk: 0.0,
        backfire: None,
    },
];

// ============================================================================
// Applicability
// ============================================================================

fn founder_in_control(state: &RunState) -> bool {
    state.hidden.founder_stability() >= 0.5
}

fn can_fund_expansion(state: &RunState) -> bool {
    state.meters.reserves() >= 100.0 * MILLION
}

fn can_fund_buyback(state: &RunState) -> bool {
    state.meters.reserves() >= 200.0 * MILLION
}

// ============================================================================
// Weights
// ============================================================================

fn flat_weight(_: &RunState, _: &SeasonModifiers) -> f64 {
    1.0
}

fn extraction_weight(_: &RunState, season: &SeasonModifiers) -> f64 {
    season.extraction_weight
}

fn treasury_skim_weight(state: &RunState, season: &SeasonModifiers) -> f64 {
    // Less tempting once auditors are already looking.
    season.extraction_weight * (1.0 - state.hidden.audit_risk().min(1.0) * 0.5)
}

fn yield_farming_weight(state: &RunState, season: &SeasonModifiers) -> f64 {
    season.extraction_weight * (0.5 + state.meters.momentum() / 100.0)
}

fn insider_allocation_weight(state: &RunState, season: &SeasonModifiers) -> f64 {
    season.extraction_weight * 0.6 * state.hidden.founder_stability()
}

fn security_audit_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    1.0 + state.hidden.audit_risk()
}

fn exchange_roadshow_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    0.5 + state.meters.trust() / 100.0
}

fn legal_counsel_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    1.0 + state.meters.oversight() / 50.0
}

fn community_grants_weight(state: &RunState, _: &SeasonModifiers) -> f64 {
    1.0 + state.meters.unrest() / 50.0
}

// ============================================================================
// Effects: extraction
// ============================================================================

fn mining_acceleration(state: &mut RunState) {
    cash_out(state, 0.03);
    state.meters.adjust(Meter::Unrest, 4.0);
    state.meters.adjust(Meter::Oversight, 2.0);
    state.hidden.adjust_audit_risk(0.02);
}

fn token_unlock(state: &mut RunState) {
    cash_out(state, 0.05);
    state.meters.adjust(Meter::Unrest, 6.0);
    state.meters.adjust(Meter::Trust, -4.0);
    state.meters.adjust(Meter::Momentum, -3.0);
}

fn token_unlock_backfire(state: &mut RunState) {
    state.meters.adjust(Meter::Trust, -6.0);
    state.meters.adjust(Meter::Unrest, 4.0);
}

fn treasury_skim(state: &mut RunState) {
    cash_out(state, 0.04);
    state.meters.adjust(Meter::Oversight, 5.0);
    state.hidden.adjust_audit_risk(0.08);
}

fn treasury_skim_backfire(state: &mut RunState) {
    state.meters.adjust(Meter::Oversight, 8.0);
    state.hidden.adjust_audit_risk(0.10);
}

fn fee_hike(state: &mut RunState) {
    let take = state.meters.reserves() * 0.02;
    state.meters.adjust(Meter::Reserves, take);
    state.meters.adjust(Meter::Legacy, 10.0 * MILLION);
    state.meters.adjust(Meter::Unrest, 5.0);
    state.meters.adjust(Meter::Trust, -3.0);
}

fn yield_farming(state: &mut RunState) {
    let share = 0.02 * state.meters.momentum() / 50.0;
    let take = state.meters.reserves() * share;
    state.meters.adjust(Meter::Legacy, take);
    state.meters.adjust(Meter::Momentum, 2.0);
    state.meters.adjust(Meter::Unrest, 2.0);
}

fn yield_farming_backfire(state: &mut RunState) {
    let loss = state.meters.reserves() * 0.03;
    state.meters.adjust(Meter::Reserves, -loss);
}

fn insider_allocation(state: &mut RunState) {
    cash_out(state, 0.06);
    state.meters.adjust(Meter::Trust, -6.0);
    state.meters.adjust(Meter::Oversight, 6.0);
    state.hidden.adjust_audit_risk(0.15);
    state.hidden.adjust_founder_stability(-0.05);
}

fn insider_allocation_backfire(state: &mut RunState) {
    state.meters.adjust(Meter::Unrest, 8.0);
    state.meters.adjust(Meter::Oversight, 6.0);
}

// ============================================================================
// Effects: development
// ============================================================================

fn tech_milestone(state: &mut RunState) {
    spend(state, 15.0 * MILLION);
    state.meters.adjust(Meter::Legacy, 5.0 * MILLION);
    state.meters.adjust(Meter::Momentum, 6.0);
    state.meters.adjust(Meter::Trust, 3.0);
    state.market.adjust_infrastructure_value(10.0 * MILLION);
}

fn protocol_upgrade(state: &mut RunState) {
    spend(state, 25.0 * MILLION);
    state.meters.adjust(Meter::Momentum, 4.0);
    state.meters.adjust(Meter::Oversight, -1.0);
    state.market.adjust_infrastructure_value(20.0 * MILLION);
}

fn protocol_upgrade_backfire(state: &mut RunState) {
    state.meters.adjust(Meter::Trust, -5.0);
    state.meters.adjust(Meter::Momentum, -4.0);
}

fn infrastructure_expansion(state: &mut RunState) {
    spend(state, 40.0 * MILLION);
    state.meters.adjust(Meter::Unrest, -2.0);
    state.meters.adjust(Meter::Momentum, 2.0);
    state.market.adjust_infrastructure_value(50.0 * MILLION);
}

fn security_audit(state: &mut RunState) {
    spend(state, 10.0 * MILLION);
    state.meters.adjust(Meter::Trust, 4.0);
    state.meters.adjust(Meter::Oversight, -3.0);
    state.hidden.adjust_audit_risk(-0.10);
}

// ============================================================================
// Effects: promotion
// ============================================================================

fn hype_campaign(state: &mut RunState) {
    spend(state, 8.0 * MILLION);
    state.meters.adjust(Meter::Momentum, 8.0);
    state.meters.adjust(Meter::Trust, 1.0);
    state.meters.adjust(Meter::Unrest, -1.0);
}

fn hype_campaign_backfire(state: &mut RunState) {
    state.meters.adjust(Meter::Trust, -4.0);
}

fn influencer_deal(state: &mut RunState) {
    spend(state, 12.0 * MILLION);
    state.meters.adjust(Meter::Momentum, 6.0);
    state.meters.adjust(Meter::Oversight, 2.0);
    state.hidden.adjust_audit_risk(0.03);
}

fn influencer_deal_backfire(state: &mut RunState) {
    state.meters.adjust(Meter::Oversight, 5.0);
    state.meters.adjust(Meter::Trust, -3.0);
}

fn exchange_roadshow(state: &mut RunState) {
    spend(state, 20.0 * MILLION);
    state.meters.adjust(Meter::Legacy, 5.0 * MILLION);
    state.meters.adjust(Meter::Momentum, 5.0);
    state.meters.adjust(Meter::Trust, 2.0);
}

// ============================================================================
// Effects: compliance
// ============================================================================

fn legal_counsel(state: &mut RunState) {
    spend(state, 15.0 * MILLION);
    state.meters.adjust(Meter::Oversight, -6.0);
    state.meters.adjust(Meter::Unrest, 1.0);
    state.hidden.adjust_audit_risk(-0.05);
}

fn lobbying(state: &mut RunState) {
    spend(state, 30.0 * MILLION);
    state.meters.adjust(Meter::Oversight, -8.0);
    state.meters.adjust(Meter::Trust, -2.0);
    state.hidden.adjust_audit_risk(0.02);
}

fn lobbying_backfire(state: &mut RunState) {
    state.meters.adjust(Meter::Oversight, 10.0);
}

fn regulatory_filing(state: &mut RunState) {
    spend(state, 5.0 * MILLION);
    state.meters.adjust(Meter::Oversight, -4.0);
    state.meters.adjust(Meter::Trust, 2.0);
    state.meters.adjust(Meter::Momentum, -1.0);
}

// ============================================================================
// Effects: community
// ============================================================================

fn community_grants(state: &mut RunState) {
    spend(state, 20.0 * MILLION);
    state.meters.adjust(Meter::Unrest, -6.0);
    state.meters.adjust(Meter::Trust, 5.0);
    state.hidden.adjust_community_memory(1.0);
}

fn governance_vote(state: &mut RunState) {
    state.meters.adjust(Meter::Unrest, -4.0);
    state.meters.adjust(Meter::Trust, 3.0);
    state.meters.adjust(Meter::Momentum, -1.0);
    state.meters.adjust(Meter::Oversight, -1.0);
}

fn token_buyback(state: &mut RunState) {
    spend(state, 50.0 * MILLION);
    state.meters.adjust(Meter::Trust, 4.0);
    state.meters.adjust(Meter::Momentum, 3.0);
    state.meters.adjust(Meter::Unrest, -2.0);
    reprice(state, 1.03);
}
