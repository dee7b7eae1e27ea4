//! Bounded numeric meters of a run.
//!
//! Every mutator clamps on write, so a meter can never be observed outside its
//! declared range, not even transiently between two effects of the same turn.

/// Identifies one of the six primary meters.
///
/// Used by severity scaling (which walks every meter) and by content tables
/// that address meters generically.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Meter {
    /// Spendable resource.
    Reserves,
    /// Accumulated, score-bearing extraction.
    Legacy,
    Unrest,
    Oversight,
    Trust,
    Momentum,
}

impl Meter {
    /// All meters in canonical order.
    pub const ALL: [Meter; 6] = [
        Meter::Reserves,
        Meter::Legacy,
        Meter::Unrest,
        Meter::Oversight,
        Meter::Trust,
        Meter::Momentum,
    ];

    /// Upper bound for percentage meters, `None` for unbounded ones.
    pub const fn ceiling(self) -> Option<f64> {
        match self {
            Meter::Reserves | Meter::Legacy => None,
            Meter::Unrest | Meter::Oversight | Meter::Trust | Meter::Momentum => {
                Some(Meters::PERCENT_MAX)
            }
        }
    }

    /// Clamps a raw value into this meter's declared range.
    pub fn clamp(self, value: f64) -> f64 {
        // NaN collapses to the floor so a broken effect cannot poison the run.
        let floored = if value.is_nan() { 0.0 } else { value.max(0.0) };
        match self.ceiling() {
            Some(max) => floored.min(max),
            None => floored,
        }
    }
}

/// The six primary meters.
///
/// Fields are private; reads go through accessors and writes through
/// [`Meters::set`] / [`Meters::adjust`], both of which clamp.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meters {
    reserves: f64,
    legacy: f64,
    unrest: f64,
    oversight: f64,
    trust: f64,
    momentum: f64,
}

impl Meters {
    pub const PERCENT_MAX: f64 = 100.0;

    /// Builds a meter set, clamping every input.
    pub fn new(
        reserves: f64,
        legacy: f64,
        unrest: f64,
        oversight: f64,
        trust: f64,
        momentum: f64,
    ) -> Self {
        Self {
            reserves: Meter::Reserves.clamp(reserves),
            legacy: Meter::Legacy.clamp(legacy),
            unrest: Meter::Unrest.clamp(unrest),
            oversight: Meter::Oversight.clamp(oversight),
            trust: Meter::Trust.clamp(trust),
            momentum: Meter::Momentum.clamp(momentum),
        }
    }

    #[inline]
    pub fn get(&self, meter: Meter) -> f64 {
        match meter {
            Meter::Reserves => self.reserves,
            Meter::Legacy => self.legacy,
            Meter::Unrest => self.unrest,
            Meter::Oversight => self.oversight,
            Meter::Trust => self.trust,
            Meter::Momentum => self.momentum,
        }
    }

    /// Writes a meter, clamped to its range.
    #[inline]
    pub fn set(&mut self, meter: Meter, value: f64) {
        let value = meter.clamp(value);
        match meter {
            Meter::Reserves => self.reserves = value,
            Meter::Legacy => self.legacy = value,
            Meter::Unrest => self.unrest = value,
            Meter::Oversight => self.oversight = value,
            Meter::Trust => self.trust = value,
            Meter::Momentum => self.momentum = value,
        }
    }

    /// Adds `delta` to a meter, clamped to its range.
    #[inline]
    pub fn adjust(&mut self, meter: Meter, delta: f64) {
        self.set(meter, self.get(meter) + delta);
    }

    pub fn reserves(&self) -> f64 {
        self.reserves
    }

    pub fn legacy(&self) -> f64 {
        self.legacy
    }

    pub fn unrest(&self) -> f64 {
        self.unrest
    }

    pub fn oversight(&self) -> f64 {
        self.oversight
    }

    pub fn trust(&self) -> f64 {
        self.trust
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }
}

/// Market-like scalars updated by the drift model every turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Market {
    price: f64,
    infrastructure_value: f64,
}

impl Market {
    /// Lowest price the drift model may produce; price stays strictly positive.
    pub const PRICE_FLOOR: f64 = 0.0001;

    pub fn new(price: f64, infrastructure_value: f64) -> Self {
        let mut market = Self {
            price: Self::PRICE_FLOOR,
            infrastructure_value: 0.0,
        };
        market.set_price(price);
        market.set_infrastructure_value(infrastructure_value);
        market
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn infrastructure_value(&self) -> f64 {
        self.infrastructure_value
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = if price.is_nan() {
            Self::PRICE_FLOOR
        } else {
            price.max(Self::PRICE_FLOOR)
        };
    }

    pub fn set_infrastructure_value(&mut self, value: f64) {
        self.infrastructure_value = if value.is_nan() { 0.0 } else { value.max(0.0) };
    }

    pub fn adjust_infrastructure_value(&mut self, delta: f64) {
        self.set_infrastructure_value(self.infrastructure_value + delta);
    }
}

/// Latent modifiers invisible to the player.
///
/// Only weight functions and drift read these; they are never displayed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hidden {
    audit_risk: f64,
    founder_stability: f64,
    community_memory: f64,
}

impl Hidden {
    /// Soft cap for audit risk. Crisis odds stop growing at 1.0 but the value
    /// may sit above it.
    pub const AUDIT_RISK_CAP: f64 = 2.0;

    pub fn new(audit_risk: f64, founder_stability: f64, community_memory: f64) -> Self {
        let mut hidden = Self {
            audit_risk: 0.0,
            founder_stability: 0.0,
            community_memory: 0.0,
        };
        hidden.set_audit_risk(audit_risk);
        hidden.set_founder_stability(founder_stability);
        hidden.set_community_memory(community_memory);
        hidden
    }

    pub fn audit_risk(&self) -> f64 {
        self.audit_risk
    }

    pub fn founder_stability(&self) -> f64 {
        self.founder_stability
    }

    pub fn community_memory(&self) -> f64 {
        self.community_memory
    }

    pub fn set_audit_risk(&mut self, value: f64) {
        self.audit_risk = clamp_range(value, 0.0, Self::AUDIT_RISK_CAP);
    }

    pub fn set_founder_stability(&mut self, value: f64) {
        self.founder_stability = clamp_range(value, 0.0, 1.0);
    }

    pub fn set_community_memory(&mut self, value: f64) {
        self.community_memory = clamp_range(value, 0.0, f64::INFINITY);
    }

    pub fn adjust_audit_risk(&mut self, delta: f64) {
        self.set_audit_risk(self.audit_risk + delta);
    }

    pub fn adjust_founder_stability(&mut self, delta: f64) {
        self.set_founder_stability(self.founder_stability + delta);
    }

    pub fn adjust_community_memory(&mut self, delta: f64) {
        self.set_community_memory(self.community_memory + delta);
    }
}

fn clamp_range(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_meters_clamp_on_write() {
        let mut meters = Meters::new(10.0, 0.0, 50.0, 50.0, 50.0, 50.0);
        meters.adjust(Meter::Unrest, 80.0);
        meters.adjust(Meter::Trust, -80.0);
        assert_eq!(meters.unrest(), 100.0);
        assert_eq!(meters.trust(), 0.0);
    }

    #[test]
    fn unbounded_meters_only_have_a_floor() {
        let mut meters = Meters::new(10.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        meters.adjust(Meter::Reserves, 1e12);
        meters.adjust(Meter::Legacy, -5.0);
        assert_eq!(meters.reserves(), 1e12 + 10.0);
        assert_eq!(meters.legacy(), 0.0);
    }

    #[test]
    fn constructor_clamps_inputs() {
        let meters = Meters::new(-1.0, -1.0, 140.0, -3.0, f64::NAN, 100.0);
        assert_eq!(meters.reserves(), 0.0);
        assert_eq!(meters.unrest(), 100.0);
        assert_eq!(meters.oversight(), 0.0);
        assert_eq!(meters.trust(), 0.0);
    }

    #[test]
    fn meter_names_round_trip() {
        assert_eq!(Meter::Oversight.to_string(), "oversight");
        assert_eq!("MOMENTUM".parse::<Meter>().unwrap(), Meter::Momentum);
    }

    #[test]
    fn hidden_modifiers_stay_in_range() {
        let mut hidden = Hidden::new(0.5, 0.8, 0.0);
        hidden.adjust_founder_stability(1.0);
        hidden.adjust_community_memory(-3.0);
        hidden.adjust_audit_risk(10.0);
        assert_eq!(hidden.founder_stability(), 1.0);
        assert_eq!(hidden.community_memory(), 0.0);
        assert_eq!(hidden.audit_risk(), Hidden::AUDIT_RISK_CAP);
    }

    #[test]
    fn price_stays_positive() {
        let mut market = Market::new(1.0, 10.0);
        market.set_price(-4.0);
        assert!(market.price() > 0.0);
    }
}
