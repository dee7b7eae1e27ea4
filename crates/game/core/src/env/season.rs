//! Season identifiers and the modifier table each season contributes.

/// Market season a run is played in.
///
/// Fixed for the lifetime of a run; selects the [`SeasonModifiers`] applied to
/// drift, market noise, crisis odds, event odds and action weights.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum SeasonId {
    /// Neutral baseline season.
    #[default]
    Accumulation,
    Bull,
    Bear,
    Halving,
}

impl SeasonId {
    pub const ALL: [SeasonId; 4] = [
        SeasonId::Accumulation,
        SeasonId::Bull,
        SeasonId::Bear,
        SeasonId::Halving,
    ];
}

/// Additive and multiplicative modifiers of one season.
///
/// Additive fields are added to the fixed per-turn drift; factor fields
/// multiply the corresponding base value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeasonModifiers {
    pub unrest_drift: f64,
    pub oversight_drift: f64,
    pub trust_drift: f64,
    pub momentum_drift: f64,
    /// Additive bias on the per-turn price change, before the ±10% cap.
    pub sentiment_bias: f64,
    /// Multiplier on market noise amplitude.
    pub volatility: f64,
    /// Multiplier on the crisis gate chance.
    pub crisis_factor: f64,
    /// Multiplier on the event gate chance.
    pub event_factor: f64,
    /// Multiplier on extraction action weights during menu sampling.
    pub extraction_weight: f64,
}

impl SeasonModifiers {
    /// Modifiers that leave every base value untouched.
    pub const NEUTRAL: SeasonModifiers = SeasonModifiers {
        unrest_drift: 0.0,
        oversight_drift: 0.0,
        trust_drift: 0.0,
        momentum_drift: 0.0,
        sentiment_bias: 0.0,
        volatility: 1.0,
        crisis_factor: 1.0,
        event_factor: 1.0,
        extraction_weight: 1.0,
    };
}

impl Default for SeasonModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_ids_parse_case_insensitively() {
        assert_eq!("BULL".parse::<SeasonId>().unwrap(), SeasonId::Bull);
        assert_eq!(SeasonId::Halving.to_string(), "halving");
        assert!("winter".parse::<SeasonId>().is_err());
    }

    #[test]
    fn default_modifiers_are_neutral() {
        let neutral = SeasonModifiers::default();
        assert_eq!(neutral.volatility, 1.0);
        assert_eq!(neutral.unrest_drift, 0.0);
        assert_eq!(SeasonId::default(), SeasonId::Accumulation);
    }
}
