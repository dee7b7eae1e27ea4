//! Verifier policy and its environment loader.

use std::env;

/// Tolerance and strictness knobs for replay verification.
#[derive(Clone, Debug, PartialEq)]
pub struct VerifierConfig {
    /// Share of the replayed score a claim may differ by.
    pub relative_tolerance: f64,
    /// Minimum allowed difference regardless of score size.
    pub absolute_floor: f64,
    /// Reject runs that play an action outside the sampled menu.
    pub strict_menu: bool,
    /// Upper bound on submitted actions; `None` uses the run's `max_turns`.
    pub max_actions: Option<usize>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            relative_tolerance: Self::DEFAULT_RELATIVE_TOLERANCE,
            absolute_floor: Self::DEFAULT_ABSOLUTE_FLOOR,
            strict_menu: false,
            max_actions: None,
        }
    }
}

impl VerifierConfig {
    pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 0.2;
    pub const DEFAULT_ABSOLUTE_FLOOR: f64 = 1_000_000.0;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `VERIFY_RELATIVE_TOLERANCE` - Relative score tolerance (default: 0.2)
    /// - `VERIFY_ABSOLUTE_FLOOR` - Absolute score tolerance floor (default: 1000000)
    /// - `VERIFY_STRICT_MENU` - Reject off-menu actions (default: false)
    /// - `VERIFY_MAX_ACTIONS` - Maximum submitted actions (default: max turns)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(tolerance) = parse::<f64>(&lookup, "VERIFY_RELATIVE_TOLERANCE") {
            config.relative_tolerance = tolerance.max(0.0);
        }
        if let Some(floor) = parse::<f64>(&lookup, "VERIFY_ABSOLUTE_FLOOR") {
            config.absolute_floor = floor.max(0.0);
        }
        if let Some(strict) = lookup("VERIFY_STRICT_MENU").as_deref().and_then(parse_bool) {
            config.strict_menu = strict;
        }
        if let Some(limit) = parse::<usize>(&lookup, "VERIFY_MAX_ACTIONS") {
            config.max_actions = Some(limit.max(1));
        }

        config
    }

    /// Largest accepted `|claimed - computed|` for a replayed score.
    ///
    /// The relative share is taken of the replayed score so a claim cannot
    /// widen its own band.
    pub fn allowed_difference(&self, computed: u64) -> f64 {
        (self.relative_tolerance * computed as f64).max(self.absolute_floor)
    }

    pub fn within_tolerance(&self, claimed: u64, computed: u64) -> bool {
        claimed.abs_diff(computed) as f64 <= self.allowed_difference(computed)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
