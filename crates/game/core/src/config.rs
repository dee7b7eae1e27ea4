/// Run configuration constants and tunable parameters.
///
/// Both the interactive client and the verifier must run with identical
/// values; any difference changes draw consumption or thresholds and breaks
/// replay.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of turns after which a surviving run ends successfully.
    pub max_turns: u32,
    /// Turns during which no crisis gate is rolled.
    pub crisis_grace_turns: u32,
    /// Picks drawn from the largest action category each turn.
    pub primary_picks: usize,
    /// Picks drawn from every other action category each turn.
    pub secondary_picks: usize,
    pub base_crisis_chance: f64,
    /// Crisis chance added at `audit_risk >= 1.0` (scaled linearly below).
    pub audit_risk_crisis_bonus: f64,
    pub max_crisis_chance: f64,
    pub base_event_chance: f64,
    /// Score multiplier for reaching `max_turns` instead of failing early.
    pub survival_bonus: f64,
    /// Legacy a completed run needs for the `success` fallback ending.
    pub success_legacy_threshold: f64,
    pub starting: StartingValues,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_TURNS: u32 = 30;
    pub const DEFAULT_CRISIS_GRACE_TURNS: u32 = 3;
    pub const DEFAULT_PRIMARY_PICKS: usize = 2;
    pub const DEFAULT_SECONDARY_PICKS: usize = 1;
    pub const DEFAULT_BASE_CRISIS_CHANCE: f64 = 0.10;
    pub const DEFAULT_AUDIT_RISK_CRISIS_BONUS: f64 = 0.25;
    pub const DEFAULT_MAX_CRISIS_CHANCE: f64 = 0.50;
    pub const DEFAULT_BASE_EVENT_CHANCE: f64 = 0.35;
    pub const DEFAULT_SURVIVAL_BONUS: f64 = 1.25;
    pub const DEFAULT_SUCCESS_LEGACY_THRESHOLD: f64 = 250_000_000.0;

    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            crisis_grace_turns: Self::DEFAULT_CRISIS_GRACE_TURNS,
            primary_picks: Self::DEFAULT_PRIMARY_PICKS,
            secondary_picks: Self::DEFAULT_SECONDARY_PICKS,
            base_crisis_chance: Self::DEFAULT_BASE_CRISIS_CHANCE,
            audit_risk_crisis_bonus: Self::DEFAULT_AUDIT_RISK_CRISIS_BONUS,
            max_crisis_chance: Self::DEFAULT_MAX_CRISIS_CHANCE,
            base_event_chance: Self::DEFAULT_BASE_EVENT_CHANCE,
            survival_bonus: Self::DEFAULT_SURVIVAL_BONUS,
            success_legacy_threshold: Self::DEFAULT_SUCCESS_LEGACY_THRESHOLD,
            starting: StartingValues::default(),
        }
    }

    pub fn with_max_turns(max_turns: u32) -> Self {
        Self {
            max_turns,
            ..Self::new()
        }
    }

    /// Number of actions offered on every menu.
    pub fn menu_size(&self, categories: usize) -> usize {
        self.primary_picks + self.secondary_picks * categories.saturating_sub(1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Meter values a fresh run starts from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StartingValues {
    pub reserves: f64,
    pub legacy: f64,
    pub unrest: f64,
    pub oversight: f64,
    pub trust: f64,
    pub momentum: f64,
    pub price: f64,
    pub infrastructure_value: f64,
    pub audit_risk: f64,
    pub founder_stability: f64,
    pub community_memory: f64,
}

impl Default for StartingValues {
    fn default() -> Self {
        Self {
            reserves: 1_000_000_000.0,
            legacy: 0.0,
            unrest: 20.0,
            oversight: 10.0,
            trust: 60.0,
            momentum: 40.0,
            price: 1.0,
            infrastructure_value: 100_000_000.0,
            audit_risk: 0.0,
            founder_stability: 0.8,
            community_memory: 0.0,
        }
    }
}
