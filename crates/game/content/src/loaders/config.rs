//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Shipped configuration, identical to `GameConfig::default()`.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../data/game.toml");

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their default values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse config data from a TOML string and sanity-check it.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &GameConfig) -> LoadResult<()> {
    anyhow::ensure!(config.max_turns > 0, "max_turns must be positive");
    anyhow::ensure!(
        config.primary_picks > 0,
        "primary_picks must be positive"
    );
    for (name, chance) in [
        ("base_crisis_chance", config.base_crisis_chance),
        ("max_crisis_chance", config.max_crisis_chance),
        ("base_event_chance", config.base_event_chance),
    ] {
        anyhow::ensure!(
            (0.0..=1.0).contains(&chance),
            "{name} must lie in [0, 1], got {chance}"
        );
    }
    anyhow::ensure!(
        config.starting.price > 0.0,
        "starting price must be positive"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn shipped_file_matches_defaults() {
        let config = ConfigLoader::parse(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_files_keep_defaults() {
        let config = ConfigLoader::parse("max_turns = 12\n[starting]\ntrust = 70.0\n").unwrap();
        assert_eq!(config.max_turns, 12);
        assert_eq!(config.starting.trust, 70.0);
        assert_eq!(config.starting.unrest, 20.0);
        assert_eq!(config.crisis_grace_turns, GameConfig::DEFAULT_CRISIS_GRACE_TURNS);
    }

    #[test]
    fn rejects_out_of_range_chances() {
        let err = ConfigLoader::parse("base_event_chance = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("base_event_chance"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_turns = 8").unwrap();
        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.max_turns, 8);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigLoader::load(&dir.path().join("absent.toml")).is_err());
    }
}
