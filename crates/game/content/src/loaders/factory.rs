//! Content factory for building the engine inputs from a data directory.

use std::path::{Path, PathBuf};

use game_core::GameConfig;

use crate::StandardContent;
use crate::loaders::{ConfigLoader, LoadResult, SeasonLoader};

/// Loads configuration and season overrides from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── game.toml
/// └── seasons.ron
/// ```
///
/// Missing files fall back to the shipped defaults; present but malformed
/// files are errors.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "game.toml";
    pub const SEASONS_FILE: &'static str = "seasons.ron";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `game.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Build the standard catalogs with seasons from `seasons.ron`.
    pub fn load_content(&self) -> LoadResult<StandardContent> {
        let path = self.data_dir.join(Self::SEASONS_FILE);
        if !path.exists() {
            return Ok(StandardContent::new());
        }
        Ok(StandardContent::with_seasons(SeasonLoader::load(&path)?))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
