//! Season table loader.

use std::path::Path;

use crate::SeasonTable;
use crate::loaders::{LoadResult, read_file};

/// Shipped season table, identical to [`SeasonTable::builtin`].
pub const DEFAULT_SEASONS_RON: &str = include_str!("../../data/seasons.ron");

/// Loader for season modifiers from RON files.
pub struct SeasonLoader;

impl SeasonLoader {
    pub fn load(path: &Path) -> LoadResult<SeasonTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse seasons {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<SeasonTable> {
        let table: SeasonTable = ron::from_str(content)?;
        Ok(table)
    }
}
