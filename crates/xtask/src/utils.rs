//! Utility functions for xtask commands

use anyhow::{Context, Result};
use std::path::Path;

use game_content::{ContentFactory, StandardContent};
use game_core::GameConfig;

/// Content and configuration shared by the commands.
pub struct Session {
    pub content: StandardContent,
    pub config: GameConfig,
}

/// Loads content from `data_dir` (shipped defaults when absent).
pub fn load_session(data_dir: Option<&Path>, max_turns: Option<u32>) -> Result<Session> {
    let (content, mut config) = match data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            let config = factory
                .load_config()
                .with_context(|| format!("Failed to load config from {}", dir.display()))?;
            let content = factory
                .load_content()
                .with_context(|| format!("Failed to load seasons from {}", dir.display()))?;
            (content, config)
        }
        None => (StandardContent::new(), GameConfig::default()),
    };

    if let Some(turns) = max_turns {
        anyhow::ensure!(turns > 0, "--max-turns must be positive");
        config.max_turns = turns;
    }

    Ok(Session { content, config })
}

/// Formats a currency amount with thousands separators.
pub fn format_amount(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if whole < 0 {
        out.insert(0, '-');
    }
    out
}
