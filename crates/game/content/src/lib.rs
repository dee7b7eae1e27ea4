//! Static game content and loaders.
//!
//! This crate houses the catalogs the simulation draws from:
//! - Player actions in five categories
//! - Narrative events
//! - Crises with their resolution options
//! - Scripted endings and scoring combos
//! - The season modifier table (mirrored in `data/seasons.ron`)
//!
//! Content is exposed to the engine through [`StandardContent`], an
//! implementation of [`game_core::ContentOracle`]. Catalog order is part of
//! the replay contract: reordering entries changes selection outcomes.
//!
//! With the `loaders` feature, [`ConfigLoader`] reads a `GameConfig` from
//! TOML and [`SeasonLoader`] reads season overrides from RON.
//! [`ContentFactory`] wires both up for a data directory.

pub mod actions;
pub mod crises;
pub mod effects;
pub mod endings;
pub mod events;
pub mod seasons;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use actions::ACTIONS;
pub use crises::CRISES;
pub use endings::{COMBOS, ENDINGS};
pub use events::EVENTS;
pub use seasons::SeasonTable;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, SeasonLoader};

use game_core::{
    ActionDef, ComboDef, ContentOracle, CrisisDef, EndingDef, EventDef, SeasonId,
    SeasonModifiers,
};

/// The shipped catalogs plus a season table.
#[derive(Clone, Debug, Default)]
pub struct StandardContent {
    seasons: SeasonTable,
}

impl StandardContent {
    /// Shipped catalogs with the built-in season table.
    pub const fn new() -> Self {
        Self {
            seasons: SeasonTable::builtin(),
        }
    }

    /// Shipped catalogs with a custom season table.
    pub fn with_seasons(seasons: SeasonTable) -> Self {
        Self { seasons }
    }

    pub fn seasons(&self) -> &SeasonTable {
        &self.seasons
    }
}

impl ContentOracle for StandardContent {
    fn actions(&self) -> &[ActionDef] {
        &ACTIONS
    }

    fn events(&self) -> &[EventDef] {
        &EVENTS
    }

    fn crises(&self) -> &[CrisisDef] {
        &CRISES
    }

    fn endings(&self) -> &[EndingDef] {
        &ENDINGS
    }

    fn combos(&self) -> &[ComboDef] {
        &COMBOS
    }

    fn season(&self, id: SeasonId) -> SeasonModifiers {
        self.seasons.get(id).clone()
    }
}
