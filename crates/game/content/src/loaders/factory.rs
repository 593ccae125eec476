//! Content factory for building definitions from a data directory.

use std::path::{Path, PathBuf};

use game_core::GameConfig;
use game_core::env::{Definitions, GameDef};
use tracing::info;

use crate::loaders::{ConfigLoader, LoadResult, TableLoader, ZoneLoader, read_toml};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── game.toml
/// ├── config.toml      (optional)
/// ├── tiles.toml
/// ├── entities.toml
/// ├── npcs.toml
/// ├── items.toml
/// ├── spells.toml      (optional)
/// └── zones/
///     ├── town.toml
///     └── cave.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load tunables from `config.toml`, or the defaults if it is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load_or_default(&self.data_dir.join("config.toml"))
    }

    pub fn load_game(&self) -> LoadResult<GameDef> {
        read_toml(&self.data_dir.join("game.toml"))
    }

    /// Load every definition table and zone layout.
    pub fn load_definitions(&self) -> LoadResult<Definitions> {
        let defs = Definitions {
            game: self.load_game()?,
            tiles: TableLoader::load(&self.data_dir.join("tiles.toml"))?,
            entities: TableLoader::load_optional(&self.data_dir.join("entities.toml"))?,
            npcs: TableLoader::load_optional(&self.data_dir.join("npcs.toml"))?,
            items: TableLoader::load_optional(&self.data_dir.join("items.toml"))?,
            spells: TableLoader::load_optional(&self.data_dir.join("spells.toml"))?,
            zones: ZoneLoader::load_dir(&self.data_dir.join("zones"))?,
        };
        info!(
            dir = %self.data_dir.display(),
            tiles = defs.tiles.len(),
            entities = defs.entities.len(),
            npcs = defs.npcs.len(),
            items = defs.items.len(),
            spells = defs.spells.len(),
            zones = defs.zones.len(),
            "content loaded"
        );
        Ok(defs)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
