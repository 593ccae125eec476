//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_toml};

/// Loader for game tunables from TOML files.
///
/// Keys left out keep their [`GameConfig::new`] defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        read_toml(path)
    }

    /// Defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> LoadResult<GameConfig> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(GameConfig::new())
        }
    }
}
