//! Zone layout loader.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::env::ZoneDef;

use crate::loaders::{LoadResult, read_toml};

/// Loads every `<name>.toml` in a directory as the layout of zone `<name>`.
///
/// ```toml
/// width = 12
/// height = 8
/// fill = "grass"
/// spawn = { x = 1, y = 1 }
/// rows = ["############", "#..........#"]
///
/// [legend]
/// "#" = "wall"
///
/// [[entities]]
/// type = "sign"
/// position = { x = 3, y = 1 }
/// fields = { text = "Welcome" }
/// ```
pub struct ZoneLoader;

impl ZoneLoader {
    pub fn load(path: &Path) -> LoadResult<ZoneDef> {
        read_toml(path)
    }

    pub fn load_dir(dir: &Path) -> LoadResult<BTreeMap<String, ZoneDef>> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read zone directory {}: {}", dir.display(), e))?;

        let mut zones = BTreeMap::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "toml") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            zones.insert(name.to_owned(), Self::load(&path)?);
        }
        Ok(zones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Position;

    #[test]
    fn zones_are_named_after_their_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("town.toml"),
            r##"
width = 4
height = 2
fill = "grass"
spawn = { x = 1, y = 1 }
rows = ["#..#"]

[legend]
"#" = "wall"

[[entities]]
type = "sign"
position = { x = 2, y = 1 }
fields = { text = "hello", page = 2 }

[[npcs]]
type = "blob"
position = { x = 3, y = 1 }
"##,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let zones = ZoneLoader::load_dir(dir.path()).unwrap();
        assert_eq!(zones.keys().collect::<Vec<_>>(), vec!["town"]);

        let town = &zones["town"];
        assert_eq!(town.spawn, Position::new(1, 1));
        assert_eq!(town.tile_at(Position::new(0, 0)), Some("wall"));
        assert_eq!(town.tile_at(Position::new(1, 1)), Some("grass"));
        assert_eq!(town.tile_at(Position::new(4, 0)), None);
        assert_eq!(town.entities[0].fields.len(), 2);
        assert_eq!(town.npcs[0].kind, "blob");
    }
}
