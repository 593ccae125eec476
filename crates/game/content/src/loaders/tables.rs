//! Template tables: one TOML file per template kind, keyed by template id.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::loaders::{LoadResult, read_toml};

/// Loader for a `[key] ...` table of templates.
///
/// ```toml
/// [grass]
/// blocking = false
///
/// [wall]
/// blocking = true
/// ```
pub struct TableLoader;

impl TableLoader {
    pub fn load<T: DeserializeOwned>(path: &Path) -> LoadResult<BTreeMap<String, T>> {
        read_toml(path)
    }

    /// Like [`load`](Self::load), but a missing file is an empty table.
    pub fn load_optional<T: DeserializeOwned>(path: &Path) -> LoadResult<BTreeMap<String, T>> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no table file, using an empty table");
            Ok(BTreeMap::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::env::{Alignment, NpcDef, SpellDef, TileDef};

    #[test]
    fn tables_are_keyed_by_template_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiles.toml");
        std::fs::write(&path, "[grass]\n\n[wall]\nblocking = true\n").unwrap();

        let tiles: BTreeMap<String, TileDef> = TableLoader::load(&path).unwrap();
        assert_eq!(tiles.len(), 2);
        assert!(!tiles["grass"].blocking);
        assert!(tiles["wall"].blocking);
    }

    #[test]
    fn npc_skills_default_missing_parts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("npcs.toml");
        std::fs::write(
            &path,
            r#"
[blob]
default_name = "Blob"
alignment = "hostile"
logic = "blob"
skills = { attack = { level = 3 }, defence = { level = 2 } }
"#,
        )
        .unwrap();

        let npcs: BTreeMap<String, NpcDef> = TableLoader::load(&path).unwrap();
        let blob = &npcs["blob"];
        assert_eq!(blob.alignment, Alignment::Hostile);
        assert_eq!(blob.skills.attack.level, 3);
        assert_eq!(blob.skills.magic.level, 0);
    }

    #[test]
    fn missing_optional_table_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let spells: BTreeMap<String, SpellDef> =
            TableLoader::load_optional(&dir.path().join("spells.toml")).unwrap();
        assert!(spells.is_empty());
    }

    #[test]
    fn malformed_tables_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiles.toml");
        std::fs::write(&path, "[grass\n").unwrap();

        let error = TableLoader::load::<TileDef>(&path).unwrap_err();
        assert!(error.to_string().contains("tiles.toml"));
    }
}
