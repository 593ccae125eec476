//! Cross-reference checks over loaded definitions.
//!
//! Tables are parsed independently, so a zone can name a tile that no table
//! defines. Catching that here keeps [`DefinitionError`](game_core::DefinitionError)s
//! out of zone construction at startup.

use game_core::engine::BehaviorRegistry;
use game_core::env::Definitions;

use crate::loaders::LoadResult;

/// Fails with every dangling reference found, one per line.
pub fn validate(defs: &Definitions, behaviors: &BehaviorRegistry) -> LoadResult<()> {
    let mut problems = Vec::new();

    let start = &defs.game.starting_zone;
    if !start.is_empty() && !defs.enabled_zones().any(|(name, _)| name == start) {
        problems.push(format!("starting zone `{start}` is missing or disabled"));
    }

    for (key, entity) in &defs.entities {
        if let Some(function) = &entity.use_func
            && behaviors.use_function(function).is_none()
        {
            problems.push(format!("entity `{key}` uses unknown function `{function}`"));
        }
    }

    for (key, npc) in &defs.npcs {
        if behaviors.logic(&npc.logic).is_none() {
            problems.push(format!("npc `{key}` has unknown logic `{}`", npc.logic));
        }
        for (slot, item) in &npc.slots {
            if !defs.items.contains_key(item) {
                problems.push(format!("npc `{key}` wears unknown item `{item}` on {slot}"));
            }
        }
    }

    for (name, zone) in &defs.zones {
        let tiles = std::iter::once(&zone.fill).chain(zone.legend.values());
        for tile in tiles {
            if !defs.tiles.contains_key(tile) {
                problems.push(format!("zone `{name}` uses unknown tile `{tile}`"));
            }
        }
        for placed in &zone.entities {
            match defs.entities.get(&placed.kind) {
                Some(def) => {
                    if let Err(error) = def.validate_fields(&placed.kind, &placed.fields) {
                        problems.push(format!("zone `{name}`: {error}"));
                    }
                }
                None => problems.push(format!("zone `{name}` places unknown entity `{}`", placed.kind)),
            }
        }
        for placed in &zone.npcs {
            if !defs.npcs.contains_key(&placed.kind) {
                problems.push(format!("zone `{name}` places unknown npc `{}`", placed.kind));
            }
        }
        for placed in &zone.items {
            if !defs.items.contains_key(&placed.kind) {
                problems.push(format!("zone `{name}` places unknown item `{}`", placed.kind));
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "content has {} dangling reference(s):\n{}",
            problems.len(),
            problems.join("\n")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::env::{NpcDef, TileDef, ZoneDef, ZoneNpcDef};

    fn defs() -> Definitions {
        let mut defs = Definitions::default();
        defs.game.starting_zone = "town".into();
        defs.tiles.insert("grass".into(), TileDef::default());
        defs.npcs.insert(
            "blob".into(),
            NpcDef {
                logic: "blob".into(),
                ..NpcDef::default()
            },
        );
        defs.zones.insert(
            "town".into(),
            ZoneDef {
                width: 2,
                height: 2,
                fill: "grass".into(),
                ..ZoneDef::default()
            },
        );
        defs
    }

    #[test]
    fn consistent_content_passes() {
        validate(&defs(), &BehaviorRegistry::with_defaults()).unwrap();
    }

    #[test]
    fn every_dangling_reference_is_reported() {
        let mut defs = defs();
        defs.game.starting_zone = "castle".into();
        defs.npcs.get_mut("blob").unwrap().logic = "dance".into();
        let town = defs.zones.get_mut("town").unwrap();
        town.legend.insert("~".into(), "lava".into());
        town.npcs.push(ZoneNpcDef {
            kind: "dragon".into(),
            ..ZoneNpcDef::default()
        });

        let message = validate(&defs, &BehaviorRegistry::with_defaults())
            .unwrap_err()
            .to_string();
        assert!(message.starts_with("content has 4 dangling reference(s)"));
        assert!(message.contains("`castle`"));
        assert!(message.contains("`dance`"));
        assert!(message.contains("`lava`"));
        assert!(message.contains("`dragon`"));
    }
}
