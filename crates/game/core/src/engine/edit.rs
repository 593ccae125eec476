//! Admin world editing.
//!
//! Every edit except `enable` requires the player to be in editing mode.
//! Edits are not turn-gated and cost no AP.

use std::collections::BTreeMap;

use tracing::info;

use super::{ActionRejected, ZoneEngine, ZoneRef, id_param, position_param};
use crate::env::{DefinitionError, FieldValue};
use crate::params::ActionParams;
use crate::state::{EntityId, PlayerId, ZoneFields, ZoneId};

/// Prefix marking entity field values in an `entity_edit`.
const FIELD_PREFIX: &str = "f_";

impl ZoneEngine<'_> {
    pub fn edit(&mut self, player: PlayerId, params: &ActionParams) -> Result<(), ActionRejected> {
        let kind = params
            .get_string("type")
            .ok_or(ActionRejected::MissingParam("type"))?;
        let editing = self
            .zone
            .players
            .get(&player)
            .ok_or(ActionRejected::NotInZone(player))?
            .editing;
        if !editing && kind != "enable" {
            return Err(ActionRejected::NotEditing);
        }

        match kind {
            "enable" | "disable" => {
                if let Some(resident) = self.zone.players.get_mut(&player) {
                    resident.editing = kind == "enable";
                }
                self.mark_player(player);
            }
            "tile" => {
                let position = position_param(params)?;
                let key = params
                    .get_string("tile")
                    .ok_or(ActionRejected::MissingParam("tile"))?;
                let blocking = self.env.defs.tile(key)?.blocking;
                self.zone.map.set_tile(position, key, blocking);
                self.zone.rebuild_collision();
                self.mark(ZoneFields::TILES);
            }
            "entity_create" => {
                let position = position_param(params)?;
                let key = params
                    .get_string("ent")
                    .ok_or(ActionRejected::MissingParam("ent"))?;
                self.add_entity(key, None, position, BTreeMap::new())?;
            }
            "entity_edit" => self.edit_entity(params)?,
            "entity_delete" => {
                let entity = id_param(params, "ent", EntityId::from_param)?;
                self.remove_entity(entity)
                    .ok_or(ActionRejected::UnknownEntity(entity))?;
            }
            "npc_create" => {
                let position = position_param(params)?;
                let key = params
                    .get_string("npc")
                    .ok_or(ActionRejected::MissingParam("npc"))?;
                self.spawn_npc(key, None, position)?;
            }
            "clear_corpses" => {
                let corpses: Vec<EntityId> = self
                    .zone
                    .entities
                    .values()
                    .filter(|entity| entity.is_corpse())
                    .map(|entity| entity.id)
                    .collect();
                for corpse in corpses {
                    self.remove_entity(corpse);
                }
                self.mark(ZoneFields::ENTITIES);
            }
            "zone_goto" => {
                let zone = id_param(params, "zone", ZoneId::from_param)?;
                self.transfer(player, ZoneRef::Id(zone), None);
            }
            other => return Err(ActionRejected::Unsupported(other.to_owned())),
        }

        info!(target: "game::zone", zone = %self.zone.id, player = %player, edit = kind, "edit applied");
        self.mark(ZoneFields::RESIDENTS);
        Ok(())
    }

    /// Renames, moves and rotates an entity, replacing any `f_`-prefixed
    /// fields. All values are checked before anything is changed.
    fn edit_entity(&mut self, params: &ActionParams) -> Result<(), ActionRejected> {
        let id = id_param(params, "ent", EntityId::from_param)?;
        let name = params
            .get_string("name")
            .ok_or(ActionRejected::MissingParam("name"))?;
        let position = position_param(params)?;
        let rotation = params
            .get_int("rotation")
            .ok_or(ActionRejected::MissingParam("rotation"))?;
        let rotation = i32::try_from(rotation).map_err(|_| ActionRejected::InvalidParam("rotation"))?;

        let entity = self
            .zone
            .entities
            .get(&id)
            .ok_or(ActionRejected::UnknownEntity(id))?;
        let def = self.env.defs.entities.get(&entity.kind);

        let mut fields = BTreeMap::new();
        for (key, value) in params.iter() {
            let Some(field) = key.strip_prefix(FIELD_PREFIX) else {
                continue;
            };
            let invalid = || DefinitionError::InvalidField {
                entity: entity.kind.clone(),
                field: field.to_owned(),
            };
            let kind = def.and_then(|def| def.field(field)).ok_or_else(invalid)?.kind;
            let value = FieldValue::from_param(kind, value).ok_or_else(invalid)?;
            fields.insert(field.to_owned(), value);
        }
        let name = if name.is_empty() {
            def.map(|def| def.default_name.clone())
                .unwrap_or_else(|| entity.name.clone())
        } else {
            name.to_owned()
        };

        if let Some(entity) = self.zone.entities.get_mut(&id) {
            entity.name = name;
            entity.position = position;
            entity.rotation = rotation;
            entity.fields.extend(fields);
        }
        self.zone.rebuild_collision();
        self.mark(ZoneFields::ENTITIES);
        Ok(())
    }
}
