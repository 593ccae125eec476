//! Static, load-once templates consulted whenever a live instance is built.
//!
//! Every table is keyed by the string id used in content files. Lookups go
//! through the `Definitions` accessors so that a missing key surfaces as a
//! [`DefinitionError`] instead of a panic.

use std::collections::BTreeMap;

use super::DefinitionError;
use crate::params::ParamValue;
use crate::state::Position;
use crate::stats::{SkillBlock, SkillKind, StatBlock};

/// Root game settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameDef {
    /// Zone new and respawning players are placed in.
    pub starting_zone: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: BTreeMap<String, ZoneInfoDef>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneInfoDef {
    #[cfg_attr(feature = "serde", serde(default = "enabled_by_default"))]
    pub enabled: bool,
}

#[cfg(feature = "serde")]
fn enabled_by_default() -> bool {
    true
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileDef {
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocking: bool,
}

/// Footprint of an entity, anchored at its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Default for Size {
    fn default() -> Self {
        Self::UNIT
    }
}

impl Size {
    pub const UNIT: Size = Size {
        width: 1,
        height: 1,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    Int,
    String,
}

/// Declared per-instance field of an entity type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    /// Exported fields are visible to clients in zone snapshots.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exported: bool,
}

/// Value of an entity instance field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    Int(i64),
    Str(String),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            FieldValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(value) => Some(value),
            FieldValue::Int(_) => None,
        }
    }

    /// Converts a raw action parameter according to the declared kind.
    pub fn from_param(kind: FieldKind, value: &ParamValue) -> Option<Self> {
        match (kind, value) {
            (FieldKind::Int, ParamValue::Int(v)) => Some(FieldValue::Int(*v)),
            (FieldKind::Int, ParamValue::Float(v)) if v.is_finite() => {
                Some(FieldValue::Int(v.trunc() as i64))
            }
            (FieldKind::Int, ParamValue::Str(v)) => v.trim().parse().ok().map(FieldValue::Int),
            (FieldKind::String, ParamValue::Str(v)) => Some(FieldValue::Str(v.clone())),
            (FieldKind::String, ParamValue::Int(v)) => Some(FieldValue::Str(v.to_string())),
            _ => None,
        }
    }

    fn matches(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (FieldValue::Int(_), FieldKind::Int) | (FieldValue::Str(_), FieldKind::String)
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntityDef {
    pub default_name: String,
    pub size: Size,
    pub blocking: bool,
    pub usable: bool,
    pub use_text: Option<String>,
    /// Key into the use-function table.
    pub use_func: Option<String>,
    pub fields: Vec<FieldDef>,
}

impl EntityDef {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Checks a full field map against the declared schema.
    pub fn validate_fields(
        &self,
        entity: &str,
        fields: &BTreeMap<String, FieldValue>,
    ) -> Result<(), DefinitionError> {
        for (name, value) in fields {
            let valid = self.field(name).is_some_and(|def| value.matches(def.kind));
            if !valid {
                return Err(DefinitionError::InvalidField {
                    entity: entity.to_owned(),
                    field: name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Alignment {
    Hostile,
    #[default]
    Neutral,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NpcDef {
    pub default_name: String,
    pub alignment: Alignment,
    /// Key into the NPC logic table.
    pub logic: String,
    pub skills: SkillBlock,
    /// Item definition keys worn per slot.
    pub slots: BTreeMap<EquipSlot, String>,
}

/// Body slot an item can be equipped into.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumString, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum EquipSlot {
    Head,
    Torso,
    Legs,
    Hands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum ItemKind {
    Helmet,
    Armour,
    Boots,
    Legs,
    Melee,
    Ranged,
    Consumable,
    #[default]
    Misc,
}

impl ItemKind {
    /// Slot this kind of item equips into, if any.
    pub fn slot(self) -> Option<EquipSlot> {
        match self {
            ItemKind::Helmet => Some(EquipSlot::Head),
            ItemKind::Armour => Some(EquipSlot::Torso),
            ItemKind::Boots | ItemKind::Legs => Some(EquipSlot::Legs),
            ItemKind::Melee | ItemKind::Ranged => Some(EquipSlot::Hands),
            ItemKind::Consumable | ItemKind::Misc => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemDef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ItemKind,
    pub quality: i32,
    pub max_qty: i32,
    pub durability: i32,
    pub special: Vec<String>,
    pub stats: StatBlock,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum SpellEffectDef {
    /// Visual played at the target point.
    Effect {
        effect: String,
        #[cfg_attr(feature = "serde", serde(default))]
        duration: u32,
    },
    /// Magic damage to every NPC in range, with a per-cell visual.
    Aoe {
        #[cfg_attr(feature = "serde", serde(default))]
        effect: Option<String>,
        damage: i32,
        range: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        duration: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "magic_skill"))]
    pub skill: SkillKind,
    /// Skill level required to cast.
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: i32,
    /// AP cost.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<SpellEffectDef>,
}

#[cfg(feature = "serde")]
fn magic_skill() -> SkillKind {
    SkillKind::Magic
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoneEntityDef {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub name: Option<String>,
    pub position: Position,
    pub fields: BTreeMap<String, FieldValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoneNpcDef {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub name: Option<String>,
    pub position: Position,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoneItemDef {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub position: Position,
}

/// Initial layout of a zone.
///
/// The map is `fill` everywhere inside `width x height`, overridden by
/// `rows`: row `i` covers `y = i` and each character is looked up in `legend`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoneDef {
    pub width: u32,
    pub height: u32,
    pub spawn: Position,
    pub fill: String,
    pub legend: BTreeMap<String, String>,
    pub rows: Vec<String>,
    pub entities: Vec<ZoneEntityDef>,
    pub npcs: Vec<ZoneNpcDef>,
    pub items: Vec<ZoneItemDef>,
}

impl ZoneDef {
    /// Tile key at `position` according to the layout.
    pub fn tile_at(&self, position: Position) -> Option<&str> {
        let (Ok(x), Ok(y)) = (usize::try_from(position.x), usize::try_from(position.y)) else {
            return None;
        };
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        let from_rows = self
            .rows
            .get(y)
            .and_then(|row| row.chars().nth(x))
            .and_then(|symbol| self.legend.get(&symbol.to_string()));
        Some(from_rows.map_or(self.fill.as_str(), String::as_str))
    }
}

/// Every template table, loaded once at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Definitions {
    pub game: GameDef,
    pub tiles: BTreeMap<String, TileDef>,
    pub entities: BTreeMap<String, EntityDef>,
    pub npcs: BTreeMap<String, NpcDef>,
    pub items: BTreeMap<String, ItemDef>,
    pub spells: BTreeMap<String, SpellDef>,
    pub zones: BTreeMap<String, ZoneDef>,
}

impl Definitions {
    pub fn tile(&self, key: &str) -> Result<&TileDef, DefinitionError> {
        self.tiles
            .get(key)
            .ok_or_else(|| DefinitionError::UnknownTile(key.to_owned()))
    }

    pub fn entity(&self, key: &str) -> Result<&EntityDef, DefinitionError> {
        self.entities
            .get(key)
            .ok_or_else(|| DefinitionError::UnknownEntity(key.to_owned()))
    }

    pub fn npc(&self, key: &str) -> Result<&NpcDef, DefinitionError> {
        self.npcs
            .get(key)
            .ok_or_else(|| DefinitionError::UnknownNpc(key.to_owned()))
    }

    pub fn item(&self, key: &str) -> Result<&ItemDef, DefinitionError> {
        self.items
            .get(key)
            .ok_or_else(|| DefinitionError::UnknownItem(key.to_owned()))
    }

    pub fn spell(&self, key: &str) -> Result<&SpellDef, DefinitionError> {
        self.spells
            .get(key)
            .ok_or_else(|| DefinitionError::UnknownSpell(key.to_owned()))
    }

    pub fn zone(&self, key: &str) -> Result<&ZoneDef, DefinitionError> {
        self.zones
            .get(key)
            .ok_or_else(|| DefinitionError::UnknownZone(key.to_owned()))
    }

    /// Spells whose requirement a caster with `skills` meets.
    pub fn spells_for<'a>(
        &'a self,
        skills: &'a SkillBlock,
    ) -> impl Iterator<Item = (&'a str, &'a SpellDef)> + 'a {
        self.spells
            .iter()
            .filter(move |(_, spell)| skills.get(spell.skill).level >= spell.level)
            .map(|(key, spell)| (key.as_str(), spell))
    }

    /// Zones listed as enabled in the game definition.
    pub fn enabled_zones(&self) -> impl Iterator<Item = (&str, &ZoneDef)> {
        self.zones
            .iter()
            .filter(|(key, _)| self.game.zones.get(*key).is_none_or(|info| info.enabled))
            .map(|(key, zone)| (key.as_str(), zone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Skill;

    #[test]
    fn item_kinds_map_to_slots() {
        assert_eq!(ItemKind::Helmet.slot(), Some(EquipSlot::Head));
        assert_eq!(ItemKind::Armour.slot(), Some(EquipSlot::Torso));
        assert_eq!(ItemKind::Boots.slot(), Some(EquipSlot::Legs));
        assert_eq!(ItemKind::Ranged.slot(), Some(EquipSlot::Hands));
        assert_eq!(ItemKind::Misc.slot(), None);
    }

    #[test]
    fn unknown_keys_surface_as_definition_errors() {
        let defs = Definitions::default();
        assert_eq!(
            defs.npc("blob"),
            Err(DefinitionError::UnknownNpc("blob".into()))
        );
    }

    #[test]
    fn field_values_follow_the_schema() {
        let sign = EntityDef {
            default_name: "Sign".into(),
            fields: vec![FieldDef {
                name: "text".into(),
                kind: FieldKind::String,
                exported: true,
            }],
            ..EntityDef::default()
        };
        let mut fields = BTreeMap::new();
        fields.insert("text".to_owned(), FieldValue::Str("hello".into()));
        assert!(sign.validate_fields("sign", &fields).is_ok());

        fields.insert("text".to_owned(), FieldValue::Int(3));
        assert!(sign.validate_fields("sign", &fields).is_err());

        assert_eq!(
            FieldValue::from_param(FieldKind::Int, &ParamValue::Str(" 7".into())),
            Some(FieldValue::Int(7))
        );
        assert_eq!(
            FieldValue::from_param(FieldKind::Int, &ParamValue::Bool(true)),
            None
        );
    }

    #[test]
    fn zone_rows_override_the_fill() {
        let zone = ZoneDef {
            width: 3,
            height: 2,
            fill: "grass".into(),
            legend: [("#".to_owned(), "wall".to_owned())].into_iter().collect(),
            rows: vec!["#..".into()],
            ..ZoneDef::default()
        };
        assert_eq!(zone.tile_at(Position::new(0, 0)), Some("wall"));
        assert_eq!(zone.tile_at(Position::new(1, 0)), Some("grass"));
        assert_eq!(zone.tile_at(Position::new(2, 1)), Some("grass"));
        assert_eq!(zone.tile_at(Position::new(3, 0)), None);
        assert_eq!(zone.tile_at(Position::new(-1, 0)), None);
    }

    #[test]
    fn spells_are_gated_by_skill_level() {
        let mut defs = Definitions::default();
        for (key, level) in [("spark", 1), ("meteor", 10)] {
            defs.spells.insert(
                key.to_owned(),
                SpellDef {
                    name: key.to_owned(),
                    skill: SkillKind::Magic,
                    level,
                    cost: 2,
                    effects: Vec::new(),
                },
            );
        }
        let skills = SkillBlock {
            magic: Skill::new(4),
            ..SkillBlock::default()
        };
        let known: Vec<&str> = defs.spells_for(&skills).map(|(key, _)| key).collect();
        assert_eq!(known, vec!["spark"]);
    }
}
