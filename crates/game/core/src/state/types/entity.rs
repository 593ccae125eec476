use std::collections::BTreeMap;

use super::{EntityId, Position};
use crate::env::{DefinitionError, EntityDef, FieldValue, Size};

/// Key of the built-in entity left behind when something dies.
pub const CORPSE: &str = "corpse";

/// A static or interactive object placed in a zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    /// Definition key, or [`CORPSE`].
    pub kind: String,
    pub name: String,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotation: i32,
    pub size: Size,
    pub blocking: bool,
    pub usable: bool,
    pub use_text: Option<String>,
    pub use_func: Option<String>,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Entity {
    /// Builds an entity from its template, validating instance fields.
    pub fn from_def(
        id: EntityId,
        key: &str,
        def: &EntityDef,
        name: Option<String>,
        position: Position,
        fields: BTreeMap<String, FieldValue>,
    ) -> Result<Self, DefinitionError> {
        def.validate_fields(key, &fields)?;
        Ok(Self {
            id,
            kind: key.to_owned(),
            name: name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| def.default_name.clone()),
            position,
            rotation: 0,
            size: def.size,
            blocking: def.blocking,
            usable: def.usable,
            use_text: def.use_text.clone(),
            use_func: def.use_func.clone(),
            fields,
        })
    }

    pub fn corpse(id: EntityId, of: &str, position: Position) -> Self {
        Self {
            id,
            kind: CORPSE.to_owned(),
            name: format!("{of} corpse"),
            position,
            rotation: 0,
            size: Size::UNIT,
            blocking: false,
            usable: false,
            use_text: None,
            use_func: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn is_corpse(&self) -> bool {
        self.kind == CORPSE
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::as_str)
    }

    pub fn field_int(&self, name: &str) -> Option<i64> {
        self.fields.get(name).and_then(FieldValue::as_int)
    }

    /// Every cell covered by the entity, anchored at its position.
    pub fn footprint(&self) -> impl Iterator<Item = Position> + '_ {
        let origin = self.position;
        (0..self.size.width).flat_map(move |dx| {
            (0..self.size.height).filter_map(move |dy| {
                let x = origin.x.checked_add(i32::try_from(dx).ok()?)?;
                let y = origin.y.checked_add(i32::try_from(dy).ok()?)?;
                Some(Position::new(x, y))
            })
        })
    }

    /// True if `position` touches any cell of the footprint.
    pub fn is_adjacent(&self, position: Position) -> bool {
        self.footprint().any(|cell| cell.is_adjacent(position))
    }
}
