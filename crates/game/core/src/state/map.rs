//! Sparse tile map.
//!
//! Tiles are stored per coordinate, so a zone may grow in any direction when
//! tiles are painted outside its original rectangle. A coordinate without a
//! tile is impassable.

use std::collections::HashMap;

use super::Position;
use crate::env::{DefinitionError, Definitions, ZoneDef};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Tile definition key.
    pub kind: String,
    pub blocking: bool,
}

/// Serialised form of a single map cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedTile {
    pub x: i32,
    pub y: i32,
    pub tile: String,
    pub blocking: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<PlacedTile>", into = "Vec<PlacedTile>")
)]
pub struct ZoneMap {
    tiles: HashMap<Position, Tile>,
    bounds: Option<(Position, Position)>,
}

impl ZoneMap {
    /// Lays out a zone from its definition.
    pub fn from_def(def: &ZoneDef, defs: &Definitions) -> Result<Self, DefinitionError> {
        let mut map = Self::default();
        for y in 0..def.height {
            for x in 0..def.width {
                let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
                    continue;
                };
                let position = Position::new(x, y);
                if let Some(key) = def.tile_at(position) {
                    let tile = defs.tile(key)?;
                    map.set_tile(position, key, tile.blocking);
                }
            }
        }
        Ok(map)
    }

    pub fn set_tile(&mut self, position: Position, kind: &str, blocking: bool) {
        self.tiles.insert(
            position,
            Tile {
                kind: kind.to_owned(),
                blocking,
            },
        );
        self.bounds = Some(match self.bounds {
            None => (position, position),
            Some((min, max)) => (
                Position::new(min.x.min(position.x), min.y.min(position.y)),
                Position::new(max.x.max(position.x), max.y.max(position.y)),
            ),
        });
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    /// Missing tiles block.
    pub fn is_blocking(&self, position: Position) -> bool {
        self.tiles.get(&position).is_none_or(|tile| tile.blocking)
    }

    /// Inclusive bounding box of all painted tiles.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> {
        self.tiles.iter().map(|(position, tile)| (*position, tile))
    }

    /// Cells in row-major order, for stable output.
    pub fn placed(&self) -> Vec<PlacedTile> {
        let mut placed: Vec<PlacedTile> = self
            .iter()
            .map(|(position, tile)| PlacedTile {
                x: position.x,
                y: position.y,
                tile: tile.kind.clone(),
                blocking: tile.blocking,
            })
            .collect();
        placed.sort_by_key(|tile| (tile.y, tile.x));
        placed
    }
}

impl From<Vec<PlacedTile>> for ZoneMap {
    fn from(tiles: Vec<PlacedTile>) -> Self {
        let mut map = Self::default();
        for tile in tiles {
            map.set_tile(Position::new(tile.x, tile.y), &tile.tile, tile.blocking);
        }
        map
    }
}

impl From<ZoneMap> for Vec<PlacedTile> {
    fn from(map: ZoneMap) -> Self {
        map.placed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn painting_outside_grows_the_bounds() {
        let mut map = ZoneMap::default();
        map.set_tile(Position::new(0, 0), "grass", false);
        map.set_tile(Position::new(3, -2), "wall", true);

        assert_eq!(
            map.bounds(),
            Some((Position::new(0, -2), Position::new(3, 0)))
        );
        assert!(!map.is_blocking(Position::new(0, 0)));
        assert!(map.is_blocking(Position::new(3, -2)));
        assert!(map.is_blocking(Position::new(1, 1)));
    }

    #[test]
    fn placed_round_trips_through_vec() {
        let mut map = ZoneMap::default();
        map.set_tile(Position::new(1, 0), "grass", false);
        map.set_tile(Position::new(0, 0), "wall", true);
        let placed = map.placed();
        assert_eq!(placed[0].tile, "wall");
        assert_eq!(ZoneMap::from(placed), map);
    }
}
