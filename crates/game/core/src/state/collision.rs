//! Per-zone passability lookup.
//!
//! Rebuilt from scratch whenever tiles, blocking entities or NPCs change. The
//! map records the set of walkable cells; anything outside it, including every
//! coordinate beyond the painted area, is blocked.

use std::collections::HashSet;

use super::{Position, ZoneMap};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionMap {
    open: HashSet<Position>,
}

impl CollisionMap {
    /// Seeds the map from tile blocking flags.
    pub fn from_tiles(map: &ZoneMap) -> Self {
        let open = map
            .iter()
            .filter(|(_, tile)| !tile.blocking)
            .map(|(position, _)| position)
            .collect();
        Self { open }
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        !self.open.contains(&position)
    }

    pub fn block(&mut self, position: Position) {
        self.open.remove(&position);
    }

    pub fn block_all(&mut self, cells: impl IntoIterator<Item = Position>) {
        for cell in cells {
            self.open.remove(&cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_field(width: i32, height: i32) -> ZoneMap {
        let mut map = ZoneMap::default();
        for x in 0..width {
            for y in 0..height {
                map.set_tile(Position::new(x, y), "grass", false);
            }
        }
        map
    }

    #[test]
    fn tiles_seed_blocking_and_out_of_bounds_blocks() {
        let mut map = open_field(3, 3);
        map.set_tile(Position::new(1, 1), "rock", true);
        let collision = CollisionMap::from_tiles(&map);

        assert!(!collision.is_blocked(Position::new(0, 0)));
        assert!(collision.is_blocked(Position::new(1, 1)));
        assert!(collision.is_blocked(Position::new(-1, 0)));
        assert!(collision.is_blocked(Position::new(3, 0)));
    }

    #[test]
    fn footprints_and_occupants_block() {
        let mut collision = CollisionMap::from_tiles(&open_field(4, 4));
        collision.block_all([Position::new(0, 0), Position::new(1, 0)]);
        collision.block(Position::new(3, 3));

        assert!(collision.is_blocked(Position::new(1, 0)));
        assert!(collision.is_blocked(Position::new(3, 3)));
        assert!(!collision.is_blocked(Position::new(2, 2)));
    }
}
