//! Content loading for the zone server.
//!
//! Definitions live in a directory of TOML files:
//! - `game.toml`: starting zone and per-zone switches
//! - `tiles.toml`, `entities.toml`, `npcs.toml`, `items.toml`, `spells.toml`:
//!   one table per template, keyed by template id
//! - `zones/<name>.toml`: initial zone layouts
//! - `config.toml` (optional): tunables overriding [`GameConfig`](game_core::GameConfig)
//!
//! Everything is read once at startup into [`game_core::Definitions`], which is
//! never mutated afterwards.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, TableLoader, ZoneLoader, validate};
