//! Builds the initial world from stored records and zone definitions.
//!
//! Stored zones win over their definitions. Enabled zones with no stored
//! record are created fresh, together with their ground items.

use tracing::{info, warn};

use game_core::env::ZoneDef;
use game_core::{Definitions, Item, ItemState, WorldState, Zone, ZoneId};

use super::Stores;
use crate::api::{Result, RuntimeError};

pub(crate) fn load_world(
    defs: &Definitions,
    stores: &mut Stores,
    world_seed: u64,
    default_zone: Option<&str>,
) -> Result<WorldState> {
    let mut world = WorldState::new();

    for id in stores.zones.ids()? {
        match stores.zones.get(id) {
            Ok(Some(mut zone)) => {
                zone.rebuild_collision();
                world.insert_zone(zone);
            }
            Ok(None) => {}
            Err(error) => {
                warn!(target: "runtime::store", zone = %id, error = %error, "skipping unreadable zone");
            }
        }
    }

    for id in stores.items.ids()? {
        match stores.items.get(id) {
            Ok(Some(item)) => world.place_item(item),
            Ok(None) => {}
            Err(error) => {
                warn!(target: "runtime::store", item = %id, error = %error, "skipping unreadable item");
            }
        }
    }

    for (name, def) in defs.enabled_zones() {
        if world.zone_named(name).is_some() {
            continue;
        }
        let zone = create_zone(defs, stores, name, def, world_seed)?;
        info!(target: "runtime::coordinator", zone = %zone.id, name, "zone created from definition");
        world.insert_zone(zone);
    }

    let named = default_zone.unwrap_or(defs.game.starting_zone.as_str());
    let default = match world.zone_named(named) {
        Some(id) => id,
        None => {
            let fallback = world.zone_ids().first().copied().ok_or(RuntimeError::NoZones)?;
            warn!(
                target: "runtime::coordinator",
                requested = named,
                zone = %fallback,
                "default zone not found; using the first zone"
            );
            fallback
        }
    };
    world.set_default_zone(default);
    info!(
        target: "runtime::coordinator",
        zones = world.zone_ids().len(),
        default = %default,
        "world loaded"
    );
    Ok(world)
}

fn create_zone(
    defs: &Definitions,
    stores: &mut Stores,
    name: &str,
    def: &ZoneDef,
    world_seed: u64,
) -> Result<Zone> {
    let definition_error = |source| RuntimeError::ZoneDefinition {
        zone: name.to_owned(),
        source,
    };
    let id: ZoneId = stores.zones.allocate();
    let mut zone = Zone::from_def(id, name, def, defs, world_seed).map_err(definition_error)?;

    for placed in &def.items {
        let item_def = defs.item(&placed.kind).map_err(definition_error)?;
        let state = ItemState::Ground {
            zone: id,
            position: placed.position,
        };
        let (item_id, item) = stores
            .items
            .insert_new(|item| Item::from_def(item, &placed.kind, item_def, state));
        zone.items.insert(item_id, item);
    }
    stores.zones.set_dirty(id);
    Ok(zone)
}
