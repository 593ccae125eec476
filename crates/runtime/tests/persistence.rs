mod common;

use common::*;
use game_core::env::EquipSlot;
use game_core::{ActionKind, ActionParams, ItemState, Position};
use runtime::{Repositories, Repository};
use tempfile::TempDir;

#[tokio::test]
async fn world_survives_a_restart_from_json_files() {
    let save_dir = TempDir::new().unwrap();
    let defs = definitions();

    let runtime = start(defs.clone(), Repositories::json_files(save_dir.path()).unwrap()).await;
    let handle = runtime.handle();
    handle.send(join(ANN, "ann")).unwrap();
    let town = handle.zone_named("town").await.unwrap().unwrap();
    let helm = handle.zone_snapshot(town).await.unwrap().unwrap().items[0].id;
    for (kind, params) in [
        (ActionKind::TakeItem, ActionParams::new().with("id", i64::from(helm.0))),
        (ActionKind::EquipItem, ActionParams::new().with("id", i64::from(helm.0))),
        (ActionKind::Move, ActionParams::new().with("direction", "E")),
    ] {
        handle.send(message(ANN, kind, params)).unwrap();
    }
    runtime.shutdown().await.unwrap();

    let repositories = Repositories::json_files(save_dir.path()).unwrap();
    assert_eq!(repositories.zones.list_ids().unwrap().len(), 2);
    let stored = repositories.items.load(helm).unwrap().expect("helm saved");
    assert!(matches!(
        stored.state,
        ItemState::Held { owner, slot: Some(EquipSlot::Head) } if owner == ANN
    ));

    let runtime = start(defs, repositories).await;
    let handle = runtime.handle();
    assert_eq!(handle.zone_named("town").await.unwrap(), Some(town));
    assert!(handle.zone_snapshot(town).await.unwrap().unwrap().items.is_empty());

    handle.send(join(ANN, "someone else")).unwrap();
    let detail = handle.player_detail(ANN).await.unwrap().unwrap();
    assert_eq!(detail.player.name, "ann");
    assert_eq!(detail.player.position, Position::new(2, 1));
    assert_eq!(detail.inventory.len(), 1);
    assert_eq!(detail.stats.defence, 8);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn zones_and_items_are_created_once() {
    let repositories = Repositories::in_memory();
    let defs = definitions();

    let runtime = start(defs.clone(), repositories.clone()).await;
    runtime.shutdown().await.unwrap();
    assert_eq!(repositories.zones.list_ids().unwrap().len(), 2);
    assert_eq!(repositories.items.list_ids().unwrap().len(), 1);

    let runtime = start(defs, repositories.clone()).await;
    runtime.shutdown().await.unwrap();
    assert_eq!(repositories.zones.list_ids().unwrap().len(), 2);
    assert_eq!(repositories.items.list_ids().unwrap().len(), 1);
}

#[tokio::test]
async fn edits_are_persisted_with_the_zone() {
    let repositories = Repositories::in_memory();
    let runtime = start(definitions(), repositories.clone()).await;
    let handle = runtime.handle();
    handle.send(join(ANN, "ann")).unwrap();
    handle
        .send(message(ANN, ActionKind::Edit, ActionParams::new().with("type", "enable")))
        .unwrap();
    handle
        .send(message(
            ANN,
            ActionKind::Edit,
            ActionParams::new()
                .with("type", "tile")
                .with("tile", "wall")
                .with("x", 4)
                .with("y", 4),
        ))
        .unwrap();
    handle.flush().await.unwrap();

    let town = handle.zone_named("town").await.unwrap().unwrap();
    let stored = repositories.zones.load(town).unwrap().unwrap();
    assert_eq!(
        stored.map.tile(Position::new(4, 4)).map(|tile| tile.kind.as_str()),
        Some("wall")
    );

    runtime.shutdown().await.unwrap();
}
