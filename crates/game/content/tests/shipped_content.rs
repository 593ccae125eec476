use std::path::PathBuf;

use game_content::{ContentFactory, validate};
use game_core::BehaviorRegistry;

fn content_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../content")
}

#[test]
fn shipped_content_loads_and_validates() {
    let factory = ContentFactory::new(content_dir());
    let defs = factory.load_definitions().unwrap();
    validate(&defs, &BehaviorRegistry::with_defaults()).unwrap();

    assert_eq!(defs.game.starting_zone, "town");
    assert_eq!(defs.enabled_zones().count(), 2);
    assert_eq!(factory.load_config().unwrap().world_seed, 7);
}
