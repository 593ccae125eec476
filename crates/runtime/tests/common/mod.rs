//! Shared content and helpers for runtime integration tests.
#![allow(dead_code)]

use std::path::Path;

use game_content::ContentFactory;
use game_core::{ActionKind, ActionParams, Definitions, PlayerId};
use runtime::{IncomingMessage, OutgoingMessage, Runtime, RuntimeConfig, Repositories};
use tokio::sync::broadcast;

pub const ANN: PlayerId = PlayerId(1);
pub const BOB: PlayerId = PlayerId(2);

/// Town: 6x6 grass, spawn (1,1), a sign at (0,0), a door to the cave at
/// (0,2) and a helm on the ground at (2,2).
/// Cave: 4x4 grass with a hostile rat at (3,3).
pub fn write_content(dir: &Path) {
    let files = [
        ("game.toml", "starting_zone = \"town\"\n"),
        ("tiles.toml", "[grass]\n\n[wall]\nblocking = true\n"),
        (
            "entities.toml",
            r#"
[sign]
default_name = "Sign"
usable = true
use_func = "sign"
fields = [{ name = "text", kind = "string", exported = true }]

[door]
default_name = "Door"
usable = true
use_func = "door"
fields = [
    { name = "zone", kind = "string" },
    { name = "x", kind = "int" },
    { name = "y", kind = "int" },
]
"#,
        ),
        (
            "npcs.toml",
            r#"
[rat]
default_name = "Rat"
alignment = "hostile"
logic = "idle"
"#,
        ),
        (
            "items.toml",
            r#"
[iron_helm]
name = "Iron Helm"
type = "helmet"
stats = { defence = 2 }
"#,
        ),
        (
            "zones/town.toml",
            r#"
width = 6
height = 6
fill = "grass"
spawn = { x = 1, y = 1 }

[[entities]]
type = "sign"
position = { x = 0, y = 0 }
fields = { text = "Welcome to town" }

[[entities]]
type = "door"
position = { x = 0, y = 2 }
fields = { zone = "cave", x = 1, y = 1 }

[[items]]
type = "iron_helm"
position = { x = 2, y = 2 }
"#,
        ),
        (
            "zones/cave.toml",
            r#"
width = 4
height = 4
fill = "grass"

[[npcs]]
type = "rat"
position = { x = 3, y = 3 }
"#,
        ),
    ];
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}

pub fn definitions() -> Definitions {
    let dir = tempfile::tempdir().unwrap();
    write_content(dir.path());
    ContentFactory::new(dir.path()).load_definitions().unwrap()
}

/// Runtime without a ticker; tests drive ticks by hand.
pub async fn start(defs: Definitions, repositories: Repositories) -> Runtime {
    let config = RuntimeConfig {
        tick_interval: None,
        ..RuntimeConfig::default()
    };
    Runtime::builder()
        .config(config)
        .definitions(defs)
        .repositories(repositories)
        .build()
        .await
        .unwrap()
}

pub fn message(player: PlayerId, action: ActionKind, params: ActionParams) -> IncomingMessage {
    IncomingMessage::new(player, action, params)
}

pub fn join(player: PlayerId, name: &str) -> IncomingMessage {
    message(player, ActionKind::Join, ActionParams::new().with("name", name))
}

/// Everything published so far.
pub fn drain(rx: &mut broadcast::Receiver<OutgoingMessage>) -> Vec<OutgoingMessage> {
    let mut received = Vec::new();
    while let Ok(message) = rx.try_recv() {
        received.push(message);
    }
    received
}
