use std::collections::BTreeMap;

use super::*;
use crate::action::ActionKind;
use crate::combat::CombatantId;
use crate::config::GameConfig;
use crate::env::{
    Alignment, Definitions, EntityDef, EquipSlot, FieldDef, FieldKind, FieldValue, GameEnv,
    ItemDef, ItemKind, NpcDef, SpellDef, SpellEffectDef, TileDef,
};
use crate::params::ActionParams;
use crate::state::{
    ChangeSet, Direction, EntityId, Item, ItemId, ItemState, NpcId, Player, PlayerId, Position,
    Zone, ZoneFields, ZoneId,
};
use crate::stats::{SkillBlock, SkillKind, StatBlock};

const ANN: PlayerId = PlayerId(1);
const BOB: PlayerId = PlayerId(2);

pub(crate) struct Fixture {
    pub(crate) defs: Definitions,
    pub(crate) behaviors: BehaviorRegistry,
    pub(crate) config: GameConfig,
    pub(crate) zone: Zone,
    pub(crate) changes: ChangeSet,
}

impl Fixture {
    /// A 10x10 open field with a wall at (5,5).
    pub(crate) fn new() -> Self {
        let mut defs = Definitions::default();
        defs.tiles.insert("floor".into(), TileDef { blocking: false });
        defs.tiles.insert("wall".into(), TileDef { blocking: true });
        defs.npcs.insert(
            "dummy".into(),
            NpcDef {
                default_name: "Dummy".into(),
                alignment: Alignment::Hostile,
                logic: "idle".into(),
                skills: SkillBlock::uniform(1),
                slots: BTreeMap::new(),
            },
        );
        defs.npcs.insert(
            "blob".into(),
            NpcDef {
                default_name: "Blob".into(),
                alignment: Alignment::Hostile,
                logic: "blob".into(),
                skills: SkillBlock::uniform(1),
                slots: BTreeMap::new(),
            },
        );
        defs.npcs.insert(
            "cat".into(),
            NpcDef {
                default_name: "Cat".into(),
                logic: "idle".into(),
                skills: SkillBlock::uniform(1),
                ..NpcDef::default()
            },
        );
        defs.entities.insert(
            "door".into(),
            EntityDef {
                default_name: "Door".into(),
                usable: true,
                use_func: Some("door".into()),
                fields: vec![
                    field("zone", FieldKind::String),
                    field("x", FieldKind::Int),
                    field("y", FieldKind::Int),
                ],
                ..EntityDef::default()
            },
        );
        defs.entities.insert(
            "sign".into(),
            EntityDef {
                default_name: "Sign".into(),
                usable: true,
                use_func: Some("sign".into()),
                fields: vec![field("text", FieldKind::String)],
                ..EntityDef::default()
            },
        );
        defs.entities.insert(
            "statue".into(),
            EntityDef {
                default_name: "Statue".into(),
                blocking: true,
                ..EntityDef::default()
            },
        );
        defs.items.insert(
            "helm".into(),
            ItemDef {
                name: "Helm".into(),
                kind: ItemKind::Helmet,
                stats: StatBlock {
                    defence: 2,
                    ..StatBlock::default()
                },
                ..ItemDef::default()
            },
        );
        defs.spells.insert(
            "spark".into(),
            SpellDef {
                name: "Spark".into(),
                skill: SkillKind::Magic,
                level: 1,
                cost: 2,
                effects: vec![SpellEffectDef::Aoe {
                    effect: None,
                    damage: 500,
                    range: 1,
                    duration: 0,
                }],
            },
        );

        let mut zone = Zone::new(ZoneId(0), "field", 7);
        for x in 0..10 {
            for y in 0..10 {
                zone.map.set_tile(Position::new(x, y), "floor", false);
            }
        }
        zone.map.set_tile(Position::new(5, 5), "wall", true);
        zone.rebuild_collision();

        Self {
            defs,
            behaviors: BehaviorRegistry::with_defaults(),
            config: GameConfig::new(),
            zone,
            changes: ChangeSet::default(),
        }
    }

    pub(crate) fn engine(&mut self) -> ZoneEngine<'_> {
        ZoneEngine::new(
            &mut self.zone,
            GameEnv::new(&self.defs, &self.behaviors, &self.config),
            &mut self.changes,
        )
    }
}

fn field(name: &str, kind: FieldKind) -> FieldDef {
    FieldDef {
        name: name.into(),
        kind,
        exported: false,
    }
}

fn helm(fx: &Fixture, id: u32) -> Item {
    Item::from_def(
        ItemId(id),
        "helm",
        &fx.defs.items["helm"],
        ItemState::Ground {
            zone: ZoneId(0),
            position: Position::new(2, 3),
        },
    )
}

fn messages(engine: &mut ZoneEngine<'_>) -> Vec<String> {
    engine
        .zone
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            ZoneEvent::Message { text, .. } => Some(text),
            _ => None,
        })
        .collect()
}

/// Ann at (2,2) facing a dummy at (3,2); Ann holds the turn with the
/// announcement delay already played out.
fn duel(fx: &mut Fixture) -> NpcId {
    let mut engine = fx.engine();
    engine.add_player(Player::new(ANN, "ann"), Some(Position::new(2, 2)));
    let dummy = engine
        .spawn_npc("dummy", None, Position::new(3, 2))
        .expect("free cell");
    engine.begin_combat([
        (CombatantId::Player(ANN), 20_000),
        (CombatantId::Npc(dummy), 15_000),
    ]);
    assert_eq!(engine.zone().combat.current(), Some(CombatantId::Player(ANN)));
    assert!(!engine.can_act(ANN));
    engine.tick();
    engine.tick();
    assert!(engine.can_act(ANN));
    dummy
}

#[test]
fn combat_follows_players_and_hostiles() {
    let mut fx = Fixture::new();
    let mut engine = fx.engine();

    engine.add_player(Player::new(ANN, "ann"), Some(Position::new(1, 1)));
    assert!(!engine.zone().combat.in_combat);

    engine.spawn_npc("cat", None, Position::new(8, 8)).expect("free");
    assert!(!engine.zone().combat.in_combat);

    let dummy = engine.spawn_npc("dummy", None, Position::new(7, 7)).expect("free");
    assert!(engine.zone().combat.in_combat);
    assert_eq!(engine.zone().combat.queue.len(), 3);

    engine.remove_player(ANN).expect("resident");
    assert!(!engine.zone().combat.in_combat);
    assert!(engine.zone().combat.queue.is_empty());

    engine.add_player(Player::new(ANN, "ann"), None);
    assert!(engine.zone().combat.in_combat);

    engine.remove_npc(dummy).expect("present");
    assert!(!engine.zone().combat.in_combat);
}

#[test]
fn melee_kill_spawns_corpse_and_ends_combat() {
    let mut fx = Fixture::new();
    let dummy = duel(&mut fx);
    let mut engine = fx.engine();
    engine.zone.npcs.get_mut(&dummy).expect("dummy").hp = 1;
    engine.zone.drain_events();

    engine.attack_melee(ANN, dummy).expect("ann may attack");

    assert!(!engine.zone().npcs.contains_key(&dummy));
    let corpse = engine
        .zone()
        .entities
        .values()
        .find(|entity| entity.is_corpse())
        .expect("corpse");
    assert_eq!(corpse.position, Position::new(3, 2));
    assert!(!engine.zone().combat.in_combat);
    assert!(engine.zone().combat.queue.is_empty());
    assert!(messages(&mut engine).iter().any(|text| text.starts_with("ann attacked Dummy for ")));
}

#[test]
fn melee_kill_outside_combat_leaves_a_corpse() {
    let mut fx = Fixture::new();
    let mut engine = fx.engine();
    engine.add_player(Player::new(ANN, "ann"), Some(Position::new(2, 2)));
    let cat = engine.spawn_npc("cat", None, Position::new(3, 2)).expect("free");
    assert!(!engine.zone().combat.in_combat);
    engine.zone.npcs.get_mut(&cat).expect("cat").hp = 1;

    engine.attack_melee(ANN, cat).expect("ann may attack");

    assert!(!engine.zone().npcs.contains_key(&cat));
    let corpse = engine
        .zone()
        .entities
        .values()
        .find(|entity| entity.is_corpse())
        .expect("corpse");
    assert_eq!(corpse.position, Position::new(3, 2));
    assert!(!engine.zone().combat.in_combat);
    assert!(messages(&mut engine).iter().any(|text| text == "Cat died"));
}

#[test]
fn surviving_target_takes_the_next_turn() {
    let mut fx = Fixture::new();
    let dummy = duel(&mut fx);
    let mut engine = fx.engine();
    engine.zone.npcs.get_mut(&dummy).expect("dummy").hp = 1_000;
    engine.zone.players.get_mut(&ANN).expect("ann").ap = 1;
    engine.zone.drain_events();

    engine.attack_melee(ANN, dummy).expect("ann may attack");

    let dealt = 1_000 - engine.zone().npcs[&dummy].hp;
    assert!(dealt > 0);
    assert!(
        messages(&mut engine)
            .iter()
            .any(|text| text.contains(&format!("for {dealt} damage")))
    );
    assert_eq!(engine.zone().players[&ANN].ap, 0);
    assert_eq!(engine.zone().combat.current(), Some(CombatantId::Npc(dummy)));
    assert_eq!(engine.zone().combat.delay, GameConfig::DEFAULT_NEXT_TURN_DELAY);
}

#[test]
fn last_ap_move_passes_the_turn() {
    let mut fx = Fixture::new();
    let dummy = duel(&mut fx);
    let mut engine = fx.engine();
    engine.zone.players.get_mut(&ANN).expect("ann").ap = 1;

    engine.move_player(ANN, Direction::North).expect("free cell");

    let ann = &engine.zone().players[&ANN];
    assert_eq!(ann.position, Position::new(2, 3));
    assert_eq!(ann.ap, 0);
    assert_eq!(engine.zone().combat.current(), Some(CombatantId::Npc(dummy)));
}

#[test]
fn out_of_turn_actions_change_nothing() {
    let mut fx = Fixture::new();
    let dummy = duel(&mut fx);
    let mut engine = fx.engine();
    engine.add_player(Player::new(BOB, "bob"), Some(Position::new(2, 4)));
    let defs = engine.env().defs;
    let zone_before = engine.zone().snapshot(defs);
    let ap_before = engine.zone().players[&BOB].ap;

    assert_eq!(
        engine.move_player(BOB, Direction::North),
        Err(ActionRejected::OutOfTurn)
    );
    assert_eq!(
        engine.attack_melee(BOB, dummy),
        Err(ActionRejected::NotAdjacent)
    );
    assert_eq!(engine.face(BOB, Direction::East), Err(ActionRejected::OutOfTurn));

    assert_eq!(engine.zone().players[&BOB].ap, ap_before);
    assert_eq!(engine.zone().snapshot(defs), zone_before);
}

#[test]
fn late_arrival_goes_to_the_back() {
    let mut fx = Fixture::new();
    let dummy = duel(&mut fx);
    let mut engine = fx.engine();

    engine.add_player(Player::new(BOB, "bob"), Some(Position::new(8, 8)));
    engine.add_player(Player::new(BOB, "bob"), Some(Position::new(8, 8)));

    let order: Vec<CombatantId> = engine.zone().combat.queue.iter().map(|(id, _)| id).collect();
    assert_eq!(
        order,
        vec![
            CombatantId::Player(ANN),
            CombatantId::Npc(dummy),
            CombatantId::Player(BOB),
        ]
    );
    assert_eq!(engine.zone().players.len(), 2);
}

#[test]
fn spell_damage_lands_on_tick_and_leaves_a_corpse() {
    let mut fx = Fixture::new();
    let dummy = duel(&mut fx);
    let mut engine = fx.engine();

    engine
        .cast_spell(ANN, "spark", Position::new(3, 2))
        .expect("castable");
    assert!(engine.zone().npcs.contains_key(&dummy));
    assert!(engine.zone().sequence.is_playing());
    assert!(!engine.can_act(ANN));

    engine.tick();

    assert!(!engine.zone().npcs.contains_key(&dummy));
    assert!(engine.zone().entities.values().any(|entity| entity.is_corpse()));
    assert!(!engine.zone().combat.in_combat);
    assert!(!engine.zone().sequence.is_playing());
}

#[test]
fn locked_spells_are_refused() {
    let mut fx = Fixture::new();
    fx.defs.spells.get_mut("spark").expect("spark").level = 5;
    let _ = duel(&mut fx);
    let mut engine = fx.engine();
    let ap = engine.zone().players[&ANN].ap;

    assert_eq!(
        engine.cast_spell(ANN, "spark", Position::new(3, 2)),
        Err(ActionRejected::SpellLocked("spark".into()))
    );
    assert_eq!(engine.zone().players[&ANN].ap, ap);
    assert!(!engine.zone().sequence.is_playing());
}

#[test]
fn turn_times_out_without_input() {
    let mut fx = Fixture::new();
    fx.config.turn_timeout = 3;
    let dummy = duel(&mut fx);
    let mut engine = fx.engine();

    engine.tick();
    engine.tick();
    assert_eq!(engine.zone().combat.current(), Some(CombatantId::Player(ANN)));
    engine.tick();
    assert_eq!(engine.zone().combat.current(), Some(CombatantId::Npc(dummy)));
}

#[test]
fn blob_hits_an_adjacent_player_and_hands_back_the_turn() {
    let mut fx = Fixture::new();
    let mut engine = fx.engine();
    engine.add_player(Player::new(ANN, "ann"), Some(Position::new(2, 2)));
    let blob = engine.spawn_npc("blob", None, Position::new(3, 3)).expect("free");
    engine.zone.players.get_mut(&ANN).expect("ann").hp = 1_000;
    engine.begin_combat([
        (CombatantId::Npc(blob), 20_000),
        (CombatantId::Player(ANN), 15_000),
    ]);
    engine.zone.drain_events();

    for _ in 0..GameConfig::DEFAULT_COMBAT_START_DELAY {
        engine.tick();
    }
    engine.tick();

    assert!(messages(&mut engine).iter().any(|text| text.starts_with("Blob attacked ann")));
    assert_eq!(engine.zone().combat.current(), Some(CombatantId::Player(ANN)));
    assert_eq!(engine.zone().combat.turn(), 1);
    let ann = &engine.zone().players[&ANN];
    assert_eq!(ann.ap, ann.stats.max_ap);
}

#[test]
fn ap_gate_refuses_without_spending() {
    let mut fx = Fixture::new();
    let mut engine = fx.engine();
    engine.add_player(Player::new(ANN, "ann"), Some(Position::new(2, 2)));
    engine.zone.players.get_mut(&ANN).expect("ann").ap = 0;

    assert_eq!(
        engine.move_player(ANN, Direction::East),
        Err(ActionRejected::InsufficientAp {
            cost: 1,
            available: 0
        })
    );
    assert_eq!(engine.zone().players[&ANN].position, Position::new(2, 2));

    engine.zone.players.get_mut(&ANN).expect("ann").editing = true;
    assert_eq!(engine.check_ap_cost(ANN, 50), Ok(0));
    engine.move_player(ANN, Direction::East).expect("editors pay nothing");
    assert_eq!(engine.zone().players[&ANN].ap, 0);
}

#[test]
fn movement_respects_collision_unless_editing() {
    let mut fx = Fixture::new();
    let mut engine = fx.engine();
    engine.add_player(Player::new(ANN, "ann"), Some(Position::new(4, 5)));
    engine.add_player(Player::new(BOB, "bob"), Some(Position::new(4, 6)));

    assert_eq!(
        engine.move_player(ANN, Direction::East),
        Err(ActionRejected::Blocked(Position::new(5, 5)))
    );
    assert_eq!(
        engine.move_player(ANN, Direction::North),
        Err(ActionRejected::Blocked(Position::new(4, 6)))
    );

    engine.zone.players.get_mut(&ANN).expect("ann").editing = true;
    engine.move_player(ANN, Direction::East).expect("noclip");
    assert_eq!(engine.zone().players[&ANN].position, Position::new(5, 5));
}

#[test]
fn regen_marks_only_real_changes() {
    let mut fx = Fixture::new();
    {
        let mut engine = fx.engine();
        engine.add_player(Player::new(ANN, "ann"), Some(Position::new(1, 1)));
        let ann = engine.zone.players.get_mut(&ANN).expect("ann");
        ann.hp -= 1;
        ann.timers.hp = 1;
    }
    fx.changes.take();

    fx.engine().tick();
    assert_eq!(fx.zone.players[&ANN].hp, fx.zone.players[&ANN].stats.max_hp);
    assert!(fx.changes.players.contains(&ANN));
    assert!(fx.changes.zone(ZoneId(0)).contains(ZoneFields::RESIDENTS));

    fx.changes.take();
    fx.engine().tick();
    assert!(fx.changes.is_empty());
}

#[test]
fn items_move_between_ground_inventory_and_slots() {
    let mut fx = Fixture::new();
    let first = helm(&fx, 1);
    let second = helm(&fx, 2);
    let mut engine = fx.engine();
    engine.add_player(Player::new(ANN, "ann"), Some(Position::new(2, 2)));
    engine.zone.items.insert(first.id, first);
    engine.zone.items.insert(second.id, second);
    let base = engine.zone().players[&ANN].stats.defence;

    engine.take_item(ANN, ItemId(1)).expect("adjacent");
    engine.take_item(ANN, ItemId(2)).expect("adjacent");
    assert!(engine.zone().items.is_empty());

    engine.equip_item(ANN, ItemId(1)).expect("helmet");
    assert_eq!(engine.zone().players[&ANN].stats.defence, base + 2);

    engine.equip_item(ANN, ItemId(2)).expect("helmet");
    let ann = &engine.zone().players[&ANN];
    assert_eq!(ann.inventory[&ItemId(1)].slot(), None);
    assert_eq!(ann.inventory[&ItemId(2)].slot(), Some(EquipSlot::Head));
    assert_eq!(ann.stats.defence, base + 2);

    engine.unequip_item(ANN, EquipSlot::Head).expect("equipped");
    assert_eq!(engine.zone().players[&ANN].stats.defence, base);
    assert_eq!(
        engine.unequip_item(ANN, EquipSlot::Head),
        Err(ActionRejected::EmptySlot(EquipSlot::Head))
    );

    engine.drop_item(ANN, ItemId(2)).expect("held");
    assert_eq!(
        engine.zone().items[&ItemId(2)].ground_position(),
        Some(Position::new(2, 2))
    );
    assert!(engine.zone().players[&ANN].inventory.contains_key(&ItemId(1)));
}

#[test]
fn doors_hand_the_player_to_the_coordinator() {
    let mut fx = Fixture::new();
    let mut engine = fx.engine();
    engine.add_player(Player::new(ANN, "ann"), Some(Position::new(2, 2)));
    let door = engine
        .add_entity(
            "door",
            None,
            Position::new(2, 3),
            [
                ("zone".to_owned(), FieldValue::Str("cave".into())),
                ("x".to_owned(), FieldValue::Int(4)),
                ("y".to_owned(), FieldValue::Int(1)),
            ]
            .into_iter()
            .collect(),
        )
        .expect("valid door");

    engine.use_entity(ANN, door).expect("adjacent door");

    assert!(engine.zone().players.is_empty());
    let events = engine.zone.drain_events();
    assert!(matches!(
        events.as_slice(),
        [ZoneEvent::Transfer { player, zone: ZoneRef::Name(name), position: Some(position) }]
            if player.id == ANN && name == "cave" && *position == Position::new(4, 1)
    ));
}

#[test]
fn signs_without_text_refund_the_action() {
    let mut fx = Fixture::new();
    let mut engine = fx.engine();
    engine.add_player(Player::new(ANN, "ann"), Some(Position::new(2, 2)));
    let sign = engine
        .add_entity("sign", None, Position::new(3, 3), BTreeMap::new())
        .expect("valid sign");
    let ap = engine.zone().players[&ANN].ap;

    assert!(matches!(
        engine.use_entity(ANN, sign),
        Err(ActionRejected::Behavior(BehaviorError::MissingField { field: "text", .. }))
    ));
    assert_eq!(engine.zone().players[&ANN].ap, ap);

    engine
        .zone
        .entities
        .get_mut(&sign)
        .expect("sign")
        .fields
        .insert("text".into(), FieldValue::Str("beware".into()));
    engine.use_entity(ANN, sign).expect("readable");
    assert_eq!(messages(&mut engine), vec!["beware".to_owned()]);
}

#[test]
fn edits_need_editing_mode_and_valid_fields() {
    let mut fx = Fixture::new();
    let mut engine = fx.engine();
    engine.add_player(Player::new(ANN, "ann"), Some(Position::new(2, 2)));
    let wall = ActionParams::new()
        .with("type", "tile")
        .with("x", 1)
        .with("y", 1)
        .with("tile", "wall");

    assert_eq!(engine.edit(ANN, &wall), Err(ActionRejected::NotEditing));
    engine
        .edit(ANN, &ActionParams::new().with("type", "enable"))
        .expect("enable is always allowed");
    engine.edit(ANN, &wall).expect("editing");
    assert!(engine.zone().collision.is_blocked(Position::new(1, 1)));

    engine
        .edit(
            ANN,
            &ActionParams::new()
                .with("type", "entity_create")
                .with("ent", "sign")
                .with("x", 6)
                .with("y", 6),
        )
        .expect("known entity");
    let sign = *engine.zone().entities.keys().next().expect("sign");

    let bad = ActionParams::new()
        .with("type", "entity_edit")
        .with("ent", i64::from(sign.0))
        .with("name", "Notice")
        .with("x", 7)
        .with("y", 7)
        .with("rotation", 90)
        .with("f_colour", "red");
    assert!(matches!(
        engine.edit(ANN, &bad),
        Err(ActionRejected::Definition(_))
    ));
    assert_eq!(engine.zone().entities[&sign].position, Position::new(6, 6));

    let good = ActionParams::new()
        .with("type", "entity_edit")
        .with("ent", i64::from(sign.0))
        .with("name", "")
        .with("x", 7)
        .with("y", 7)
        .with("rotation", 90)
        .with("f_text", "hello");
    engine.edit(ANN, &good).expect("valid edit");
    let edited = &engine.zone().entities[&sign];
    assert_eq!(edited.name, "Sign");
    assert_eq!(edited.position, Position::new(7, 7));
    assert_eq!(edited.field_str("text"), Some("hello"));
}

#[test]
fn clear_corpses_removes_only_corpses() {
    let mut fx = Fixture::new();
    let mut engine = fx.engine();
    engine.add_player(Player::new(ANN, "ann"), Some(Position::new(2, 2)));
    engine.zone.players.get_mut(&ANN).expect("ann").editing = true;
    engine
        .add_entity("statue", None, Position::new(8, 1), BTreeMap::new())
        .expect("statue");
    let dummy = engine.spawn_npc("dummy", None, Position::new(8, 8)).expect("free");
    engine.zone.npcs.get_mut(&dummy).expect("dummy").hp = 0;
    engine.check_alive();
    assert_eq!(engine.zone().entities.len(), 2);

    engine
        .edit(ANN, &ActionParams::new().with("type", "clear_corpses"))
        .expect("editing");
    let kinds: Vec<&str> = engine
        .zone()
        .entities
        .values()
        .map(|entity| entity.kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["statue"]);
}

#[test]
fn dead_players_leave_the_zone_with_a_corpse() {
    let mut fx = Fixture::new();
    let dummy = duel(&mut fx);
    let mut engine = fx.engine();
    engine.zone.players.get_mut(&ANN).expect("ann").hp = 0;
    engine.zone.drain_events();

    engine.check_alive();
    engine.check_combat();

    assert!(engine.zone().players.is_empty());
    assert!(!engine.zone().combat.in_combat);
    assert!(engine.zone().npcs.contains_key(&dummy));
    assert!(
        engine
            .zone
            .drain_events()
            .iter()
            .any(|event| matches!(event, ZoneEvent::PlayerDied(player) if player.id == ANN))
    );
}

#[test]
fn perform_parses_wire_params() {
    let mut fx = Fixture::new();
    let mut engine = fx.engine();
    engine.add_player(Player::new(ANN, "ann"), Some(Position::new(2, 2)));

    engine
        .perform(ANN, ActionKind::Move, &ActionParams::new().with("direction", "N"))
        .expect("valid move");
    assert_eq!(engine.zone().players[&ANN].position, Position::new(2, 3));

    assert_eq!(
        engine.perform(ANN, ActionKind::Move, &ActionParams::new()),
        Err(ActionRejected::MissingParam("direction"))
    );
    assert_eq!(
        engine.perform(ANN, ActionKind::Face, &ActionParams::new().with("direction", "up")),
        Err(ActionRejected::InvalidParam("direction"))
    );
    assert_eq!(
        engine.perform(ANN, ActionKind::Use, &ActionParams::new().with("id", -3)),
        Err(ActionRejected::InvalidParam("id"))
    );
    assert_eq!(
        engine.perform(ANN, ActionKind::Attack, &ActionParams::new().with("mode", "kick")),
        Err(ActionRejected::InvalidParam("mode"))
    );
    assert_eq!(
        engine.perform(ANN, ActionKind::Use, &ActionParams::new().with("id", 40)),
        Err(ActionRejected::UnknownEntity(EntityId(40)))
    );
}
