/// Game configuration constants and tunable parameters.
///
/// Tick-based values are counted in zone ticks; AP costs are charged through
/// the single AP chokepoint in the zone engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Base seed mixed into every zone's roll stream.
    pub world_seed: u64,
    /// Ticks a player may hold the turn before it is passed on.
    pub turn_timeout: i32,
    /// Ticks between passive HP regeneration points.
    pub hp_regen_ticks: i32,
    /// Ticks between passive AP regeneration points.
    pub ap_regen_ticks: i32,
    /// Announcement delay queued when a zone enters combat.
    pub combat_start_delay: u32,
    /// Announcement delay queued whenever the turn passes.
    pub next_turn_delay: u32,
    /// Exclusive upper bound of the random initiative roll.
    pub initiative_roll: u32,
    /// Initiative added per point of player speed.
    pub speed_initiative_bonus: i64,
    /// Maximum decrements tried when resolving an initiative collision.
    pub tie_break_probes: u32,
    pub costs: ActionCosts,
}

/// AP charged per player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionCosts {
    pub movement: i32,
    pub use_entity: i32,
    pub take_item: i32,
    pub equip: i32,
    pub unequip: i32,
    pub drop_item: i32,
    pub melee: i32,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            movement: 1,
            use_entity: 1,
            take_item: 1,
            equip: 1,
            unequip: 1,
            drop_item: 0,
            melee: 1,
        }
    }
}

impl GameConfig {
    pub const DEFAULT_TURN_TIMEOUT: i32 = 120;
    pub const DEFAULT_HP_REGEN_TICKS: i32 = 8;
    pub const DEFAULT_AP_REGEN_TICKS: i32 = 1;
    pub const DEFAULT_COMBAT_START_DELAY: u32 = 2;
    pub const DEFAULT_NEXT_TURN_DELAY: u32 = 4;
    pub const DEFAULT_INITIATIVE_ROLL: u32 = 20_000;
    pub const DEFAULT_SPEED_INITIATIVE_BONUS: i64 = 100;
    pub const DEFAULT_TIE_BREAK_PROBES: u32 = 64;

    pub fn new() -> Self {
        Self {
            world_seed: 0,
            turn_timeout: Self::DEFAULT_TURN_TIMEOUT,
            hp_regen_ticks: Self::DEFAULT_HP_REGEN_TICKS,
            ap_regen_ticks: Self::DEFAULT_AP_REGEN_TICKS,
            combat_start_delay: Self::DEFAULT_COMBAT_START_DELAY,
            next_turn_delay: Self::DEFAULT_NEXT_TURN_DELAY,
            initiative_roll: Self::DEFAULT_INITIATIVE_ROLL,
            speed_initiative_bonus: Self::DEFAULT_SPEED_INITIATIVE_BONUS,
            tie_break_probes: Self::DEFAULT_TIE_BREAK_PROBES,
            costs: ActionCosts::default(),
        }
    }

    pub fn with_world_seed(world_seed: u64) -> Self {
        Self {
            world_seed,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
