use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        impl $name {
            /// Converts an untrusted integer (e.g. from action params) into an id.
            pub fn from_param(raw: i64) -> Option<Self> {
                u32::try_from(raw).ok().map(Self)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a zone, allocated by the zone store.
    ZoneId
);
numeric_id!(
    /// Identifier of a player account.
    PlayerId
);
numeric_id!(
    /// Per-zone identifier of an NPC instance.
    NpcId
);
numeric_id!(
    /// Per-zone identifier of a static/interactive entity.
    EntityId
);
numeric_id!(
    /// Globally unique item identifier, allocated by the item store.
    ItemId
);

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Builds a position from untrusted integers, rejecting values outside `i32`.
    pub fn from_params(x: i64, y: i64) -> Option<Self> {
        Some(Self::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
    }

    /// Returns the neighbouring cell one step in `direction`.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
        ))
    }

    /// True when `other` is this cell or one of its eight neighbours.
    pub fn is_adjacent(self, other: Position) -> bool {
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).abs();
        dx <= 1 && dy <= 1
    }

    /// Squared euclidean distance, computed in `i64` so it never overflows.
    pub fn distance_squared(self, other: Position) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement/facing direction. `N` increases `y`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::EnumString,
    strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    #[strum(serialize = "N")]
    North,
    #[strum(serialize = "S")]
    South,
    #[strum(serialize = "E")]
    East,
    #[strum(serialize = "W")]
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}
