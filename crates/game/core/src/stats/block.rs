//! Derived stat block shared by players, NPCs and item bonuses.

use std::ops::{Add, AddAssign};

/// Combat stats derived from skills, plus additive gear bonuses.
///
/// Item definitions carry a (mostly zero) `StatBlock` of bonuses; equipping
/// an item adds it to the wearer's derived block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBlock {
    pub attack_phys: i32,
    pub attack_magic: i32,
    pub defence: i32,
    pub critical_chance: i32,
    pub speed: i32,
    pub max_hp: i32,
    pub max_ap: i32,
    pub max_mp: i32,
}

impl Add for StatBlock {
    type Output = StatBlock;

    fn add(mut self, rhs: StatBlock) -> StatBlock {
        self += rhs;
        self
    }
}

impl AddAssign for StatBlock {
    fn add_assign(&mut self, rhs: StatBlock) {
        self.attack_phys += rhs.attack_phys;
        self.attack_magic += rhs.attack_magic;
        self.defence += rhs.defence;
        self.critical_chance += rhs.critical_chance;
        self.speed += rhs.speed;
        self.max_hp += rhs.max_hp;
        self.max_ap += rhs.max_ap;
        self.max_mp += rhs.max_mp;
    }
}

impl<'a> std::iter::Sum<&'a StatBlock> for StatBlock {
    fn sum<I: Iterator<Item = &'a StatBlock>>(iter: I) -> Self {
        iter.fold(StatBlock::default(), |acc, block| acc + *block)
    }
}
