//! Damage rolls and defence mitigation.

use crate::env::Roller;
use crate::stats::StatBlock;

/// Damage school; decides how defence mitigates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DamageKind {
    Physical,
    Magic,
}

/// One packet of damage on its way to a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageInfo {
    pub amount: i32,
    pub crit: bool,
    pub kind: DamageKind,
}

impl DamageInfo {
    pub const fn magic(amount: i32) -> Self {
        Self {
            amount,
            crit: false,
            kind: DamageKind::Magic,
        }
    }
}

/// Rolls physical damage from the attacker's stats.
///
/// # Formula
///
/// ```text
/// variance = max(attack / 4, 2)
/// damage   = 1 + attack - variance + roll(0 .. 2 * variance)
/// crit     = roll(0 .. 100) <= critical_chance   (doubles damage)
/// ```
pub fn roll_physical(stats: &StatBlock, rolls: &mut impl Roller) -> DamageInfo {
    let crit = rolls.below(100) as i32 <= stats.critical_chance;
    let attack = stats.attack_phys.max(0);
    let variance = (attack / 4).max(2);
    let spread = rolls.below((variance * 2) as u32) as i32;

    let mut amount = (1 + attack - variance + spread).max(0);
    if crit {
        amount *= 2;
    }

    DamageInfo {
        amount,
        crit,
        kind: DamageKind::Physical,
    }
}

/// Applies the defender's mitigation to incoming damage.
///
/// Critical hits pass through untouched. Anything below a quarter of the
/// defender's defence is absorbed entirely; otherwise physical damage loses
/// `defence / 6` and magic damage loses `defence / 10 + attack_magic / 10`.
pub fn mitigate(defender: &StatBlock, damage: DamageInfo) -> DamageInfo {
    if damage.crit {
        return damage;
    }

    let defence = defender.defence.max(0);
    let amount = if damage.amount < defence / 4 {
        0
    } else {
        let reduction = match damage.kind {
            DamageKind::Physical => defence / 6,
            DamageKind::Magic => defence / 10 + defender.attack_magic.max(0) / 10,
        };
        (damage.amount - reduction).max(0)
    };

    DamageInfo { amount, ..damage }
}
