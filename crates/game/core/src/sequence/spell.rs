//! Turns spell definitions into playable sequences.

use super::Sequence;
use crate::combat::{CombatantId, DamageInfo};
use crate::env::{SpellDef, SpellEffectDef};
use crate::state::{NpcId, Position};

/// Builds the sequence for `caster` casting `spell` at `target`.
///
/// Area effects pick every NPC within Euclidean range of `target` at cast
/// time; the damage itself lands when the step plays. The accompanying visual
/// covers each grid cell with `dx² + dy² <= range²`, and only the last cell
/// carries the effect duration so the whole circle appears at once.
pub fn cast_spell(
    spell: &SpellDef,
    caster: CombatantId,
    target: Position,
    npcs: &[(NpcId, Position)],
) -> Sequence {
    let mut sequence = Sequence::new();
    for effect in &spell.effects {
        match effect {
            SpellEffectDef::Effect { effect, duration } => {
                sequence.add_effect(effect.clone(), target, Some(caster), *duration);
            }
            SpellEffectDef::Aoe {
                effect,
                damage,
                range,
                duration,
            } => {
                let reach = i64::from(*range) * i64::from(*range);
                for (id, position) in npcs {
                    if position.distance_squared(target) <= reach {
                        sequence.add_damage(
                            CombatantId::Npc(*id),
                            DamageInfo::magic(*damage),
                            Some(caster),
                        );
                    }
                }
                if let Some(name) = effect {
                    let cells = circle_cells(target, *range);
                    let last = cells.len().saturating_sub(1);
                    for (index, cell) in cells.into_iter().enumerate() {
                        let ticks = if index == last { *duration } else { 0 };
                        sequence.add_effect(name.clone(), cell, Some(caster), ticks);
                    }
                }
            }
        }
    }
    sequence
}

/// Filled-circle rasterisation around `center`.
fn circle_cells(center: Position, range: u32) -> Vec<Position> {
    let radius = i32::try_from(range).unwrap_or(i32::MAX);
    let reach = i64::from(radius) * i64::from(radius);
    let mut cells = Vec::new();
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            if i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy) > reach {
                continue;
            }
            if let (Some(x), Some(y)) = (center.x.checked_add(dx), center.y.checked_add(dy)) {
                cells.push(Position::new(x, y));
            }
        }
    }
    cells
}
