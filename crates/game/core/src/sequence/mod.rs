//! Timed playback of multi-step effects.
//!
//! A [`Sequence`] is an ordered list of steps, each carrying a tick duration
//! and a payload. Driving it with [`Sequence::tick`] hands back the payloads
//! that became due this tick; the caller resolves them against the live zone,
//! so a damage target that has vanished in the meantime is simply skipped.
//!
//! Zero-duration steps are drained in the same pass as the step that follows
//! them. While any step remains queued the sequence reports itself as playing
//! and the zone is busy.

pub mod spell;

use crate::combat::{CombatantId, DamageInfo};
use crate::state::Position;

pub use spell::cast_spell;

/// Payload of a sequence step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepAction {
    /// Pure visual played on a combatant.
    Animation { name: String, target: CombatantId },
    /// Damage resolved against the target at apply time.
    Damage {
        target: CombatantId,
        damage: DamageInfo,
        source: Option<CombatantId>,
    },
    /// Visual effect at a grid position.
    Effect {
        name: String,
        position: Position,
        source: Option<CombatantId>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub duration: u32,
    pub action: StepAction,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    steps: Vec<Step>,
    index: usize,
    started: bool,
    timer: u32,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, duration: u32, action: StepAction) {
        self.steps.push(Step { duration, action });
    }

    pub fn add_damage(&mut self, target: CombatantId, damage: DamageInfo, source: Option<CombatantId>) {
        self.push(
            0,
            StepAction::Damage {
                target,
                damage,
                source,
            },
        );
    }

    pub fn add_animation(&mut self, name: impl Into<String>, target: CombatantId, duration: u32) {
        self.push(
            duration,
            StepAction::Animation {
                name: name.into(),
                target,
            },
        );
    }

    pub fn add_effect(
        &mut self,
        name: impl Into<String>,
        position: Position,
        source: Option<CombatantId>,
        duration: u32,
    ) {
        self.push(
            duration,
            StepAction::Effect {
                name: name.into(),
                position,
                source,
            },
        );
    }

    /// Appends the unplayed steps of `other`.
    pub fn append(&mut self, other: Sequence) {
        self.steps.extend(other.steps.into_iter().skip(other.index));
    }

    /// True while any step is still queued.
    pub fn is_playing(&self) -> bool {
        self.index < self.steps.len()
    }

    /// Sum of all step durations.
    pub fn total_duration(&self) -> u32 {
        self.steps.iter().map(|step| step.duration).sum()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Advances playback by one tick.
    ///
    /// Steps that start during this tick are pushed onto `due` in order.
    /// Returns `true` if the tick was consumed by playback, `false` once the
    /// sequence has run out (the sequence is then cleared).
    pub fn tick(&mut self, due: &mut Vec<StepAction>) -> bool {
        loop {
            let Some(step) = self.steps.get(self.index) else {
                self.reset();
                return false;
            };
            if !self.started {
                due.push(step.action.clone());
                self.started = true;
                self.timer = step.duration;
            }
            if self.timer == 0 {
                self.finish_step();
                continue;
            }
            self.timer -= 1;
            if self.timer == 0 {
                self.finish_step();
            }
            return true;
        }
    }

    fn finish_step(&mut self) {
        self.index += 1;
        self.started = false;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
