//! Leveled skills: the only stat data that is permanently stored.

use super::block::StatBlock;

/// XP required to gain one level; surplus carries over.
pub const XP_PER_LEVEL: i32 = 100;

/// A leveled counter with accumulating XP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Skill {
    pub level: i32,
    pub xp: i32,
}

impl Skill {
    pub const fn new(level: i32) -> Self {
        Self { level, xp: 0 }
    }

    /// Adds XP, converting every full [`XP_PER_LEVEL`] into a level.
    ///
    /// Returns the number of levels gained. Negative amounts are ignored.
    pub fn add_xp(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        self.xp = self.xp.saturating_add(amount);
        let gained = self.xp / XP_PER_LEVEL;
        self.level = self.level.saturating_add(gained);
        self.xp %= XP_PER_LEVEL;
        gained
    }
}

/// Which skill an XP award or a spell requirement refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum SkillKind {
    Attack,
    Defence,
    Speed,
    Magic,
}

/// The full set of skills carried by players and NPC templates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillBlock {
    pub attack: Skill,
    pub defence: Skill,
    pub speed: Skill,
    pub magic: Skill,
}

impl SkillBlock {
    /// Every skill at `level`, no XP.
    pub const fn uniform(level: i32) -> Self {
        Self {
            attack: Skill::new(level),
            defence: Skill::new(level),
            speed: Skill::new(level),
            magic: Skill::new(level),
        }
    }

    pub fn get(&self, kind: SkillKind) -> &Skill {
        match kind {
            SkillKind::Attack => &self.attack,
            SkillKind::Defence => &self.defence,
            SkillKind::Speed => &self.speed,
            SkillKind::Magic => &self.magic,
        }
    }

    pub fn get_mut(&mut self, kind: SkillKind) -> &mut Skill {
        match kind {
            SkillKind::Attack => &mut self.attack,
            SkillKind::Defence => &mut self.defence,
            SkillKind::Speed => &mut self.speed,
            SkillKind::Magic => &mut self.magic,
        }
    }

    /// Sum of all skill levels; used as the combat level for XP scaling.
    pub fn total_level(&self) -> i32 {
        self.attack.level + self.defence.level + self.speed.level + self.magic.level
    }

    /// Derives the base stat block (before gear) from skill levels.
    pub fn build_stats(&self) -> StatBlock {
        StatBlock {
            attack_phys: 5 + self.attack.level * 2,
            attack_magic: 1 + self.magic.level * 2,
            defence: 4 + self.defence.level * 2,
            critical_chance: 5 + self.attack.level / 10,
            speed: 5 + self.speed.level,
            max_hp: 10 + self.defence.level * 4,
            max_ap: 6 + self.speed.level / 2,
            max_mp: 5 + self.magic.level * 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_xp_rolls_over_into_levels() {
        let mut skill = Skill::new(1);
        assert_eq!(skill.add_xp(250), 2);
        assert_eq!(skill, Skill { level: 3, xp: 50 });
        assert_eq!(skill.add_xp(-10), 0);
        assert_eq!(skill.xp, 50);
    }

    #[test]
    fn build_stats_follows_skill_levels() {
        let skills = SkillBlock {
            attack: Skill::new(10),
            defence: Skill::new(3),
            speed: Skill::new(4),
            magic: Skill::new(2),
        };
        let stats = skills.build_stats();
        assert_eq!(stats.attack_phys, 25);
        assert_eq!(stats.attack_magic, 5);
        assert_eq!(stats.defence, 10);
        assert_eq!(stats.critical_chance, 6);
        assert_eq!(stats.speed, 9);
        assert_eq!(stats.max_hp, 22);
        assert_eq!(stats.max_ap, 8);
        assert_eq!(stats.max_mp, 15);
        assert_eq!(skills.total_level(), 19);
    }

    #[test]
    fn skill_kind_round_trips_lowercase_names() {
        assert_eq!("magic".parse::<SkillKind>(), Ok(SkillKind::Magic));
        assert_eq!(SkillKind::Defence.to_string(), "defence");
    }
}
