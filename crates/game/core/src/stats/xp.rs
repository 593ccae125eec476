//! Experience awards for combat events.

use super::skills::{SkillBlock, SkillKind};

/// Combat event that earns experience.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XpEvent {
    PhysicalDamage,
    MagicDamage,
    PhysicalDefence,
    MagicDefence,
    Dodge,
}

impl XpEvent {
    /// Per-skill shares (in percent) of an award.
    fn shares(self) -> &'static [(SkillKind, i32)] {
        match self {
            XpEvent::PhysicalDamage => &[(SkillKind::Attack, 100)],
            XpEvent::MagicDamage => &[(SkillKind::Magic, 100)],
            XpEvent::PhysicalDefence => &[(SkillKind::Defence, 100)],
            XpEvent::MagicDefence => &[(SkillKind::Defence, 70), (SkillKind::Magic, 40)],
            XpEvent::Dodge => &[(SkillKind::Defence, 20), (SkillKind::Speed, 90)],
        }
    }
}

/// XP for `amount` scaled by the level gap:
/// `max(0, amount * (1 + (opponent - own) / 10))`.
pub fn scaled_xp(amount: i32, opponent_level: i32, own_level: i32) -> i32 {
    let modifier = 1.0 + f64::from(opponent_level - own_level) / 10.0;
    let total = f64::from(amount) * modifier;
    if total <= 0.0 { 0 } else { total as i32 }
}

/// Awards XP for `event` to `skills`, scaled against `opponent_level`.
///
/// Returns the total number of levels gained across all skills.
pub fn award_xp(skills: &mut SkillBlock, event: XpEvent, opponent_level: i32, amount: i32) -> i32 {
    let total = scaled_xp(amount, opponent_level, skills.total_level());
    if total == 0 {
        return 0;
    }
    event
        .shares()
        .iter()
        .map(|&(kind, percent)| skills.get_mut(kind).add_xp(total * percent / 100))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Skill;

    #[test]
    fn equal_levels_award_the_base_amount() {
        assert_eq!(scaled_xp(20, 8, 8), 20);
    }

    #[test]
    fn stronger_opponents_award_more() {
        assert_eq!(scaled_xp(20, 13, 8), 30);
    }

    #[test]
    fn much_weaker_opponents_award_nothing() {
        assert_eq!(scaled_xp(20, 0, 10), 0);
        assert_eq!(scaled_xp(20, 0, 25), 0);
    }

    #[test]
    fn magic_defence_splits_between_skills() {
        let mut skills = SkillBlock::uniform(1);
        award_xp(&mut skills, XpEvent::MagicDefence, 4, 100);
        assert_eq!(skills.defence, Skill { level: 1, xp: 70 });
        assert_eq!(skills.magic, Skill { level: 1, xp: 40 });
        assert_eq!(skills.attack.xp, 0);
    }
}
