//! Stats and skills.
//!
//! ```text
//! [ SkillBlock (stored) ] --build_stats--> [ StatBlock (derived) ] + gear bonuses
//! ```
//!
//! Skills are the single source of truth; a [`StatBlock`] is always recomputed
//! from skills plus the stat bonuses of equipped items and never persisted as
//! authoritative data.

pub mod block;
pub mod skills;
pub mod xp;

pub use block::StatBlock;
pub use skills::{Skill, SkillBlock, SkillKind, XP_PER_LEVEL};
pub use xp::{XpEvent, award_xp, scaled_xp};
