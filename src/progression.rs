use crate::ecs::components::{CombatStats, Progression};

pub const XP_PER_KILL: i32 = 20;
pub const XP_PER_LEVEL: i32 = 100;
pub const HP_PER_LEVEL: i32 = 10;

pub fn xp_required(level: i32) -> i32 {
    level * XP_PER_LEVEL
}

/// Applies every level-up the current xp pays for. Each step spends the
/// requirement of the level being left, so one large gain cascades.
/// Returns the number of levels gained.
pub fn apply_level_ups(progress: &mut Progression, stats: &mut CombatStats) -> u32 {
    let mut gained = 0;
    loop {
        let required = xp_required(progress.level);
        if progress.xp < required {
            break;
        }
        progress.xp -= required;
        progress.level += 1;
        stats.max_hp += HP_PER_LEVEL;
        stats.hp += HP_PER_LEVEL;
        gained += 1;
    }
    gained
}
