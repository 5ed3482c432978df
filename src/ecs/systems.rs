use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use smallvec::SmallVec;
use specs::prelude::*;

use crate::{
    ai::choose_step,
    log::{EventLog, LogKind},
};

use super::{
    components::{CombatStats, IntentStep, Monster, MonsterTag, PlayerTag, Position},
    resources::MovementContext,
};

pub const ENEMY_DAMAGE_MIN: i32 = 4;
pub const ENEMY_DAMAGE_MAX: i32 = 7;

/// Phase one: every enemy proposes a step against the pre-tick snapshot.
#[derive(Default)]
pub struct EnemyIntentSystem;

impl<'a> System<'a> for EnemyIntentSystem {
    type SystemData = (
        Entities<'a>,
        WriteStorage<'a, IntentStep>,
        ReadStorage<'a, Position>,
        ReadStorage<'a, MonsterTag>,
        ReadExpect<'a, MovementContext>,
        WriteExpect<'a, RandomNumberGenerator>,
    );

    fn run(
        &mut self,
        (entities, mut intents, positions, monsters, movement, mut rng): Self::SystemData,
    ) {
        for (entity, pos, _) in (&entities, &positions, &monsters).join() {
            let delta = choose_step(pos.point, movement.player_point, &mut rng).delta();
            let target = Point::new(pos.point.x + delta.x, pos.point.y + delta.y);
            if movement.can_enter(target) {
                let _ = intents.insert(entity, IntentStep { delta });
            }
        }
    }
}

/// Phase two: applies proposals in spawn order. When two enemies want the same
/// cell the first claim wins and the other stays put.
#[derive(Default)]
pub struct EnemyMovementSystem;

impl<'a> System<'a> for EnemyMovementSystem {
    type SystemData = (
        Entities<'a>,
        WriteStorage<'a, Position>,
        WriteStorage<'a, IntentStep>,
        ReadStorage<'a, MonsterTag>,
    );

    fn run(&mut self, (entities, mut positions, mut intents, monsters): Self::SystemData) {
        let mut claimed: SmallVec<[Point; 8]> = SmallVec::new();
        let mut to_clear = Vec::new();
        for (entity, pos, intent, _) in (&entities, &mut positions, &intents, &monsters).join() {
            let target = Point::new(pos.point.x + intent.delta.x, pos.point.y + intent.delta.y);
            if !claimed.contains(&target) {
                claimed.push(target);
                pos.point = target;
            }
            to_clear.push(entity);
        }

        for entity in to_clear {
            intents.remove(entity);
        }
    }
}

/// Phase three: at most one enemy that stood next to the player when the tick
/// began lands a hit. Extra adjacent enemies do not stack.
#[derive(Default)]
pub struct EnemyStrikeSystem;

impl<'a> System<'a> for EnemyStrikeSystem {
    type SystemData = (
        Entities<'a>,
        ReadStorage<'a, PlayerTag>,
        WriteStorage<'a, CombatStats>,
        ReadStorage<'a, Monster>,
        ReadExpect<'a, MovementContext>,
        WriteExpect<'a, RandomNumberGenerator>,
        WriteExpect<'a, EventLog>,
    );

    fn run(
        &mut self,
        (entities, players, mut stats, monsters, movement, mut rng, mut log): Self::SystemData,
    ) {
        let Some(attacker_id) = movement.first_adjacent_to_player() else {
            return;
        };
        let Some((player, _)) = (&entities, &players).join().next() else {
            return;
        };
        let Some(player_stats) = stats.get_mut(player) else {
            return;
        };

        let damage = rng.range(ENEMY_DAMAGE_MIN, ENEMY_DAMAGE_MAX + 1);
        player_stats.hp = (player_stats.hp - damage).max(0);
        let name = (&monsters)
            .join()
            .find(|monster| monster.id == attacker_id)
            .map(|monster| monster.name.clone())
            .unwrap_or_else(|| "A foe".to_string());
        log.push(
            LogKind::Damage,
            format!("{name} hits you for {damage} damage!"),
        );
    }
}
