pub mod components;
pub mod resources;
pub mod systems;

use std::sync::Arc;

use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use specs::prelude::{
    Builder, Dispatcher, DispatcherBuilder, Entity, Join, World as SpecsWorld, WorldExt,
};

use crate::{
    data::{
        PLAYER_START_HP, PLAYER_START_POTIONS,
        items::{ItemKind, ItemSpawn},
        monsters::{EnemySpawn, MonsterTemplate},
    },
    log::{EventLog, LogEntry, LogKind},
    map::{Direction, Grid, manhattan},
    progression::{XP_PER_KILL, apply_level_ups},
    snapshot::{EnemySnapshot, ItemSnapshot, PlayerSnapshot},
};

use self::{
    components::{
        CombatStats, IntentStep, Inventory, Loot, Monster, MonsterTag, PlayerTag, Position,
        Progression,
    },
    resources::MovementContext,
    systems::{EnemyIntentSystem, EnemyMovementSystem, EnemyStrikeSystem},
};

pub const PLAYER_DAMAGE_MIN: i32 = 6;
pub const PLAYER_DAMAGE_MAX: i32 = 11;
pub const KILL_GOLD_MIN: i32 = 10;
pub const KILL_GOLD_MAX: i32 = 19;
pub const POTION_HEAL: i32 = 20;

/// The authoritative world: map, player, enemies, loot and the journal.
pub struct EcsWorld {
    specs_world: SpecsWorld,
    dispatcher: Dispatcher<'static, 'static>,
    grid: Arc<Grid>,
    player: Entity,
    pub ticks: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackReport {
    pub target: u32,
    pub damage: i32,
    pub kill: Option<KillReward>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KillReward {
    pub xp: i32,
    pub gold: i32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Blocked,
}

impl EcsWorld {
    /// `combat_rng` feeds every non-layout roll: damage, rewards and enemy AI.
    pub fn new(grid: Arc<Grid>, spawn: Point, combat_rng: RandomNumberGenerator) -> Self {
        let mut specs_world = SpecsWorld::new();
        Self::register_components(&mut specs_world);
        specs_world.insert(combat_rng);
        specs_world.insert(EventLog::default());
        specs_world.insert(MovementContext::from_grid(&grid, spawn, Vec::new()));
        let player = Self::spawn_player(&mut specs_world, spawn);
        let dispatcher = DispatcherBuilder::new()
            .with(EnemyIntentSystem, "enemy_intent", &[])
            .with(EnemyMovementSystem, "enemy_movement", &["enemy_intent"])
            .with(EnemyStrikeSystem, "enemy_strike", &["enemy_movement"])
            .build();

        Self {
            specs_world,
            dispatcher,
            grid,
            player,
            ticks: 0,
        }
    }

    fn register_components(world: &mut SpecsWorld) {
        world.register::<Position>();
        world.register::<IntentStep>();
        world.register::<PlayerTag>();
        world.register::<MonsterTag>();
        world.register::<Monster>();
        world.register::<CombatStats>();
        world.register::<Progression>();
        world.register::<Inventory>();
        world.register::<Loot>();
    }

    fn spawn_player(world: &mut SpecsWorld, spawn: Point) -> Entity {
        world
            .create_entity()
            .with(Position { point: spawn })
            .with(CombatStats {
                max_hp: PLAYER_START_HP,
                hp: PLAYER_START_HP,
            })
            .with(Progression::default())
            .with(Inventory {
                gold: 0,
                potions: PLAYER_START_POTIONS,
            })
            .with(PlayerTag)
            .build()
    }

    pub fn spawn_monster(&mut self, spawn: &EnemySpawn, template: &MonsterTemplate) {
        self.specs_world
            .create_entity()
            .with(Position { point: spawn.point })
            .with(Monster {
                id: spawn.id,
                name: template.name.to_string(),
            })
            .with(CombatStats {
                max_hp: spawn.max_hp,
                hp: spawn.hp,
            })
            .with(MonsterTag)
            .build();
    }

    pub fn spawn_item(&mut self, spawn: &ItemSpawn) {
        self.specs_world
            .create_entity()
            .with(Position { point: spawn.point })
            .with(Loot {
                id: spawn.id,
                kind: spawn.kind,
                amount: spawn.amount,
            })
            .build();
    }

    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    pub fn log<S: Into<String>>(&mut self, kind: LogKind, message: S) {
        self.specs_world
            .write_resource::<EventLog>()
            .push(kind, message);
    }

    pub fn log_entries(&self) -> Vec<LogEntry> {
        self.specs_world.read_resource::<EventLog>().entries().to_vec()
    }

    pub fn log_messages(&self) -> Vec<String> {
        self.specs_world.read_resource::<EventLog>().messages()
    }

    pub fn log_len(&self) -> usize {
        self.specs_world.read_resource::<EventLog>().len()
    }

    pub fn player_point(&self) -> Point {
        let storage = self.specs_world.read_component::<Position>();
        storage
            .get(self.player)
            .map(|pos| pos.point)
            .unwrap_or(Point::new(0, 0))
    }

    pub fn player_stats(&self) -> CombatStats {
        let stats = self.specs_world.read_component::<CombatStats>();
        stats.get(self.player).cloned().unwrap_or(CombatStats {
            max_hp: 0,
            hp: 0,
        })
    }

    pub fn player_progress(&self) -> Progression {
        let progress = self.specs_world.read_component::<Progression>();
        progress.get(self.player).cloned().unwrap_or_default()
    }

    pub fn player_inventory(&self) -> Inventory {
        let inventories = self.specs_world.read_component::<Inventory>();
        inventories.get(self.player).cloned().unwrap_or_default()
    }

    pub fn set_player_position(&mut self, point: Point) {
        let mut positions = self.specs_world.write_component::<Position>();
        if let Some(pos) = positions.get_mut(self.player) {
            pos.point = point;
        }
    }

    pub fn set_player_stats(&mut self, hp: i32, max_hp: i32) {
        let mut stats = self.specs_world.write_component::<CombatStats>();
        if let Some(player_stats) = stats.get_mut(self.player) {
            player_stats.max_hp = max_hp;
            player_stats.hp = hp.clamp(0, max_hp);
        }
    }

    pub fn set_player_progress(&mut self, xp: i32, level: i32) {
        let mut progress = self.specs_world.write_component::<Progression>();
        if let Some(player_progress) = progress.get_mut(self.player) {
            player_progress.xp = xp;
            player_progress.level = level.max(1);
        }
    }

    pub fn set_potions(&mut self, potions: i32) {
        let mut inventories = self.specs_world.write_component::<Inventory>();
        if let Some(inventory) = inventories.get_mut(self.player) {
            inventory.potions = potions.max(0);
        }
    }

    pub fn monster_at(&self, point: Point) -> Option<Entity> {
        let entities = self.specs_world.entities();
        let positions = self.specs_world.read_component::<Position>();
        let monsters = self.specs_world.read_component::<MonsterTag>();
        (&entities, &positions, &monsters)
            .join()
            .find(|(_, pos, _)| pos.point == point)
            .map(|(entity, _, _)| entity)
    }

    fn loot_at(&self, point: Point) -> Option<(Entity, Loot)> {
        let entities = self.specs_world.entities();
        let positions = self.specs_world.read_component::<Position>();
        let loot = self.specs_world.read_component::<Loot>();
        (&entities, &positions, &loot)
            .join()
            .find(|(_, pos, _)| pos.point == point)
            .map(|(entity, _, item)| (entity, item.clone()))
    }

    /// Walls and live enemies block silently. Stepping onto loot collects it
    /// in the same action.
    pub fn player_step(&mut self, direction: Direction) -> MoveOutcome {
        let current = self.player_point();
        let delta = direction.delta();
        let target = Point::new(current.x + delta.x, current.y + delta.y);
        if !self.grid.is_walkable(target) || self.monster_at(target).is_some() {
            return MoveOutcome::Blocked;
        }

        self.set_player_position(target);
        if let Some((entity, loot)) = self.loot_at(target) {
            let _ = self.specs_world.delete_entity(entity);
            self.collect(&loot);
        }
        MoveOutcome::Moved
    }

    fn collect(&mut self, loot: &Loot) {
        {
            let mut inventories = self.specs_world.write_component::<Inventory>();
            if let Some(inventory) = inventories.get_mut(self.player) {
                match loot.kind {
                    ItemKind::Gold => inventory.gold += loot.amount,
                    ItemKind::Potion => inventory.potions += 1,
                }
            }
        }
        match loot.kind {
            ItemKind::Gold => self.log(LogKind::Loot, format!("You pick up {} gold.", loot.amount)),
            ItemKind::Potion => self.log(LogKind::Loot, "You found a potion."),
        }
    }

    /// Strikes the first enemy in spawn order standing next to the player.
    pub fn player_attack(&mut self) -> Option<AttackReport> {
        let origin = self.player_point();
        let report = {
            let entities = self.specs_world.entities();
            let positions = self.specs_world.read_component::<Position>();
            let monsters = self.specs_world.read_component::<Monster>();
            let mut stats = self.specs_world.write_component::<CombatStats>();
            let mut rng = self.specs_world.write_resource::<RandomNumberGenerator>();

            let target = (&entities, &positions, &monsters)
                .join()
                .find(|(_, pos, _)| manhattan(pos.point, origin) == 1)
                .map(|(entity, _, monster)| (entity, monster.clone()));

            match target {
                None => None,
                Some((entity, monster)) => {
                    let damage = rng.range(PLAYER_DAMAGE_MIN, PLAYER_DAMAGE_MAX + 1);
                    let remaining = stats.get_mut(entity).map_or(0, |target_stats| {
                        target_stats.hp -= damage;
                        target_stats.hp
                    });
                    let kill = (remaining <= 0).then(|| KillReward {
                        xp: XP_PER_KILL,
                        gold: rng.range(KILL_GOLD_MIN, KILL_GOLD_MAX + 1),
                    });
                    Some((entity, monster, damage, kill))
                }
            }
        };

        let Some((entity, monster, damage, kill)) = report else {
            self.log(LogKind::Info, "There is no enemy next to you.");
            return None;
        };

        self.log(
            LogKind::Combat,
            format!("You hit the {} for {damage} damage!", monster.name),
        );
        if let Some(reward) = &kill {
            let _ = self.specs_world.delete_entity(entity);
            {
                let mut inventories = self.specs_world.write_component::<Inventory>();
                if let Some(inventory) = inventories.get_mut(self.player) {
                    inventory.gold += reward.gold;
                }
            }
            self.log(
                LogKind::Combat,
                format!(
                    "The {} falls! +{} XP, +{} gold.",
                    monster.name, reward.xp, reward.gold
                ),
            );
            self.grant_xp(reward.xp);
        }

        Some(AttackReport {
            target: monster.id,
            damage,
            kill,
        })
    }

    /// Returns the hp restored, or `None` when there is no potion or nothing
    /// to heal.
    pub fn use_potion(&mut self) -> Option<i32> {
        let heal = {
            let mut inventories = self.specs_world.write_component::<Inventory>();
            let mut stats = self.specs_world.write_component::<CombatStats>();
            let inventory = inventories.get_mut(self.player)?;
            let player_stats = stats.get_mut(self.player)?;
            if inventory.potions <= 0 || player_stats.hp >= player_stats.max_hp {
                return None;
            }
            inventory.potions -= 1;
            let heal = (player_stats.max_hp - player_stats.hp).min(POTION_HEAL);
            player_stats.hp += heal;
            heal
        };
        self.log(LogKind::Heal, format!("You drink a potion (+{heal} HP)."));
        Some(heal)
    }

    pub fn grant_xp(&mut self, amount: i32) {
        {
            let mut progress = self.specs_world.write_component::<Progression>();
            if let Some(player_progress) = progress.get_mut(self.player) {
                player_progress.xp += amount;
            }
        }
        self.settle_progression();
    }

    /// Applies any level-ups the player's xp already pays for.
    pub fn settle_progression(&mut self) -> u32 {
        let gained = {
            let mut progress = self.specs_world.write_component::<Progression>();
            let mut stats = self.specs_world.write_component::<CombatStats>();
            match (progress.get_mut(self.player), stats.get_mut(self.player)) {
                (Some(player_progress), Some(player_stats)) => {
                    apply_level_ups(player_progress, player_stats)
                }
                _ => 0,
            }
        };
        let reached = self.player_progress().level;
        for level in (reached - gained as i32 + 1)..=reached {
            self.log(
                LogKind::LevelUp,
                format!("Level up! You reach level {level}."),
            );
        }
        gained
    }

    /// One full enemy tick: propose, move, strike.
    pub fn advance_enemies(&mut self) {
        let context = MovementContext::from_grid(
            &self.grid,
            self.player_point(),
            self.enemy_points(),
        );
        self.specs_world.insert(context);
        self.dispatcher.dispatch_seq(&self.specs_world);
        self.specs_world.maintain();
        self.ticks = self.ticks.wrapping_add(1);
    }

    fn enemy_points(&self) -> Vec<(u32, Point)> {
        let positions = self.specs_world.read_component::<Position>();
        let monsters = self.specs_world.read_component::<Monster>();
        (&positions, &monsters)
            .join()
            .map(|(pos, monster)| (monster.id, pos.point))
            .collect()
    }

    pub fn is_game_over(&self) -> bool {
        self.player_stats().hp <= 0
    }

    pub fn player_snapshot(&self) -> PlayerSnapshot {
        let point = self.player_point();
        let stats = self.player_stats();
        let progress = self.player_progress();
        let inventory = self.player_inventory();
        PlayerSnapshot {
            x: point.x,
            y: point.y,
            hp: stats.hp,
            max_hp: stats.max_hp,
            xp: progress.xp,
            level: progress.level,
            gold: inventory.gold,
        }
    }

    pub fn enemies(&self) -> Vec<EnemySnapshot> {
        let positions = self.specs_world.read_component::<Position>();
        let monsters = self.specs_world.read_component::<Monster>();
        let stats = self.specs_world.read_component::<CombatStats>();
        (&positions, &monsters, &stats)
            .join()
            .map(|(pos, monster, stat)| EnemySnapshot {
                id: monster.id,
                x: pos.point.x,
                y: pos.point.y,
                hp: stat.hp,
                max_hp: stat.max_hp,
            })
            .collect()
    }

    pub fn items(&self) -> Vec<ItemSnapshot> {
        let positions = self.specs_world.read_component::<Position>();
        let loot = self.specs_world.read_component::<Loot>();
        (&positions, &loot)
            .join()
            .map(|(pos, item)| ItemSnapshot {
                id: item.id,
                x: pos.point.x,
                y: pos.point.y,
                kind: item.kind,
                amount: item.amount,
            })
            .collect()
    }
}
