//! Read-only views handed to the presentation layer after every mutation.

use std::sync::Arc;

use serde::Serialize;

use crate::{data::items::ItemKind, ecs::EcsWorld, map::Grid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub x: i32,
    pub y: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub xp: i32,
    pub level: i32,
    pub gold: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnemySnapshot {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub hp: i32,
    pub max_hp: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemSnapshot {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub kind: ItemKind,
    pub amount: i32,
}

#[derive(Clone, Debug, Serialize)]
pub struct WorldSnapshot {
    pub grid: Arc<Grid>,
    pub player: PlayerSnapshot,
    /// Spawn order, which is also the attack and strike priority.
    pub enemies: Vec<EnemySnapshot>,
    pub items: Vec<ItemSnapshot>,
    pub potions: i32,
    pub log: Vec<String>,
    pub ticks: u64,
    pub game_over: bool,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl EcsWorld {
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            grid: Arc::clone(self.grid()),
            player: self.player_snapshot(),
            enemies: self.enemies(),
            items: self.items(),
            potions: self.player_inventory().potions,
            log: self.log_messages(),
            ticks: self.ticks,
            game_over: self.is_game_over(),
        }
    }
}
