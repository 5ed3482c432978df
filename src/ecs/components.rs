use bracket_geometry::prelude::Point;
use specs::prelude::{Component, NullStorage, VecStorage};

use crate::data::items::ItemKind;

#[derive(Clone, Debug)]
pub struct Position {
    pub point: Point,
}

impl Component for Position {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct IntentStep {
    pub delta: Point,
}

impl Component for IntentStep {
    type Storage = VecStorage<Self>;
}

#[derive(Default)]
pub struct PlayerTag;

impl Component for PlayerTag {
    type Storage = NullStorage<Self>;
}

#[derive(Default)]
pub struct MonsterTag;

impl Component for MonsterTag {
    type Storage = NullStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct Monster {
    pub id: u32,
    pub name: String,
}

impl Component for Monster {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatStats {
    pub max_hp: i32,
    pub hp: i32,
}

impl Component for CombatStats {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progression {
    pub xp: i32,
    pub level: i32,
}

impl Default for Progression {
    fn default() -> Self {
        Self { xp: 0, level: 1 }
    }
}

impl Component for Progression {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug, Default)]
pub struct Inventory {
    pub gold: i32,
    pub potions: i32,
}

impl Component for Inventory {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct Loot {
    pub id: u32,
    pub kind: ItemKind,
    pub amount: i32,
}

impl Component for Loot {
    type Storage = VecStorage<Self>;
}
