pub mod items;
pub mod monsters;

use bracket_geometry::prelude::Point;

pub const PLAYER_SPAWN: Point = Point { x: 2, y: 2 };
pub const PLAYER_START_HP: i32 = 40;
pub const PLAYER_START_POTIONS: i32 = 1;
pub const ENEMY_COUNT: usize = 6;
pub const ITEM_COUNT: usize = 10;

/// Rejection-sampling budget per entity before it is skipped.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Abyssal Realms! Move with WASD or the arrow keys, attack with Space, drink a potion with P.";
