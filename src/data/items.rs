use bracket_geometry::prelude::Point;
use serde::Serialize;

use crate::{map::Grid, rng::LayoutRng};

use super::{MAX_PLACEMENT_ATTEMPTS, PLAYER_SPAWN};

const POTION_THRESHOLD: f64 = 0.6;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Gold,
    Potion,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemSpawn {
    pub id: u32,
    pub point: Point,
    pub kind: ItemKind,
    pub amount: i32,
}

/// Scatters loot over the interior, off walls, the spawn cell and other loot.
/// One draw decides the kind; gold piles take a further draw for their size,
/// always a multiple of three between 3 and 30.
pub fn place_items(grid: &Grid, rng: &mut LayoutRng, count: usize) -> Vec<ItemSpawn> {
    let mut placed: Vec<ItemSpawn> = Vec::with_capacity(count);
    let mut next_id = 1;
    for _ in 0..count {
        let mut found = None;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = rng.offset(1, grid.width - 2);
            let y = rng.offset(1, grid.height - 2);
            let point = Point::new(x, y);
            if grid.is_walkable(point)
                && point != PLAYER_SPAWN
                && placed.iter().all(|item| item.point != point)
            {
                found = Some(point);
                break;
            }
        }
        let Some(point) = found else {
            continue;
        };

        let (kind, amount) = if rng.next_f64() > POTION_THRESHOLD {
            (ItemKind::Potion, 1)
        } else {
            (ItemKind::Gold, rng.offset(1, 10) * 3)
        };
        placed.push(ItemSpawn {
            id: next_id,
            point,
            kind,
            amount,
        });
        next_id += 1;
    }
    placed
}
