use bracket_geometry::prelude::Point;

use crate::{map::Grid, rng::LayoutRng};

use super::{MAX_PLACEMENT_ATTEMPTS, PLAYER_SPAWN};

#[derive(Clone, Debug)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub hp: i32,
}

impl MonsterTemplate {
    pub const fn abyssal_crawler() -> Self {
        Self {
            name: "Abyssal Crawler",
            hp: 12,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemySpawn {
    pub id: u32,
    pub point: Point,
    pub hp: i32,
    pub max_hp: i32,
}

/// Scatters enemies two cells in from the border, off the spawn cell and off
/// each other. Ids run from 1 in placement order; an enemy that cannot find a
/// free floor cell within the attempt budget is skipped.
pub fn place_enemies(
    grid: &Grid,
    rng: &mut LayoutRng,
    count: usize,
    template: &MonsterTemplate,
) -> Vec<EnemySpawn> {
    let mut placed: Vec<EnemySpawn> = Vec::with_capacity(count);
    let mut next_id = 1;
    for _ in 0..count {
        let mut found = None;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = rng.offset(2, grid.width - 4);
            let y = rng.offset(2, grid.height - 4);
            let point = Point::new(x, y);
            if grid.is_walkable(point)
                && point != PLAYER_SPAWN
                && placed.iter().all(|enemy| enemy.point != point)
            {
                found = Some(point);
                break;
            }
        }
        if let Some(point) = found {
            placed.push(EnemySpawn {
                id: next_id,
                point,
                hp: template.hp,
                max_hp: template.hp,
            });
            next_id += 1;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, TileKind};

    #[test]
    fn enemies_land_on_free_floor() {
        for seed in (0..3000u32).step_by(101) {
            let mut rng = LayoutRng::new(seed);
            let grid = Grid::generate(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT, &mut rng).unwrap();
            let enemies = place_enemies(&grid, &mut rng, 6, &MonsterTemplate::abyssal_crawler());
            assert_eq!(enemies.len(), 6);
            for (idx, enemy) in enemies.iter().enumerate() {
                assert_eq!(enemy.id, idx as u32 + 1);
                assert_eq!(grid.tile_at(enemy.point), Some(TileKind::Floor));
                assert_ne!(enemy.point, PLAYER_SPAWN);
                assert!((2..DEFAULT_MAP_WIDTH - 2).contains(&enemy.point.x));
                assert!((2..DEFAULT_MAP_HEIGHT - 2).contains(&enemy.point.y));
                assert_eq!((enemy.hp, enemy.max_hp), (12, 12));
                assert!(enemies[..idx].iter().all(|other| other.point != enemy.point));
            }
        }
    }

    #[test]
    fn placement_is_deterministic() {
        let template = MonsterTemplate::abyssal_crawler();
        let mut a = LayoutRng::new(77);
        let mut b = LayoutRng::new(77);
        let grid_a = Grid::generate(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT, &mut a).unwrap();
        let grid_b = Grid::generate(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT, &mut b).unwrap();
        assert_eq!(
            place_enemies(&grid_a, &mut a, 6, &template),
            place_enemies(&grid_b, &mut b, 6, &template)
        );
    }

    #[test]
    fn walled_in_map_skips_enemies() {
        let mut grid = Grid::bordered(6, 6).unwrap();
        for point in grid.walkable_points() {
            grid.set_tile(point, TileKind::Wall);
        }
        let mut rng = LayoutRng::new(3);
        let enemies = place_enemies(&grid, &mut rng, 4, &MonsterTemplate::abyssal_crawler());
        assert!(enemies.is_empty());
    }
}
