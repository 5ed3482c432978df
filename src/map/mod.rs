use bracket_geometry::prelude::Point;
use bracket_pathfinding::prelude::DistanceAlg;
use serde::Serialize;

use crate::{error::GameError, rng::LayoutRng};

pub const DEFAULT_MAP_WIDTH: i32 = 22;
pub const DEFAULT_MAP_HEIGHT: i32 = 14;
pub const ROCK_PLACEMENTS: usize = 60;
pub const MIN_MAP_SIDE: i32 = 5;

pub const CARDINALS: [Point; 4] = [
    Point { x: 1, y: 0 },
    Point { x: -1, y: 0 },
    Point { x: 0, y: 1 },
    Point { x: 0, y: -1 },
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn delta(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::South => Point::new(0, 1),
            Direction::East => Point::new(1, 0),
            Direction::West => Point::new(-1, 0),
        }
    }

    /// Only a single cardinal step maps to a direction.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TileKind {
    Wall,
    Floor,
}

impl TileKind {
    pub fn blocks_move(self) -> bool {
        self == TileKind::Wall
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    tiles: Vec<TileKind>,
}

impl Grid {
    /// Floor everywhere except a solid wall border.
    pub fn bordered(width: i32, height: i32) -> Result<Self, GameError> {
        if width < MIN_MAP_SIDE || height < MIN_MAP_SIDE {
            return Err(GameError::InvalidDimensions { width, height });
        }
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                tiles.push(if border {
                    TileKind::Wall
                } else {
                    TileKind::Floor
                });
            }
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Border walls plus `ROCK_PLACEMENTS` scattered interior rocks. Duplicate
    /// draws land on an existing wall and are simply consumed.
    pub fn generate(width: i32, height: i32, rng: &mut LayoutRng) -> Result<Self, GameError> {
        let mut grid = Self::bordered(width, height)?;
        for _ in 0..ROCK_PLACEMENTS {
            let x = rng.offset(1, width - 2);
            let y = rng.offset(1, height - 2);
            grid.set_tile(Point::new(x, y), TileKind::Wall);
        }
        Ok(grid)
    }

    fn idx(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some((point.y * self.width + point.x) as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    pub fn set_tile(&mut self, point: Point, tile: TileKind) {
        if let Some(idx) = self.idx(point) {
            self.tiles[idx] = tile;
        }
    }

    pub fn tile_at(&self, point: Point) -> Option<TileKind> {
        self.idx(point).map(|idx| self.tiles[idx])
    }

    /// Out-of-bounds points count as walls.
    pub fn is_walkable(&self, point: Point) -> bool {
        self.tile_at(point).is_some_and(|tile| !tile.blocks_move())
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn walkable_points(&self) -> Vec<Point> {
        let mut points = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let point = Point::new(x, y);
                if self.is_walkable(point) {
                    points.push(point);
                }
            }
        }
        points
    }
}

pub fn manhattan(a: Point, b: Point) -> i32 {
    DistanceAlg::Manhattan.distance2d(a, b) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn border_is_solid(grid: &Grid) -> bool {
        (0..grid.width).all(|x| {
            grid.tile_at(Point::new(x, 0)) == Some(TileKind::Wall)
                && grid.tile_at(Point::new(x, grid.height - 1)) == Some(TileKind::Wall)
        }) && (0..grid.height).all(|y| {
            grid.tile_at(Point::new(0, y)) == Some(TileKind::Wall)
                && grid.tile_at(Point::new(grid.width - 1, y)) == Some(TileKind::Wall)
        })
    }

    #[test]
    fn border_is_wall_for_many_seeds() {
        for seed in (0..2000u32).step_by(37).chain([u32::MAX, 123_456]) {
            let mut rng = LayoutRng::new(seed);
            let grid = Grid::generate(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT, &mut rng)
                .expect("default dimensions are valid");
            assert!(border_is_solid(&grid), "seed {seed}");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        for seed in [0u32, 7, 424_242, 999_999] {
            let mut a = LayoutRng::new(seed);
            let mut b = LayoutRng::new(seed);
            let left = Grid::generate(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT, &mut a).unwrap();
            let right = Grid::generate(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT, &mut b).unwrap();
            assert_eq!(left, right);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn generation_consumes_two_draws_per_rock() {
        let mut rng = LayoutRng::new(31);
        Grid::generate(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT, &mut rng).unwrap();

        let mut expected = LayoutRng::new(31);
        for _ in 0..ROCK_PLACEMENTS * 2 {
            expected.next_f64();
        }
        assert_eq!(rng, expected);
    }

    #[test]
    fn rocks_never_exceed_placements() {
        let mut rng = LayoutRng::new(5);
        let grid = Grid::generate(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT, &mut rng).unwrap();
        let interior = ((DEFAULT_MAP_WIDTH - 2) * (DEFAULT_MAP_HEIGHT - 2)) as usize;
        let floors = grid.walkable_points().len();
        assert!(floors >= interior - ROCK_PLACEMENTS);
        assert!(floors < interior);
    }

    #[test]
    fn some_seed_leaves_three_three_open() {
        let found = (0..500u32).any(|seed| {
            let mut rng = LayoutRng::new(seed);
            let grid = Grid::generate(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT, &mut rng).unwrap();
            grid.tile_at(Point::new(3, 3)) == Some(TileKind::Floor)
                && grid.tile_at(Point::new(0, 0)) == Some(TileKind::Wall)
        });
        assert!(found);
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let mut rng = LayoutRng::new(1);
        assert!(matches!(
            Grid::generate(0, 14, &mut rng),
            Err(GameError::InvalidDimensions { width: 0, .. })
        ));
        assert!(Grid::generate(22, -3, &mut rng).is_err());
        assert!(Grid::bordered(4, 4).is_err());
    }

    #[test]
    fn out_of_bounds_is_not_walkable() {
        let grid = Grid::bordered(6, 6).unwrap();
        assert!(!grid.is_walkable(Point::new(-1, 2)));
        assert!(!grid.is_walkable(Point::new(2, 6)));
        assert!(grid.is_walkable(Point::new(2, 2)));
    }

    #[test]
    fn direction_round_trips_cardinals_only() {
        for dir in [Direction::North, Direction::South, Direction::East, Direction::West] {
            let delta = dir.delta();
            assert_eq!(Direction::from_delta(delta.x, delta.y), Some(dir));
        }
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn manhattan_counts_axis_steps() {
        assert_eq!(manhattan(Point::new(2, 2), Point::new(2, 3)), 1);
        assert_eq!(manhattan(Point::new(0, 0), Point::new(3, -4)), 7);
    }
}
