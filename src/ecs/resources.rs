use bracket_geometry::prelude::Point;

use crate::map::{Grid, manhattan};

/// Frozen view of the world at the start of an AI tick. Every enemy decision
/// and the strike check in that tick read from it, never from positions
/// updated earlier in the same tick.
#[derive(Clone, Debug)]
pub struct MovementContext {
    pub player_point: Point,
    pub width: i32,
    pub height: i32,
    walkable: Vec<bool>,
    occupants: Vec<(u32, Point)>,
}

impl MovementContext {
    pub fn from_grid(grid: &Grid, player_point: Point, occupants: Vec<(u32, Point)>) -> Self {
        let walkable = grid
            .tiles()
            .iter()
            .map(|tile| !tile.blocks_move())
            .collect::<Vec<bool>>();

        Self {
            player_point,
            width: grid.width,
            height: grid.height,
            walkable,
            occupants,
        }
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    pub fn is_walkable(&self, point: Point) -> bool {
        if !self.in_bounds(point) {
            return false;
        }
        let idx = (point.y * self.width + point.x) as usize;
        self.walkable.get(idx).copied().unwrap_or(false)
    }

    pub fn is_occupied(&self, point: Point) -> bool {
        self.occupants.iter().any(|(_, occupied)| *occupied == point)
    }

    /// Floor, not the player, not held by any enemy before the tick began.
    pub fn can_enter(&self, point: Point) -> bool {
        self.is_walkable(point) && point != self.player_point && !self.is_occupied(point)
    }

    /// First enemy in spawn order standing next to the player.
    pub fn first_adjacent_to_player(&self) -> Option<u32> {
        self.occupants
            .iter()
            .find(|(_, point)| manhattan(*point, self.player_point) == 1)
            .map(|(id, _)| *id)
    }
}
