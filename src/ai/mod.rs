use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;

use crate::map::{CARDINALS, manhattan};

/// Percent chance per tick that an enemy heads for the player.
pub const CHASE_CHANCE: i32 = 70;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepChoice {
    Chase(Point),
    Wander(Point),
}

impl StepChoice {
    pub fn delta(self) -> Point {
        match self {
            StepChoice::Chase(delta) | StepChoice::Wander(delta) => delta,
        }
    }
}

/// Picks an enemy's desired step for this tick. Validity against the map and
/// other occupants is checked by the caller.
pub fn choose_step(from: Point, player: Point, rng: &mut RandomNumberGenerator) -> StepChoice {
    let chase = rng.range(0, 100) < CHASE_CHANCE;
    if chase && manhattan(from, player) > 1 {
        StepChoice::Chase(step_towards(from, player))
    } else {
        StepChoice::Wander(CARDINALS[rng.range(0, CARDINALS.len() as i32) as usize])
    }
}

/// One cardinal step along the axis with the larger offset; ties go to x.
pub fn step_towards(from: Point, to: Point) -> Point {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() >= dy.abs() {
        Point::new(dx.signum(), 0)
    } else {
        Point::new(0, dy.signum())
    }
}
