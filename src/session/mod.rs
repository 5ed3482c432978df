use std::{collections::VecDeque, sync::Arc, time::Duration};

use bracket_random::prelude::RandomNumberGenerator;

use crate::{
    config::GameConfig,
    data::{
        ENEMY_COUNT, ITEM_COUNT, PLAYER_SPAWN, WELCOME_MESSAGE,
        items::place_items,
        monsters::{MonsterTemplate, place_enemies},
    },
    ecs::EcsWorld,
    error::GameError,
    log::{LogEntry, LogKind},
    map::{Direction, Grid, TileKind},
    rng::LayoutRng,
    snapshot::WorldSnapshot,
};

pub const DEFEAT_MESSAGE: &str =
    "Your hero has fallen in the Abyssal Realms. Start a new session to try again.";

/// Everything that may mutate the world, in the order it arrived.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Attack,
    UsePotion,
    EnemyTick,
}

/// Fixed-cadence clock for enemy ticks. Driven by elapsed time fed from the
/// host loop; once cancelled it never fires again.
#[derive(Clone, Debug)]
pub struct TickTimer {
    interval: Duration,
    pending: Duration,
    active: bool,
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: Duration::ZERO,
            active: true,
        }
    }

    /// Returns how many ticks fell due during `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.active || self.interval.is_zero() {
            return 0;
        }
        self.pending += elapsed;
        let mut due = 0;
        while self.pending >= self.interval {
            self.pending -= self.interval;
            due += 1;
        }
        due
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.pending = Duration::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Single owner of a running game. Input intents and enemy ticks go through
/// one FIFO queue and each command is applied in full before the next.
pub struct Session {
    world: EcsWorld,
    queue: VecDeque<Command>,
    timer: TickTimer,
    seed: u32,
    input_locked: bool,
    defeat_logged: bool,
    stopped: bool,
}

impl Session {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        Self::with_combat_rng(config, RandomNumberGenerator::new())
    }

    /// Layout comes from the config seed; `combat_rng` drives every other roll.
    pub fn with_combat_rng(
        config: &GameConfig,
        combat_rng: RandomNumberGenerator,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let seed = config.resolve_seed();
        let mut layout = LayoutRng::new(seed);
        let mut grid = Grid::generate(config.width, config.height, &mut layout)?;
        grid.set_tile(PLAYER_SPAWN, TileKind::Floor);

        let template = MonsterTemplate::abyssal_crawler();
        let enemies = place_enemies(&grid, &mut layout, ENEMY_COUNT, &template);
        let items = place_items(&grid, &mut layout, ITEM_COUNT);

        let mut world = EcsWorld::new(Arc::new(grid), PLAYER_SPAWN, combat_rng);
        for enemy in &enemies {
            world.spawn_monster(enemy, &template);
        }
        for item in &items {
            world.spawn_item(item);
        }
        world.log(LogKind::Info, WELCOME_MESSAGE);

        Ok(Self::from_world(world, seed, config.tick_interval()))
    }

    pub fn from_world(world: EcsWorld, seed: u32, tick_interval: Duration) -> Self {
        Self {
            world,
            queue: VecDeque::new(),
            timer: TickTimer::new(tick_interval),
            seed,
            input_locked: false,
            defeat_logged: false,
            stopped: false,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn world(&self) -> &EcsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut EcsWorld {
        &mut self.world
    }

    pub fn submit(&mut self, command: Command) {
        if self.stopped {
            return;
        }
        self.queue.push_back(command);
    }

    pub fn move_player(&mut self, direction: Direction) {
        self.submit(Command::Move(direction));
    }

    pub fn attack(&mut self) {
        self.submit(Command::Attack);
    }

    pub fn use_potion(&mut self) {
        self.submit(Command::UsePotion);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Feeds wall-clock time to the enemy timer, queueing one tick per
    /// elapsed interval.
    pub fn advance_clock(&mut self, elapsed: Duration) -> u32 {
        if self.stopped {
            return 0;
        }
        let due = self.timer.advance(elapsed);
        for _ in 0..due {
            self.queue.push_back(Command::EnemyTick);
        }
        due
    }

    /// Drains the queue in arrival order. Returns the number of commands
    /// applied.
    pub fn process(&mut self) -> usize {
        let mut applied = 0;
        while let Some(command) = self.queue.pop_front() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Move(direction) => {
                if self.input_locked {
                    return;
                }
                self.world.player_step(direction);
            }
            Command::Attack => {
                self.world.player_attack();
            }
            Command::UsePotion => {
                self.world.use_potion();
            }
            Command::EnemyTick => {
                if self.world.is_game_over() {
                    return;
                }
                self.world.advance_enemies();
            }
        }
        self.world.settle_progression();
        self.check_defeat();
    }

    /// Game over is read from hp every time. The defeat entry is written
    /// once per fall, so a player revived by a level-up can fall again.
    fn check_defeat(&mut self) {
        if !self.world.is_game_over() {
            self.defeat_logged = false;
            return;
        }
        if !self.defeat_logged {
            self.defeat_logged = true;
            self.world.log(LogKind::GameOver, DEFEAT_MESSAGE);
        }
    }

    pub fn set_input_lock(&mut self, locked: bool) {
        self.input_locked = locked;
    }

    pub fn is_game_over(&self) -> bool {
        self.world.is_game_over()
    }

    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.snapshot()
    }

    pub fn journal(&self) -> Vec<LogEntry> {
        self.world.log_entries()
    }

    /// Stops the enemy timer and discards queued work. Safe to call twice.
    pub fn shutdown(&mut self) {
        self.stopped = true;
        self.timer.cancel();
        self.queue.clear();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use bracket_geometry::prelude::Point;

    use super::*;
    use crate::data::monsters::EnemySpawn;

    fn config(seed: u32) -> GameConfig {
        GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        }
    }

    fn scripted_session(enemies: &[(u32, i32, i32, i32)]) -> Session {
        let grid = Arc::new(Grid::bordered(10, 10).unwrap());
        let mut world = EcsWorld::new(grid, PLAYER_SPAWN, RandomNumberGenerator::seeded(77));
        let template = MonsterTemplate::abyssal_crawler();
        for &(id, x, y, hp) in enemies {
            world.spawn_monster(
                &EnemySpawn {
                    id,
                    point: Point::new(x, y),
                    hp,
                    max_hp: 12,
                },
                &template,
            );
        }
        Session::from_world(world, 0, Duration::from_millis(500))
    }

    #[test]
    fn same_seed_same_layout_regardless_of_combat_rng() {
        let a = Session::with_combat_rng(&config(4242), RandomNumberGenerator::seeded(1)).unwrap();
        let b = Session::with_combat_rng(&config(4242), RandomNumberGenerator::seeded(999)).unwrap();
        let (left, right) = (a.snapshot(), b.snapshot());
        assert_eq!(*left.grid, *right.grid);
        assert_eq!(left.enemies, right.enemies);
        assert_eq!(left.items, right.items);
    }

    #[test]
    fn new_session_layout_is_sound() {
        for seed in (0..1_000_000u32).step_by(49_999) {
            let session = Session::new(&config(seed)).unwrap();
            let snapshot = session.snapshot();
            let grid = &snapshot.grid;
            assert!(grid.is_walkable(PLAYER_SPAWN));
            assert_eq!((snapshot.player.x, snapshot.player.y), (2, 2));
            assert_eq!(snapshot.enemies.len(), ENEMY_COUNT);
            assert_eq!(snapshot.items.len(), ITEM_COUNT);
            for enemy in &snapshot.enemies {
                let point = Point::new(enemy.x, enemy.y);
                assert!(grid.is_walkable(point));
                assert_ne!(point, PLAYER_SPAWN);
            }
            for item in &snapshot.items {
                let point = Point::new(item.x, item.y);
                assert!(grid.is_walkable(point));
                assert_ne!(point, PLAYER_SPAWN);
            }
            assert_eq!(snapshot.log, vec![WELCOME_MESSAGE.to_string()]);
            assert_eq!(snapshot.potions, 1);
        }
    }

    #[test]
    fn invalid_config_fails_fast() {
        let bad = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            Session::new(&bad),
            Err(GameError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn commands_apply_in_arrival_order() {
        let mut session = scripted_session(&[(1, 2, 4, 12)]);
        session.move_player(Direction::South);
        session.attack();
        session.move_player(Direction::South);
        assert_eq!(session.pending(), 3);
        assert_eq!(session.process(), 3);

        // Stepped to (2,3), struck the enemy at (2,4), then bumped into it:
        // a single hit can never take 12 hp.
        let snapshot = session.snapshot();
        assert!(snapshot.log[0].starts_with("You hit"));
        assert!(snapshot.enemies[0].hp < 12);
        assert_eq!((snapshot.player.x, snapshot.player.y), (2, 3));
    }

    #[test]
    fn timer_queues_ticks_per_interval() {
        let mut session = scripted_session(&[(1, 7, 7, 12)]);
        assert_eq!(session.advance_clock(Duration::from_millis(1200)), 2);
        assert_eq!(session.advance_clock(Duration::from_millis(299)), 0);
        assert_eq!(session.advance_clock(Duration::from_millis(1)), 1);
        assert_eq!(session.process(), 3);
        assert_eq!(session.snapshot().ticks, 3);
    }

    #[test]
    fn shutdown_deregisters_timer() {
        let mut session = scripted_session(&[(1, 7, 7, 12)]);
        session.advance_clock(Duration::from_millis(500));
        session.shutdown();
        assert!(!session.is_running());
        assert!(!session.timer().is_active());
        assert_eq!(session.pending(), 0);
        assert_eq!(session.advance_clock(Duration::from_secs(10)), 0);
        session.attack();
        assert_eq!(session.process(), 0);
        assert_eq!(session.snapshot().ticks, 0);
    }

    fn defeat_count(session: &Session) -> usize {
        session
            .snapshot()
            .log
            .iter()
            .filter(|line| *line == DEFEAT_MESSAGE)
            .count()
    }

    #[test]
    fn defeat_logs_once_and_freezes_enemies() {
        let mut session = scripted_session(&[(1, 3, 2, 12)]);
        session.world_mut().set_player_stats(1, 40);
        session.advance_clock(Duration::from_millis(1500));
        session.process();

        assert!(session.is_game_over());
        let snapshot = session.snapshot();
        assert!(snapshot.game_over);
        assert_eq!(snapshot.player.hp, 0);
        assert_eq!(snapshot.ticks, 1);
        assert_eq!(defeat_count(&session), 1);

        // The timer keeps running; ticks that land while hp is 0 do nothing.
        assert!(session.timer().is_active());
        assert_eq!(session.advance_clock(Duration::from_secs(5)), 10);
        session.process();
        assert_eq!(session.snapshot().ticks, 1);
        assert_eq!(defeat_count(&session), 1);
    }

    #[test]
    fn level_up_revives_and_enemies_resume() {
        let mut grid = Grid::bordered(10, 10).unwrap();
        for (x, y) in [(3, 1), (4, 2), (3, 3), (1, 3), (2, 4)] {
            grid.set_tile(Point::new(x, y), TileKind::Wall);
        }
        let mut world = EcsWorld::new(
            Arc::new(grid),
            PLAYER_SPAWN,
            RandomNumberGenerator::seeded(21),
        );
        let template = MonsterTemplate::abyssal_crawler();
        for (id, x, y, hp) in [(1, 3, 2, 1), (2, 2, 3, 12)] {
            world.spawn_monster(
                &EnemySpawn {
                    id,
                    point: Point::new(x, y),
                    hp,
                    max_hp: 12,
                },
                &template,
            );
        }
        world.set_player_stats(1, 40);
        world.set_player_progress(95, 1);
        let mut session = Session::from_world(world, 0, Duration::from_millis(500));

        session.advance_clock(Duration::from_millis(500));
        session.process();
        assert!(session.is_game_over());
        assert_eq!(defeat_count(&session), 1);

        // Killing the weak crawler pays for level 2: +10 hp lifts the player off 0.
        session.attack();
        session.process();
        let player = session.snapshot().player;
        assert_eq!((player.level, player.hp, player.max_hp), (2, 10, 50));
        assert!(!session.is_game_over());
        assert!(session.timer().is_active());

        // The walled-in crawler at (2,3) keeps striking until the player falls again.
        assert_eq!(session.advance_clock(Duration::from_millis(1500)), 3);
        session.process();
        let snapshot = session.snapshot();
        assert!(snapshot.ticks >= 3);
        assert_eq!(snapshot.player.hp, 0);
        assert!(session.is_game_over());
        assert_eq!(defeat_count(&session), 2);
    }

    #[test]
    fn input_lock_ignores_moves() {
        let mut session = scripted_session(&[]);
        session.set_input_lock(true);
        session.move_player(Direction::East);
        session.process();
        assert_eq!(session.snapshot().player.x, 2);

        session.set_input_lock(false);
        session.move_player(Direction::East);
        session.process();
        assert_eq!(session.snapshot().player.x, 3);
    }

    #[test]
    fn potion_scenario() {
        let mut session = scripted_session(&[]);
        session.world_mut().set_player_stats(20, 40);
        session.use_potion();
        session.process();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.potions, 0);
        assert_eq!(snapshot.player.hp, 40);
    }

    #[test]
    fn hp_invariant_holds_through_play() {
        let mut session =
            Session::with_combat_rng(&config(31337), RandomNumberGenerator::seeded(5)).unwrap();
        let moves = [
            Direction::East,
            Direction::South,
            Direction::East,
            Direction::North,
            Direction::West,
            Direction::South,
        ];
        for step in 0..200 {
            session.move_player(moves[step % moves.len()]);
            session.attack();
            if step % 7 == 0 {
                session.use_potion();
            }
            session.advance_clock(Duration::from_millis(250));
            session.process();

            let snapshot = session.snapshot();
            assert!(snapshot.player.hp >= 0);
            assert!(snapshot.player.hp <= snapshot.player.max_hp);
            assert!(snapshot.player.level >= 1);
            assert!(snapshot.grid.is_walkable(Point::new(snapshot.player.x, snapshot.player.y)));
            assert!(snapshot.enemies.iter().all(|enemy| enemy.hp > 0));
        }
    }
}
