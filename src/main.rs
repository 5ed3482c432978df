use std::{env, time::Duration};

use abyssal_realms::{
    GameConfig, GameError, Session,
    input::{ScriptStep, ScriptedInput, command_for_key},
    render::draw_snapshot,
};
use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;

const MAP_ORIGIN_X: i32 = 2;
const MAP_ORIGIN_Y: i32 = 5;

struct AbyssalState {
    session: Session,
}

impl GameState for AbyssalState {
    fn tick(&mut self, ctx: &mut BTerm) {
        if let Some(key) = ctx.key {
            if key == VirtualKeyCode::Escape {
                self.session.shutdown();
                ctx.quit();
                return;
            }
            if !self.session.is_game_over() {
                if let Some(command) = command_for_key(key) {
                    self.session.submit(command);
                }
            }
        }
        let elapsed = Duration::from_secs_f32(ctx.frame_time_ms.max(0.0) / 1000.0);
        self.session.advance_clock(elapsed);
        self.session.process();

        ctx.cls();
        let snapshot = self.session.snapshot();
        draw_snapshot(ctx, &snapshot, Point::new(MAP_ORIGIN_X, MAP_ORIGIN_Y));
    }
}

struct Options {
    config: GameConfig,
    script: Option<String>,
}

fn parse_args() -> Result<Options, GameError> {
    let mut config = GameConfig::default();
    let mut seed = None;
    let mut script = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(path) = args.next() {
                    config = GameConfig::load(path)?;
                }
            }
            "--seed" => seed = args.next().and_then(|value| value.parse::<u32>().ok()),
            "--script" => script = args.next(),
            other => eprintln!("Warning: ignoring unknown argument {other}"),
        }
    }
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(Options { config, script })
}

/// Replays a key script without a terminal and prints the journal and the
/// final state as JSON lines.
fn run_script(config: &GameConfig, path: &str) -> Result<(), GameError> {
    let mut script = ScriptedInput::from_file(path)?;
    for c in &script.unknown {
        eprintln!("Warning: Unknown key in script: {c}");
    }
    let mut session = Session::new(config)?;
    while let Some(step) = script.next_step() {
        match step {
            ScriptStep::Command(command) => session.submit(command),
            ScriptStep::Wait => {
                session.advance_clock(config.tick_interval());
            }
        }
        session.process();
        if session.is_game_over() {
            break;
        }
    }
    for entry in session.journal() {
        println!("{}", entry.to_json_line());
    }
    println!("{}", session.snapshot().to_json()?);
    session.shutdown();
    Ok(())
}

fn main() -> BError {
    let options = parse_args()?;
    if let Some(path) = options.script.as_deref() {
        run_script(&options.config, path)?;
        return Ok(());
    }

    let session = Session::new(&options.config)?;
    let context = BTermBuilder::simple80x50()
        .with_title(format!("Abyssal Realms · seed {}", session.seed()))
        .build()?;
    main_loop(context, AbyssalState { session })
}
