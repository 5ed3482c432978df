use std::{fs, path::Path};

use bracket_terminal::prelude::VirtualKeyCode;

use crate::{error::GameError, map::Direction, session::Command};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScriptStep {
    Command(Command),
    /// Let one enemy tick interval pass.
    Wait,
}

pub fn command_for_key(key: VirtualKeyCode) -> Option<Command> {
    match key {
        VirtualKeyCode::Left | VirtualKeyCode::A | VirtualKeyCode::H => {
            Some(Command::Move(Direction::West))
        }
        VirtualKeyCode::Right | VirtualKeyCode::D | VirtualKeyCode::L => {
            Some(Command::Move(Direction::East))
        }
        VirtualKeyCode::Up | VirtualKeyCode::W | VirtualKeyCode::K => {
            Some(Command::Move(Direction::North))
        }
        VirtualKeyCode::Down | VirtualKeyCode::S | VirtualKeyCode::J => {
            Some(Command::Move(Direction::South))
        }
        VirtualKeyCode::Space | VirtualKeyCode::F => Some(Command::Attack),
        VirtualKeyCode::P => Some(Command::UsePotion),
        _ => None,
    }
}

/// Keypresses read from a text file, one character per step. Blank lines and
/// lines starting with `#` are skipped.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    steps: Vec<ScriptStep>,
    cursor: usize,
    pub unknown: Vec<char>,
}

impl ScriptedInput {
    pub fn parse(text: &str) -> Self {
        let mut script = Self::default();
        for line in text.lines() {
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            for c in line.trim_end().chars() {
                match step_for_char(c) {
                    Some(step) => script.steps.push(step),
                    None if c.is_whitespace() => {}
                    None => script.unknown.push(c),
                }
            }
        }
        script
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn next_step(&mut self) -> Option<ScriptStep> {
        let step = self.steps.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(step)
    }
}

fn step_for_char(c: char) -> Option<ScriptStep> {
    let command = match c {
        'w' | 'W' | 'k' | 'K' => Command::Move(Direction::North),
        'a' | 'A' | 'h' | 'H' => Command::Move(Direction::West),
        's' | 'S' | 'j' | 'J' => Command::Move(Direction::South),
        'd' | 'D' | 'l' | 'L' => Command::Move(Direction::East),
        ' ' | 'f' | 'F' => Command::Attack,
        'p' | 'P' => Command::UsePotion,
        '.' => return Some(ScriptStep::Wait),
        _ => return None,
    };
    Some(ScriptStep::Command(command))
}
