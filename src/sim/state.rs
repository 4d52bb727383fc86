//! Game session state and the player entity
//!
//! One `GameState` per play-through; restart constructs a fresh value so no
//! state leaks across runs.

use glam::Vec2;

use super::road::{Road, TurnDir};
use crate::consts::*;

/// The player's current direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Canonical forward axis (toward the top of the canvas)
    Up,
    Left,
    Right,
}

impl From<TurnDir> for Heading {
    fn from(dir: TurnDir) -> Self {
        match dir {
            TurnDir::Left => Heading::Left,
            TurnDir::Right => Heading::Right,
            TurnDir::Straight => Heading::Up,
        }
    }
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    /// Terminal; the score is frozen and no further state mutates
    GameOver,
}

/// Why a run ended. The end screen is identical either way; the distinction
/// is kept for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Turn attempt that didn't match the pending turn
    WrongTurn,
    /// Bounding box left the retained road surface
    OffRoad,
}

/// The player square
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub heading: Heading,
}

impl Player {
    /// Spawn centered horizontally, just above the bottom edge, facing up
    pub fn new(canvas_w: f32, canvas_h: f32) -> Self {
        Self {
            pos: Vec2::new(
                canvas_w / 2.0 - PLAYER_SIZE / 2.0,
                canvas_h - PLAYER_BOTTOM_OFFSET,
            ),
            size: PLAYER_SIZE,
            heading: Heading::Up,
        }
    }

    /// Move `distance` px along the current heading
    pub fn advance(&mut self, distance: f32) {
        match self.heading {
            Heading::Up => self.pos.y -= distance,
            Heading::Right => self.pos.x += distance,
            Heading::Left => self.pos.x -= distance,
        }
    }
}

/// Complete state of one play-through
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// One point per committed turn
    pub score: u32,
    /// Current movement speed (px per frame); ramps up over wall-clock time
    pub speed: f32,
    pub phase: GamePhase,
    /// Populated at game over
    pub cause: Option<GameOverCause>,
    pub player: Player,
    pub road: Road,
    /// Frames simulated so far
    pub frames: u64,
}

impl GameState {
    pub fn new(seed: u64, canvas_w: f32, canvas_h: f32) -> Self {
        Self {
            seed,
            score: 0,
            speed: INITIAL_SPEED,
            phase: GamePhase::Running,
            cause: None,
            player: Player::new(canvas_w, canvas_h),
            road: Road::new(canvas_w, canvas_h, seed),
            frames: 0,
        }
    }

    /// True once the run has ended
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Transition to the terminal phase, freezing the score
    pub fn end(&mut self, cause: GameOverCause) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::GameOver;
            self.cause = Some(cause);
        }
    }
}
