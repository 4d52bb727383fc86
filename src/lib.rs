//! Road Dash - a tap-to-turn reflex game
//!
//! The road ahead is generated procedurally; tap exactly when it turns to
//! stay on it. One wrong tap, or one missed turn, ends the run.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (road generation, turn validation, game state)
//! - `renderer`: Draw-surface abstraction and frame composition
//! - `leaderboard`: Score submission and leaderboard fetch (external service)
//! - `telegram`: Telegram Mini App bindings (username, share button)

pub mod leaderboard;
pub mod renderer;
pub mod sim;
pub mod telegram;

pub use leaderboard::ScoreSubmission;
pub use sim::GameState;

/// Game configuration constants
pub mod consts {
    /// Road width shared by every segment (px)
    pub const ROAD_WIDTH: f32 = 60.0;
    /// Extra length of the initial segment past the bottom edge (px)
    pub const INITIAL_SEGMENT_OVERHANG: f32 = 200.0;

    /// Player square edge length (px)
    pub const PLAYER_SIZE: f32 = 20.0;
    /// Player spawn distance above the bottom edge (px)
    pub const PLAYER_BOTTOM_OFFSET: f32 = 100.0;

    /// Movement speed at the start of a run (px per frame)
    pub const INITIAL_SPEED: f32 = 2.0;
    /// Speed gained per second of play (px per frame, per second)
    pub const SPEED_INCREMENT: f32 = 0.05;

    /// Turns pre-generated when a road is initialized
    pub const INITIAL_TURNS: usize = 5;
    /// Replenish the queue when fewer than this many turns remain
    pub const MIN_TURNS_AHEAD: usize = 3;
    /// Turns appended per replenishment batch
    pub const TURN_BATCH: usize = 3;
    /// Maximum retained road segments; the oldest is evicted beyond this
    pub const MAX_SEGMENTS: usize = 10;
}
