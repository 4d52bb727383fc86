//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - No rendering or platform dependencies
//! - Gameplay failures (wrong turn, off-road) are state transitions, never panics

pub mod rect;
pub mod road;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use road::{Road, TurnDir};
pub use state::{GameOverCause, GamePhase, GameState, Heading, Player};
pub use tick::{TickInput, attempt_turn, tick};
