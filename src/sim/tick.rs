//! Per-frame simulation step and turn validation
//!
//! Both gameplay failure modes (wrong turn, off-road) are modeled as
//! transitions into `GamePhase::GameOver`, so the frame loop's control flow
//! stays uniform and the loop always terminates cleanly.

use super::road::TurnDir;
use super::state::{GameOverCause, GameState, Heading};
use crate::consts::SPEED_INCREMENT;

/// Input for a single frame. One-shot flags; the driver clears them after
/// each processed tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// One logical turn attempt (tap, click, or Space)
    pub turn: bool,
}

/// Advance the game by one frame.
///
/// `dt_ms` is wall-clock time since the previous frame. Movement covers
/// `speed` px this frame while the ramp itself is time-based, so the same
/// play duration yields the same difficulty on any refresh rate.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.is_over() {
        return;
    }

    if input.turn {
        attempt_turn(state);
        if state.is_over() {
            return;
        }
    }

    state.frames += 1;

    state.player.advance(state.speed);
    let p = &state.player;
    if !state.road.is_on_road(p.pos.x, p.pos.y, p.size) {
        state.end(GameOverCause::OffRoad);
        return;
    }

    state.speed += SPEED_INCREMENT * dt_ms / 1000.0;
}

/// Validate and apply one turn attempt.
///
/// Valid combinations commit atomically: heading change, turn consumption,
/// segment append, score increment. Every other combination ends the run on
/// the spot; the player must turn exactly when the road turns.
pub fn attempt_turn(state: &mut GameState) {
    if state.is_over() {
        return;
    }

    match (state.player.heading, state.road.next_turn()) {
        (Heading::Up, Some(dir @ (TurnDir::Left | TurnDir::Right))) => commit(state, dir),
        (Heading::Left | Heading::Right, Some(TurnDir::Straight)) => {
            commit(state, TurnDir::Straight)
        }
        _ => state.end(GameOverCause::WrongTurn),
    }
}

fn commit(state: &mut GameState, dir: TurnDir) {
    state.player.heading = dir.into();
    state.road.consume_turn();
    state.road.append_segment(dir);
    state.score += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::GamePhase;

    const W: f32 = 400.0;
    const H: f32 = 800.0;

    fn fresh(seed: u64) -> GameState {
        GameState::new(seed, W, H)
    }

    #[test]
    fn test_commit_right_turn() {
        let mut state = fresh(7);
        state
            .road
            .force_turns(vec![TurnDir::Right, TurnDir::Straight, TurnDir::Left]);
        let segments_before = state.road.segments().len();
        assert_eq!(state.score, 0);

        attempt_turn(&mut state);

        assert_eq!(state.score, 1);
        assert_eq!(state.player.heading, Heading::Right);
        assert_eq!(state.road.consumed(), 1);
        assert_eq!(state.road.segments().len(), segments_before + 1);
        // freshly appended segment is a horizontal strip
        assert_eq!(state.road.segments().last().unwrap().h, ROAD_WIDTH);
        assert!(!state.is_over());
    }

    #[test]
    fn test_return_to_straight() {
        let mut state = fresh(7);
        state
            .road
            .force_turns(vec![TurnDir::Left, TurnDir::Straight, TurnDir::Right]);

        attempt_turn(&mut state);
        assert_eq!(state.player.heading, Heading::Left);

        attempt_turn(&mut state);
        assert_eq!(state.player.heading, Heading::Up);
        assert_eq!(state.score, 2);
        assert!(!state.is_over());
    }

    #[test]
    fn test_straight_tap_on_straight_heading_ends_run() {
        let mut state = fresh(7);
        state.road.force_turns(vec![TurnDir::Straight, TurnDir::Left]);

        attempt_turn(&mut state);

        assert!(state.is_over());
        assert_eq!(state.cause, Some(GameOverCause::WrongTurn));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_double_lateral_ends_run() {
        // already turning right while the queue expects another right
        let mut state = fresh(7);
        state
            .road
            .force_turns(vec![TurnDir::Right, TurnDir::Right, TurnDir::Straight]);

        attempt_turn(&mut state);
        assert_eq!(state.player.heading, Heading::Right);
        assert!(!state.is_over());

        attempt_turn(&mut state);
        assert!(state.is_over());
        assert_eq!(state.cause, Some(GameOverCause::WrongTurn));
        // score frozen at the last committed value
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_score_untouched_by_plain_advancement() {
        let mut state = fresh(7);
        let input = TickInput::default();
        for _ in 0..20 {
            tick(&mut state, &input, 16.0);
        }
        assert_eq!(state.score, 0);
        assert!(!state.is_over());
    }

    #[test]
    fn test_speed_ramp_is_time_based() {
        let mut coarse = fresh(7);
        let mut fine = fresh(7);
        let input = TickInput::default();

        // same wall-clock duration at different frame rates
        for _ in 0..10 {
            tick(&mut coarse, &input, 100.0);
        }
        for _ in 0..100 {
            tick(&mut fine, &input, 10.0);
        }

        assert!((coarse.speed - fine.speed).abs() < 1e-4);
        assert!(coarse.speed > INITIAL_SPEED);
    }

    #[test]
    fn test_off_road_ends_run_with_frozen_score() {
        // commit a right turn, then drive off the right edge of the old
        // vertical segment
        let mut state = fresh(7);
        state.road.force_turns(vec![TurnDir::Right, TurnDir::Straight]);
        attempt_turn(&mut state);
        assert_eq!(state.score, 1);

        let input = TickInput::default();
        let mut guard = 0;
        while !state.is_over() {
            tick(&mut state, &input, 16.0);
            guard += 1;
            assert!(guard < 10_000, "run never ended");
        }

        assert_eq!(state.cause, Some(GameOverCause::OffRoad));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_tick_is_inert_after_game_over() {
        let mut state = fresh(7);
        state.road.force_turns(vec![TurnDir::Straight]);
        attempt_turn(&mut state);
        assert!(state.is_over());

        let pos = state.player.pos;
        let speed = state.speed;
        let frames = state.frames;

        tick(&mut state, &TickInput { turn: true }, 16.0);

        assert_eq!(state.player.pos, pos);
        assert_eq!(state.speed, speed);
        assert_eq!(state.frames, frames);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_turn_processed_before_advancement() {
        // a tap that ends the run must not move the player afterwards
        let mut state = fresh(7);
        state.road.force_turns(vec![TurnDir::Straight]);
        let pos = state.player.pos;

        tick(&mut state, &TickInput { turn: true }, 16.0);

        assert!(state.is_over());
        assert_eq!(state.player.pos, pos);
    }

    #[test]
    fn test_determinism() {
        let mut a = fresh(99);
        let mut b = fresh(99);

        let script = [false, false, true, false, true, false];
        for &turn in &script {
            let input = TickInput { turn };
            tick(&mut a, &input, 16.0);
            tick(&mut b, &input, 16.0);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.road.segments(), b.road.segments());
    }
}
