//! Procedural road generation
//!
//! Maintains a bounded window of road segments plus a queue of upcoming turn
//! directions ahead of the player, and answers containment queries for the
//! collision check. Generation is driven by a seeded PCG so a run's road is
//! reproducible from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;

/// A single direction change the player must match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDir {
    Left,
    Right,
    /// Resume the forward ("up") axis after a lateral stretch
    Straight,
}

impl TurnDir {
    /// True for `Left`/`Right`
    pub fn is_lateral(&self) -> bool {
        !matches!(self, TurnDir::Straight)
    }
}

/// The traversable surface: retained segments plus the pending turn queue
#[derive(Debug, Clone)]
pub struct Road {
    canvas_w: f32,
    canvas_h: f32,
    /// Retained segments, oldest first
    segments: Vec<Rect>,
    /// Generated turn directions; entries before `next_index` are consumed
    turns: Vec<TurnDir>,
    next_index: usize,
    /// Most recent lateral committed; governs where a Straight segment lands.
    /// The first commit of a run is always lateral, so the seed value is
    /// overwritten before any Straight append can read it.
    last_lateral: TurnDir,
    rng: Pcg32,
}

impl Road {
    /// Create the initial straight road and pre-generate the first turns.
    ///
    /// The initial segment is centered horizontally and runs from the top
    /// edge to past the bottom of the canvas.
    pub fn new(canvas_w: f32, canvas_h: f32, seed: u64) -> Self {
        let mut road = Self {
            canvas_w,
            canvas_h,
            segments: Vec::new(),
            turns: Vec::new(),
            next_index: 0,
            last_lateral: TurnDir::Right,
            rng: Pcg32::seed_from_u64(seed),
        };

        road.segments.push(Rect::new(
            canvas_w / 2.0 - ROAD_WIDTH / 2.0,
            0.0,
            ROAD_WIDTH,
            canvas_h + INITIAL_SEGMENT_OVERHANG,
        ));
        road.generate_turns(INITIAL_TURNS);

        road
    }

    /// Append `count` new turn directions to the queue.
    ///
    /// The first entry of a fresh queue is always lateral so the run opens
    /// with a real decision point. A lateral direction never repeats
    /// back-to-back; `Straight` may.
    pub fn generate_turns(&mut self, count: usize) {
        const CHOICES: [TurnDir; 3] = [TurnDir::Right, TurnDir::Left, TurnDir::Straight];

        for _ in 0..count {
            let dir = match self.turns.last() {
                None => CHOICES[self.rng.random_range(0..2)],
                Some(&last) => loop {
                    let candidate = CHOICES[self.rng.random_range(0..CHOICES.len())];
                    if candidate != last || !candidate.is_lateral() {
                        break candidate;
                    }
                },
            };
            self.turns.push(dir);
        }
    }

    /// The next turn the player must match, if any
    pub fn next_turn(&self) -> Option<TurnDir> {
        self.turns.get(self.next_index).copied()
    }

    /// Number of generated-but-unconsumed turns
    pub fn turns_ahead(&self) -> usize {
        self.turns.len() - self.next_index
    }

    /// Number of turns consumed so far
    pub fn consumed(&self) -> usize {
        self.next_index
    }

    /// Consume the pending turn, replenishing the queue when it runs low.
    ///
    /// Returns the consumed direction. The queue is topped up before this
    /// returns, so the player is never blocked waiting for more road.
    pub fn consume_turn(&mut self) -> Option<TurnDir> {
        let dir = self.next_turn()?;
        self.next_index += 1;

        if self.turns_ahead() < MIN_TURNS_AHEAD {
            self.generate_turns(TURN_BATCH);
        }

        Some(dir)
    }

    /// Append the segment opened up by a committed turn.
    ///
    /// Lateral turns produce a horizontal strip at the far end of the
    /// predecessor; `Straight` produces a full-height vertical strip sharing
    /// the junction corner where the player entered the horizontal
    /// predecessor. Beyond the retention cap the oldest segment is evicted:
    /// it is behind the player and irrelevant to collision.
    pub fn append_segment(&mut self, dir: TurnDir) {
        let Some(&last) = self.segments.last() else {
            return;
        };

        let segment = match dir {
            TurnDir::Right => Rect::new(
                last.right() - ROAD_WIDTH,
                last.bottom() - ROAD_WIDTH,
                self.canvas_w,
                ROAD_WIDTH,
            ),
            TurnDir::Left => Rect::new(
                0.0,
                last.bottom() - ROAD_WIDTH,
                last.x + ROAD_WIDTH,
                ROAD_WIDTH,
            ),
            TurnDir::Straight => {
                let x = match self.last_lateral {
                    TurnDir::Left => last.right() - ROAD_WIDTH,
                    _ => last.x,
                };
                // bottom edges aligned with the strip, body extending upward
                Rect::new(x, last.bottom() - self.canvas_h, ROAD_WIDTH, self.canvas_h)
            }
        };

        if dir.is_lateral() {
            self.last_lateral = dir;
        }

        self.segments.push(segment);
        if self.segments.len() > MAX_SEGMENTS {
            self.segments.remove(0);
        }
    }

    /// True iff the player's full bounding box lies inside at least one
    /// retained segment. Linear scan; the retention cap keeps this cheap.
    pub fn is_on_road(&self, x: f32, y: f32, size: f32) -> bool {
        self.segments.iter().any(|s| s.contains_box(x, y, size))
    }

    /// Retained segments, oldest first
    pub fn segments(&self) -> &[Rect] {
        &self.segments
    }

    /// All generated turns, consumed included
    pub fn turns(&self) -> &[TurnDir] {
        &self.turns
    }

    /// Replace the pending queue (test setup)
    #[cfg(test)]
    pub(crate) fn force_turns(&mut self, turns: Vec<TurnDir>) {
        self.turns = turns;
        self.next_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn road() -> Road {
        Road::new(400.0, 800.0, 42)
    }

    #[test]
    fn test_initial_road_geometry() {
        let road = road();
        assert_eq!(road.segments().len(), 1);

        let seg = road.segments()[0];
        assert_eq!(seg.x, 170.0);
        assert_eq!(seg.right(), 230.0);
        assert_eq!(seg.y, 0.0);
        assert_eq!(seg.bottom(), 1000.0);

        assert_eq!(road.turns().len(), INITIAL_TURNS);
        assert!(road.turns()[0].is_lateral());
    }

    #[test]
    fn test_no_back_to_back_lateral_repeats() {
        let mut road = road();
        road.generate_turns(500);

        for pair in road.turns().windows(2) {
            if pair[0].is_lateral() {
                assert_ne!(pair[0], pair[1], "lateral turn repeated back-to-back");
            }
        }
    }

    #[test]
    fn test_consume_replenishes_before_running_out() {
        let mut road = road();
        for _ in 0..100 {
            assert!(road.consume_turn().is_some());
            assert!(road.turns_ahead() >= MIN_TURNS_AHEAD);
        }
    }

    #[test]
    fn test_right_turn_segment_geometry() {
        let mut road = road();
        road.append_segment(TurnDir::Right);

        let seg = *road.segments().last().unwrap();
        // left edge flush with the trailing edge of the vertical predecessor
        assert_eq!(seg.x, 170.0);
        assert_eq!(seg.y, 940.0);
        assert_eq!(seg.w, 400.0);
        assert_eq!(seg.h, ROAD_WIDTH);
    }

    #[test]
    fn test_left_turn_segment_geometry() {
        let mut road = road();
        road.append_segment(TurnDir::Left);

        let seg = *road.segments().last().unwrap();
        // flush with the canvas left edge, reaching the predecessor's right edge
        assert_eq!(seg.x, 0.0);
        assert_eq!(seg.y, 940.0);
        assert_eq!(seg.right(), 230.0);
        assert_eq!(seg.h, ROAD_WIDTH);
    }

    #[test]
    fn test_straight_segment_alignment_after_right() {
        let mut road = road();
        road.append_segment(TurnDir::Right);
        road.append_segment(TurnDir::Straight);

        let seg = *road.segments().last().unwrap();
        // flush with the left edge of the horizontal predecessor
        assert_eq!(seg.x, 170.0);
        assert_eq!(seg.w, ROAD_WIDTH);
        assert_eq!(seg.h, 800.0);
        // bottom edges aligned, body extending upward
        assert_eq!(seg.bottom(), 1000.0);
    }

    #[test]
    fn test_straight_segment_alignment_after_left() {
        let mut road = road();
        road.append_segment(TurnDir::Left);
        road.append_segment(TurnDir::Straight);

        let seg = *road.segments().last().unwrap();
        // flush with the right edge of the horizontal predecessor
        assert_eq!(seg.x, 170.0);
        assert_eq!(seg.w, ROAD_WIDTH);
        assert_eq!(seg.bottom(), 1000.0);
    }

    #[test]
    fn test_fresh_segment_contains_player_box() {
        let mut road = road();
        road.append_segment(TurnDir::Right);

        let seg = *road.segments().last().unwrap();
        assert!(road.is_on_road(seg.x + 5.0, seg.y + 5.0, 20.0));
    }

    #[test]
    fn test_on_road_boundaries() {
        let road = road();
        // well inside the initial segment
        assert!(road.is_on_road(175.0, 100.0, 20.0));
        // box straddling the right edge (230)
        assert!(!road.is_on_road(220.0, 100.0, 20.0));
        // nowhere near the road
        assert!(!road.is_on_road(300.0, 100.0, 20.0));
    }

    #[test]
    fn test_segment_retention_capped() {
        let mut road = road();
        for _ in 0..50 {
            let dir = road.consume_turn().unwrap();
            road.append_segment(dir);
            assert!(road.segments().len() <= MAX_SEGMENTS);
        }
    }

    #[test]
    fn test_same_seed_same_turns() {
        let a = Road::new(400.0, 800.0, 7);
        let b = Road::new(400.0, 800.0, 7);
        assert_eq!(a.turns(), b.turns());
    }

    proptest! {
        #[test]
        fn prop_first_turn_is_lateral(seed in any::<u64>()) {
            let road = Road::new(400.0, 800.0, seed);
            prop_assert!(road.turns()[0].is_lateral());
        }

        #[test]
        fn prop_lateral_never_repeats(seed in any::<u64>(), extra in 0usize..200) {
            let mut road = Road::new(400.0, 800.0, seed);
            road.generate_turns(extra);
            for pair in road.turns().windows(2) {
                if pair[0].is_lateral() {
                    prop_assert_ne!(pair[0], pair[1]);
                }
            }
        }

        #[test]
        fn prop_retention_bounded(seed in any::<u64>(), commits in 1usize..100) {
            let mut road = Road::new(400.0, 800.0, seed);
            for _ in 0..commits {
                if let Some(dir) = road.consume_turn() {
                    road.append_segment(dir);
                }
                prop_assert!(road.segments().len() <= MAX_SEGMENTS);
            }
        }
    }
}
