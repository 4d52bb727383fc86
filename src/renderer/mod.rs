//! Rendering layer
//!
//! The sim never touches a real canvas: frames are composed through
//! [`DrawSurface`], a minimal rectangle-fill surface. The wasm entry point
//! backs it with a 2D canvas context; tests drive the same path with a
//! recording double.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::sim::{GameState, Rect};

/// Fill styles used by the frame composer (cosmetic)
pub mod colors {
    pub const BACKGROUND: &str = "#333";
    pub const ROAD: &str = "#666";
    pub const PLAYER: &str = "#FF5722";
}

/// Minimal 2D drawing surface sized to the viewport
pub trait DrawSurface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    /// Clear the whole surface
    fn clear(&mut self);
    /// Fill an axis-aligned rectangle with a CSS color
    fn fill_rect(&mut self, rect: &Rect, style: &str);
}

/// Compose one frame: background, road segments, then the player square.
///
/// Called strictly after the frame's tick, so it reads settled state.
pub fn draw_frame(state: &GameState, surface: &mut impl DrawSurface) {
    surface.clear();

    let full = Rect::new(0.0, 0.0, surface.width(), surface.height());
    surface.fill_rect(&full, colors::BACKGROUND);

    for segment in state.road.segments() {
        surface.fill_rect(segment, colors::ROAD);
    }

    let p = &state.player;
    surface.fill_rect(&Rect::new(p.pos.x, p.pos.y, p.size, p.size), colors::PLAYER);
}
