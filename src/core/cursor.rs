//=========================================================================
// Cursor Manager
//
// Tracks pointer position with a one-shot dirty flag.
//
// Like resize, move streams are coalesced by the orchestrator to one
// applied sample per tick, so the per-sample delta and speed span the
// whole tick rather than individual OS events.
//
//=========================================================================

//=== Internal Modules ====================================================

use super::vec2::Vec2;

//=== CursorManager =======================================================

/// Owns the pointer state for one runtime instance.
pub struct CursorManager {
    position: Vec2,
    delta: Vec2,
    speed: f64,
    needs_update: bool,
}

impl CursorManager {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            delta: Vec2::ZERO,
            speed: 0.0,
            needs_update: false,
        }
    }

    /// Current pointer position in screen pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Displacement of the most recent applied sample.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Magnitude of the most recent displacement.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Applies a pointer move sample.
    pub fn handle_move(&mut self, x: f64, y: f64) {
        let next = Vec2::new(x, y);
        self.delta = next - self.position;
        self.position = next;
        self.speed = self.delta.length();
        self.needs_update = true;
    }

    /// Reads and clears the one-shot dirty flag.
    pub fn consume(&mut self) -> bool {
        let was_needed = self.needs_update;
        self.needs_update = false;
        was_needed
    }
}

impl Default for CursorManager {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
