//=========================================================================
// Viewport Manager
//
// Tracks viewport dimensions with a one-shot dirty flag.
//
// Resize streams are coalesced by the orchestrator to at most one applied
// update per tick, last value wins.
//
//=========================================================================

//=== External Crates =====================================================

use log::debug;

//=== Internal Modules ====================================================

use super::vec2::Vec2;

//=== ViewportManager =====================================================

/// Owns the viewport size for one runtime instance.
pub struct ViewportManager {
    size: Vec2,
    needs_update: bool,
}

impl ViewportManager {
    /// Creates a manager with the initial viewport size.
    ///
    /// The dirty flag starts raised so the first frame observes the
    /// initial dimensions as a resize.
    pub fn new(width: f64, height: f64) -> Self {
        Self { size: Vec2::new(width, height), needs_update: true }
    }

    /// Current viewport size in pixels.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Applies a resize sample; identical dimensions are ignored.
    pub fn handle_resize(&mut self, width: f64, height: f64) {
        let next = Vec2::new(width, height);
        if next != self.size {
            debug!("viewport resized: {:?} -> {:?}", self.size, next);
            self.size = next;
            self.needs_update = true;
        }
    }

    /// Reads and clears the one-shot dirty flag.
    pub fn consume(&mut self) -> bool {
        let was_needed = self.needs_update;
        self.needs_update = false;
        was_needed
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
