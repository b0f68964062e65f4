//=========================================================================
// Application Contract
//
// The seam between the runtime and the demo it drives.
//
// A demo implements [`Application`] and hands an instance to
// [`Runtime::run`](crate::Runtime::run); the runtime owns the
// lifecycle and calls back into the trait. Composition over subclassing:
// there is no base type to extend, only this contract to satisfy, and
// every hook ships a default empty body so a demo overrides exactly the
// events it cares about.
//
// Call order, per instance:
// ```text
//   manifest()  once, before any thread is spawned
//   setup()     once, on the logic thread, before the must barrier
//   hooks + draw()  every permitted tick, on the logic thread
//   dispose()   exactly once, on shutdown
// ```
//
//=========================================================================

//=== External Crates =====================================================

use thiserror::Error;

//=== Internal Modules ====================================================

use crate::assets::{AssetError, AssetManager, AssetManifest};
use crate::core::event::{KeyCode, Modifiers};
use crate::core::keyboard::KeyboardManager;
use crate::core::snapshot::FrameSnapshot;

//=== SetupError ==========================================================

/// Failures of one-time application setup.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The surface or canvas the application expected to draw into does
    /// not exist.
    #[error("render target unavailable: {0}")]
    MissingRenderTarget(String),

    /// A graphics or compute context could not be created.
    #[error("context creation failed: {0}")]
    ContextCreation(String),

    /// Asset-loading failure surfaced during setup.
    #[error(transparent)]
    Assets(#[from] AssetError),

    /// Application-specific setup failure.
    #[error("{0}")]
    Other(String),
}

//=== Application =========================================================

/// The demo-side half of the runtime.
///
/// Required methods define what the demo needs and what it draws; the
/// hook methods are optional, dispatched from the orchestrator in the
/// same tick the underlying event was digested.
pub trait Application: Send + 'static {
    //--- Lifecycle --------------------------------------------------------

    /// Asset descriptor table for this demo. Read once at startup.
    fn manifest(&self) -> AssetManifest;

    /// One-time setup, invoked on the logic thread before the must-asset
    /// barrier resolves. Payloads are generally not available yet; hold
    /// the manager and dereference them from [`draw`](Self::draw) once
    /// the phase permits.
    fn setup(&mut self, assets: &AssetManager) -> Result<(), SetupError>;

    /// Per-frame callback. Never invoked while must assets are pending.
    fn draw(&mut self, frame: &FrameSnapshot);

    /// Teardown, invoked exactly once when the runtime shuts down.
    fn dispose(&mut self) {}

    //--- Input Hooks ------------------------------------------------------

    /// A key went down. `keyboard` exposes the held-key set and the
    /// combination predicates; `modifiers` is the event's own snapshot.
    fn on_key_pressed(&mut self, key: KeyCode, modifiers: Modifiers, keyboard: &KeyboardManager) {
        let _ = (key, modifiers, keyboard);
    }

    /// A key came up.
    fn on_key_released(&mut self, key: KeyCode, modifiers: Modifiers, keyboard: &KeyboardManager) {
        let _ = (key, modifiers, keyboard);
    }

    //--- Swipe Hooks ------------------------------------------------------

    /// A horizontal swipe began; `direction` is the sign of the raw
    /// delta (`1` or `-1`).
    fn on_swipe_x_start(&mut self, direction: i8) {
        let _ = direction;
    }

    /// The horizontal swipe ended; `direction` is the sign of the delta
    /// observed when the end fired.
    fn on_swipe_x_end(&mut self, direction: i8) {
        let _ = direction;
    }

    /// A vertical swipe began.
    fn on_swipe_y_start(&mut self, direction: i8) {
        let _ = direction;
    }

    /// The vertical swipe ended.
    fn on_swipe_y_end(&mut self, direction: i8) {
        let _ = direction;
    }
}
