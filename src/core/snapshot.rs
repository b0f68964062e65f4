//=========================================================================
// Frame Snapshot
//
// The single deterministic per-frame view handed to the application.
//
// Every manager's one-shot dirty flag is consumed into `DirtyFlags` by
// exactly one reader (the orchestrator) once per tick, then published
// here as plain booleans. The snapshot is a pure value: reading it has no
// side effects, so consumers can inspect it in any order without racing
// each other for the flags.
//
//=========================================================================

//=== Internal Modules ====================================================

use super::phase::Phase;
use super::vec2::Vec2;

//=== DirtyFlags ==========================================================

/// One boolean per producer, true when that producer changed since the
/// previous frame.
///
/// A flag observed true here cannot be observed true on the next frame
/// without an intervening producer event (scroll keeps its flag latched
/// while motion persists, by contract).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    /// Viewport dimensions changed.
    pub resized: bool,

    /// Scroll delta changed (latched while motion persists).
    pub scrolled: bool,

    /// A swipe transition fired on the X axis.
    pub swiped_x: bool,

    /// A swipe transition fired on the Y axis.
    pub swiped_y: bool,

    /// Pointer moved.
    pub cursor_moved: bool,

    /// Held-key set changed.
    pub keys_changed: bool,

    /// Must-assets barrier resolved this frame.
    pub must_assets_loaded: bool,

    /// The deferred (optional) loading phase was entered this frame.
    pub started_loading_all: bool,

    /// Every asset settled this frame.
    pub all_assets_loaded: bool,
}

//=== FrameSnapshot =======================================================

/// Per-frame input/lifecycle snapshot.
///
/// Built by the orchestrator each tick after input reconciliation and
/// passed to [`Application::draw`](crate::Application::draw).
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot {
    //--- Time -------------------------------------------------------------

    /// Seconds since runtime start.
    pub time: f64,

    /// Seconds since the previous tick.
    pub delta_time: f64,

    //--- Change Flags -----------------------------------------------------

    pub flags: DirtyFlags,

    //--- Cached Input State -----------------------------------------------

    /// Viewport size in pixels.
    pub viewport: Vec2,

    /// Clamped scroll delta for this frame.
    pub scroll_delta: Vec2,

    /// Scroll delta normalized by the per-axis maxima.
    pub scroll_speed: Vec2,

    /// Cumulative scroll position.
    pub scroll_position: Vec2,

    /// Pointer position in screen pixels.
    pub cursor_position: Vec2,

    //--- Lifecycle --------------------------------------------------------

    /// Current lifecycle phase.
    pub phase: Phase,

    /// Seconds since runtime start (process-start basis).
    pub since_start: f64,

    /// Seconds since must-assets became available, once they have.
    pub since_must_loaded: Option<f64>,

    /// Seconds since the main loop was entered, once it has been.
    pub since_main_loop: Option<f64>,

    //--- Asset Progress ---------------------------------------------------

    /// Settled fraction of the must phase, in `[0, 1]`.
    pub must_progress: f64,

    /// Settled fraction of the optional phase, in `[0, 1]`.
    pub optional_progress: f64,
}
