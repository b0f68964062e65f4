//=========================================================================
// Runtime Event Types
//
// Defines the internal representation of low-level input events.
//
// This module abstracts platform-specific input (Winit today, anything
// window-shaped tomorrow) into a unified, runtime-friendly format used by
// the per-frame managers.
//
// Responsibilities:
// - Represent keyboard, wheel, touch, pointer and resize events in a
//   stable, portable way
// - Carry modifier state alongside discrete key events so combination
//   predicates can resolve against the triggering event
// - Provide the wheel delta-unit taxonomy used for normalization
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    RawInputEvent (this module)
//         ↓
//    Orchestrator::tick (one batch per frame)
//         ↓
//    Managers (scroll / swipe / cursor / viewport / keyboard)
// ```
//
//=========================================================================

//=== Modifiers ===========================================================

/// Snapshot of the modifier keys active when an event fired.
///
/// Carried on every discrete key event; combination predicates resolve
/// modifier entries against this snapshot rather than the held-key set,
/// matching platform conventions (a Ctrl+S chord reports `ctrl` on the
/// `S` event itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers active.
    pub const NONE: Modifiers = Modifiers { ctrl: false, shift: false, alt: false, meta: false };

    /// Ctrl only, common enough in tests to warrant a constant.
    pub const CTRL: Modifiers = Modifiers { ctrl: true, shift: false, alt: false, meta: false };

    /// Shift only.
    pub const SHIFT: Modifiers = Modifiers { ctrl: false, shift: true, alt: false, meta: false };
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// held-key tracking is layout-stable and inherently case-insensitive.
///
/// Coverage:
/// - Alphanumeric keys (A-Z, 0-9)
/// - Arrow keys
/// - Common special keys (Space, Enter, Escape, function keys)
///
/// Additional keys can be added as needed without breaking existing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Tab key
    Tab,

    /// F11 (fullscreen toggle in most demo bindings)
    F11,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== ComboKey ============================================================

/// One entry of a key combination.
///
/// Modifier entries resolve against the triggering event's [`Modifiers`]
/// snapshot (so `Ctrl` here covers either control key, and `Meta` covers
/// Cmd), while `Code` entries resolve against the held-key set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComboKey {
    /// Ctrl / Control modifier.
    Ctrl,

    /// Shift modifier.
    Shift,

    /// Alt modifier.
    Alt,

    /// Meta / Cmd modifier.
    Meta,

    /// A physical key, checked against the held-key set.
    Code(KeyCode),
}

//=== WheelDeltaMode ======================================================

/// Unit of a wheel event's delta values.
///
/// Wheel hardware and platforms disagree on units; deltas are normalized
/// to pixels before clamping:
/// - `Pixel`: already pixels, factor 1
/// - `Line`: multiplied by a fixed line-height constant
/// - `Page`: multiplied by the viewport dimension of the same axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDeltaMode {
    Pixel,
    Line,
    Page,
}

//=== RawInputEvent =======================================================

/// Low-level input event from the platform layer.
///
/// One batch of these is digested per tick. Continuous streams (wheel,
/// touch-move, pointer, resize) are coalesced last-wins inside a batch by
/// the orchestrator; discrete key and touch boundary events are processed
/// in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    /// Key pressed down, with the modifier state at the moment it fired.
    KeyDown { key: KeyCode, modifiers: Modifiers },

    /// Key released.
    KeyUp { key: KeyCode, modifiers: Modifiers },

    /// Wheel rotation. Deltas are in `mode` units, sign convention is
    /// content-down-positive (DOM style).
    Wheel { delta_x: f64, delta_y: f64, mode: WheelDeltaMode },

    /// First touch contact at the given position.
    TouchStart { x: f64, y: f64 },

    /// Touch dragged to a new position.
    TouchMove { x: f64, y: f64 },

    /// Touch lifted (or cancelled by the platform).
    TouchEnd,

    /// Pointer moved to a new position in screen pixels.
    CursorMoved { x: f64, y: f64 },

    /// Viewport resized to the given dimensions in pixels.
    Resized { width: f64, height: f64 },

    /// Unrecognized or unsupported event, silently ignored downstream.
    Unidentified,
}
