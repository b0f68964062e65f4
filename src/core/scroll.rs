//=========================================================================
// Scroll Manager
//
// Normalizes wheel/touch deltas into a bounded vector and synthesizes
// inertia after input ends.
//
// Pipeline:
// ```text
//   Wheel ──normalize(delta mode)──┐
//                                  ├──▶ apply() ──▶ clamp ──▶ delta/speed/position
//   Touch ──displacement──────────┘         ▲
//                                           │ (×0.95 per tick after 80 ms idle)
//                                     step_inertia()
// ```
//
// Invariants:
// - Delta components never exceed the configured per-axis maxima.
// - At most one inertia simulation is in flight; any real input cancels it
//   by refreshing the idle timestamp.
// - Inertia components with magnitude ≤ 0.1 snap to exactly zero, so the
//   decay terminates instead of asymptoting.
//
// The dirty flag follows the scroll-specific consume contract: it is
// reported every tick while motion persists and only cleared once the
// delta has returned to zero on both axes.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::{Duration, Instant};

//=== External Crates =====================================================

use log::trace;

//=== Internal Modules ====================================================

use super::event::WheelDeltaMode;
use super::vec2::Vec2;

//=== Constants ===========================================================

/// Pixels per wheel "line" (matches the common browser constant 100/6).
const LINE_HEIGHT: f64 = 100.0 / 6.0;

/// Geometric decay applied to the delta on each inertia step.
const INERTIA_DECAY: f64 = 0.95;

/// Magnitude below which a decaying component snaps to exactly zero.
const INERTIA_FLOOR: f64 = 0.1;

/// Idle time after the last real input before inertia begins.
const INERTIA_IDLE: Duration = Duration::from_millis(80);

//=== ScrollOptions =======================================================

/// Tunable scroll behavior.
#[derive(Debug, Clone, Copy)]
pub struct ScrollOptions {
    /// Scale applied to normalized wheel deltas.
    pub wheel_multiplier: f64,

    /// Scale applied to touch displacement deltas.
    pub touch_multiplier: f64,

    /// Per-axis clamp for the reported delta, in pixels.
    pub delta_x_max: f64,
    pub delta_y_max: f64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            wheel_multiplier: 1.0,
            touch_multiplier: 1.0,
            delta_x_max: 300.0,
            delta_y_max: 300.0,
        }
    }
}

//=== ScrollManager =======================================================

/// Owns the scroll state for one runtime instance.
///
/// Raw wheel/touch input arrives through the `handle_*` methods; the
/// orchestrator calls [`step_inertia`](Self::step_inertia) once per tick
/// and reads `delta`/`speed`/`position` afterwards.
pub struct ScrollManager {
    options: ScrollOptions,

    //--- Reported State ---------------------------------------------------
    delta: Vec2,
    speed: Vec2,
    position: Vec2,
    needs_update: bool,

    //--- Touch Tracking ---------------------------------------------------
    touch_point: Option<Vec2>,
    last_touch_delta: Vec2,

    //--- Inertia ----------------------------------------------------------
    last_input_at: Option<Instant>,
}

impl ScrollManager {
    /// Creates a manager with the given options.
    pub fn new(options: ScrollOptions) -> Self {
        Self {
            options,
            delta: Vec2::ZERO,
            speed: Vec2::ZERO,
            position: Vec2::ZERO,
            needs_update: false,
            touch_point: None,
            last_touch_delta: Vec2::ZERO,
            last_input_at: None,
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Current clamped per-tick delta in pixels.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Current delta normalized by the per-axis maxima (each component in
    /// `[-1, 1]`).
    pub fn speed(&self) -> Vec2 {
        self.speed
    }

    /// Cumulative scroll position (sum of every applied delta, inertia
    /// included).
    pub fn position(&self) -> Vec2 {
        self.position
    }

    //--- Wheel Input ------------------------------------------------------

    /// Applies one wheel event.
    ///
    /// Deltas are normalized from `mode` units to pixels (`Page` mode uses
    /// the viewport dimension of the same axis), then scaled by the wheel
    /// multiplier. Cancels any running inertia.
    pub fn handle_wheel(
        &mut self,
        delta_x: f64,
        delta_y: f64,
        mode: WheelDeltaMode,
        viewport: Vec2,
        now: Instant,
    ) {
        let (unit_x, unit_y) = match mode {
            WheelDeltaMode::Pixel => (1.0, 1.0),
            WheelDeltaMode::Line => (LINE_HEIGHT, LINE_HEIGHT),
            WheelDeltaMode::Page => (viewport.x, viewport.y),
        };

        let dx = delta_x * unit_x * self.options.wheel_multiplier;
        let dy = delta_y * unit_y * self.options.wheel_multiplier;

        self.mark_input(now);
        self.apply(dx, dy);
    }

    //--- Touch Input ------------------------------------------------------

    /// Begins a touch gesture at the given point.
    pub fn handle_touch_start(&mut self, x: f64, y: f64, now: Instant) {
        self.touch_point = Some(Vec2::new(x, y));
        self.last_touch_delta = Vec2::ZERO;

        self.mark_input(now);
        self.apply(0.0, 0.0);
    }

    /// Applies a touch drag sample.
    ///
    /// The delta is the negative displacement since the previous sample
    /// (dragging content up scrolls down), scaled by the touch multiplier.
    pub fn handle_touch_move(&mut self, x: f64, y: f64, now: Instant) {
        let point = Vec2::new(x, y);
        let Some(previous) = self.touch_point.replace(point) else {
            // Move without a start: treat as the gesture origin.
            return;
        };

        let delta = (previous - point).scale(self.options.touch_multiplier);
        self.last_touch_delta = delta;

        self.mark_input(now);
        self.apply(delta.x, delta.y);
    }

    /// Ends a touch gesture, re-applying the final sample so inertia picks
    /// up from the release velocity.
    pub fn handle_touch_end(&mut self, now: Instant) {
        self.touch_point = None;

        self.mark_input(now);
        self.apply(self.last_touch_delta.x, self.last_touch_delta.y);
    }

    //--- Inertia ----------------------------------------------------------

    /// Advances the inertia simulation by one tick.
    ///
    /// A step runs only when the delta is non-zero and no real input has
    /// arrived for [`INERTIA_IDLE`]; each step multiplies the delta by
    /// [`INERTIA_DECAY`] and snaps components at or below
    /// [`INERTIA_FLOOR`] to exactly zero.
    pub fn step_inertia(&mut self, now: Instant) {
        if self.delta.is_zero() {
            return;
        }

        let idle = match self.last_input_at {
            Some(at) => now.saturating_duration_since(at),
            None => return,
        };

        if idle < INERTIA_IDLE {
            return;
        }

        let mut next = self.delta.scale(INERTIA_DECAY);
        if next.x.abs() <= INERTIA_FLOOR {
            next.x = 0.0;
        }
        if next.y.abs() <= INERTIA_FLOOR {
            next.y = 0.0;
        }

        trace!("inertia step: {:?} -> {:?}", self.delta, next);
        self.apply(next.x, next.y);
    }

    //--- Dirty Flag -------------------------------------------------------

    /// Reads the dirty flag, clearing it once motion has fully stopped.
    ///
    /// While the delta is non-zero on either axis the flag stays latched,
    /// so consumers observe every tick of an ongoing scroll; after the
    /// delta reaches zero on both axes one final `true` is reported, then
    /// the flag reads `false` until new input arrives.
    pub fn consume(&mut self) -> bool {
        let was_needed = self.needs_update;

        if self.delta.is_zero() {
            self.needs_update = false;
        }

        was_needed
    }

    //--- Internal Helpers -------------------------------------------------

    /// Records a real input, which also postpones/cancels inertia.
    fn mark_input(&mut self, now: Instant) {
        self.last_input_at = Some(now);
    }

    /// Clamps and publishes a new delta, updating speed and position.
    fn apply(&mut self, delta_x: f64, delta_y: f64) {
        let next = Vec2::new(
            delta_x.clamp(-self.options.delta_x_max, self.options.delta_x_max),
            delta_y.clamp(-self.options.delta_y_max, self.options.delta_y_max),
        );

        self.position += next;

        if next != self.delta {
            self.delta = next;
            self.speed = Vec2::new(
                next.x / self.options.delta_x_max,
                next.y / self.options.delta_y_max,
            );
            self.needs_update = true;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ScrollManager {
        ScrollManager::new(ScrollOptions::default())
    }

    fn viewport() -> Vec2 {
        Vec2::new(1280.0, 720.0)
    }

    fn past_idle(now: Instant) -> Instant {
        now + INERTIA_IDLE + Duration::from_millis(1)
    }

    //=====================================================================
    // Normalization & Clamping
    //=====================================================================

    #[test]
    fn pixel_mode_passes_delta_through() {
        let mut scroll = manager();
        scroll.handle_wheel(3.0, 7.0, WheelDeltaMode::Pixel, viewport(), Instant::now());
        assert_eq!(scroll.delta(), Vec2::new(3.0, 7.0));
    }

    #[test]
    fn line_mode_scales_by_line_height() {
        let mut scroll = manager();
        scroll.handle_wheel(0.0, 3.0, WheelDeltaMode::Line, viewport(), Instant::now());
        assert!((scroll.delta().y - 3.0 * LINE_HEIGHT).abs() < 1e-9);
    }

    #[test]
    fn page_mode_scales_by_viewport_dimension() {
        let mut scroll = manager();
        scroll.handle_wheel(0.5, 0.0, WheelDeltaMode::Page, viewport(), Instant::now());
        // Clamped: 0.5 * 1280 = 640 exceeds the 300 maximum.
        assert_eq!(scroll.delta().x, 300.0);
    }

    /// Reported delta never exceeds the per-axis maxima, no matter how
    /// large the raw input is.
    #[test]
    fn delta_clamped_to_per_axis_maxima() {
        let mut scroll = manager();
        scroll.handle_wheel(10_000.0, -10_000.0, WheelDeltaMode::Pixel, viewport(), Instant::now());
        assert_eq!(scroll.delta(), Vec2::new(300.0, -300.0));
        assert_eq!(scroll.speed(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn wheel_multiplier_applied_before_clamp() {
        let mut scroll = ScrollManager::new(ScrollOptions {
            wheel_multiplier: 2.0,
            ..ScrollOptions::default()
        });
        scroll.handle_wheel(0.0, 10.0, WheelDeltaMode::Pixel, viewport(), Instant::now());
        assert_eq!(scroll.delta().y, 20.0);
    }

    //=====================================================================
    // Touch
    //=====================================================================

    #[test]
    fn touch_delta_is_negative_displacement() {
        let now = Instant::now();
        let mut scroll = manager();

        scroll.handle_touch_start(100.0, 100.0, now);
        scroll.handle_touch_move(90.0, 70.0, now);

        // Dragging up-left by (10, 30) scrolls down-right.
        assert_eq!(scroll.delta(), Vec2::new(10.0, 30.0));
    }

    #[test]
    fn touch_multiplier_scales_displacement() {
        let now = Instant::now();
        let mut scroll = ScrollManager::new(ScrollOptions {
            touch_multiplier: 3.0,
            ..ScrollOptions::default()
        });

        scroll.handle_touch_start(0.0, 0.0, now);
        scroll.handle_touch_move(0.0, -10.0, now);
        assert_eq!(scroll.delta().y, 30.0);
    }

    #[test]
    fn touch_end_reapplies_last_sample() {
        let now = Instant::now();
        let mut scroll = manager();

        scroll.handle_touch_start(0.0, 100.0, now);
        scroll.handle_touch_move(0.0, 60.0, now);
        scroll.handle_touch_end(now);

        assert_eq!(scroll.delta().y, 40.0);
    }

    //=====================================================================
    // Inertia
    //=====================================================================

    /// With no further input, the delta at step n equals d0 · 0.95ⁿ until
    /// its magnitude drops to the floor, then snaps to exactly zero.
    #[test]
    fn inertia_decays_geometrically_then_snaps_to_zero() {
        let now = Instant::now();
        let mut scroll = manager();
        scroll.handle_wheel(0.0, 100.0, WheelDeltaMode::Pixel, viewport(), now);

        let mut expected: f64 = 100.0;
        let mut tick = past_idle(now);

        loop {
            scroll.step_inertia(tick);
            expected *= INERTIA_DECAY;

            if expected.abs() <= INERTIA_FLOOR {
                assert_eq!(scroll.delta().y, 0.0, "should snap to exactly zero");
                break;
            }

            assert!(
                (scroll.delta().y - expected).abs() < 1e-9,
                "step mismatch: got {}, expected {}",
                scroll.delta().y,
                expected
            );
            tick += Duration::from_millis(16);
        }

        // No further steps once stopped.
        scroll.step_inertia(tick + Duration::from_secs(1));
        assert_eq!(scroll.delta(), Vec2::ZERO);
    }

    #[test]
    fn inertia_waits_for_idle_window() {
        let now = Instant::now();
        let mut scroll = manager();
        scroll.handle_wheel(0.0, 100.0, WheelDeltaMode::Pixel, viewport(), now);

        scroll.step_inertia(now + Duration::from_millis(40));
        assert_eq!(scroll.delta().y, 100.0, "no decay inside the idle window");

        scroll.step_inertia(past_idle(now));
        assert!((scroll.delta().y - 95.0).abs() < 1e-9);
    }

    #[test]
    fn new_input_cancels_pending_inertia() {
        let now = Instant::now();
        let mut scroll = manager();
        scroll.handle_wheel(0.0, 100.0, WheelDeltaMode::Pixel, viewport(), now);

        // Fresh input just before the idle deadline restarts the timer.
        let refreshed = now + Duration::from_millis(70);
        scroll.handle_wheel(0.0, 100.0, WheelDeltaMode::Pixel, viewport(), refreshed);

        scroll.step_inertia(now + Duration::from_millis(100));
        assert_eq!(scroll.delta().y, 100.0, "idle window restarted by new input");
    }

    //=====================================================================
    // Dirty Flag & Position
    //=====================================================================

    #[test]
    fn flag_stays_latched_while_moving() {
        let now = Instant::now();
        let mut scroll = manager();
        scroll.handle_wheel(0.0, 50.0, WheelDeltaMode::Pixel, viewport(), now);

        assert!(scroll.consume());
        assert!(scroll.consume(), "flag persists while delta is non-zero");
    }

    /// After inertia snaps the delta to zero, the flag reads true once and
    /// false on the next consumption.
    #[test]
    fn flag_clears_after_motion_stops() {
        let now = Instant::now();
        let mut scroll = manager();
        scroll.handle_wheel(0.0, 1.0, WheelDeltaMode::Pixel, viewport(), now);

        let mut tick = past_idle(now);
        while !scroll.delta().is_zero() {
            scroll.step_inertia(tick);
            tick += Duration::from_millis(16);
        }

        assert!(scroll.consume(), "final transition still reported");
        assert!(!scroll.consume(), "cleared once stopped");
    }

    #[test]
    fn position_accumulates_applied_deltas() {
        let now = Instant::now();
        let mut scroll = manager();

        scroll.handle_wheel(0.0, 100.0, WheelDeltaMode::Pixel, viewport(), now);
        scroll.handle_wheel(0.0, 100.0, WheelDeltaMode::Pixel, viewport(), now);
        assert_eq!(scroll.position().y, 200.0);

        scroll.step_inertia(past_idle(now));
        assert!((scroll.position().y - 295.0).abs() < 1e-9);
    }
}
