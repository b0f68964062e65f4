//=========================================================================
// Swipe Manager
//
// Derives discrete directional swipe start/end events from the scroll
// velocity signal.
//
// Per axis, independently:
// ```text
//   |delta| ──▶ magnitude ring (5) ──mean──▶ smoothed delta
//                                               │ (< 0.1 → noise, skip)
//                                               ▼
//                                      trend history (5)
//                           strictly ↑ + speed > 0.5 → start (latch on)
//                           strictly ↓ while latched → end   (latch off)
// ```
//
// The latch guarantees a start event and its matching end event alternate
// strictly per axis: never two starts without an intervening end.
//
//=========================================================================

//=== Constants ===========================================================

/// Samples averaged to produce the smoothed delta.
const MAGNITUDE_WINDOW: usize = 5;

/// Smoothed samples inspected for a monotonic trend.
const TREND_WINDOW: usize = 5;

/// Smoothed deltas below this are treated as zero and kept out of the
/// trend history.
const NOISE_FLOOR: f64 = 0.1;

/// Minimum smoothed speed (pixels per second of smoothed delta) for a
/// start event.
const START_SPEED: f64 = 0.5;

//=== Event Types =========================================================

/// Axis a swipe was detected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAxis {
    X,
    Y,
}

/// Whether the gesture is beginning or ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipePhase {
    Start,
    End,
}

/// One detected swipe transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeEvent {
    pub axis: SwipeAxis,
    pub phase: SwipePhase,

    /// Sign of the raw scroll delta at detection time: `1` or `-1`.
    pub direction: i8,
}

//=== AxisTracker =========================================================

//
// Per-axis detection state. Buffers are fixed-size and zero-filled, the
// same shape the smoothing window has at rest.
//
struct AxisTracker {
    magnitudes: [f64; MAGNITUDE_WINDOW],
    trend: [f64; TREND_WINDOW],
    swiping: bool,
    needs_update: bool,
}

impl AxisTracker {
    fn new() -> Self {
        Self {
            magnitudes: [0.0; MAGNITUDE_WINDOW],
            trend: [0.0; TREND_WINDOW],
            swiping: false,
            needs_update: false,
        }
    }

    /// Runs one detection step for this axis. Returns the transition that
    /// fired, if any.
    fn update(&mut self, raw_delta: f64, delta_time: f64, axis: SwipeAxis) -> Option<SwipeEvent> {
        // Zero samples do not enter the smoothing window.
        if raw_delta != 0.0 {
            push(&mut self.magnitudes, raw_delta.abs());
        }

        let smoothed = mean(&self.magnitudes);
        if smoothed < NOISE_FLOOR || delta_time <= 0.0 {
            return None;
        }

        let speed = smoothed / delta_time;
        push(&mut self.trend, smoothed);

        let direction: i8 = if raw_delta > 0.0 { 1 } else { -1 };

        if strictly_increasing(&self.trend) && speed > START_SPEED && !self.swiping {
            self.swiping = true;
            self.needs_update = true;
            return Some(SwipeEvent { axis, phase: SwipePhase::Start, direction });
        }

        if strictly_decreasing(&self.trend) && self.swiping {
            self.swiping = false;
            self.needs_update = true;
            return Some(SwipeEvent { axis, phase: SwipePhase::End, direction });
        }

        None
    }

    fn consume(&mut self) -> bool {
        let was_needed = self.needs_update;
        self.needs_update = false;
        was_needed
    }
}

//--- Buffer Helpers ------------------------------------------------------

fn push<const N: usize>(buffer: &mut [f64; N], value: f64) {
    buffer.rotate_left(1);
    buffer[N - 1] = value;
}

fn mean(buffer: &[f64]) -> f64 {
    buffer.iter().sum::<f64>() / buffer.len() as f64
}

fn strictly_increasing(buffer: &[f64]) -> bool {
    buffer.windows(2).all(|pair| pair[1] > pair[0])
}

fn strictly_decreasing(buffer: &[f64]) -> bool {
    buffer.windows(2).all(|pair| pair[1] < pair[0])
}

//=== SwipeManager ========================================================

/// Detects swipe gestures from per-tick scroll deltas.
///
/// [`update`](Self::update) must be called exactly once per tick, before
/// the scroll dirty flag is consumed, so detection observes the same delta
/// the frame snapshot is about to report.
pub struct SwipeManager {
    x: AxisTracker,
    y: AxisTracker,
}

impl SwipeManager {
    pub fn new() -> Self {
        Self { x: AxisTracker::new(), y: AxisTracker::new() }
    }

    /// Runs one detection step on both axes, appending fired transitions
    /// to `events` (at most one per axis per tick).
    pub fn update(
        &mut self,
        scroll_delta_x: f64,
        scroll_delta_y: f64,
        delta_time: f64,
        events: &mut Vec<SwipeEvent>,
    ) {
        if let Some(event) = self.x.update(scroll_delta_x, delta_time, SwipeAxis::X) {
            events.push(event);
        }
        if let Some(event) = self.y.update(scroll_delta_y, delta_time, SwipeAxis::Y) {
            events.push(event);
        }
    }

    /// Reads and clears the X-axis one-shot dirty flag.
    pub fn consume_x(&mut self) -> bool {
        self.x.consume()
    }

    /// Reads and clears the Y-axis one-shot dirty flag.
    pub fn consume_y(&mut self) -> bool {
        self.y.consume()
    }
}

impl Default for SwipeManager {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    /// Feeds a sequence of Y deltas, returning every event fired.
    fn feed_y(swipe: &mut SwipeManager, deltas: &[f64]) -> Vec<SwipeEvent> {
        let mut events = Vec::new();
        for &delta in deltas {
            swipe.update(0.0, delta, DT, &mut events);
        }
        events
    }

    /// A ramp steep enough to fill the trend window with increasing values.
    fn rising_ramp() -> Vec<f64> {
        (1..=8).map(|i| (i * i * 10) as f64).collect()
    }

    fn falling_ramp() -> Vec<f64> {
        (1..=8).rev().map(|i| (i * 10) as f64).collect()
    }

    //=====================================================================
    // Start Detection
    //=====================================================================

    /// A monotonically increasing same-direction sequence fires exactly
    /// one start event, never one per sample.
    #[test]
    fn rising_trend_fires_exactly_one_start() {
        let mut swipe = SwipeManager::new();
        let events = feed_y(&mut swipe, &rising_ramp());

        let starts: Vec<_> = events
            .iter()
            .filter(|e| e.phase == SwipePhase::Start)
            .collect();

        assert_eq!(starts.len(), 1, "latch must suppress duplicate starts");
        assert_eq!(starts[0].axis, SwipeAxis::Y);
        assert_eq!(starts[0].direction, 1);
    }

    #[test]
    fn negative_deltas_report_negative_direction() {
        let mut swipe = SwipeManager::new();
        let ramp: Vec<f64> = rising_ramp().iter().map(|d| -d).collect();
        let events = feed_y(&mut swipe, &ramp);

        let start = events.iter().find(|e| e.phase == SwipePhase::Start);
        assert_eq!(start.map(|e| e.direction), Some(-1));
    }

    #[test]
    fn noise_below_floor_never_starts() {
        let mut swipe = SwipeManager::new();
        let events = feed_y(&mut swipe, &[0.01, 0.02, 0.03, 0.04, 0.05, 0.06, 0.07, 0.08]);
        assert!(events.is_empty(), "sub-noise input must not pollute the trend");
    }

    //=====================================================================
    // End Detection & Latching
    //=====================================================================

    #[test]
    fn start_and_end_alternate_strictly() {
        let mut swipe = SwipeManager::new();

        let mut sequence = rising_ramp();
        sequence.extend(falling_ramp());

        let events = feed_y(&mut swipe, &sequence);
        let phases: Vec<_> = events.iter().map(|e| e.phase).collect();

        assert_eq!(phases, vec![SwipePhase::Start, SwipePhase::End]);
    }

    #[test]
    fn falling_trend_without_latch_fires_nothing() {
        let mut swipe = SwipeManager::new();
        let events = feed_y(&mut swipe, &falling_ramp());

        assert!(
            events.iter().all(|e| e.phase != SwipePhase::End),
            "end requires a preceding start"
        );
    }

    #[test]
    fn second_gesture_starts_after_first_ends() {
        let mut swipe = SwipeManager::new();

        let mut sequence = rising_ramp();
        sequence.extend(falling_ramp());
        sequence.extend(rising_ramp());

        let events = feed_y(&mut swipe, &sequence);
        let phases: Vec<_> = events.iter().map(|e| e.phase).collect();

        assert_eq!(
            phases,
            vec![SwipePhase::Start, SwipePhase::End, SwipePhase::Start]
        );
    }

    //=====================================================================
    // Axis Independence & Dirty Flags
    //=====================================================================

    #[test]
    fn axes_are_tracked_independently() {
        let mut swipe = SwipeManager::new();
        let mut events = Vec::new();

        for delta in rising_ramp() {
            swipe.update(delta, 0.0, DT, &mut events);
        }

        assert!(events.iter().all(|e| e.axis == SwipeAxis::X));
        assert!(swipe.consume_x());
        assert!(!swipe.consume_y(), "quiet axis stays clean");
    }

    #[test]
    fn dirty_flag_is_one_shot() {
        let mut swipe = SwipeManager::new();
        feed_y(&mut swipe, &rising_ramp());

        assert!(swipe.consume_y());
        assert!(!swipe.consume_y(), "second consumption with no new event reads false");
    }

    //=====================================================================
    // Buffer Helpers
    //=====================================================================

    #[test]
    fn push_shifts_and_appends() {
        let mut buffer = [1.0, 2.0, 3.0];
        push(&mut buffer, 4.0);
        assert_eq!(buffer, [2.0, 3.0, 4.0]);
    }

    #[test]
    fn monotone_checks_are_strict() {
        assert!(strictly_increasing(&[1.0, 2.0, 3.0]));
        assert!(!strictly_increasing(&[1.0, 2.0, 2.0]));
        assert!(strictly_decreasing(&[3.0, 2.0, 1.0]));
        assert!(!strictly_decreasing(&[3.0, 3.0, 1.0]));
    }
}
