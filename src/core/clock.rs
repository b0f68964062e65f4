//=========================================================================
// Frame Clock
//
// Monotonic elapsed/delta time source driven by the logic loop.
//
// The clock never reads the wall clock itself: the loop hands it an
// `Instant` each tick, which keeps every time-dependent system (inertia,
// swipe speed, phase sequencing) deterministic under test.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Instant;

//=== FrameClock ==========================================================

/// Per-tick time source.
///
/// Created at orchestrator construction and updated exactly once per tick;
/// lives for the orchestrator's lifetime.
pub struct FrameClock {
    started_at: Instant,
    last_tick: Instant,
}

impl FrameClock {
    /// Creates a clock whose epoch is `now`.
    ///
    /// The first `tick` reports a delta measured from this instant, the
    /// same way an animation-frame loop measures from its scheduling time.
    pub fn new(now: Instant) -> Self {
        Self { started_at: now, last_tick: now }
    }

    /// Advances the clock to `now`.
    ///
    /// Returns `(elapsed_secs, delta_secs)`: seconds since construction and
    /// seconds since the previous tick. Both are non-negative; a repeated
    /// `now` yields a zero delta.
    pub fn tick(&mut self, now: Instant) -> (f64, f64) {
        let delta = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;

        (now.duration_since(self.started_at).as_secs_f64(), delta)
    }

    /// Seconds since the clock was created, without advancing it.
    pub fn elapsed(&self, now: Instant) -> f64 {
        now.duration_since(self.started_at).as_secs_f64()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_tick_measures_from_construction() {
        let epoch = Instant::now();
        let mut clock = FrameClock::new(epoch);

        let (elapsed, delta) = clock.tick(epoch + Duration::from_millis(16));
        assert!((elapsed - 0.016).abs() < 1e-9);
        assert!((delta - 0.016).abs() < 1e-9);
    }

    #[test]
    fn delta_is_relative_to_previous_tick() {
        let epoch = Instant::now();
        let mut clock = FrameClock::new(epoch);

        clock.tick(epoch + Duration::from_millis(16));
        let (elapsed, delta) = clock.tick(epoch + Duration::from_millis(48));

        assert!((elapsed - 0.048).abs() < 1e-9);
        assert!((delta - 0.032).abs() < 1e-9);
    }

    #[test]
    fn repeated_instant_yields_zero_delta() {
        let epoch = Instant::now();
        let mut clock = FrameClock::new(epoch);

        let t = epoch + Duration::from_millis(10);
        clock.tick(t);
        let (_, delta) = clock.tick(t);
        assert_eq!(delta, 0.0);
    }

    #[test]
    fn elapsed_does_not_advance_the_clock() {
        let epoch = Instant::now();
        let mut clock = FrameClock::new(epoch);

        let probe = clock.elapsed(epoch + Duration::from_secs(2));
        assert!((probe - 2.0).abs() < 1e-9);

        let (_, delta) = clock.tick(epoch + Duration::from_millis(5));
        assert!((delta - 0.005).abs() < 1e-9, "elapsed() must not move last_tick");
    }
}
