//=========================================================================
// Phase Machine
//
// Sequences the loading → intro → main-loop lifecycle.
//
// ```text
//   AwaitingMustAssets ──must loaded──▶ Transitioning ──┐
//                                                       │ all loaded AND
//                                                       │ intro elapsed
//                                                       ▼
//                                                   MainLoop (terminal)
// ```
//
// Transitions are driven only by asset-load state and elapsed time, and
// the machine never reverts. The instants at which must-assets and the
// main loop became available are recorded so demo content can animate
// against a phase-relative time basis instead of recomputing timestamps.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::{Duration, Instant};

//=== External Crates =====================================================

use log::info;

//=== Phase ===============================================================

/// Lifecycle phase of a runtime instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for every must-load asset; nothing is drawn.
    AwaitingMustAssets,

    /// Must assets available; the opening animation window is running
    /// while optional assets stream in.
    Transitioning,

    /// Fully loaded and past the intro window. Terminal: persists until
    /// disposal.
    MainLoop,
}

//=== PhaseMachine ========================================================

/// Tracks the current [`Phase`] and its transition timestamps.
pub struct PhaseMachine {
    phase: Phase,
    started_at: Instant,
    must_loaded_at: Option<Instant>,
    main_loop_at: Option<Instant>,
    intro_duration: Duration,
}

impl PhaseMachine {
    /// Creates a machine in `AwaitingMustAssets`.
    ///
    /// `intro_duration` is the minimum time spent in `Transitioning`; zero
    /// is a valid, instant-transition configuration.
    pub fn new(now: Instant, intro_duration: Duration) -> Self {
        Self {
            phase: Phase::AwaitingMustAssets,
            started_at: now,
            must_loaded_at: None,
            main_loop_at: None,
            intro_duration,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    //--- Advancement ------------------------------------------------------

    /// Advances the machine given the tick instant and asset-load state.
    ///
    /// Called once per tick. Both transitions may fire on the same tick
    /// when everything is already loaded and the intro duration is zero.
    pub fn advance(&mut self, now: Instant, must_loaded: bool, all_loaded: bool) {
        if self.phase == Phase::AwaitingMustAssets && must_loaded {
            self.phase = Phase::Transitioning;
            self.must_loaded_at = Some(now);
            info!("phase: AwaitingMustAssets -> Transitioning");
        }

        if self.phase == Phase::Transitioning && all_loaded {
            let intro_done = self
                .must_loaded_at
                .map(|at| now.saturating_duration_since(at) >= self.intro_duration)
                .unwrap_or(false);

            if intro_done {
                self.phase = Phase::MainLoop;
                self.main_loop_at = Some(now);
                info!("phase: Transitioning -> MainLoop");
            }
        }
    }

    //--- Time Bases -------------------------------------------------------

    /// Seconds since the machine was created (process-start basis).
    pub fn since_start(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.started_at).as_secs_f64()
    }

    /// Seconds since must-assets became available, once they have.
    pub fn since_must_loaded(&self, now: Instant) -> Option<f64> {
        self.must_loaded_at
            .map(|at| now.saturating_duration_since(at).as_secs_f64())
    }

    /// Seconds since the main loop was entered, once it has been.
    pub fn since_main_loop(&self, now: Instant) -> Option<f64> {
        self.main_loop_at
            .map(|at| now.saturating_duration_since(at).as_secs_f64())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
