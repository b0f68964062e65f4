//=========================================================================
// Frame Orchestrator
//
// Central coordinator for the per-frame systems running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Digest each tick's raw input batch into the managers, coalescing
//   continuous streams last-wins and dispatching discrete hooks in order
// - Step scroll inertia and run swipe detection against the same delta
//   the frame is about to report
// - Poll asset-load state and advance the lifecycle phase machine
// - Consume every one-shot dirty flag into a pure [`FrameSnapshot`] and
//   hand it to the application once the phase permits drawing
//
// Tick pipeline:
// ```text
//   raw batch ─▶ digest ─▶ inertia ─▶ swipe ─▶ assets ─▶ phase ─▶ snapshot ─▶ draw
//                  │                    │                              ▲
//                  └─ key hooks         └─ swipe hooks                 │
//                        (flags consumed exactly once per tick) ───────┘
// ```
//
// The orchestrator is the single consumer of every manager's dirty flag;
// nothing else may call `consume()`.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod clock;
pub mod cursor;
pub mod event;
pub mod keyboard;
pub mod phase;
pub mod scroll;
pub mod snapshot;
pub mod swipe;
pub mod vec2;
pub mod viewport;

//=== Standard Library Imports ============================================

use std::time::{Duration, Instant};

//=== Internal Modules ====================================================

use crate::app::Application;
use crate::assets::AssetManager;
use clock::FrameClock;
use cursor::CursorManager;
use event::RawInputEvent;
use keyboard::KeyboardManager;
use phase::{Phase, PhaseMachine};
use scroll::{ScrollManager, ScrollOptions};
use snapshot::{DirtyFlags, FrameSnapshot};
use swipe::{SwipeAxis, SwipeEvent, SwipeManager, SwipePhase};
use viewport::ViewportManager;

//=== Orchestrator ========================================================

/// Owns every per-frame system of one runtime instance and runs the tick
/// pipeline.
pub(crate) struct Orchestrator {
    clock: FrameClock,
    scroll: ScrollManager,
    swipe: SwipeManager,
    cursor: CursorManager,
    viewport: ViewportManager,
    keyboard: KeyboardManager,
    phase: PhaseMachine,
    assets: AssetManager,

    // Scratch buffer reused across ticks.
    swipe_events: Vec<SwipeEvent>,
}

impl Orchestrator {
    //--- Construction -----------------------------------------------------

    pub fn new(
        now: Instant,
        initial_viewport: (f64, f64),
        scroll_options: ScrollOptions,
        intro_duration: Duration,
        assets: AssetManager,
    ) -> Self {
        Self {
            clock: FrameClock::new(now),
            scroll: ScrollManager::new(scroll_options),
            swipe: SwipeManager::new(),
            cursor: CursorManager::new(),
            viewport: ViewportManager::new(initial_viewport.0, initial_viewport.1),
            keyboard: KeyboardManager::new(),
            phase: PhaseMachine::new(now, intro_duration),
            assets,
            swipe_events: Vec::with_capacity(4),
        }
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one full tick against the batch of raw events collected since
    /// the previous tick. Returns the snapshot it published.
    pub fn tick<A: Application>(
        &mut self,
        now: Instant,
        batch: &[RawInputEvent],
        app: &mut A,
    ) -> FrameSnapshot {
        //--- 1. Digest input ----------------------------------------------
        self.digest(batch, now, app);

        //--- 2. Advance time ----------------------------------------------
        let (time, delta_time) = self.clock.tick(now);

        //--- 3. Inertia ---------------------------------------------------
        self.scroll.step_inertia(now);

        //--- 4. Swipe detection (before any flag is consumed) -------------
        let scroll_delta = self.scroll.delta();
        self.swipe_events.clear();
        let mut swipe_events = std::mem::take(&mut self.swipe_events);
        self.swipe
            .update(scroll_delta.x, scroll_delta.y, delta_time, &mut swipe_events);

        for event in &swipe_events {
            match (event.axis, event.phase) {
                (SwipeAxis::X, SwipePhase::Start) => app.on_swipe_x_start(event.direction),
                (SwipeAxis::X, SwipePhase::End) => app.on_swipe_x_end(event.direction),
                (SwipeAxis::Y, SwipePhase::Start) => app.on_swipe_y_start(event.direction),
                (SwipeAxis::Y, SwipePhase::End) => app.on_swipe_y_end(event.direction),
            }
        }
        self.swipe_events = swipe_events;

        //--- 5. Asset state & phase ---------------------------------------
        let load = self.assets.observe();
        self.phase.advance(now, load.must_loaded, load.all_loaded);

        //--- 6. Snapshot (single consumption point) -----------------------
        let flags = DirtyFlags {
            resized: self.viewport.consume(),
            scrolled: self.scroll.consume(),
            swiped_x: self.swipe.consume_x(),
            swiped_y: self.swipe.consume_y(),
            cursor_moved: self.cursor.consume(),
            keys_changed: self.keyboard.consume(),
            must_assets_loaded: load.must_just_loaded,
            started_loading_all: load.started_loading_all,
            all_assets_loaded: load.all_just_loaded,
        };

        let snapshot = FrameSnapshot {
            time,
            delta_time,
            flags,
            viewport: self.viewport.size(),
            scroll_delta,
            scroll_speed: self.scroll.speed(),
            scroll_position: self.scroll.position(),
            cursor_position: self.cursor.position(),
            phase: self.phase.phase(),
            since_start: self.phase.since_start(now),
            since_must_loaded: self.phase.since_must_loaded(now),
            since_main_loop: self.phase.since_main_loop(now),
            must_progress: load.must_progress,
            optional_progress: load.optional_progress,
        };

        //--- 7. Draw (gated by phase) -------------------------------------
        if snapshot.phase != Phase::AwaitingMustAssets {
            app.draw(&snapshot);
        }

        snapshot
    }

    //--- Input Digestion --------------------------------------------------

    /// Feeds one batch into the managers.
    ///
    /// Boundary-free continuous streams (wheel, pointer, resize) are
    /// coalesced last-wins: only the final event of the batch is applied,
    /// so a burst of OS events inside one tick costs a single manager
    /// update. Discrete events (keys, touch boundaries) are applied in
    /// arrival order, dispatching the key hooks. Touch moves are also
    /// coalesced last-wins, but only between gesture boundaries: a move
    /// still pending when a start/end arrives is applied first, so the
    /// boundary closes over the displacement it actually observed.
    fn digest<A: Application>(&mut self, batch: &[RawInputEvent], now: Instant, app: &mut A) {
        let mut last_wheel = None;
        let mut last_cursor = None;
        let mut last_resize = None;

        for event in batch {
            match event {
                RawInputEvent::Wheel { .. } => last_wheel = Some(event),
                RawInputEvent::CursorMoved { .. } => last_cursor = Some(event),
                RawInputEvent::Resized { .. } => last_resize = Some(event),
                _ => {}
            }
        }

        if let Some(RawInputEvent::Resized { width, height }) = last_resize {
            self.viewport.handle_resize(*width, *height);
        }
        if let Some(RawInputEvent::CursorMoved { x, y }) = last_cursor {
            self.cursor.handle_move(*x, *y);
        }
        if let Some(RawInputEvent::Wheel { delta_x, delta_y, mode }) = last_wheel {
            self.scroll
                .handle_wheel(*delta_x, *delta_y, *mode, self.viewport.size(), now);
        }

        let mut pending_move: Option<(f64, f64)> = None;

        for event in batch {
            match event {
                RawInputEvent::KeyDown { key, modifiers } => {
                    self.keyboard.handle_key_down(*key);
                    app.on_key_pressed(*key, *modifiers, &self.keyboard);
                }
                RawInputEvent::KeyUp { key, modifiers } => {
                    self.keyboard.handle_key_up(*key);
                    app.on_key_released(*key, *modifiers, &self.keyboard);
                }
                RawInputEvent::TouchStart { x, y } => {
                    self.flush_touch_move(&mut pending_move, now);
                    self.scroll.handle_touch_start(*x, *y, now);
                }
                RawInputEvent::TouchMove { x, y } => pending_move = Some((*x, *y)),
                RawInputEvent::TouchEnd => {
                    self.flush_touch_move(&mut pending_move, now);
                    self.scroll.handle_touch_end(now);
                }
                _ => {}
            }
        }

        self.flush_touch_move(&mut pending_move, now);
    }

    /// Applies the coalesced touch-move run, if one is pending.
    fn flush_touch_move(&mut self, pending: &mut Option<(f64, f64)>, now: Instant) {
        if let Some((x, y)) = pending.take() {
            self.scroll.handle_touch_move(x, y, now);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
