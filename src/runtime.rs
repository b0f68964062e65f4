//=========================================================================
// Kinetic Runtime
//
// Main entry point and coordinator for the runtime.
//
// Architecture:
// ```text
//     RuntimeBuilder ──build()──▶ Runtime ──run(app, fetcher)──▶ [Running]
//         │                         │
//         ├─ with_tick_rate()       ├─ spawns logic thread (orchestrator)
//         ├─ with_intro_duration()  ├─ spawns loader thread (assets)
//         ├─ with_scroll_options()  └─ runs platform loop, blocks until
//         └─ with_window_title()       the window closes
// ```
//
// Thread layout:
// ```text
// Runtime (Main Thread)
//   ├─► Logic Thread @ tick rate
//   │     ├─► Orchestrator (managers, phase, snapshot, draw)
//   │     └─► Loader Thread ──► AssetManager::load()
//   │           └─► detached fetch workers (not cancelled on shutdown)
//   └─► Platform (Winit event loop)
//
// Communication: bounded channel (PlatformEvent)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use log::{error, info};

//=== Internal Modules ====================================================

use crate::app::Application;
use crate::assets::{AssetFetcher, AssetManager};
use crate::core::event::RawInputEvent;
use crate::core::scroll::ScrollOptions;
use crate::core::Orchestrator;
use crate::platform::{Platform, PlatformEvent};

//=== RuntimeBuilder ======================================================

/// Builder for configuring and constructing a [`Runtime`].
///
/// # Default Values
///
/// - **Tick rate**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Intro duration**: zero (instant transition to the main loop)
/// - **Scroll options**: [`ScrollOptions::default`]
/// - **Window title**: "Kinetic Runtime"
///
/// # Examples
///
/// ```no_run
/// use kinetic_runtime::RuntimeBuilder;
/// use std::time::Duration;
///
/// let runtime = RuntimeBuilder::new()
///     .with_tick_rate(120.0)
///     .with_intro_duration(Duration::from_secs(2))
///     .build();
/// ```
pub struct RuntimeBuilder {
    tick_rate: f64,
    channel_capacity: usize,
    intro_duration: Duration,
    scroll_options: ScrollOptions,
    window_title: String,
}

impl RuntimeBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tick_rate: 60.0,
            channel_capacity: 128,
            intro_duration: Duration::ZERO,
            scroll_options: ScrollOptions::default(),
            window_title: "Kinetic Runtime".to_string(),
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tick_rate <= 0.0`.
    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        assert!(tick_rate > 0.0, "Tick rate must be positive, got {}", tick_rate);
        self.tick_rate = tick_rate;
        self
    }

    /// Sets the channel capacity for platform → logic communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the minimum duration of the opening-animation phase between
    /// must-assets resolving and the main loop beginning.
    ///
    /// Default: zero (instant transition).
    pub fn with_intro_duration(mut self, duration: Duration) -> Self {
        self.intro_duration = duration;
        self
    }

    /// Sets the scroll behavior (multipliers and per-axis delta maxima).
    ///
    /// # Panics
    ///
    /// Panics if either delta maximum is not positive.
    pub fn with_scroll_options(mut self, options: ScrollOptions) -> Self {
        assert!(options.delta_x_max > 0.0, "Scroll delta maxima must be positive");
        assert!(options.delta_y_max > 0.0, "Scroll delta maxima must be positive");
        self.scroll_options = options;
        self
    }

    /// Sets the window title.
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    /// Builds the runtime instance.
    pub fn build(self) -> Runtime {
        info!(
            "Building runtime (tick rate: {}, channel: {})",
            self.tick_rate, self.channel_capacity
        );

        Runtime {
            tick_rate: self.tick_rate,
            channel_capacity: self.channel_capacity,
            intro_duration: self.intro_duration,
            scroll_options: self.scroll_options,
            window_title: self.window_title,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== TickControl =========================================================

//
// Control flow for the logic loop: each event-collection pass signals
// either to continue ticking or to shut down.
//
enum TickControl {
    Continue,
    Exit,
}

//=== Runtime =============================================================

/// Frame-driven runtime for one interactive application.
///
/// Create via [`RuntimeBuilder`], then call [`run`](Self::run) with the
/// application and an asset fetcher.
pub struct Runtime {
    tick_rate: f64,
    channel_capacity: usize,
    intro_duration: Duration,
    scroll_options: ScrollOptions,
    window_title: String,
}

impl Runtime {
    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Builds the [`AssetManager`] from the application's manifest
    /// 2. Spawns the logic thread: application setup, loader thread
    ///    driving the two-phase asset load, then the fixed-rate
    ///    orchestrator loop
    /// 3. Runs the Winit event loop on the calling thread (blocks here)
    /// 4. On window close: the loop exits, `dispose()` runs exactly
    ///    once, threads are joined. In-flight fetch workers are detached
    ///    and not cancelled.
    pub fn run<A: Application>(self, app: A, fetcher: Arc<dyn AssetFetcher>) {
        info!("Starting runtime (tick rate: {})", self.tick_rate);

        let assets = AssetManager::new(app.manifest(), fetcher);

        //--- 1. Create the communication channel --------------------------
        let (tx, rx) = bounded::<PlatformEvent>(self.channel_capacity);
        info!("Platform channel created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the logic thread ------------------------------------
        let logic_handle = self.spawn_logic_thread(rx, app, assets);
        info!("Logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, self.window_title);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Wait for the logic thread to terminate --------------------
        match logic_handle.join() {
            Ok(()) => info!("Logic thread terminated cleanly"),
            Err(e) => error!("Logic thread panicked: {:?}", e),
        }

        info!("Runtime shutdown complete");
    }

    //--- Logic Thread -----------------------------------------------------

    /// Spawns the thread that owns the application and the orchestrator.
    ///
    /// Each tick collects the platform events queued since the previous
    /// tick, runs the orchestrator pipeline, then sleeps to hold the
    /// configured rate. Exits on window close or channel disconnect.
    fn spawn_logic_thread<A: Application>(
        &self,
        receiver: Receiver<PlatformEvent>,
        mut app: A,
        assets: AssetManager,
    ) -> thread::JoinHandle<()> {
        let tick_duration = Duration::from_secs_f64(1.0 / self.tick_rate);
        let intro_duration = self.intro_duration;
        let scroll_options = self.scroll_options;

        thread::spawn(move || {
            //--- Setup -----------------------------------------------------
            if let Err(e) = app.setup(&assets) {
                error!("Application setup failed: {}", e);
                return;
            }
            info!("Application setup complete");

            //--- Loader ----------------------------------------------------
            // Detached: a fetch still in flight at shutdown keeps the
            // worker alive until it settles, it is never cancelled. A
            // must-phase failure leaves the success latch unset, so the
            // orchestrator holds the loading phase and never draws.
            let loader_assets = assets.clone();
            thread::spawn(move || {
                if let Err(e) = loader_assets.load() {
                    error!("Asset loading failed: {}", e);
                }
            });

            //--- Orchestrator loop -----------------------------------------
            // The real viewport arrives as a Resized event in the first
            // platform batch; until then the managers report zero size.
            let mut orchestrator = Orchestrator::new(
                Instant::now(),
                (0.0, 0.0),
                scroll_options,
                intro_duration,
                assets,
            );

            let mut batch: Vec<RawInputEvent> = Vec::with_capacity(64);

            loop {
                let tick_start = Instant::now();

                if let TickControl::Exit =
                    collect_platform_events(&receiver, &mut batch, tick_duration)
                {
                    info!("Logic thread exiting");
                    break;
                }

                orchestrator.tick(Instant::now(), &batch, &mut app);

                let elapsed = tick_start.elapsed();
                if elapsed < tick_duration {
                    thread::sleep(tick_duration - elapsed);
                }
            }

            //--- Teardown --------------------------------------------------
            // Loop exit is the sole shutdown path, so dispose runs once.
            app.dispose();
            info!("Application disposed");
        })
    }
}

//--- collect_platform_events() -------------------------------------------

//
// Aggregates the input queued by the platform since the previous tick
// into one flat batch, preserving arrival order across messages.
//
fn collect_platform_events(
    receiver: &Receiver<PlatformEvent>,
    batch: &mut Vec<RawInputEvent>,
    tick_duration: Duration,
) -> TickControl {
    batch.clear();

    // Wait for at least one message this tick.
    match receiver.recv_timeout(tick_duration) {
        Ok(PlatformEvent::Inputs(events)) => batch.extend(events),
        Ok(PlatformEvent::Closed) => return TickControl::Exit,
        Err(RecvTimeoutError::Disconnected) => return TickControl::Exit,
        Err(RecvTimeoutError::Timeout) => {}
    }

    // Drain anything else already queued.
    while let Ok(event) = receiver.try_recv() {
        match event {
            PlatformEvent::Inputs(events) => batch.extend(events),
            PlatformEvent::Closed => return TickControl::Exit,
        }
    }

    TickControl::Continue
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{KeyCode, Modifiers};
    use crossbeam_channel::unbounded;

    //=====================================================================
    // RuntimeBuilder
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = RuntimeBuilder::new();
        assert_eq!(builder.tick_rate, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.intro_duration, Duration::ZERO);
    }

    #[test]
    fn builder_fluent_chaining() {
        let runtime = RuntimeBuilder::new()
            .with_tick_rate(120.0)
            .with_channel_capacity(256)
            .with_intro_duration(Duration::from_secs(2))
            .with_window_title("demo")
            .build();

        assert_eq!(runtime.tick_rate, 120.0);
        assert_eq!(runtime.channel_capacity, 256);
        assert_eq!(runtime.intro_duration, Duration::from_secs(2));
        assert_eq!(runtime.window_title, "demo");
    }

    #[test]
    #[should_panic(expected = "Tick rate must be positive")]
    fn builder_rejects_zero_tick_rate() {
        RuntimeBuilder::new().with_tick_rate(0.0);
    }

    #[test]
    #[should_panic(expected = "Tick rate must be positive")]
    fn builder_rejects_negative_tick_rate() {
        RuntimeBuilder::new().with_tick_rate(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_rejects_zero_capacity() {
        RuntimeBuilder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Scroll delta maxima must be positive")]
    fn builder_rejects_non_positive_scroll_maxima() {
        RuntimeBuilder::new().with_scroll_options(ScrollOptions {
            delta_y_max: 0.0,
            ..ScrollOptions::default()
        });
    }

    //=====================================================================
    // Event Collection
    //=====================================================================

    fn key_down(key: KeyCode) -> RawInputEvent {
        RawInputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    #[test]
    fn collect_merges_queued_batches_in_order() {
        let (tx, rx) = unbounded();
        tx.send(PlatformEvent::Inputs(vec![key_down(KeyCode::KeyA)])).unwrap();
        tx.send(PlatformEvent::Inputs(vec![key_down(KeyCode::KeyB)])).unwrap();

        let mut batch = Vec::new();
        let control = collect_platform_events(&rx, &mut batch, Duration::from_millis(10));

        assert!(matches!(control, TickControl::Continue));
        assert_eq!(batch, vec![key_down(KeyCode::KeyA), key_down(KeyCode::KeyB)]);
    }

    #[test]
    fn collect_exits_on_close() {
        let (tx, rx) = unbounded();
        tx.send(PlatformEvent::Closed).unwrap();

        let mut batch = Vec::new();
        let control = collect_platform_events(&rx, &mut batch, Duration::from_millis(10));
        assert!(matches!(control, TickControl::Exit));
    }

    #[test]
    fn collect_exits_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        drop(tx);

        let mut batch = Vec::new();
        let control = collect_platform_events(&rx, &mut batch, Duration::from_millis(1));
        assert!(matches!(control, TickControl::Exit));
    }

    #[test]
    fn collect_times_out_with_empty_batch() {
        let (_tx, rx) = unbounded::<PlatformEvent>();

        let mut batch = vec![key_down(KeyCode::KeyA)];
        let control = collect_platform_events(&rx, &mut batch, Duration::from_millis(1));

        assert!(matches!(control, TickControl::Continue));
        assert!(batch.is_empty(), "stale events from the previous tick are cleared");
    }
}
