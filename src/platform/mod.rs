//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the runtime's logic thread via
// a bounded channel.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Orchestrator    │
//  │   ↓                      │    │  ↓               │
//  │  EventMapper             │    │  Managers        │
//  │   ├─ Converts Winit      │    │  ↓               │
//  │   └─ Tracks modifiers    │    │  Application     │
//  │   ↓                      │    └──────────────────┘
//  │  batch buffer            │             ↑
//  │   ↓                      │             │
//  │  RedrawRequested (flush) │             │
//  │   ↓                      │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// Key design decisions:
// - **RedrawRequested = frame boundary**: all input buffered since the
//   previous redraw is sent as one batch, so a tick digests an atomic,
//   ordered slice of the input stream
// - **Sticky modifiers**: modifier state persists across events until
//   explicitly changed (matches platform behavior)
// - **Graceful channel disconnect**: if the logic thread dies, the
//   platform logs a warning but keeps running so the window can close
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Runtime::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::event::RawInputEvent;
use event_mapper::EventMapper;

//=== PlatformEvent =======================================================

/// Events sent from the platform layer to the logic thread.
///
/// These are the only messages that cross the thread boundary.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Batched raw input for a single frame, in arrival order.
    ///
    /// Sent on every `RedrawRequested`; empty batches are not sent. The
    /// initial window dimensions arrive in the first batch as a
    /// `Resized` event, so the core observes the real viewport before
    /// anything is drawn.
    Inputs(Vec<RawInputEvent>),

    /// Window close requested by the user or the OS. The logic thread
    /// terminates cleanly upon receiving this.
    Closed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are typically fatal: without an event loop the runtime cannot
/// run.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create the event loop (rare, indicates an OS-level
    /// issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== Platform ============================================================

/// Window manager and input event aggregator.
///
/// Runs on the main thread (Winit requirement on macOS/iOS) and sends
/// batched events to the logic thread through the channel.
///
/// # Lifecycle
///
/// 1. Construction: `Platform::new(sender, ...)` with the channel sender
/// 2. Execution: `platform.run()` starts the event loop
/// 3. Winit drives the `ApplicationHandler` methods
/// 4. Shutdown: window close sends [`PlatformEvent::Closed`] and exits
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` is called).
    window: Option<Window>,

    /// Accumulates raw input until the next frame boundary.
    batch: Vec<RawInputEvent>,

    /// Channel to the logic thread.
    event_sender: Sender<PlatformEvent>,

    /// Converts Winit events, tracking sticky modifiers.
    mapper: EventMapper,

    /// Title for the window created on resume.
    title: String,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a platform instance. The window itself is created lazily
    /// in `resumed()` (mobile compatibility).
    pub fn new(event_sender: Sender<PlatformEvent>, title: String) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            batch: Vec::with_capacity(32),
            event_sender,
            mapper: EventMapper::new(),
            title,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Starts the event loop and blocks until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while executing.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit
    /// requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Flushes the buffered batch to the logic thread.
    ///
    /// Called on every `RedrawRequested`. If the channel is disconnected
    /// (logic thread panicked or exited early), logs a warning and drops
    /// the events so the user can still close the window normally.
    fn flush_batch(&mut self) {
        if self.batch.is_empty() {
            return;
        }

        let batch = std::mem::take(&mut self.batch);
        trace!(target: "platform::input", "Flushing {} raw events", batch.len());

        if self.event_sender.send(PlatformEvent::Inputs(batch)).is_err() {
            warn!(target: "platform::input", "Channel disconnected, dropping input batch");
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when the app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it does not exist yet and buffers the
    /// initial dimensions as a `Resized` event for the first batch.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(1280, 720));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );

                self.batch.push(self.mapper.map_resize(size));
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::Closed);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::Closed);
                event_loop.exit();
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.mapper.update_modifiers(state.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(mapped) = self.mapper.map_key_event(&key_event) {
                    self.batch.push(mapped);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.batch.push(self.mapper.map_wheel(delta));
            }

            WindowEvent::Touch(touch) => {
                self.batch.push(self.mapper.map_touch(&touch));
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.batch.push(self.mapper.map_cursor(position));
            }

            WindowEvent::Resized(size) => {
                self.batch.push(self.mapper.map_resize(size));
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: ship everything buffered this frame.
                self.flush_batch();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Focus, theme, DPI and similar events are not input.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
