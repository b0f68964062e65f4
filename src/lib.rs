//=========================================================================
// Kinetic Runtime — Library Root
//
// This crate defines the public API surface of the Kinetic Runtime, the
// shared core for frame-driven interactive sketches.
//
// Responsibilities:
// - Expose the runtime entry point (`RuntimeBuilder` / `Runtime`) and
//   the contract applications implement (`Application`)
// - Expose the per-frame value types applications consume
//   (`FrameSnapshot`, `DirtyFlags`, `Phase`, input/event types) and the
//   asset-loading surface (`AssetManager`, descriptors, fetcher seam)
// - Keep OS-specific logic (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use kinetic_runtime::{
//     Application, AssetManager, AssetManifest, FrameSnapshot, RuntimeBuilder, SetupError,
// };
//
// struct Demo;
//
// impl Application for Demo {
//     fn manifest(&self) -> AssetManifest {
//         AssetManifest::new()
//     }
//
//     fn setup(&mut self, _assets: &AssetManager) -> Result<(), SetupError> {
//         Ok(())
//     }
//
//     fn draw(&mut self, frame: &FrameSnapshot) {
//         if frame.flags.scrolled {
//             // react to this frame's scroll delta
//         }
//     }
// }
//
// # fn fetcher() -> std::sync::Arc<dyn kinetic_runtime::AssetFetcher> { unimplemented!() }
// fn main() {
//     RuntimeBuilder::new().build().run(Demo, fetcher());
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the per-frame systems (scroll, swipe, keyboard, cursor,
// viewport, phase machine). It is exposed publicly for extensibility, but
// application code will mostly use the top-level re-exports.
//
// `assets` contains the two-phase loading barrier and its descriptor and
// fetcher types.
//
pub mod assets;
pub mod core;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific logic (window, Winit integration, event
// loop) and is kept private, as it is not part of the public API surface.
//
// `app` and `runtime` define the application contract and the runtime
// entry point; their contents are re-exported below.
//
mod app;
mod platform;
mod runtime;

//--- Public Exports ------------------------------------------------------
//
// Everything a typical demo needs, importable from the crate root.
//
pub use app::{Application, SetupError};
pub use assets::{
    AssetDescriptor, AssetError, AssetFetcher, AssetKind, AssetManager, AssetManifest,
    AssetPayload, LoadObservation,
};
pub use self::core::event::{ComboKey, KeyCode, Modifiers, RawInputEvent, WheelDeltaMode};
pub use self::core::keyboard::KeyboardManager;
pub use self::core::phase::Phase;
pub use self::core::scroll::ScrollOptions;
pub use self::core::snapshot::{DirtyFlags, FrameSnapshot};
pub use self::core::swipe::{SwipeAxis, SwipeEvent, SwipePhase};
pub use self::core::vec2::Vec2;
pub use platform::PlatformError;
pub use runtime::{Runtime, RuntimeBuilder};
