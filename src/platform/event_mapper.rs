//=========================================================================
// Platform Event Mapper
//
// Converts Winit input events to runtime-level `RawInputEvent` types.
// Provides a clean separation between OS-specific input and the
// runtime's internal event representation.
//
// Stateful modifier tracking: caches modifier state from
// ModifiersChanged events and stamps it onto every subsequent key event,
// so combination predicates downstream can resolve against the
// triggering event. Unmapped keys (F13-F24, exotic keyboards) are
// filtered (returns None).
//
// Wheel deltas are converted to the content-down-positive sign
// convention the scroll manager expects: Winit reports positive as
// away-from-user, so both axes are negated.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, KeyEvent, MouseScrollDelta, Touch, TouchPhase},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::event::{KeyCode, Modifiers, RawInputEvent, WheelDeltaMode};

//=== EventMapper =========================================================

/// Converts Winit events to runtime events with stateful modifier
/// tracking.
pub(crate) struct EventMapper {
    current_modifiers: Modifiers,
}

impl EventMapper {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self { current_modifiers: Modifiers::NONE }
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates cached modifier state (stamped onto subsequent events).
    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.current_modifiers = Modifiers::from(state);
    }

    #[cfg(test)]
    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Event Mapping ----------------------------------------------------

    /// Converts a Winit key event (filters unmapped keys).
    pub(crate) fn map_key_event(&self, key_event: &KeyEvent) -> Option<RawInputEvent> {
        let key = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key, KeyCode::Unidentified) {
            return None;
        }

        let modifiers = self.current_modifiers;
        Some(match key_event.state {
            ElementState::Pressed => RawInputEvent::KeyDown { key, modifiers },
            ElementState::Released => RawInputEvent::KeyUp { key, modifiers },
        })
    }

    /// Converts a wheel delta, negating to content-down-positive.
    pub(crate) fn map_wheel(&self, delta: MouseScrollDelta) -> RawInputEvent {
        match delta {
            MouseScrollDelta::LineDelta(x, y) => RawInputEvent::Wheel {
                delta_x: -x as f64,
                delta_y: -y as f64,
                mode: WheelDeltaMode::Line,
            },
            MouseScrollDelta::PixelDelta(position) => RawInputEvent::Wheel {
                delta_x: -position.x,
                delta_y: -position.y,
                mode: WheelDeltaMode::Pixel,
            },
        }
    }

    /// Converts a touch event by phase; a cancelled touch ends the
    /// gesture like a lift does.
    pub(crate) fn map_touch(&self, touch: &Touch) -> RawInputEvent {
        let PhysicalPosition { x, y } = touch.location;
        match touch.phase {
            TouchPhase::Started => RawInputEvent::TouchStart { x, y },
            TouchPhase::Moved => RawInputEvent::TouchMove { x, y },
            TouchPhase::Ended | TouchPhase::Cancelled => RawInputEvent::TouchEnd,
        }
    }

    /// Converts a pointer move (screen space, no modifiers).
    pub(crate) fn map_cursor(&self, position: PhysicalPosition<f64>) -> RawInputEvent {
        RawInputEvent::CursorMoved { x: position.x, y: position.y }
    }

    /// Converts a window resize.
    pub(crate) fn map_resize(&self, size: PhysicalSize<u32>) -> RawInputEvent {
        RawInputEvent::Resized { width: size.width as f64, height: size.height as f64 }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit ModifiersState to runtime Modifiers.
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            ctrl: state.control_key(),
            shift: state.shift_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}

/// Converts Winit physical key codes to runtime key codes.
///
/// Maps A-Z, 0-9, arrows, and common special keys. Unmapped keys
/// (F-row beyond F11, numpad, media keys) return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------
            ArrowUp => KeyCode::ArrowUp, ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft, ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------
            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            F11 => KeyCode::F11,

            //--- Unmapped (return Unidentified) -------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_modifiers(ctrl: bool, shift: bool, meta: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if ctrl { state.insert(ModifiersState::CONTROL); }
        if shift { state.insert(ModifiersState::SHIFT); }
        if meta { state.insert(ModifiersState::SUPER); }
        state
    }

    #[test]
    fn starts_with_no_modifiers() {
        let mapper = EventMapper::new();
        assert_eq!(mapper.current_modifiers(), Modifiers::NONE);
    }

    #[test]
    fn modifiers_persist_until_changed() {
        let mut mapper = EventMapper::new();
        mapper.update_modifiers(make_modifiers(true, false, true));

        let mods = mapper.current_modifiers();
        assert!(mods.ctrl && !mods.shift && mods.meta);

        mapper.update_modifiers(ModifiersState::empty());
        assert_eq!(mapper.current_modifiers(), Modifiers::NONE);
    }

    //=====================================================================
    // Wheel Mapping
    //=====================================================================

    #[test]
    fn line_delta_negated_into_line_mode() {
        let mapper = EventMapper::new();
        let event = mapper.map_wheel(MouseScrollDelta::LineDelta(0.0, 3.0));

        assert_eq!(
            event,
            RawInputEvent::Wheel { delta_x: 0.0, delta_y: -3.0, mode: WheelDeltaMode::Line }
        );
    }

    #[test]
    fn pixel_delta_negated_into_pixel_mode() {
        let mapper = EventMapper::new();
        let event =
            mapper.map_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(-4.0, 12.5)));

        assert_eq!(
            event,
            RawInputEvent::Wheel { delta_x: 4.0, delta_y: -12.5, mode: WheelDeltaMode::Pixel }
        );
    }

    //=====================================================================
    // Cursor & Resize Mapping
    //=====================================================================

    #[test]
    fn cursor_maps_to_screen_position() {
        let mapper = EventMapper::new();
        let event = mapper.map_cursor(PhysicalPosition::new(123.5, 456.75));
        assert_eq!(event, RawInputEvent::CursorMoved { x: 123.5, y: 456.75 });
    }

    #[test]
    fn resize_maps_dimensions() {
        let mapper = EventMapper::new();
        let event = mapper.map_resize(PhysicalSize::new(1920, 1080));
        assert_eq!(event, RawInputEvent::Resized { width: 1920.0, height: 1080.0 });
    }

    //=====================================================================
    // Key Code Conversion
    //=====================================================================

    #[test]
    fn keycode_conversion_alphabetic() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::KeyZ);
    }

    #[test]
    fn keycode_conversion_special() {
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
        assert_eq!(KeyCode::from(WinitKeyCode::F11), KeyCode::F11);
    }

    #[test]
    fn keycode_conversion_filters_unidentified() {
        assert!(matches!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified));
    }

    #[test]
    fn modifiers_state_conversion_covers_meta() {
        let mods = Modifiers::from(make_modifiers(false, true, true));
        assert!(!mods.ctrl && mods.shift && mods.meta && !mods.alt);
    }
}
