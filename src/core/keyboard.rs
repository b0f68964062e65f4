//=========================================================================
// Keyboard Manager
//
// Tracks currently-held keys and resolves modifier-aware key combinations.
//
// Keys are identified by physical code, added on key-down and removed on
// key-up. The combination predicates take the triggering event's modifier
// snapshot: modifier entries of a combination resolve against that
// snapshot, never against the held-key set, because platforms report
// modifiers as event state rather than as reliably-tracked keys.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== Internal Modules ====================================================

use super::event::{ComboKey, KeyCode, Modifiers};

//=== KeyboardManager =====================================================

/// Owns the held-key set for one runtime instance.
pub struct KeyboardManager {
    held: HashSet<KeyCode>,
    needs_update: bool,
}

impl KeyboardManager {
    pub fn new() -> Self {
        Self {
            held: HashSet::with_capacity(16),
            needs_update: false,
        }
    }

    //--- Event Intake -----------------------------------------------------

    /// Records a key press. Repeat events for an already-held key are
    /// absorbed without raising the dirty flag.
    pub fn handle_key_down(&mut self, key: KeyCode) {
        if self.held.insert(key) {
            self.needs_update = true;
        }
    }

    /// Records a key release; a release for a key never seen down is
    /// ignored.
    pub fn handle_key_up(&mut self, key: KeyCode) {
        if self.held.remove(&key) {
            self.needs_update = true;
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` while the given key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Conjunctive combination predicate: `true` iff every listed entry is
    /// active. Modifier entries resolve against `modifiers` (the
    /// triggering event's state); `Code` entries against the held set.
    pub fn is_comb_key(&self, modifiers: Modifiers, keys: &[ComboKey]) -> bool {
        keys.iter().all(|key| self.resolve(modifiers, key))
    }

    /// Disjunctive counterpart of [`is_comb_key`](Self::is_comb_key).
    pub fn is_any_key(&self, modifiers: Modifiers, keys: &[ComboKey]) -> bool {
        keys.iter().any(|key| self.resolve(modifiers, key))
    }

    /// Reads and clears the one-shot dirty flag.
    pub fn consume(&mut self) -> bool {
        let was_needed = self.needs_update;
        self.needs_update = false;
        was_needed
    }

    //--- Internal Helpers -------------------------------------------------

    fn resolve(&self, modifiers: Modifiers, key: &ComboKey) -> bool {
        match key {
            ComboKey::Ctrl => modifiers.ctrl,
            ComboKey::Shift => modifiers.shift,
            ComboKey::Alt => modifiers.alt,
            ComboKey::Meta => modifiers.meta,
            ComboKey::Code(code) => self.held.contains(code),
        }
    }
}

impl Default for KeyboardManager {
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

    //=====================================================================
    // Held-Set Tracking
    //=====================================================================

    #[test]
    fn down_then_up_roundtrip() {
        let mut keyboard = KeyboardManager::new();

        keyboard.handle_key_down(KeyCode::KeyW);
        assert!(keyboard.is_key_down(KeyCode::KeyW));

        keyboard.handle_key_up(KeyCode::KeyW);
        assert!(!keyboard.is_key_down(KeyCode::KeyW));
    }

    #[test]
    fn repeat_down_does_not_redirty() {
        let mut keyboard = KeyboardManager::new();

        keyboard.handle_key_down(KeyCode::KeyA);
        assert!(keyboard.consume());

        keyboard.handle_key_down(KeyCode::KeyA);
        assert!(!keyboard.consume(), "OS key repeat must not raise the flag");
    }

    #[test]
    fn spurious_up_ignored() {
        let mut keyboard = KeyboardManager::new();
        keyboard.handle_key_up(KeyCode::KeyZ);
        assert!(!keyboard.consume());
    }

    //=====================================================================
    // Combination Predicates
    //=====================================================================

    /// Ctrl+S is true iff the event's ctrl modifier is active AND `S` is
    /// in the held-key set; false if either is absent.
    #[test]
    fn comb_key_requires_modifier_and_held_key() {
        let mut keyboard = KeyboardManager::new();
        let combo = [ComboKey::Ctrl, ComboKey::Code(KeyCode::KeyS)];

        keyboard.handle_key_down(KeyCode::KeyS);
        assert!(keyboard.is_comb_key(Modifiers::CTRL, &combo));

        // Modifier absent on the triggering event.
        assert!(!keyboard.is_comb_key(Modifiers::NONE, &combo));

        // Key absent from the held set.
        keyboard.handle_key_up(KeyCode::KeyS);
        assert!(!keyboard.is_comb_key(Modifiers::CTRL, &combo));
    }

    #[test]
    fn modifiers_resolve_against_event_not_held_set() {
        let keyboard = KeyboardManager::new();

        // No modifier key is in the held set, yet the event snapshot wins.
        assert!(keyboard.is_comb_key(Modifiers::SHIFT, &[ComboKey::Shift]));
        assert!(!keyboard.is_comb_key(Modifiers::NONE, &[ComboKey::Shift]));
    }

    #[test]
    fn any_key_is_disjunctive() {
        let mut keyboard = KeyboardManager::new();
        keyboard.handle_key_down(KeyCode::KeyH);

        let keys = [ComboKey::Code(KeyCode::F11), ComboKey::Code(KeyCode::KeyH)];
        assert!(keyboard.is_any_key(Modifiers::NONE, &keys));

        keyboard.handle_key_up(KeyCode::KeyH);
        assert!(!keyboard.is_any_key(Modifiers::NONE, &keys));
    }

    #[test]
    fn three_key_chord() {
        let mut keyboard = KeyboardManager::new();
        keyboard.handle_key_down(KeyCode::KeyS);

        let combo = [ComboKey::Meta, ComboKey::Shift, ComboKey::Code(KeyCode::KeyS)];
        let mods = Modifiers { meta: true, shift: true, ..Modifiers::NONE };

        assert!(keyboard.is_comb_key(mods, &combo));
        assert!(!keyboard.is_comb_key(Modifiers { meta: true, ..Modifiers::NONE }, &combo));
    }
}
