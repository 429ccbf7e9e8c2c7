//=========================================================================
// Input State
//=========================================================================
//
// Per-frame keyboard/mouse snapshot handed to `process_input`.
//
// Architecture:
//   [InputEvent] → capture() → held sets + frame deltas + ordered presses
//
// Frame lifecycle: capture() resets the frame deltas, folds the new
// events in, then derives the mouse delta. Queries are valid until the
// next capture().
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton, Press};

//=== InputState ==========================================================

/// Persistent held-state plus the deltas of the most recent frame.
#[derive(Debug, Default)]
pub struct InputState {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Frame Deltas (reset by capture()) -------------------------------
    presses: Vec<Press>,
    keys_released: HashSet<KeyCode>,
    buttons_released: HashSet<MouseButton>,
    mouse_delta: (f32, f32),
}

impl InputState {
    /// Creates an empty state (nothing held, cursor at origin).
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Starts a new frame and folds `events` into the state.
    pub fn capture(&mut self, events: &[InputEvent]) {
        self.presses.clear();
        self.keys_released.clear();
        self.buttons_released.clear();

        let last_position = self.mouse_position;
        for event in events {
            self.apply(event);
        }

        self.mouse_delta = (
            self.mouse_position.0 - last_position.0,
            self.mouse_position.1 - last_position.1,
        );
    }

    fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.insert(key) {
                    self.presses.push(Press::Key(key));
                }
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = modifiers;
                if self.buttons_down.insert(button) {
                    self.presses.push(Press::Mouse(button));
                }
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = modifiers;
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (x, y);
            }
        }
    }

    //--- Queries: discrete ------------------------------------------------

    /// Presses of this frame, in arrival order.
    pub fn presses(&self) -> &[Press] {
        &self.presses
    }

    /// Returns `true` while `key` is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if `key` went down this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.presses.contains(&Press::Key(key))
    }

    /// Returns `true` if `key` went up this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Returns `true` while `button` is held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Returns `true` if `button` went up this frame.
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    //--- Queries: continuous ----------------------------------------------

    /// Cursor position in screen pixels, top-left origin.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Cursor movement since the previous frame.
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Modifier state reported with the latest discrete event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    #[test]
    fn press_is_reported_for_one_frame_only() {
        let mut state = InputState::new();

        state.capture(&[key_down(KeyCode::KeyW)]);
        assert!(state.is_key_pressed(KeyCode::KeyW));
        assert!(state.is_key_down(KeyCode::KeyW));

        state.capture(&[]);
        assert!(!state.is_key_pressed(KeyCode::KeyW));
        assert!(state.is_key_down(KeyCode::KeyW), "held keys survive the frame boundary");

        state.capture(&[key_up(KeyCode::KeyW)]);
        assert!(!state.is_key_down(KeyCode::KeyW));
        assert!(state.is_key_released(KeyCode::KeyW));
    }

    #[test]
    fn presses_keep_arrival_order_across_devices() {
        let mut state = InputState::new();
        state.capture(&[
            key_down(KeyCode::Escape),
            InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE },
            key_down(KeyCode::Minus),
        ]);

        assert_eq!(
            state.presses(),
            &[
                Press::Key(KeyCode::Escape),
                Press::Mouse(MouseButton::Left),
                Press::Key(KeyCode::Minus),
            ]
        );
    }

    #[test]
    fn duplicate_key_down_is_not_a_second_press() {
        let mut state = InputState::new();
        state.capture(&[key_down(KeyCode::Space), key_down(KeyCode::Space)]);
        assert_eq!(state.presses().len(), 1);
    }

    #[test]
    fn mouse_delta_is_relative_to_previous_frame() {
        let mut state = InputState::new();
        state.capture(&[InputEvent::MouseMoved { x: 100.0, y: 50.0 }]);
        assert_eq!(state.mouse_delta(), (100.0, 50.0));

        state.capture(&[
            InputEvent::MouseMoved { x: 110.0, y: 40.0 },
            InputEvent::MouseMoved { x: 120.0, y: 45.0 },
        ]);
        assert_eq!(state.mouse_position(), (120.0, 45.0));
        assert_eq!(state.mouse_delta(), (20.0, -5.0));

        state.capture(&[]);
        assert_eq!(state.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn modifiers_follow_latest_discrete_event() {
        let mut state = InputState::new();
        state.capture(&[InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL }]);
        assert_eq!(state.modifiers(), Modifiers::CTRL);
    }
}
