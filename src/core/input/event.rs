//=========================================================================
// Input Event Types
//=========================================================================
//
// Platform-neutral representation of keyboard and mouse input.
//
// The platform layer converts OS events into `InputEvent`s; the
// scheduler folds them into `InputState` and extracts the ordered list
// of discrete presses (`Press`) that drive key-press handlers.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputState  ──►  process_input()   (held keys, mouse)
//    Press list  ──►  handle_key_press() (one call per press, in order)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// `Other` covers side buttons and anything without a dedicated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the key location, not the produced character: `Minus` is
/// the key right of `Digit0` on every layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Punctuation ------------------------------------------------------
    /// `-` key (master volume down in the stock gameplay controls).
    Minus,

    /// `=` key (master volume up in the stock gameplay controls).
    Equal,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Key reported by the platform without a dedicated variant.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state captured alongside discrete events.
///
/// Left/right variants are not distinguished; Ctrl covers Command on macOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };

    /// Shift only.
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };

    /// Ctrl only.
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };

    /// Alt only.
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    /// Returns `true` if no modifier is held.
    pub fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.alt)
    }
}

//=== Press ===============================================================

/// A discrete "button went down" occurrence.
///
/// Keys and mouse buttons share one key-press handler, so both are
/// delivered through this type in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Press {
    Key(KeyCode),
    Mouse(MouseButton),
}

//=== InputEvent ==========================================================

/// Low-level input event produced by the platform layer.
///
/// Key repeats are filtered before events reach the engine, so every
/// `KeyDown` is a real transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },

    /// Cursor position in screen space (pixels, top-left origin).
    MouseMoved { x: f32, y: f32 },
}

impl InputEvent {
    /// Returns the discrete press carried by this event, if any.
    pub fn press(&self) -> Option<Press> {
        match *self {
            Self::KeyDown { key, .. } => Some(Press::Key(key)),
            Self::MouseButtonDown { button, .. } => Some(Press::Mouse(button)),
            _ => None,
        }
    }

    /// Returns `true` for events whose order matters (keys and buttons).
    pub fn is_discrete(&self) -> bool {
        !matches!(self, Self::MouseMoved { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
