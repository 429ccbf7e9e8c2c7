//=========================================================================
// Input
//=========================================================================
//
// Platform-neutral input types consumed by the frame scheduler.
//
// Architecture:
//   platform (winit) → InputEvent → InputState::capture()
//                                      ├─ presses()  → handle_key_press()
//                                      └─ held state → process_input()
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton, Press};
pub use state::InputState;
