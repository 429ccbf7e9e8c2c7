//=========================================================================
// UI
//=========================================================================
//
// Layered screen stack over gameplay.
//
// Components:
// - `screen`: `UiScreen` trait, screen states, callback context
// - `stack`: `UiStack` with deferred push and Closing reap
// - `button`: button panels with closure actions
// - `pause_menu`, `dialog_box`, `hud`: stock screens
//
//=========================================================================

//=== Module Declarations =================================================

mod button;
mod dialog_box;
mod hud;
mod pause_menu;
mod screen;
mod stack;

//=== Public API ==========================================================

pub use button::{Button, ButtonAction, ButtonPanel};
pub use dialog_box::DialogBox;
pub use hud::Hud;
pub use pause_menu::PauseMenu;
pub use screen::{ScreenContext, ScreenEvent, ScreenState, UiScreen};
pub use stack::UiStack;
