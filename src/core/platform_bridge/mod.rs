//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the platform layer (winit) and the frame scheduler.
// The scheduler only ever sees these types, so the windowing backend can
// be swapped, or left out entirely for headless runs and tests.
//
// Components:
// - `interface`: event/command/error types (the contract)
// - `event_collector`: scheduler-side draining of the event channel
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub use event_collector::{EventCollector, TickControl};
pub use interface::{PlatformCommand, PlatformError, PlatformEvent};
