//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages crossing the platform ⇄ scheduler thread boundary.
//
//   platform ──PlatformEvent──►  scheduler
//   platform ◄─PlatformCommand── scheduler
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform to the scheduler.
#[derive(Debug, Clone)]
pub enum PlatformEvent {
    /// Input gathered between two redraws.
    ///
    /// `discrete` keeps arrival order; `continuous` holds coalesced
    /// motion and is applied after the discrete events.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window close requested by the user or the OS.
    WindowClosed,
}

//=== PlatformCommand =====================================================

/// Requests sent from the scheduler back to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformCommand {
    /// Grab and hide the cursor (`true`) or release it (`false`).
    SetRelativeMouse(bool),

    /// The scheduler left its loop; the platform should close the window.
    Exit,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(String),

    /// The window could not be created.
    #[error("window creation failed: {0}")]
    WindowCreation(String),
}
