//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use orrery_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder, EngineConfig};
pub use crate::error::{EngineError, LoadError};

// Scheduler
pub use crate::core::mode::{GameMode, ModeRequest};
pub use crate::core::scheduler::{FrameScheduler, GameplayContext, GameplayControls, Pacing};

// World
pub use crate::core::world::{Actor, ActorContext, ActorId, ActorState, Component, ComponentKind, World};

// UI
pub use crate::core::ui::{ScreenContext, ScreenState, UiScreen};

// Input
pub use crate::core::input::{InputState, KeyCode, Modifiers, MouseButton, Press};

// Services
pub use crate::core::services::{AudioSystem, LevelLoader, PhysWorld, Renderer};
