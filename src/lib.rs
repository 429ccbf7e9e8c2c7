//=========================================================================
// Orrery Engine Library Root
//
// Runtime core for real-time 3D games: a frame scheduler driving actors
// and components, a layered UI screen stack, and resource caches.
//
// Typical usage:
// ```no_run
// use orrery_engine::{init_logging, EngineBuilder, LoggingConfig};
//
// fn main() {
//     init_logging(LoggingConfig::default());
//     EngineBuilder::new().build().run().unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scheduler thread's systems. Applications reach into it
// for actors, components and screens; everything else goes through the
// `Engine` facade.
//
pub mod core;
pub mod error;
pub mod logging;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window and event loop and is not part of the
// public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineConfig};
pub use error::{EngineError, LoadError};
pub use logging::{init_logging, LoggingConfig};
