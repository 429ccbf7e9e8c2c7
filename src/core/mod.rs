//=========================================================================
// Core
//=========================================================================
//
// Everything that runs on the scheduler thread.
//
// Modules:
// - `scheduler`: frame loop, pacing, gameplay controls
// - `world`: actors, components, cross-actor indices
// - `ui`: screen stack and stock screens
// - `resources`: caches and loaders for on-disk assets
// - `services`: renderer / audio / physics / level loader seams
// - `input`: platform-neutral input and per-frame state
// - `platform_bridge`: messages exchanged with the platform thread
// - `mode`, `deferred`: shared building blocks
//
//=========================================================================

//=== Module Declarations =================================================

pub mod deferred;
pub mod input;
pub mod mode;
pub mod platform_bridge;
pub mod resources;
pub mod scheduler;
pub mod services;
pub mod ui;
pub mod world;
