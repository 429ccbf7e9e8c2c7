//=========================================================================
// World
//=========================================================================
//
// Actor/component model.
//
// Components:
// - `actor`: entity with transform, lifecycle state and owned components
// - `component`: component trait, kinds, update context
// - `registry`: the `World` arena with pending/dead bookkeeping
// - `index`: target and collider registries maintained by components
// - `transform`: local transform → world matrix
// - `components`: stock component implementations
//
//=========================================================================

//=== Module Declarations =================================================

mod actor;
pub(crate) mod component;
pub mod components;
mod index;
mod registry;
mod transform;

//=== Public API ==========================================================

pub use actor::{Actor, ActorState};
pub use component::{
    ActorContext, Component, ComponentKind, ORDER_DEFAULT, ORDER_LATE, ORDER_MOVEMENT,
};
pub use components::Aabb;
pub use index::{ActorIndex, ColliderRegistry, TargetRegistry, WorldIndices};
pub use registry::World;
pub use transform::Transform;

slotmap::new_key_type! {
    /// Generational handle to an actor. Stale handles resolve to nothing.
    pub struct ActorId;
}
