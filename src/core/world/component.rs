//=========================================================================
// Component
//=========================================================================
//
// Behaviour units owned by an actor.
//
// A component never holds its actor. Every hook receives the owner (or
// its id) from the caller:
//
//   on_attach(id, indices)         actor entered the world / comp added
//   process_input(owner, input)    gameplay input, Active actors only
//   update(owner, ctx, dt)         once per frame, in update order
//   on_world_transform(owner)      owner's world matrix was recomputed
//   on_detach(id, indices)         comp removed / actor destroyed
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::{Actor, ActorId, WorldIndices};
use crate::core::input::InputState;
use crate::core::world::World;

//=== ComponentKind =======================================================

/// Stable type tag of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Mesh,
    SkeletalMesh,
    Box,
    FollowCamera,
    Target,
    PointLight,
    Move,
    /// Application-defined component.
    Custom(&'static str),
}

//=== Update order ========================================================

/// Components that move their owner.
pub const ORDER_MOVEMENT: i32 = 10;
/// Default for components with no ordering needs.
pub const ORDER_DEFAULT: i32 = 100;
/// Components that read the owner's final transform.
pub const ORDER_LATE: i32 = 200;

//=== Component ===========================================================

pub trait Component: Send + 'static {
    fn kind(&self) -> ComponentKind;

    /// Lower runs first. Equal orders keep insertion order.
    fn update_order(&self) -> i32 {
        ORDER_DEFAULT
    }

    fn process_input(&mut self, _owner: &mut Actor, _input: &InputState) {}

    fn update(&mut self, _owner: &mut Actor, _ctx: &mut ActorContext<'_>, _dt: f32) {}

    fn on_world_transform(&mut self, _owner: &Actor) {}

    fn on_attach(&mut self, _owner: ActorId, _indices: &mut WorldIndices) {}

    fn on_detach(&mut self, _owner: ActorId, _indices: &mut WorldIndices) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

//=== ActorContext ========================================================

/// World access for a component during its owner's update.
///
/// The owner is checked out of the world for the duration of its update,
/// so `actor(ctx.id())` yields `None`; use the `owner` argument instead.
pub struct ActorContext<'w> {
    world: &'w mut World,
    id: ActorId,
}

impl<'w> ActorContext<'w> {
    pub(crate) fn new(world: &'w mut World, id: ActorId) -> Self {
        Self { world, id }
    }

    /// Id of the actor being updated.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Adds an actor. It becomes active after this frame's promotion.
    pub fn spawn(&mut self, actor: Actor) -> ActorId {
        self.world.add_actor(actor)
    }

    /// Requests removal of `id`; it is reaped at the end of the frame.
    pub fn remove(&mut self, id: ActorId) {
        self.world.remove_actor(id);
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.world.actor(id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.world.actor_mut(id)
    }

    pub fn indices(&self) -> &WorldIndices {
        self.world.indices()
    }
}
