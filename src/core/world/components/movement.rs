//=========================================================================
// Movement
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use nalgebra::{UnitQuaternion, Vector3};

//=== Internal Dependencies ===============================================

use crate::core::world::component::ORDER_MOVEMENT;
use crate::core::world::{Actor, ActorContext, Component, ComponentKind};

//=== MoveComponent =======================================================

/// Moves the owner along its forward vector and yaws it about +Z.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MoveComponent {
    /// Units per second.
    pub forward_speed: f32,
    /// Radians per second.
    pub angular_speed: f32,
}

impl MoveComponent {
    pub fn new(forward_speed: f32, angular_speed: f32) -> Self {
        Self {
            forward_speed,
            angular_speed,
        }
    }
}

impl Component for MoveComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Move
    }

    fn update_order(&self) -> i32 {
        ORDER_MOVEMENT
    }

    fn update(&mut self, owner: &mut Actor, _ctx: &mut ActorContext<'_>, dt: f32) {
        if self.angular_speed.abs() > f32::EPSILON {
            let yaw = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.angular_speed * dt);
            owner.set_rotation(owner.rotation() * yaw);
        }

        if self.forward_speed.abs() > f32::EPSILON {
            let step = owner.forward() * self.forward_speed * dt;
            owner.set_position(owner.position() + step);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::world::World;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn moves_along_forward() {
        let mut world = World::new();
        let id = world.add_actor(Actor::new().with_component(MoveComponent::new(100.0, 0.0)));

        world.update_actors(0.5);

        let actor = world.actor(id).unwrap();
        assert_relative_eq!(actor.position(), Vector3::new(50.0, 0.0, 0.0), epsilon = 1e-4);
        assert_relative_eq!(actor.world_transform()[(0, 3)], 50.0, epsilon = 1e-4);
    }

    #[test]
    fn turning_changes_forward() {
        let mut world = World::new();
        let id = world.add_actor(Actor::new().with_component(MoveComponent::new(0.0, PI)));

        world.update_actors(0.5);

        let forward = world.actor(id).unwrap().forward();
        assert_relative_eq!(forward, Vector3::y(), epsilon = 1e-5);
    }
}
