//=========================================================================
// Follow Camera
//=========================================================================
//
// Spring-damped third-person camera trailing its owner. The resulting
// view matrix is read by the renderer.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use nalgebra::{Matrix4, Point3, Vector3};

//=== Internal Dependencies ===============================================

use crate::core::world::component::ORDER_LATE;
use crate::core::world::{Actor, ActorContext, Component, ComponentKind};

//=== FollowCameraComponent ===============================================

#[derive(Debug, Clone)]
pub struct FollowCameraComponent {
    pub horizontal_distance: f32,
    pub vertical_distance: f32,
    pub target_distance: f32,
    pub spring_constant: f32,
    actual_position: Option<Vector3<f32>>,
    velocity: Vector3<f32>,
    view: Matrix4<f32>,
}

impl FollowCameraComponent {
    pub fn new() -> Self {
        Self {
            horizontal_distance: 350.0,
            vertical_distance: 150.0,
            target_distance: 100.0,
            spring_constant: 64.0,
            actual_position: None,
            velocity: Vector3::zeros(),
            view: Matrix4::identity(),
        }
    }

    pub fn view(&self) -> &Matrix4<f32> {
        &self.view
    }

    pub fn position(&self) -> Option<Vector3<f32>> {
        self.actual_position
    }

    /// Snaps to the ideal position with no spring lag.
    pub fn snap_to_ideal(&mut self, owner: &Actor) {
        let ideal = self.ideal_position(owner);
        self.actual_position = Some(ideal);
        self.velocity = Vector3::zeros();
        self.view = self.look_at(owner, ideal);
    }

    fn ideal_position(&self, owner: &Actor) -> Vector3<f32> {
        owner.position() - owner.forward() * self.horizontal_distance
            + Vector3::z() * self.vertical_distance
    }

    fn look_at(&self, owner: &Actor, eye: Vector3<f32>) -> Matrix4<f32> {
        let target = owner.position() + owner.forward() * self.target_distance;
        Matrix4::look_at_rh(&Point3::from(eye), &Point3::from(target), &Vector3::z())
    }
}

impl Default for FollowCameraComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for FollowCameraComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::FollowCamera
    }

    fn update_order(&self) -> i32 {
        ORDER_LATE
    }

    fn update(&mut self, owner: &mut Actor, _ctx: &mut ActorContext<'_>, dt: f32) {
        let Some(actual) = self.actual_position else {
            self.snap_to_ideal(owner);
            return;
        };

        // Critically damped spring.
        let dampening = 2.0 * self.spring_constant.sqrt();
        let ideal = self.ideal_position(owner);
        let displacement = actual - ideal;
        let acceleration = -self.spring_constant * displacement - dampening * self.velocity;

        self.velocity += acceleration * dt;
        let actual = actual + self.velocity * dt;

        self.actual_position = Some(actual);
        self.view = self.look_at(owner, actual);
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
