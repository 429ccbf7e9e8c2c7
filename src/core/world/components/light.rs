//=========================================================================
// Point Light
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use nalgebra::Vector3;

//=== Internal Dependencies ===============================================

use crate::core::world::{Component, ComponentKind};

//=== PointLightComponent =================================================

/// Light data read by the renderer at the owner's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLightComponent {
    pub diffuse_color: Vector3<f32>,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl PointLightComponent {
    pub fn new(diffuse_color: Vector3<f32>, inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            diffuse_color,
            inner_radius,
            outer_radius: outer_radius.max(inner_radius),
        }
    }

    /// Linear falloff between the inner and outer radius.
    pub fn intensity_at(&self, distance: f32) -> f32 {
        if distance <= self.inner_radius {
            1.0
        } else if distance >= self.outer_radius {
            0.0
        } else {
            1.0 - (distance - self.inner_radius) / (self.outer_radius - self.inner_radius)
        }
    }
}

impl Component for PointLightComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::PointLight
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
