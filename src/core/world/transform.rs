//=========================================================================
// Transform
//=========================================================================

//=== External Dependencies ===============================================

use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

//=== Transform ===========================================================

/// Local transform of an actor: translation, rotation, uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub scale: f32,
}

impl Transform {
    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Composes scale, then rotation, then translation.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Matrix4::new_scaling(self.scale)
    }

    /// Unit X rotated into world space.
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * Vector3::x()
    }

    /// Transforms a local-space point with the full transform.
    pub fn transform_point(&self, point: &Vector3<f32>) -> Vector3<f32> {
        self.to_matrix()
            .transform_point(&Point3::from(*point))
            .coords
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: 1.0,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
