//=========================================================================
// Box Collision
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use nalgebra::Vector3;

//=== Internal Dependencies ===============================================

use crate::core::world::{Actor, ActorId, Component, ComponentKind, WorldIndices};

//=== Aabb ================================================================

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point.
    pub fn from_points(points: impl IntoIterator<Item = Vector3<f32>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut aabb = Self::new(first, first);
        for point in points {
            aabb.min = aabb.min.inf(&point);
            aabb.max = aabb.max.sup(&point);
        }
        Some(aabb)
    }

    pub fn corners(&self) -> [Vector3<f32>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
        ]
    }

    pub fn contains(&self, point: &Vector3<f32>) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Slab test. Returns the fraction `t` in `[0, 1]` along
    /// `start → end` where the segment first enters the box.
    pub fn segment_intersect(&self, start: &Vector3<f32>, end: &Vector3<f32>) -> Option<f32> {
        let dir = end - start;
        let mut t_min = 0.0_f32;
        let mut t_max = 1.0_f32;

        for axis in 0..3 {
            if dir[axis].abs() < f32::EPSILON {
                if start[axis] < self.min[axis] || start[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir[axis];
            let mut t1 = (self.min[axis] - start[axis]) * inv;
            let mut t2 = (self.max[axis] - start[axis]) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

//=== BoxComponent ========================================================

/// Box collider registered in the world's collider index.
#[derive(Debug, Clone)]
pub struct BoxComponent {
    object_box: Aabb,
    world_box: Aabb,
    should_rotate: bool,
}

impl BoxComponent {
    pub fn new(object_box: Aabb) -> Self {
        Self {
            object_box,
            world_box: object_box,
            should_rotate: true,
        }
    }

    /// When `false`, the owner's rotation is ignored.
    pub fn with_rotation(mut self, should_rotate: bool) -> Self {
        self.should_rotate = should_rotate;
        self
    }

    pub fn object_box(&self) -> &Aabb {
        &self.object_box
    }

    pub fn world_box(&self) -> &Aabb {
        &self.world_box
    }
}

impl Component for BoxComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Box
    }

    fn on_world_transform(&mut self, owner: &Actor) {
        let transform = owner.transform();
        let corners = self.object_box.corners().map(|corner| {
            let scaled = corner * transform.scale;
            let rotated = if self.should_rotate {
                transform.rotation * scaled
            } else {
                scaled
            };
            rotated + transform.position
        });

        if let Some(world_box) = Aabb::from_points(corners) {
            self.world_box = world_box;
        }
    }

    fn on_attach(&mut self, owner: ActorId, indices: &mut WorldIndices) {
        indices.colliders.insert(owner);
    }

    fn on_detach(&mut self, owner: ActorId, indices: &mut WorldIndices) {
        indices.colliders.remove(owner);
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
