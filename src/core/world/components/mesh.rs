//=========================================================================
// Meshes
//=========================================================================
//
// Render-side components. The renderer walks `World::actors()` and reads
// these; the runtime only advances animation playback.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::resources::{Animation, Skeleton};
use crate::core::world::{Actor, ActorContext, Component, ComponentKind};

//=== MeshComponent =======================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub mesh: PathBuf,
    pub texture_index: usize,
    pub visible: bool,
}

impl MeshComponent {
    pub fn new(mesh: impl Into<PathBuf>) -> Self {
        Self {
            mesh: mesh.into(),
            texture_index: 0,
            visible: true,
        }
    }
}

impl Component for MeshComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Mesh
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== SkeletalMeshComponent ===============================================

/// Skinned mesh with a looping animation clock.
#[derive(Debug, Clone)]
pub struct SkeletalMeshComponent {
    pub mesh: MeshComponent,
    skeleton: Option<Arc<Skeleton>>,
    animation: Option<Arc<Animation>>,
    play_rate: f32,
    anim_time: f32,
}

impl SkeletalMeshComponent {
    pub fn new(mesh: MeshComponent, skeleton: Option<Arc<Skeleton>>) -> Self {
        Self {
            mesh,
            skeleton,
            animation: None,
            play_rate: 1.0,
            anim_time: 0.0,
        }
    }

    /// Starts `animation` from its first frame and returns its length in
    /// seconds. `None` stops playback and returns `0.0`.
    pub fn play_animation(&mut self, animation: Option<Arc<Animation>>, play_rate: f32) -> f32 {
        self.anim_time = 0.0;
        self.play_rate = play_rate;

        match (&self.skeleton, animation) {
            (Some(skeleton), Some(animation)) => {
                if animation.bone_count as usize != skeleton.bones.len() {
                    warn!(
                        "Animation bone count {} does not match skeleton ({} bones)",
                        animation.bone_count,
                        skeleton.bones.len()
                    );
                }
                let duration = animation.duration;
                self.animation = Some(animation);
                duration
            }
            (None, Some(_)) => {
                warn!("Cannot play animation on a mesh without skeleton");
                self.animation = None;
                0.0
            }
            (_, None) => {
                self.animation = None;
                0.0
            }
        }
    }

    pub fn skeleton(&self) -> Option<&Arc<Skeleton>> {
        self.skeleton.as_ref()
    }

    pub fn animation(&self) -> Option<&Arc<Animation>> {
        self.animation.as_ref()
    }

    /// Playback position in seconds.
    pub fn anim_time(&self) -> f32 {
        self.anim_time
    }

    /// Index of the keyframe at the current playback position.
    pub fn current_frame(&self) -> Option<usize> {
        let animation = self.animation.as_ref()?;
        let frames = animation.frame_count.max(1);
        let frame_length = animation.duration / (frames - 1).max(1) as f32;
        let frame = (self.anim_time / frame_length) as usize;
        Some(frame.min(frames as usize - 1))
    }
}

impl Component for SkeletalMeshComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::SkeletalMesh
    }

    fn update(&mut self, _owner: &mut Actor, _ctx: &mut ActorContext<'_>, dt: f32) {
        let Some(animation) = &self.animation else {
            return;
        };

        self.anim_time += dt * self.play_rate;
        if animation.duration > 0.0 {
            self.anim_time = self.anim_time.rem_euclid(animation.duration);
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
    use crate::core::resources::{Bone, BoneTransform};
    use crate::core::world::World;
    use approx::assert_relative_eq;

    fn skeleton(bones: usize) -> Arc<Skeleton> {
        let bindpose = BoneTransform {
            rot: [0.0, 0.0, 0.0, 1.0],
            trans: [0.0; 3],
        };
        Arc::new(Skeleton {
            bones: (0..bones)
                .map(|index| Bone {
                    name: format!("bone{}", index),
                    parent: index as i32 - 1,
                    bindpose,
                })
                .collect(),
        })
    }

    fn animation(duration: f32, frames: u32) -> Arc<Animation> {
        Arc::new(Animation {
            frame_count: frames,
            duration,
            bone_count: 2,
            tracks: Vec::new(),
        })
    }

    #[test]
    fn playback_loops_over_duration() {
        let mut component =
            SkeletalMeshComponent::new(MeshComponent::new("Mannequin.gpmesh"), Some(skeleton(2)));
        let length = component.play_animation(Some(animation(1.0, 5)), 1.0);
        assert_relative_eq!(length, 1.0);

        let mut world = World::new();
        let id = world.add_actor(Actor::new().with_component(component));
        for _ in 0..3 {
            world.update_actors(0.5);
        }

        let mesh = world.actor(id).unwrap().component::<SkeletalMeshComponent>().unwrap();
        assert_relative_eq!(mesh.anim_time(), 0.5, epsilon = 1e-5);
        assert_eq!(mesh.current_frame(), Some(2));
    }

    #[test]
    fn no_skeleton_means_no_playback() {
        let mut component = SkeletalMeshComponent::new(MeshComponent::new("Rock.gpmesh"), None);
        assert_relative_eq!(component.play_animation(Some(animation(2.0, 3)), 1.0), 0.0);
        assert!(component.animation().is_none());
        assert_eq!(component.current_frame(), None);
    }
}
