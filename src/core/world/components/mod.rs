//=========================================================================
// Stock Components
//=========================================================================

mod camera;
mod collision;
mod light;
mod mesh;
mod movement;
mod target;

pub use camera::FollowCameraComponent;
pub use collision::{Aabb, BoxComponent};
pub use light::PointLightComponent;
pub use mesh::{MeshComponent, SkeletalMeshComponent};
pub use movement::MoveComponent;
pub use target::TargetComponent;
