//=========================================================================
// HUD
//=========================================================================
//
// Non-modal overlay at the bottom of the stack. Each update it rebuilds
// the radar from the world's target registry, relative to the tracked
// player actor. It never closes itself.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use nalgebra::{Vector2, Vector3};

//=== Internal Dependencies ===============================================

use super::{ScreenContext, UiScreen};
use crate::core::world::{ActorId, World};

//=== Hud =================================================================

pub struct Hud {
    player: Option<ActorId>,
    radar_range: f32,
    radar_radius: f32,
    blips: Vec<Vector2<f32>>,
    target_count: usize,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            player: None,
            radar_range: 2000.0,
            radar_radius: 92.0,
            blips: Vec::new(),
            target_count: 0,
        }
    }

    pub fn tracking(mut self, player: ActorId) -> Self {
        self.player = Some(player);
        self
    }

    pub fn set_player(&mut self, player: Option<ActorId>) {
        self.player = player;
    }

    /// World units covered by the radar radius.
    pub fn with_radar_range(mut self, range: f32) -> Self {
        self.radar_range = range.max(f32::EPSILON);
        self
    }

    /// Blip offsets from the radar centre in UI units; +y is the player's
    /// forward direction.
    pub fn blips(&self) -> &[Vector2<f32>] {
        &self.blips
    }

    /// Targets alive in the world, in range or not.
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    fn rebuild_radar(&mut self, world: &World) {
        self.blips.clear();
        self.target_count = world.indices().targets.len();

        let Some(player) = self.player.and_then(|id| world.actor(id)) else {
            return;
        };

        let origin = planar(player.position());
        let forward = planar(player.forward());
        let Some(forward) = forward.try_normalize(f32::EPSILON) else {
            return;
        };
        let right = Vector2::new(forward.y, -forward.x);
        let scale = self.radar_radius / self.radar_range;

        for id in world.indices().targets.iter() {
            let Some(target) = world.actor(id) else {
                continue;
            };
            let offset = planar(target.position()) - origin;
            if offset.norm() > self.radar_range {
                continue;
            }
            self.blips
                .push(Vector2::new(offset.dot(&right), offset.dot(&forward)) * scale);
        }
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

fn planar(v: Vector3<f32>) -> Vector2<f32> {
    Vector2::new(v.x, v.y)
}

impl UiScreen for Hud {
    fn name(&self) -> &str {
        "hud"
    }

    fn update(&mut self, _dt: f32, ctx: &mut ScreenContext<'_>) {
        self.rebuild_radar(ctx.world());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resources::Resources;
    use crate::core::ui::UiStack;
    use crate::core::world::components::TargetComponent;
    use crate::core::world::{Actor, Transform};
    use approx::assert_relative_eq;

    fn target_at(x: f32, y: f32) -> Actor {
        Actor::new()
            .with_transform(Transform::from_position(Vector3::new(x, y, 0.0)))
            .with_component(TargetComponent::new())
    }

    fn hud(stack: &UiStack) -> &Hud {
        stack
            .top()
            .and_then(|(screen, _)| screen.as_any().downcast_ref::<Hud>())
            .unwrap()
    }

    #[test]
    fn radar_is_relative_to_player_heading() {
        let mut world = World::new();
        let resources = Resources::new();
        let player = world.add_actor(Actor::named("player"));
        world.add_actor(target_at(1000.0, 0.0));
        world.add_actor(target_at(0.0, -1000.0));
        world.add_actor(target_at(5000.0, 0.0));

        let mut stack = UiStack::new(1024, 768);
        stack.push(Hud::new().tracking(player));
        stack.apply_pushes(&world, &resources);
        stack.update(0.016, &world, &resources);

        let hud = hud(&stack);
        assert_eq!(hud.target_count(), 3);
        assert_eq!(hud.blips().len(), 2, "out-of-range target is not drawn");
        assert_relative_eq!(hud.blips()[0], Vector2::new(0.0, 46.0), epsilon = 1e-4);
        assert_relative_eq!(hud.blips()[1], Vector2::new(46.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn reaped_targets_disappear_from_radar() {
        let mut world = World::new();
        let resources = Resources::new();
        let player = world.add_actor(Actor::named("player"));
        let target = world.add_actor(target_at(100.0, 0.0));

        let mut stack = UiStack::new(1024, 768);
        stack.push(Hud::new().tracking(player));
        stack.apply_pushes(&world, &resources);

        world.remove_actor(target);
        stack.update(0.016, &world, &resources);

        assert_eq!(hud(&stack).target_count(), 0);
        assert!(hud(&stack).blips().is_empty());
    }
}
