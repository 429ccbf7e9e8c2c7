//=========================================================================
// Gameplay Controls
//=========================================================================
//
// Game-level reaction to discrete presses while the mode is Gameplay.
// Per-actor input goes through components instead.
//
// Stock bindings (`StandardControls`):
//   Escape      push the pause menu
//   - / =       master bus volume down / up by 0.1, within [0, 1]
//   Left click  segment cast through the screen centre
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use nalgebra::Vector3;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputState, KeyCode, MouseButton, Press};
use crate::core::resources::Resources;
use crate::core::services::{AudioSystem, PhysWorld, Renderer};
use crate::core::ui::{PauseMenu, UiStack};
use crate::core::world::{ActorId, World};

//=== GameplayContext =====================================================

/// Scheduler state lent to the controls for one callback.
pub struct GameplayContext<'a> {
    pub world: &'a mut World,
    pub ui: &'a mut UiStack,
    pub resources: &'a mut Resources,
    pub audio: &'a mut dyn AudioSystem,
    pub renderer: &'a dyn Renderer,
    pub physics: &'a dyn PhysWorld,
}

//=== GameplayControls ====================================================

pub trait GameplayControls: Send {
    fn handle_key_press(&mut self, press: Press, ctx: &mut GameplayContext<'_>);

    fn process_input(&mut self, _input: &InputState, _ctx: &mut GameplayContext<'_>) {}
}

//=== StandardControls ====================================================

pub struct StandardControls {
    master_bus: String,
    volume_step: f32,
    last_hit: Option<ActorId>,
}

impl StandardControls {
    pub const MASTER_BUS: &'static str = "bus:/";

    pub fn new() -> Self {
        Self {
            master_bus: Self::MASTER_BUS.to_owned(),
            volume_step: 0.1,
            last_hit: None,
        }
    }

    /// Actor hit by the most recent left click.
    pub fn last_hit(&self) -> Option<ActorId> {
        self.last_hit
    }

    fn nudge_volume(&self, audio: &mut dyn AudioSystem, direction: f32) {
        let volume = audio.bus_volume(&self.master_bus);
        let volume = (volume + direction * self.volume_step).clamp(0.0, 1.0);
        audio.set_bus_volume(&self.master_bus, volume);
        debug!("Master volume {:.1}", volume);
    }

    fn cast_from_screen_centre(&mut self, ctx: &mut GameplayContext<'_>) {
        let start = ctx.renderer.unproject(Vector3::new(0.0, 0.0, 0.0));
        let end = ctx.renderer.unproject(Vector3::new(0.0, 0.0, 0.9));

        self.last_hit = ctx.physics.segment_cast(ctx.world, start, end);
        debug!("Segment cast {:?} -> {:?}: {:?}", start, end, self.last_hit);
    }
}

impl Default for StandardControls {
    fn default() -> Self {
        Self::new()
    }
}

impl GameplayControls for StandardControls {
    fn handle_key_press(&mut self, press: Press, ctx: &mut GameplayContext<'_>) {
        match press {
            Press::Key(KeyCode::Escape) => ctx.ui.push(PauseMenu::new()),
            Press::Key(KeyCode::Minus) => self.nudge_volume(ctx.audio, -1.0),
            Press::Key(KeyCode::Equal) => self.nudge_volume(ctx.audio, 1.0),
            Press::Mouse(MouseButton::Left) => self.cast_from_screen_centre(ctx),
            _ => {}
        }
    }
}
