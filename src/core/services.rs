//=========================================================================
// Services
//=========================================================================
//
// External collaborators driven by the frame scheduler. Only their
// interfaces live here, plus headless stand-ins used when the embedding
// application provides none.
//
//   Renderer     draw world + UI, screen → world unprojection
//   AudioSystem  event playback, bus volumes
//   PhysWorld    segment casts against the world
//   LevelLoader  populates the world from a level file
//
// Services receive `&World` / `&UiStack` only for the duration of a call.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};
use nalgebra::Vector3;

//=== Internal Dependencies ===============================================

use crate::core::resources::Resources;
use crate::core::ui::UiStack;
use crate::core::world::components::BoxComponent;
use crate::core::world::{ActorId, World};
use crate::error::LoadError;

//=== Renderer ============================================================

pub trait Renderer: Send {
    /// Opens a `width` × `height` surface. `false` aborts startup.
    fn initialize(&mut self, width: u32, height: u32) -> bool;

    fn draw(&mut self, world: &World, ui: &UiStack);

    /// Releases meshes, textures and other level data.
    fn unload_data(&mut self);

    fn shutdown(&mut self);

    /// Maps a screen point (x, y in pixels from the centre, z depth in
    /// `[0, 1]`) to world space.
    fn unproject(&self, screen_point: Vector3<f32>) -> Vector3<f32>;
}

//=== AudioSystem =========================================================

/// Opaque handle to a playing sound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SoundHandle(pub u32);

impl SoundHandle {
    pub const INVALID: SoundHandle = SoundHandle(0);

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

pub trait AudioSystem: Send {
    /// Opens the audio device. `false` aborts startup.
    fn initialize(&mut self) -> bool;

    fn update(&mut self, dt: f32);

    fn play_event(&mut self, name: &str) -> SoundHandle;

    fn bus_volume(&self, bus: &str) -> f32;

    fn set_bus_volume(&mut self, bus: &str, volume: f32);

    fn shutdown(&mut self);
}

//=== PhysWorld ===========================================================

pub trait PhysWorld: Send {
    /// Closest actor hit by the segment `start → end`, if any.
    fn segment_cast(&self, world: &World, start: Vector3<f32>, end: Vector3<f32>)
        -> Option<ActorId>;
}

//=== LevelLoader =========================================================

pub trait LevelLoader: Send {
    fn load_level(
        &mut self,
        world: &mut World,
        resources: &mut Resources,
        path: &Path,
    ) -> Result<(), LoadError>;
}

//=========================================================================
// Headless implementations
//=========================================================================

/// Draws nothing; unprojection is the identity.
#[derive(Debug, Default)]
pub struct NullRenderer {
    frames: u64,
}

impl NullRenderer {
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }
}

impl Renderer for NullRenderer {
    fn initialize(&mut self, width: u32, height: u32) -> bool {
        info!("Headless renderer ({}x{})", width, height);
        true
    }

    fn draw(&mut self, _world: &World, _ui: &UiStack) {
        self.frames += 1;
    }

    fn unload_data(&mut self) {}

    fn shutdown(&mut self) {}

    fn unproject(&self, screen_point: Vector3<f32>) -> Vector3<f32> {
        screen_point
    }
}

/// Tracks bus volumes; plays nothing.
#[derive(Debug, Default)]
pub struct NullAudio {
    buses: HashMap<String, f32>,
    next_handle: u32,
}

impl AudioSystem for NullAudio {
    fn initialize(&mut self) -> bool {
        info!("Headless audio");
        true
    }

    fn update(&mut self, _dt: f32) {}

    fn play_event(&mut self, name: &str) -> SoundHandle {
        self.next_handle += 1;
        debug!("play_event({}) -> {}", name, self.next_handle);
        SoundHandle(self.next_handle)
    }

    fn bus_volume(&self, bus: &str) -> f32 {
        self.buses.get(bus).copied().unwrap_or(1.0)
    }

    fn set_bus_volume(&mut self, bus: &str, volume: f32) {
        self.buses.insert(bus.to_owned(), volume);
    }

    fn shutdown(&mut self) {}
}

/// Never hits anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPhysWorld;

impl PhysWorld for NullPhysWorld {
    fn segment_cast(&self, _: &World, _: Vector3<f32>, _: Vector3<f32>) -> Option<ActorId> {
        None
    }
}

/// Casts against the world boxes of every registered `BoxComponent`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxPhysWorld;

impl PhysWorld for BoxPhysWorld {
    fn segment_cast(
        &self,
        world: &World,
        start: Vector3<f32>,
        end: Vector3<f32>,
    ) -> Option<ActorId> {
        world
            .indices()
            .colliders
            .iter()
            .filter_map(|id| {
                let collider = world.actor(id)?.component::<BoxComponent>()?;
                let t = collider.world_box().segment_intersect(&start, &end)?;
                Some((id, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

/// Loads nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLevelLoader;

impl LevelLoader for NullLevelLoader {
    fn load_level(&mut self, _: &mut World, _: &mut Resources, path: &Path) -> Result<(), LoadError> {
        debug!("Skipping level {}", path.display());
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
