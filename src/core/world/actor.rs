//=========================================================================
// Actor
//=========================================================================
//
// One world entity: a transform, a lifecycle state and an ordered set of
// owned components.
//
// Update protocol (Active actors only):
//   1. recompute world transform if dirty
//   2. components.update() in update order
//   3. merge components added during (2), apply deferred removals
//   4. recompute world transform if dirty
//
//=========================================================================

//=== External Dependencies ===============================================

use nalgebra::{Matrix4, UnitQuaternion, Vector3};

//=== Internal Dependencies ===============================================

use super::component::{ActorContext, Component, ComponentKind};
use super::transform::Transform;
use super::{ActorId, WorldIndices};
use crate::core::deferred::DeferredQueue;
use crate::core::input::InputState;

//=== ActorState ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActorState {
    #[default]
    Active,
    /// Skipped by input and update, still rendered.
    Paused,
    /// Reaped at the end of the current frame.
    Dead,
}

//=== ComponentSlot =======================================================

struct ComponentSlot {
    component: Box<dyn Component>,
    attached: bool,
}

//=== Actor ===============================================================

pub struct Actor {
    name: String,
    transform: Transform,
    world_transform: Matrix4<f32>,
    dirty: bool,
    state: ActorState,
    components: Vec<ComponentSlot>,
    in_update: bool,
    /// Kinds of the components taken out for the running update pass.
    checked_out: Vec<ComponentKind>,
    removals: DeferredQueue<ComponentKind>,
    retired: Vec<Box<dyn Component>>,
}

impl Actor {
    pub fn new() -> Self {
        Self::named("actor")
    }

    /// Creates an actor with a name used in log output.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            world_transform: Matrix4::identity(),
            dirty: true,
            state: ActorState::Active,
            components: Vec::new(),
            in_update: false,
            checked_out: Vec::new(),
            removals: DeferredQueue::new(),
            retired: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.set_transform(transform);
        self
    }

    pub fn with_component<C: Component>(mut self, component: C) -> Self {
        self.add_component(component);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    //--- Lifecycle -------------------------------------------------------

    pub fn state(&self) -> ActorState {
        self.state
    }

    /// Sets the state. `Dead` is terminal and cannot be left.
    pub fn set_state(&mut self, state: ActorState) {
        if self.state != ActorState::Dead {
            self.state = state;
        }
    }

    /// Marks the actor for removal at the end of the frame.
    pub fn destroy(&mut self) {
        self.state = ActorState::Dead;
    }

    pub fn is_dead(&self) -> bool {
        self.state == ActorState::Dead
    }

    //--- Transform -------------------------------------------------------

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.dirty = true;
    }

    pub fn position(&self) -> Vector3<f32> {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.transform.position = position;
        self.dirty = true;
    }

    pub fn rotation(&self) -> UnitQuaternion<f32> {
        self.transform.rotation
    }

    pub fn set_rotation(&mut self, rotation: UnitQuaternion<f32>) {
        self.transform.rotation = rotation;
        self.dirty = true;
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = scale;
        self.dirty = true;
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.transform.forward()
    }

    /// Last computed world matrix.
    pub fn world_transform(&self) -> &Matrix4<f32> {
        &self.world_transform
    }

    pub fn is_transform_dirty(&self) -> bool {
        self.dirty
    }

    /// Recomputes the world matrix if a transform field changed and
    /// notifies every component.
    pub fn compute_world_transform(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        self.world_transform = self.transform.to_matrix();

        let mut components = std::mem::take(&mut self.components);
        for slot in &mut components {
            slot.component.on_world_transform(self);
        }
        self.restore_components(components);
    }

    //--- Per-frame -------------------------------------------------------

    pub fn process_input(&mut self, input: &InputState) {
        if self.state != ActorState::Active {
            return;
        }

        let mut components = std::mem::take(&mut self.components);
        for slot in &mut components {
            slot.component.process_input(self, input);
        }
        self.restore_components(components);
    }

    pub fn update(&mut self, ctx: &mut ActorContext<'_>, dt: f32) {
        if self.state != ActorState::Active {
            return;
        }

        self.compute_world_transform();

        let mut components = std::mem::take(&mut self.components);
        self.checked_out = components.iter().map(|slot| slot.component.kind()).collect();
        self.in_update = true;
        for slot in &mut components {
            slot.component.update(self, ctx, dt);
        }
        self.in_update = false;
        self.checked_out.clear();
        self.restore_components(components);

        for kind in self.removals.take() {
            self.remove_component(kind);
        }

        self.compute_world_transform();
    }

    //--- Components ------------------------------------------------------

    /// Inserts `component` after every component with a lower or equal
    /// update order.
    pub fn add_component<C: Component>(&mut self, component: C) {
        self.insert_slot(ComponentSlot {
            component: Box::new(component),
            attached: false,
        });
    }

    /// Removes the first component of `kind`. Returns `false` if the actor
    /// has none left to remove.
    ///
    /// Called from within this actor's own update pass, the removal is
    /// deferred until the pass completes.
    pub fn remove_component(&mut self, kind: ComponentKind) -> bool {
        if self.in_update {
            let held = self
                .checked_out
                .iter()
                .copied()
                .chain(self.components.iter().map(|slot| slot.component.kind()))
                .filter(|held| *held == kind)
                .count();
            let queued = self.removals.iter().filter(|queued| **queued == kind).count();
            if held <= queued {
                return false;
            }
            self.removals.push(kind);
            return true;
        }

        let Some(index) = self
            .components
            .iter()
            .position(|slot| slot.component.kind() == kind)
        else {
            return false;
        };

        let slot = self.components.remove(index);
        if slot.attached {
            self.retired.push(slot.component);
        }
        true
    }

    pub fn component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|slot| slot.component.as_any().downcast_ref::<T>())
    }

    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|slot| slot.component.as_any_mut().downcast_mut::<T>())
    }

    pub fn components_of(&self, kind: ComponentKind) -> impl Iterator<Item = &dyn Component> {
        self.components
            .iter()
            .map(|slot| slot.component.as_ref())
            .filter(move |component| component.kind() == kind)
    }

    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.components_of(kind).next().is_some()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    //--- World bookkeeping -----------------------------------------------

    /// Runs `on_attach` for components not yet attached and `on_detach`
    /// for components removed since the last call.
    pub(crate) fn settle(&mut self, id: ActorId, indices: &mut WorldIndices) {
        for slot in self.components.iter_mut().filter(|slot| !slot.attached) {
            slot.component.on_attach(id, indices);
            slot.attached = true;
        }
        for mut component in self.retired.drain(..) {
            component.on_detach(id, indices);
        }
    }

    /// Detaches every attached component. Called right before the actor
    /// is dropped.
    pub(crate) fn detach_all(&mut self, id: ActorId, indices: &mut WorldIndices) {
        for slot in self.components.iter_mut().filter(|slot| slot.attached) {
            slot.component.on_detach(id, indices);
            slot.attached = false;
        }
        for mut component in self.retired.drain(..) {
            component.on_detach(id, indices);
        }
    }

    //--- Helpers ---------------------------------------------------------

    fn insert_slot(&mut self, slot: ComponentSlot) {
        let order = slot.component.update_order();
        let index = self
            .components
            .partition_point(|existing| existing.component.update_order() <= order);
        self.components.insert(index, slot);
    }

    /// Puts `components` back after a pass, merging anything added while
    /// they were taken out.
    fn restore_components(&mut self, components: Vec<ComponentSlot>) {
        let added = std::mem::replace(&mut self.components, components);
        for slot in added {
            self.insert_slot(slot);
        }
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("transform", &self.transform)
            .field(
                "components",
                &self
                    .components
                    .iter()
                    .map(|slot| slot.component.kind())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
