//=========================================================================
// World
//=========================================================================
//
// Actor arena with pending/dead bookkeeping.
//
// Frame phases driven by the scheduler:
//
//   update_actors(dt)   locked: add → pending, remove → mark Dead
//   promote_pending()   pending → active (world transform first)
//   reap_dead()         Dead actors destroyed, indices cleaned
//
// Outside the locked window `add_actor` goes straight to `active` and
// `remove_actor` destroys immediately.
//
// Every live id is in exactly one of `active`/`pending`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};
use slotmap::SlotMap;

//=== Internal Dependencies ===============================================

use super::component::{ActorContext, Component, ComponentKind};
use super::{Actor, ActorId, ActorState, WorldIndices};
use crate::core::input::InputState;

//=== World ===============================================================

pub struct World {
    // `None` while the actor is checked out for its own update.
    actors: SlotMap<ActorId, Option<Actor>>,
    active: Vec<ActorId>,
    pending: Vec<ActorId>,
    dead: Vec<ActorId>,
    updating: bool,
    checked_out_kills: Vec<ActorId>,
    indices: WorldIndices,
}

impl World {
    pub fn new() -> Self {
        Self {
            actors: SlotMap::with_key(),
            active: Vec::new(),
            pending: Vec::new(),
            dead: Vec::new(),
            updating: false,
            checked_out_kills: Vec::new(),
            indices: WorldIndices::default(),
        }
    }

    //--- Add / remove ----------------------------------------------------

    /// Adds `actor` and attaches its components.
    ///
    /// During the locked update window the actor is queued in `pending`
    /// and joins `active` at the next promotion.
    pub fn add_actor(&mut self, mut actor: Actor) -> ActorId {
        let id = self.actors.insert(None);
        actor.settle(id, &mut self.indices);

        if self.updating {
            debug!("Actor '{}' {:?} queued as pending", actor.name(), id);
            self.pending.push(id);
        } else {
            debug!("Actor '{}' {:?} added", actor.name(), id);
            self.active.push(id);
        }

        self.actors[id] = Some(actor);
        id
    }

    /// Removes `id`.
    ///
    /// During the locked update window the actor is only marked Dead and
    /// is destroyed by the next `reap_dead`. Unknown or stale ids are
    /// ignored.
    pub fn remove_actor(&mut self, id: ActorId) {
        if !self.actors.contains_key(id) {
            trace!("remove_actor({:?}): unknown id", id);
            return;
        }

        if self.updating {
            match self.actors.get_mut(id) {
                Some(Some(actor)) => actor.destroy(),
                _ => self.checked_out_kills.push(id),
            }
            return;
        }

        if let Some(index) = self.pending.iter().position(|entry| *entry == id) {
            self.pending.swap_remove(index);
        } else if let Some(index) = self.active.iter().position(|entry| *entry == id) {
            self.active.swap_remove(index);
        }

        self.destroy(id);
    }

    //--- Frame phases ----------------------------------------------------

    /// Routes gameplay input to every Active actor.
    pub fn process_input(&mut self, input: &InputState) {
        for &id in &self.active {
            if let Some(Some(actor)) = self.actors.get_mut(id) {
                actor.process_input(input);
            }
        }
    }

    /// Updates every active actor inside the locked window.
    pub fn update_actors(&mut self, dt: f32) {
        self.updating = true;

        // `active` cannot change length while locked.
        for index in 0..self.active.len() {
            let id = self.active[index];
            let Some(mut actor) = self.actors.get_mut(id).and_then(Option::take) else {
                continue;
            };

            actor.update(&mut ActorContext::new(self, id), dt);
            actor.settle(id, &mut self.indices);

            if let Some(slot) = self.actors.get_mut(id) {
                *slot = Some(actor);
            }
        }

        for id in std::mem::take(&mut self.checked_out_kills) {
            if let Some(Some(actor)) = self.actors.get_mut(id) {
                actor.destroy();
            }
        }

        self.updating = false;
    }

    /// Moves every pending actor into `active`. Returns how many moved.
    pub fn promote_pending(&mut self) -> usize {
        let promoted = self.pending.len();

        for id in self.pending.drain(..) {
            if let Some(Some(actor)) = self.actors.get_mut(id) {
                actor.compute_world_transform();
            }
            self.active.push(id);
        }

        if promoted > 0 {
            debug!("Promoted {} pending actor(s)", promoted);
        }
        promoted
    }

    /// Destroys every actor marked Dead. Returns the reaped ids.
    pub fn reap_dead(&mut self) -> Vec<ActorId> {
        self.dead.clear();
        for &id in self.active.iter().chain(self.pending.iter()) {
            if let Some(Some(actor)) = self.actors.get(id) {
                if actor.state() == ActorState::Dead {
                    self.dead.push(id);
                }
            }
        }

        let dead = std::mem::take(&mut self.dead);
        for &id in &dead {
            self.remove_actor(id);
        }

        if !dead.is_empty() {
            debug!("Reaped {} dead actor(s)", dead.len());
        }
        dead
    }

    //--- Components ------------------------------------------------------

    /// Adds `component` to a live actor and attaches it.
    pub fn add_component<C: Component>(&mut self, id: ActorId, component: C) -> bool {
        let Some(Some(actor)) = self.actors.get_mut(id) else {
            return false;
        };
        actor.add_component(component);
        actor.settle(id, &mut self.indices);
        true
    }

    /// Removes the first component of `kind` from a live actor and
    /// detaches it.
    pub fn remove_component(&mut self, id: ActorId, kind: ComponentKind) -> bool {
        let Some(Some(actor)) = self.actors.get_mut(id) else {
            return false;
        };
        let removed = actor.remove_component(kind);
        actor.settle(id, &mut self.indices);
        removed
    }

    //--- Queries ---------------------------------------------------------

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id).and_then(Option::as_ref)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(id)
    }

    pub fn is_active(&self, id: ActorId) -> bool {
        self.active.contains(&id)
    }

    pub fn is_pending(&self, id: ActorId) -> bool {
        self.pending.contains(&id)
    }

    pub fn active_ids(&self) -> &[ActorId] {
        &self.active
    }

    pub fn pending_ids(&self) -> &[ActorId] {
        &self.pending
    }

    /// Active actors in update order.
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.active
            .iter()
            .filter_map(|&id| self.actor(id).map(|actor| (id, actor)))
    }

    /// Number of live actors, pending included.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn is_updating(&self) -> bool {
        self.updating
    }

    pub fn indices(&self) -> &WorldIndices {
        &self.indices
    }

    //--- Teardown --------------------------------------------------------

    /// Destroys every actor through the regular detach path.
    pub fn clear(&mut self) {
        let count = self.actors.len();
        let ids: Vec<ActorId> = self.pending.drain(..).chain(self.active.drain(..)).collect();
        for id in ids {
            self.destroy(id);
        }
        self.actors.clear();
        self.dead.clear();

        if count > 0 {
            debug!("Destroyed {} actor(s)", count);
        }
    }

    fn destroy(&mut self, id: ActorId) {
        if let Some(Some(mut actor)) = self.actors.remove(id) {
            actor.detach_all(id, &mut self.indices);
            trace!("Actor '{}' {:?} destroyed", actor.name(), id);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
