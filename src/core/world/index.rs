//=========================================================================
// Actor Indices
//=========================================================================
//
// Secondary lookups maintained by component attach/detach hooks.
//
//   targets    actors carrying a TargetComponent (HUD radar)
//   colliders  actors carrying a BoxComponent (segment casts)
//
// Each entry counts the components registering it and is dropped when the
// last of them detaches, which always happens before its actor leaves the
// arena.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::ActorId;

//=== ActorIndex ==========================================================

/// Insertion-ordered set of actor ids with per-id registration counts.
#[derive(Debug)]
pub struct ActorIndex {
    name: &'static str,
    ids: Vec<(ActorId, usize)>,
}

pub type TargetRegistry = ActorIndex;
pub type ColliderRegistry = ActorIndex;

impl ActorIndex {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ids: Vec::new(),
        }
    }

    /// Registers `id` once more. A repeated insert keeps its position.
    pub fn insert(&mut self, id: ActorId) {
        match self.ids.iter_mut().find(|(entry, _)| *entry == id) {
            Some((_, count)) => *count += 1,
            None => {
                trace!("{} += {:?}", self.name, id);
                self.ids.push((id, 1));
            }
        }
    }

    /// Releases one registration of `id`; the entry goes away with the
    /// last one, keeping the order of the rest.
    ///
    /// Returns `false` if `id` was not registered.
    pub fn remove(&mut self, id: ActorId) -> bool {
        let Some(index) = self.ids.iter().position(|(entry, _)| *entry == id) else {
            return false;
        };
        let count = &mut self.ids[index].1;
        *count -= 1;
        if *count == 0 {
            trace!("{} -= {:?}", self.name, id);
            self.ids.remove(index);
        }
        true
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.ids.iter().any(|(entry, _)| *entry == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.ids.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

//=== WorldIndices ========================================================

/// Every index a component hook may write to.
#[derive(Debug)]
pub struct WorldIndices {
    pub targets: TargetRegistry,
    pub colliders: ColliderRegistry,
}

impl WorldIndices {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty() && self.colliders.is_empty()
    }

    /// Returns `true` when any index still refers to `id`.
    pub fn refers_to(&self, id: ActorId) -> bool {
        self.targets.contains(id) || self.colliders.contains(id)
    }
}

impl Default for WorldIndices {
    fn default() -> Self {
        Self {
            targets: ActorIndex::new("targets"),
            colliders: ActorIndex::new("colliders"),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn repeated_insert_keeps_one_entry_and_remove_keeps_order() {
        let mut keys: SlotMap<ActorId, ()> = SlotMap::with_key();
        let (a, b, c) = (keys.insert(()), keys.insert(()), keys.insert(()));

        let mut index = ActorIndex::new("test");
        index.insert(a);
        index.insert(b);
        index.insert(c);
        assert_eq!(index.len(), 3);

        assert!(index.remove(b));
        assert!(!index.remove(b));
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn entry_stays_until_every_registration_is_released() {
        let mut keys: SlotMap<ActorId, ()> = SlotMap::with_key();
        let (a, b) = (keys.insert(()), keys.insert(()));

        let mut index = ActorIndex::new("test");
        index.insert(a);
        index.insert(b);
        index.insert(a);
        assert_eq!(index.len(), 2);
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![a, b]);

        assert!(index.remove(a));
        assert!(index.contains(a));
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![a, b]);

        assert!(index.remove(a));
        assert!(!index.contains(a));
        assert!(!index.remove(a));
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![b]);
    }
}
