//=========================================================================
// Target
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use crate::core::world::{ActorId, Component, ComponentKind, WorldIndices};

//=== TargetComponent =====================================================

/// Marks its owner as a HUD target for as long as it is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TargetComponent;

impl TargetComponent {
    pub fn new() -> Self {
        Self
    }
}

impl Component for TargetComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Target
    }

    fn on_attach(&mut self, owner: ActorId, indices: &mut WorldIndices) {
        indices.targets.insert(owner);
    }

    fn on_detach(&mut self, owner: ActorId, indices: &mut WorldIndices) {
        indices.targets.remove(owner);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
