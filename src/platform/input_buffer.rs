//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-redraw store for input gathered on the platform thread.
//
//   discrete     keys and buttons, arrival order kept
//   continuous   cursor motion, coalesced to the latest position
//
// `drain()` hands both out at the frame boundary and leaves the buffer
// empty with its capacity intact.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    cursor: Option<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            cursor: None,
        }
    }

    /// Replaces any motion buffered since the last drain.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        debug_assert!(!event.is_discrete());
        self.cursor = Some(event);
    }

    /// Appends a key or button transition. An exact repeat of the last
    /// buffered event is dropped.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Takes everything buffered, or `None` when nothing arrived.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = self.discrete.drain(..).collect();
        let continuous = self.cursor.take().into_iter().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.cursor.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
