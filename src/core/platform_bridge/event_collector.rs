//=========================================================================
// Event Collector
//=========================================================================
//
// Scheduler-side end of the platform channel.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → [InputEvent] + TickControl
//
// Polling is bounded so a flooding platform cannot starve a frame.
// Pacing is not done here; the frame clock owns it.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== TickControl =========================================================

/// Whether the platform is still alive after this frame's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains pending platform events into a flat, ordered event list.
pub struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    events: Vec<InputEvent>,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(32),
        }
    }

    /// Collects the platform events queued since the previous frame.
    ///
    /// Returns [`TickControl::Exit`] when the window closed or the platform
    /// side of the channel is gone. Input gathered before the close is kept.
    pub fn collect_frame(&mut self) -> TickControl {
        self.events.clear();
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                    self.events.extend(discrete);
                    self.events.extend(continuous);
                    drained += 1;
                }
                Ok(PlatformEvent::WindowClosed) => return TickControl::Exit,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!("Platform event backlog: drained {} batches this frame", drained);
        }

        TickControl::Continue
    }

    /// Input events collected by the last [`collect_frame`](Self::collect_frame).
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
