//=========================================================================
// Frame Clock
//=========================================================================
//
// Frame pacing and delta computation.
//
//   wait_for_next_frame()   block until `target` has passed since the
//                           previous frame started (sleep or spin)
//   advance_to(now)         raw elapsed since the previous call
//   clamp(raw)              seconds, capped at `max_delta`
//
// Stalls (debugger, window drag) produce one long raw delta; the clamp
// turns it into a single bounded step.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use log::trace;

//=== Pacing ==============================================================

/// How the clock waits out the remainder of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// `thread::sleep` for the remainder.
    #[default]
    Sleep,

    /// Spin on `Instant::now()`. Tighter timing, one core busy.
    BusyWait,
}

//=== FrameClock ==========================================================

#[derive(Debug, Clone)]
pub struct FrameClock {
    target: Duration,
    max_delta: Duration,
    pacing: Pacing,
    last: Option<Instant>,
}

impl FrameClock {
    pub const DEFAULT_TARGET: Duration = Duration::from_millis(16);
    pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(50);

    pub fn new(target: Duration, max_delta: Duration, pacing: Pacing) -> Self {
        Self {
            target,
            max_delta,
            pacing,
            last: None,
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Blocks until the target interval since the previous frame has
    /// elapsed. Returns immediately before the first frame.
    pub fn wait_for_next_frame(&self) {
        let Some(last) = self.last else {
            return;
        };
        let deadline = last + self.target;

        match self.pacing {
            Pacing::Sleep => {
                let now = Instant::now();
                if now < deadline {
                    thread::sleep(deadline - now);
                }
            }
            Pacing::BusyWait => {
                while Instant::now() < deadline {
                    std::hint::spin_loop();
                }
            }
        }
    }

    /// Records `now` as the start of a frame and returns the raw time
    /// since the previous one (zero for the first frame).
    pub fn advance_to(&mut self, now: Instant) -> Duration {
        let raw = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        raw
    }

    /// Converts a raw delta to seconds, capped at `max_delta`.
    pub fn clamp(&self, raw: Duration) -> f32 {
        if raw > self.max_delta {
            trace!("Clamping frame delta {:?} to {:?}", raw, self.max_delta);
            self.max_delta.as_secs_f32()
        } else {
            raw.as_secs_f32()
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TARGET, Self::DEFAULT_MAX_DELTA, Pacing::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
