//=========================================================================
// Game Mode
//=========================================================================
//
// Process-wide routing state owned by the frame scheduler.
//
// Transition table:
// ```text
//   Gameplay ──Pause──►  Paused
//   Paused   ──Resume──► Gameplay
//   *        ──Quit───►  Quit      (terminal)
// ```
//
// Screens never write the mode; they emit `ModeRequest`s which the
// scheduler applies at its barriers.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== GameMode ============================================================

/// Decides where input and updates are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// Input goes to gameplay, actors update.
    #[default]
    Gameplay,

    /// Input goes to the top UI screen, actors are frozen.
    Paused,

    /// The frame loop ends at the next iteration boundary.
    Quit,
}

//=== ModeRequest =========================================================

/// A requested change of [`GameMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeRequest {
    Pause,
    Resume,
    Quit,
}

impl GameMode {
    /// Applies `request` according to the transition table.
    ///
    /// Requests with no entry for the current mode leave it unchanged.
    pub fn apply(self, request: ModeRequest) -> GameMode {
        let next = match (self, request) {
            (GameMode::Quit, _) => GameMode::Quit,
            (_, ModeRequest::Quit) => GameMode::Quit,
            (GameMode::Gameplay, ModeRequest::Pause) => GameMode::Paused,
            (GameMode::Paused, ModeRequest::Resume) => GameMode::Gameplay,
            (mode, request) => {
                warn!("Ignoring {:?} request while in {:?}", request, mode);
                mode
            }
        };

        if next != self {
            debug!("Game mode {:?} -> {:?}", self, next);
        }
        next
    }

    /// Returns `true` when gameplay receives input and updates.
    pub fn is_gameplay(self) -> bool {
        self == GameMode::Gameplay
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_and_resume_round_trip() {
        let paused = GameMode::Gameplay.apply(ModeRequest::Pause);
        assert_eq!(paused, GameMode::Paused);
        assert_eq!(paused.apply(ModeRequest::Resume), GameMode::Gameplay);
    }

    #[test]
    fn quit_is_reachable_from_everywhere_and_terminal() {
        assert_eq!(GameMode::Gameplay.apply(ModeRequest::Quit), GameMode::Quit);
        assert_eq!(GameMode::Paused.apply(ModeRequest::Quit), GameMode::Quit);
        assert_eq!(GameMode::Quit.apply(ModeRequest::Resume), GameMode::Quit);
        assert_eq!(GameMode::Quit.apply(ModeRequest::Pause), GameMode::Quit);
    }

    #[test]
    fn requests_without_table_entry_are_ignored() {
        assert_eq!(GameMode::Gameplay.apply(ModeRequest::Resume), GameMode::Gameplay);
        assert_eq!(GameMode::Paused.apply(ModeRequest::Pause), GameMode::Paused);
    }
}
