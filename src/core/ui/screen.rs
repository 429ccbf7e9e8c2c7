//=========================================================================
// UI Screen
//=========================================================================
//
// Screen trait and the context handed to every screen callback.
//
// State machine per screen:
// ```text
//   Active ◄──► Paused
//      │          │
//      └──► Closing ◄┘   (terminal, reaped by UiStack::reap_closed)
// ```
//
// A screen never removes itself or touches the game mode directly. It
// calls `ctx.close()` and emits `ScreenEvent`s; the stack and scheduler
// act on both at their barriers.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use log::debug;
use nalgebra::Vector2;

//=== Internal Dependencies ===============================================

use super::ButtonPanel;
use crate::core::deferred::DeferredQueue;
use crate::core::input::{InputState, Press};
use crate::core::mode::ModeRequest;
use crate::core::resources::Resources;
use crate::core::world::World;

//=== ScreenState =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenState {
    #[default]
    Active,
    /// Skipped by the UI update pass.
    Paused,
    /// Reaped at the end of the current frame.
    Closing,
}

//=== ScreenEvent =========================================================

/// Side effect requested by a screen, applied by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Mode(ModeRequest),
    /// Grab (`true`) or release the cursor.
    RelativeMouse(bool),
}

//=== ScreenContext =======================================================

/// Capabilities available to a screen during one callback.
pub struct ScreenContext<'a> {
    state: &'a mut ScreenState,
    pushes: &'a mut DeferredQueue<Box<dyn UiScreen>>,
    events: &'a mut DeferredQueue<ScreenEvent>,
    cursor: Vector2<f32>,
    world: &'a World,
    resources: &'a Resources,
}

impl<'a> ScreenContext<'a> {
    pub(crate) fn new(
        state: &'a mut ScreenState,
        pushes: &'a mut DeferredQueue<Box<dyn UiScreen>>,
        events: &'a mut DeferredQueue<ScreenEvent>,
        cursor: Vector2<f32>,
        world: &'a World,
        resources: &'a Resources,
    ) -> Self {
        Self {
            state,
            pushes,
            events,
            cursor,
            world,
            resources,
        }
    }

    //--- Own lifecycle ---------------------------------------------------

    pub fn state(&self) -> ScreenState {
        *self.state
    }

    /// Marks this screen Closing. It stays on the stack until the end of
    /// the frame's UI update.
    pub fn close(&mut self) {
        if *self.state != ScreenState::Closing {
            debug!("Screen closing");
            *self.state = ScreenState::Closing;
        }
    }

    pub fn is_closing(&self) -> bool {
        *self.state == ScreenState::Closing
    }

    /// Active → Paused.
    pub fn pause(&mut self) {
        if *self.state == ScreenState::Active {
            *self.state = ScreenState::Paused;
        }
    }

    /// Paused → Active.
    pub fn resume(&mut self) {
        if *self.state == ScreenState::Paused {
            *self.state = ScreenState::Active;
        }
    }

    //--- Stack and scheduler requests ------------------------------------

    /// Pushes `screen` on top of the stack at the next barrier.
    pub fn push<S: UiScreen>(&mut self, screen: S) {
        self.pushes.push(Box::new(screen));
    }

    pub fn request_mode(&mut self, request: ModeRequest) {
        self.events.push(ScreenEvent::Mode(request));
    }

    pub fn set_relative_mouse(&mut self, relative: bool) {
        self.events.push(ScreenEvent::RelativeMouse(relative));
    }

    //--- Read access -----------------------------------------------------

    /// Cursor in UI space: origin at the window centre, +y up.
    pub fn cursor(&self) -> Vector2<f32> {
        self.cursor
    }

    /// Localized text for `key`.
    pub fn text(&self, key: &str) -> &'a str {
        self.resources.text(key)
    }

    pub fn world(&self) -> &'a World {
        self.world
    }
}

//=== UiScreen ============================================================

pub trait UiScreen: Send + 'static {
    /// Name used in log output.
    fn name(&self) -> &str;

    /// Text key of the screen title, if any.
    fn title(&self) -> Option<&str> {
        None
    }

    fn buttons(&self) -> Option<&ButtonPanel> {
        None
    }

    fn buttons_mut(&mut self) -> Option<&mut ButtonPanel> {
        None
    }

    /// Runs when the push is applied.
    fn on_push(&mut self, _ctx: &mut ScreenContext<'_>) {}

    /// Runs right before the screen is dropped by the reap.
    fn on_close(&mut self, _ctx: &mut ScreenContext<'_>) {}

    /// Discrete press while this screen is on top.
    fn handle_key_press(&mut self, press: Press, ctx: &mut ScreenContext<'_>) {
        if let Some(panel) = self.buttons_mut() {
            panel.handle_press(press, ctx);
        }
    }

    /// Continuous input while this screen is on top.
    fn process_input(&mut self, _input: &InputState, ctx: &mut ScreenContext<'_>) {
        let cursor = ctx.cursor();
        if let Some(panel) = self.buttons_mut() {
            panel.hover(cursor);
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut ScreenContext<'_>) {}

    fn as_any(&self) -> &dyn Any;
}
