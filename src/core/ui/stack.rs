//=========================================================================
// UI Stack
//=========================================================================
//
// Ordered screens; the last one is the top and the only one receiving
// input.
//
// Per frame, driven by the scheduler:
//
//   handle_key_press / process_input   top screen only
//   apply_pushes                       barrier: queued pushes land
//   update                             every non-Paused screen
//   reap_closed                        Closing screens: on_close, drop
//   take_events                        scheduler applies ScreenEvents
//
// Pushes are always queued, whether issued by gameplay or by a screen
// callback, so the screen list never changes while it is iterated.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};
use nalgebra::Vector2;

//=== Internal Dependencies ===============================================

use super::{ScreenContext, ScreenEvent, ScreenState, UiScreen};
use crate::core::deferred::DeferredQueue;
use crate::core::input::{InputState, Press};
use crate::core::resources::Resources;
use crate::core::world::World;

//=== ScreenEntry =========================================================

struct ScreenEntry {
    screen: Box<dyn UiScreen>,
    state: ScreenState,
}

//=== UiStack =============================================================

pub struct UiStack {
    screens: Vec<ScreenEntry>,
    pushes: DeferredQueue<Box<dyn UiScreen>>,
    events: DeferredQueue<ScreenEvent>,
    viewport: Vector2<f32>,
    cursor: Vector2<f32>,
}

impl UiStack {
    /// Creates an empty stack for a `width` × `height` window.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screens: Vec::new(),
            pushes: DeferredQueue::new(),
            events: DeferredQueue::new(),
            viewport: Vector2::new(width as f32, height as f32),
            cursor: Vector2::zeros(),
        }
    }

    //--- Push ------------------------------------------------------------

    /// Queues `screen`; it becomes the top at the next `apply_pushes`.
    pub fn push<S: UiScreen>(&mut self, screen: S) {
        self.push_boxed(Box::new(screen));
    }

    pub fn push_boxed(&mut self, screen: Box<dyn UiScreen>) {
        trace!("Queued push of screen '{}'", screen.name());
        self.pushes.push(screen);
    }

    /// Barrier: appends every queued screen and runs its `on_push`.
    ///
    /// Screens pushed from an `on_push` are applied in the same call.
    /// Returns the number of screens added.
    pub fn apply_pushes(&mut self, world: &World, resources: &Resources) -> usize {
        let mut applied = 0;

        while !self.pushes.is_empty() {
            for screen in self.pushes.take() {
                debug!("Pushed screen '{}'", screen.name());
                self.screens.push(ScreenEntry {
                    screen,
                    state: ScreenState::Active,
                });

                let Self {
                    screens,
                    pushes,
                    events,
                    cursor,
                    ..
                } = self;
                if let Some(entry) = screens.last_mut() {
                    let mut ctx = ScreenContext::new(
                        &mut entry.state,
                        pushes,
                        events,
                        *cursor,
                        world,
                        resources,
                    );
                    entry.screen.on_push(&mut ctx);
                }
                applied += 1;
            }
        }

        applied
    }

    //--- Input -----------------------------------------------------------

    /// Routes a discrete press to the top screen.
    pub fn handle_key_press(&mut self, press: Press, world: &World, resources: &Resources) {
        let Self {
            screens,
            pushes,
            events,
            cursor,
            ..
        } = self;
        if let Some(entry) = screens.last_mut() {
            let mut ctx =
                ScreenContext::new(&mut entry.state, pushes, events, *cursor, world, resources);
            entry.screen.handle_key_press(press, &mut ctx);
        }
    }

    /// Routes continuous input to the top screen.
    pub fn process_input(&mut self, input: &InputState, world: &World, resources: &Resources) {
        self.cursor = self.to_ui_space(input.mouse_position());

        let Self {
            screens,
            pushes,
            events,
            cursor,
            ..
        } = self;
        if let Some(entry) = screens.last_mut() {
            let mut ctx =
                ScreenContext::new(&mut entry.state, pushes, events, *cursor, world, resources);
            entry.screen.process_input(input, &mut ctx);
        }
    }

    //--- Update and reap -------------------------------------------------

    /// Updates every screen that is not Paused. Closing screens get this
    /// final update.
    pub fn update(&mut self, dt: f32, world: &World, resources: &Resources) {
        let Self {
            screens,
            pushes,
            events,
            cursor,
            ..
        } = self;
        for entry in screens.iter_mut() {
            if entry.state == ScreenState::Paused {
                continue;
            }
            let mut ctx =
                ScreenContext::new(&mut entry.state, pushes, events, *cursor, world, resources);
            entry.screen.update(dt, &mut ctx);
        }
    }

    /// Drops every Closing screen after running its `on_close`. Returns
    /// the names of the reaped screens, bottom first.
    pub fn reap_closed(&mut self, world: &World, resources: &Resources) -> Vec<String> {
        if !self.screens.iter().any(|entry| entry.state == ScreenState::Closing) {
            return Vec::new();
        }

        let mut reaped = Vec::new();
        let entries = std::mem::take(&mut self.screens);

        for mut entry in entries {
            if entry.state != ScreenState::Closing {
                self.screens.push(entry);
                continue;
            }

            let mut ctx = ScreenContext::new(
                &mut entry.state,
                &mut self.pushes,
                &mut self.events,
                self.cursor,
                world,
                resources,
            );
            entry.screen.on_close(&mut ctx);

            debug!("Reaped screen '{}'", entry.screen.name());
            reaped.push(entry.screen.name().to_owned());
        }

        reaped
    }

    /// Takes the events screens emitted since the last call.
    pub fn take_events(&mut self) -> Vec<ScreenEvent> {
        self.events.take()
    }

    //--- Queries ---------------------------------------------------------

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn has_pending_pushes(&self) -> bool {
        !self.pushes.is_empty()
    }

    /// Screens bottom to top with their states.
    pub fn screens(&self) -> impl Iterator<Item = (&dyn UiScreen, ScreenState)> {
        self.screens
            .iter()
            .map(|entry| (entry.screen.as_ref(), entry.state))
    }

    pub fn top(&self) -> Option<(&dyn UiScreen, ScreenState)> {
        self.screens
            .last()
            .map(|entry| (entry.screen.as_ref(), entry.state))
    }

    /// Cursor in UI space as of the last `process_input`.
    pub fn cursor(&self) -> Vector2<f32> {
        self.cursor
    }

    //--- Teardown --------------------------------------------------------

    /// Drops every screen, queued push and event without running hooks.
    pub fn clear(&mut self) {
        if !self.screens.is_empty() {
            debug!("Destroying {} UI screen(s)", self.screens.len());
        }
        self.screens.clear();
        self.pushes.take();
        self.events.take();
    }

    fn to_ui_space(&self, (x, y): (f32, f32)) -> Vector2<f32> {
        Vector2::new(x - self.viewport.x / 2.0, self.viewport.y / 2.0 - y)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::mode::ModeRequest;
    use std::any::Any;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    /// Records callbacks; closes itself on Escape.
    struct Recorder {
        name: &'static str,
        log: Log,
        push_on_space: bool,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Arc::clone(log),
                push_on_space: false,
            }
        }

        fn record(&self, what: &str) {
            self.log.lock().unwrap().push(format!("{} {}", self.name, what));
        }
    }

    impl UiScreen for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn on_push(&mut self, ctx: &mut ScreenContext<'_>) {
            self.record("push");
            ctx.request_mode(ModeRequest::Pause);
        }

        fn on_close(&mut self, ctx: &mut ScreenContext<'_>) {
            self.record("close");
            ctx.request_mode(ModeRequest::Resume);
        }

        fn handle_key_press(&mut self, press: Press, ctx: &mut ScreenContext<'_>) {
            self.record("press");
            match press {
                Press::Key(KeyCode::Escape) => ctx.close(),
                Press::Key(KeyCode::Space) if self.push_on_space => {
                    ctx.push(Recorder::new("child", &self.log))
                }
                _ => {}
            }
        }

        fn update(&mut self, _dt: f32, ctx: &mut ScreenContext<'_>) {
            self.record(if ctx.is_closing() { "final-update" } else { "update" });
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct Fixture {
        stack: UiStack,
        world: World,
        resources: Resources,
        log: Log,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                stack: UiStack::new(1024, 768),
                world: World::new(),
                resources: Resources::new(),
                log: Log::default(),
            }
        }

        fn press(&mut self, key: KeyCode) {
            self.stack.handle_key_press(Press::Key(key), &self.world, &self.resources);
        }

        fn barrier(&mut self) -> usize {
            self.stack.apply_pushes(&self.world, &self.resources)
        }

        fn update(&mut self) {
            self.stack.update(0.016, &self.world, &self.resources);
        }

        fn reap(&mut self) -> Vec<String> {
            self.stack.reap_closed(&self.world, &self.resources)
        }

        fn log(&self) -> Vec<String> {
            std::mem::take(&mut *self.log.lock().unwrap())
        }
    }

    #[test]
    fn push_is_applied_at_barrier() {
        let mut fx = Fixture::new();
        let recorder = Recorder::new("menu", &fx.log);
        fx.stack.push(recorder);

        assert!(fx.stack.is_empty());
        assert!(fx.stack.has_pending_pushes());

        assert_eq!(fx.barrier(), 1);
        assert_eq!(fx.stack.len(), 1);
        assert_eq!(fx.log(), vec!["menu push"]);
        assert_eq!(fx.stack.take_events(), vec![ScreenEvent::Mode(ModeRequest::Pause)]);
    }

    #[test]
    fn only_top_screen_receives_presses() {
        let mut fx = Fixture::new();
        fx.stack.push(Recorder::new("bottom", &fx.log));
        fx.stack.push(Recorder::new("top", &fx.log));
        fx.barrier();
        fx.log();

        fx.press(KeyCode::KeyA);
        assert_eq!(fx.log(), vec!["top press"]);
    }

    #[test]
    fn closing_screen_stays_until_reap_and_gets_final_update() {
        let mut fx = Fixture::new();
        fx.stack.push(Recorder::new("menu", &fx.log));
        fx.barrier();
        fx.stack.take_events();
        fx.log();

        fx.press(KeyCode::Escape);
        assert_eq!(fx.stack.top().unwrap().1, ScreenState::Closing);
        assert_eq!(fx.stack.len(), 1, "close must not pop synchronously");

        // Still routable until the UI update phase ends.
        fx.press(KeyCode::KeyB);
        fx.update();
        assert_eq!(fx.log(), vec!["menu press", "menu press", "menu final-update"]);

        assert_eq!(fx.reap(), vec!["menu".to_owned()]);
        assert!(fx.stack.is_empty());
        assert_eq!(fx.log(), vec!["menu close"]);
        assert_eq!(fx.stack.take_events(), vec![ScreenEvent::Mode(ModeRequest::Resume)]);
    }

    #[test]
    fn screen_pushed_from_callback_waits_for_barrier() {
        let mut fx = Fixture::new();
        let mut parent = Recorder::new("parent", &fx.log);
        parent.push_on_space = true;
        fx.stack.push(parent);
        fx.barrier();

        fx.press(KeyCode::Space);
        assert_eq!(fx.stack.len(), 1);

        fx.barrier();
        assert_eq!(fx.stack.len(), 2);
        assert_eq!(fx.stack.top().unwrap().0.name(), "child");
    }

    #[test]
    fn reap_keeps_order_of_survivors() {
        let mut fx = Fixture::new();
        for name in ["a", "b", "c"] {
            fx.stack.push(Recorder::new(name, &fx.log));
        }
        fx.barrier();

        // Close "c", then "b" becomes top after the reap.
        fx.press(KeyCode::Escape);
        fx.reap();
        fx.press(KeyCode::Escape);
        assert_eq!(fx.reap(), vec!["b".to_owned()]);

        let names: Vec<_> = fx.stack.screens().map(|(screen, _)| screen.name().to_owned()).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn paused_screens_skip_update() {
        struct Sleeper;
        impl UiScreen for Sleeper {
            fn name(&self) -> &str {
                "sleeper"
            }
            fn on_push(&mut self, ctx: &mut ScreenContext<'_>) {
                ctx.pause();
            }
            fn update(&mut self, _dt: f32, ctx: &mut ScreenContext<'_>) {
                ctx.close();
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        let mut fx = Fixture::new();
        fx.stack.push(Sleeper);
        fx.barrier();
        fx.update();

        assert_eq!(fx.stack.top().unwrap().1, ScreenState::Paused);
        assert!(fx.reap().is_empty());
    }

    #[test]
    fn cursor_is_centred_with_y_up() {
        let mut fx = Fixture::new();
        let mut input = InputState::new();
        input.capture(&[InputEvent::MouseMoved { x: 0.0, y: 0.0 }]);

        fx.stack.process_input(&input, &fx.world, &fx.resources);
        assert_eq!(fx.stack.cursor(), Vector2::new(-512.0, 384.0));
    }

    #[test]
    fn clear_drops_without_hooks() {
        let mut fx = Fixture::new();
        fx.stack.push(Recorder::new("menu", &fx.log));
        fx.barrier();
        fx.log();

        fx.stack.clear();
        assert!(fx.stack.is_empty());
        assert!(fx.log().is_empty());
        assert!(fx.stack.take_events().is_empty());
    }
}
