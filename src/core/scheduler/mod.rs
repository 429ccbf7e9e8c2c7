//=========================================================================
// Frame Scheduler
//=========================================================================
//
// Owns the world, the UI stack, the resource caches and the external
// services, and advances them one frame at a time.
//
// Frame order:
// ```text
//   1. capture input          InputState ← platform events
//   2. route input            Gameplay → controls + actors
//                             otherwise → top UI screen
//      └─ barrier             after every gameplay press, and once more
//   3. delta                  clamped to max_delta
//   4. update actors          ┐
//   5. promote pending        ├ Gameplay only (locked window in 4)
//   6. reap dead actors       ┘
//   7. audio, then UI update  non-Paused screens
//   8. reap Closing screens
//      └─ barrier
//   9. draw
// ```
//
// `run` repeats this at the configured pacing until the mode is Quit.
//
//=========================================================================

//=== Module Declarations =================================================

mod controls;
mod frame_clock;

//=== Public API ==========================================================

pub use controls::{GameplayContext, GameplayControls, StandardControls};
pub use frame_clock::{FrameClock, Pacing};

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, InputState};
use crate::core::mode::{GameMode, ModeRequest};
use crate::core::platform_bridge::{EventCollector, PlatformCommand, TickControl};
use crate::core::resources::Resources;
use crate::core::services::{
    AudioSystem, BoxPhysWorld, LevelLoader, NullAudio, NullLevelLoader, NullRenderer, PhysWorld,
    Renderer, SoundHandle,
};
use crate::core::ui::{Hud, ScreenEvent, UiScreen, UiStack};
use crate::core::world::{ActorId, World};
use crate::engine::EngineConfig;
use crate::error::EngineError;

//=== Services ============================================================

/// External collaborators handed to the scheduler at startup.
pub struct Services {
    pub renderer: Box<dyn Renderer>,
    pub audio: Box<dyn AudioSystem>,
    pub physics: Box<dyn PhysWorld>,
    pub level_loader: Box<dyn LevelLoader>,
    pub controls: Box<dyn GameplayControls>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            renderer: Box::new(NullRenderer::default()),
            audio: Box::new(NullAudio::default()),
            physics: Box::new(BoxPhysWorld),
            level_loader: Box::new(NullLevelLoader),
            controls: Box::new(StandardControls::new()),
        }
    }
}

//=== FrameReport =========================================================

/// What one frame did.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    /// Mode at the end of the frame.
    pub mode: GameMode,
    /// Seconds handed to the update phase.
    pub delta: f32,
    pub promoted: usize,
    pub reaped_actors: Vec<ActorId>,
    pub reaped_screens: Vec<String>,
}

//=== FrameScheduler ======================================================

pub struct FrameScheduler {
    config: EngineConfig,
    mode: GameMode,
    frame: u64,

    world: World,
    ui: UiStack,
    resources: Resources,
    input: InputState,
    clock: FrameClock,

    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioSystem>,
    physics: Box<dyn PhysWorld>,
    level_loader: Box<dyn LevelLoader>,
    controls: Box<dyn GameplayControls>,

    commands: Option<Sender<PlatformCommand>>,
    relative_mouse: bool,
    music: Option<SoundHandle>,
    shut_down: bool,
}

impl FrameScheduler {
    //--- Startup ---------------------------------------------------------

    /// Brings up the renderer, then audio.
    ///
    /// On failure every subsystem already initialized is shut down again
    /// and nothing is retained.
    pub fn initialize(config: EngineConfig, services: Services) -> Result<Self, EngineError> {
        let Services {
            mut renderer,
            mut audio,
            physics,
            level_loader,
            controls,
        } = services;

        let (width, height) = (config.window_width, config.window_height);
        if !renderer.initialize(width, height) {
            error!("Failed to initialize renderer ({}x{})", width, height);
            return Err(EngineError::RendererInit { width, height });
        }

        if !audio.initialize() {
            error!("Failed to initialize audio system");
            audio.shutdown();
            renderer.shutdown();
            return Err(EngineError::AudioInit);
        }

        info!("Frame scheduler initialized ({}x{})", width, height);

        Ok(Self {
            clock: FrameClock::new(config.frame_interval, config.max_delta, config.pacing),
            ui: UiStack::new(width, height),
            config,
            mode: GameMode::Gameplay,
            frame: 0,
            world: World::new(),
            resources: Resources::new(),
            input: InputState::new(),
            renderer,
            audio,
            physics,
            level_loader,
            controls,
            commands: None,
            relative_mouse: false,
            music: None,
            shut_down: false,
        })
    }

    /// Connects the command channel to the platform.
    pub fn attach_platform(&mut self, commands: Sender<PlatformCommand>) {
        self.commands = Some(commands);
    }

    /// Loads the language table, HUD, level and music named in the
    /// configuration. Missing data is logged and skipped.
    pub fn load_data(&mut self) {
        if let Some(path) = self.config.text_path.clone() {
            if self.resources.load_text(&path).is_err() {
                warn!("Continuing without localized text");
            }
        }

        if self.config.hud {
            self.ui.push(Hud::new());
        }

        if let Some(path) = self.config.level_path.clone() {
            match self
                .level_loader
                .load_level(&mut self.world, &mut self.resources, &path)
            {
                Ok(()) => info!("Loaded level {} ({} actors)", path.display(), self.world.len()),
                Err(err) => warn!("Failed to load level: {}", err),
            }
        }

        if let Some(event) = self.config.music_event.clone() {
            let handle = self.audio.play_event(&event);
            self.music = handle.is_valid().then_some(handle);
        }

        self.set_relative_mouse(true);
        self.ui_barrier();
    }

    //--- Main loop -------------------------------------------------------

    /// Runs frames until the mode is Quit or the platform goes away.
    pub fn run(&mut self, collector: &mut EventCollector) {
        info!("Entering frame loop");

        while self.mode != GameMode::Quit {
            self.clock.wait_for_next_frame();

            let control = collector.collect_frame();
            self.frame(collector.events());

            if control == TickControl::Exit {
                info!("Platform closed");
                self.apply_mode(ModeRequest::Quit);
            }
        }

        if let Some(commands) = &self.commands {
            let _ = commands.send(PlatformCommand::Exit);
        }
        info!("Left frame loop after {} frame(s)", self.frame);
    }

    /// Runs one frame, measuring the delta from the wall clock.
    pub fn frame(&mut self, events: &[InputEvent]) -> FrameReport {
        let raw = self.clock.advance_to(Instant::now());
        self.frame_with_delta(events, raw)
    }

    /// Runs one frame with an explicit raw delta.
    pub fn frame_with_delta(&mut self, events: &[InputEvent], raw_delta: Duration) -> FrameReport {
        self.frame += 1;

        //--- 1. Capture input ---------------------------------------------
        self.input.capture(events);

        //--- 2. Route input -----------------------------------------------
        self.route_input();
        self.ui_barrier();

        //--- 3. Delta -----------------------------------------------------
        let delta = self.clock.clamp(raw_delta);

        //--- 4-6. World ---------------------------------------------------
        let (promoted, reaped_actors) = if self.mode.is_gameplay() {
            self.world.update_actors(delta);
            (self.world.promote_pending(), self.world.reap_dead())
        } else {
            (0, Vec::new())
        };

        //--- 7. Audio and UI ----------------------------------------------
        self.audio.update(delta);
        self.ui.update(delta, &self.world, &self.resources);

        //--- 8. UI reap ---------------------------------------------------
        let reaped_screens = self.ui.reap_closed(&self.world, &self.resources);
        self.ui_barrier();

        //--- 9. Output ----------------------------------------------------
        self.renderer.draw(&self.world, &self.ui);

        let report = FrameReport {
            frame: self.frame,
            mode: self.mode,
            delta,
            promoted,
            reaped_actors,
            reaped_screens,
        };
        trace!("{:?}", report);
        report
    }

    //--- Accessors -------------------------------------------------------

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn ui(&self) -> &UiStack {
        &self.ui
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn audio(&self) -> &dyn AudioSystem {
        self.audio.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_relative_mouse(&self) -> bool {
        self.relative_mouse
    }

    pub fn music(&self) -> Option<SoundHandle> {
        self.music
    }

    /// Queues `screen`; it lands at the next barrier.
    pub fn push_ui<S: UiScreen>(&mut self, screen: S) {
        self.ui.push(screen);
    }

    /// Applies a mode request from outside the frame.
    pub fn request_mode(&mut self, request: ModeRequest) {
        self.apply_mode(request);
    }

    //--- Shutdown --------------------------------------------------------

    /// Tears everything down. Later calls do nothing.
    ///
    /// Order: actors, renderer data, UI screens, caches, renderer, audio.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        info!("Shutting down frame scheduler");

        self.world.clear();
        self.renderer.unload_data();
        self.ui.clear();
        self.resources.clear();
        self.renderer.shutdown();
        self.audio.shutdown();
    }

    //--- Internals -------------------------------------------------------

    /// Routes each press to the controls while in Gameplay. A press that
    /// leaves Gameplay (Escape pushing the pause menu) takes effect before
    /// the next one, which then goes to the top screen.
    fn route_input(&mut self) {
        let presses = self.input.presses().to_vec();
        let mut remaining = presses.as_slice();

        while let Some((&press, rest)) = remaining.split_first() {
            if !self.mode.is_gameplay() {
                break;
            }
            let mut ctx = GameplayContext {
                world: &mut self.world,
                ui: &mut self.ui,
                resources: &mut self.resources,
                audio: self.audio.as_mut(),
                renderer: self.renderer.as_ref(),
                physics: self.physics.as_ref(),
            };
            self.controls.handle_key_press(press, &mut ctx);
            self.ui_barrier();
            remaining = rest;
        }

        if self.mode.is_gameplay() {
            let mut ctx = GameplayContext {
                world: &mut self.world,
                ui: &mut self.ui,
                resources: &mut self.resources,
                audio: self.audio.as_mut(),
                renderer: self.renderer.as_ref(),
                physics: self.physics.as_ref(),
            };
            self.controls.process_input(&self.input, &mut ctx);
            self.world.process_input(&self.input);
        } else {
            for &press in remaining {
                self.ui.handle_key_press(press, &self.world, &self.resources);
            }
            self.ui.process_input(&self.input, &self.world, &self.resources);
        }
    }

    /// Lands queued pushes, then applies every screen event.
    fn ui_barrier(&mut self) {
        self.ui.apply_pushes(&self.world, &self.resources);

        for event in self.ui.take_events() {
            match event {
                ScreenEvent::Mode(request) => self.apply_mode(request),
                ScreenEvent::RelativeMouse(relative) => self.set_relative_mouse(relative),
            }
        }
    }

    fn apply_mode(&mut self, request: ModeRequest) {
        self.mode = self.mode.apply(request);
    }

    fn set_relative_mouse(&mut self, relative: bool) {
        self.relative_mouse = relative;
        if let Some(commands) = &self.commands {
            if commands.send(PlatformCommand::SetRelativeMouse(relative)).is_err() {
                debug!("Platform gone; dropped relative mouse request");
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers, MouseButton};
    use crate::core::platform_bridge::PlatformEvent;
    use crate::core::ui::{PauseMenu, ScreenState};
    use crate::core::world::components::TargetComponent;
    use crate::core::world::{Actor, ActorContext, Component, ComponentKind};
    use nalgebra::Vector3;
    use std::any::Any;
    use std::sync::{Arc, Mutex};

    //--- Test doubles ----------------------------------------------------

    type Log = Arc<Mutex<Vec<String>>>;

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    struct RecordingRenderer {
        log: Log,
        init_ok: bool,
    }

    impl Renderer for RecordingRenderer {
        fn initialize(&mut self, _: u32, _: u32) -> bool {
            self.log.lock().unwrap().push("renderer.initialize".into());
            self.init_ok
        }
        fn draw(&mut self, _: &World, _: &UiStack) {}
        fn unload_data(&mut self) {
            self.log.lock().unwrap().push("renderer.unload_data".into());
        }
        fn shutdown(&mut self) {
            self.log.lock().unwrap().push("renderer.shutdown".into());
        }
        fn unproject(&self, p: Vector3<f32>) -> Vector3<f32> {
            p
        }
    }

    struct RecordingAudio {
        log: Log,
        init_ok: bool,
        inner: NullAudio,
    }

    impl AudioSystem for RecordingAudio {
        fn initialize(&mut self) -> bool {
            self.log.lock().unwrap().push("audio.initialize".into());
            self.init_ok
        }
        fn update(&mut self, _: f32) {
            self.log.lock().unwrap().push("audio.update".into());
        }
        fn play_event(&mut self, name: &str) -> SoundHandle {
            self.inner.play_event(name)
        }
        fn bus_volume(&self, bus: &str) -> f32 {
            self.inner.bus_volume(bus)
        }
        fn set_bus_volume(&mut self, bus: &str, volume: f32) {
            self.inner.set_bus_volume(bus, volume)
        }
        fn shutdown(&mut self) {
            self.log.lock().unwrap().push("audio.shutdown".into());
        }
    }

    fn recording_services(log: &Log, renderer_ok: bool, audio_ok: bool) -> Services {
        Services {
            renderer: Box::new(RecordingRenderer {
                log: Arc::clone(log),
                init_ok: renderer_ok,
            }),
            audio: Box::new(RecordingAudio {
                log: Arc::clone(log),
                init_ok: audio_ok,
                inner: NullAudio::default(),
            }),
            ..Services::default()
        }
    }

    /// Counts input and updates, remembers the last delta.
    #[derive(Default)]
    struct Recorder {
        inputs: usize,
        updates: usize,
        last_dt: f32,
    }

    impl Component for Recorder {
        fn kind(&self) -> ComponentKind {
            ComponentKind::Custom("recorder")
        }
        fn process_input(&mut self, _: &mut Actor, _: &InputState) {
            self.inputs += 1;
        }
        fn update(&mut self, _: &mut Actor, _: &mut ActorContext<'_>, dt: f32) {
            self.updates += 1;
            self.last_dt = dt;
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    //--- Helpers ---------------------------------------------------------

    fn config() -> EngineConfig {
        EngineConfig {
            hud: false,
            ..EngineConfig::default()
        }
    }

    fn scheduler() -> FrameScheduler {
        FrameScheduler::initialize(config(), Services::default()).unwrap()
    }

    fn key(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    fn click() -> [InputEvent; 2] {
        [
            InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE },
            InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::NONE },
        ]
    }

    /// Pixel position of the `index`-th menu button in a 1024x768 window.
    fn hover_menu_button(index: usize) -> InputEvent {
        InputEvent::MouseMoved {
            x: 512.0,
            y: 384.0 - (20.0 - 50.0 * index as f32),
        }
    }

    const FRAME: Duration = Duration::from_millis(16);

    fn recorder(scheduler: &FrameScheduler, id: ActorId) -> &Recorder {
        scheduler.world().actor(id).unwrap().component::<Recorder>().unwrap()
    }

    //--- Startup / shutdown ----------------------------------------------

    #[test]
    fn renderer_failure_aborts_before_audio() {
        let log = Log::default();
        let result = FrameScheduler::initialize(config(), recording_services(&log, false, true));

        assert!(matches!(result, Err(EngineError::RendererInit { width: 1024, height: 768 })));
        assert_eq!(entries(&log), vec!["renderer.initialize"]);
    }

    #[test]
    fn audio_failure_shuts_down_what_was_started() {
        let log = Log::default();
        let result = FrameScheduler::initialize(config(), recording_services(&log, true, false));

        assert!(matches!(result, Err(EngineError::AudioInit)));
        assert_eq!(
            entries(&log),
            vec![
                "renderer.initialize",
                "audio.initialize",
                "audio.shutdown",
                "renderer.shutdown"
            ]
        );
    }

    #[test]
    fn shutdown_order_and_idempotence() {
        let log = Log::default();
        let mut scheduler =
            FrameScheduler::initialize(config(), recording_services(&log, true, true)).unwrap();
        scheduler.world_mut().add_actor(Actor::new().with_component(TargetComponent::new()));
        scheduler.push_ui(PauseMenu::new());
        scheduler.frame_with_delta(&[], FRAME);
        log.lock().unwrap().clear();

        scheduler.shutdown();
        scheduler.shutdown();

        assert_eq!(
            entries(&log),
            vec!["renderer.unload_data", "renderer.shutdown", "audio.shutdown"]
        );
        assert!(scheduler.world().is_empty());
        assert!(scheduler.world().indices().is_empty());
        assert!(scheduler.ui().is_empty());
    }

    #[test]
    fn load_data_pushes_hud_and_grabs_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("English.gptext");
        std::fs::write(&text, r#"{ "TextMap": { "PauseTitle": "PAUSED" } }"#).unwrap();

        let config = EngineConfig {
            text_path: Some(text),
            music_event: Some("event:/Music".into()),
            ..EngineConfig::default()
        };
        let mut scheduler = FrameScheduler::initialize(config, Services::default()).unwrap();
        let (tx, rx) = crossbeam_channel::unbounded();
        scheduler.attach_platform(tx);

        scheduler.load_data();

        assert_eq!(scheduler.ui().len(), 1);
        assert_eq!(scheduler.ui().top().unwrap().0.name(), "hud");
        assert_eq!(scheduler.resources().text("PauseTitle"), "PAUSED");
        assert!(scheduler.music().is_some());
        assert!(scheduler.is_relative_mouse());
        assert_eq!(rx.try_recv(), Ok(PlatformCommand::SetRelativeMouse(true)));
    }

    #[test]
    fn missing_text_file_falls_back_to_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig {
            text_path: Some(dir.path().join("Missing.gptext")),
            hud: false,
            ..EngineConfig::default()
        };
        let mut scheduler = FrameScheduler::initialize(config, Services::default()).unwrap();
        scheduler.load_data();

        assert_eq!(scheduler.resources().text("PauseTitle"), "**KEY NOT FOUND**");
    }

    //--- Frame order -----------------------------------------------------

    #[test]
    fn stall_is_clamped_for_the_update_phase() {
        let mut scheduler = scheduler();
        let id = scheduler.world_mut().add_actor(Actor::new().with_component(Recorder::default()));

        let report = scheduler.frame_with_delta(&[], Duration::from_millis(500));

        assert!(report.delta <= 0.05);
        assert!(recorder(&scheduler, id).last_dt <= 0.05);
    }

    #[test]
    fn audio_updates_every_frame_even_when_paused() {
        let log = Log::default();
        let mut scheduler =
            FrameScheduler::initialize(config(), recording_services(&log, true, true)).unwrap();
        scheduler.request_mode(ModeRequest::Pause);
        log.lock().unwrap().clear();

        scheduler.frame_with_delta(&[], FRAME);
        assert_eq!(entries(&log), vec!["audio.update"]);
    }

    #[test]
    fn dead_actor_is_reaped_in_the_same_frame() {
        struct Doomed;
        impl Component for Doomed {
            fn kind(&self) -> ComponentKind {
                ComponentKind::Custom("doomed")
            }
            fn update(&mut self, owner: &mut Actor, _: &mut ActorContext<'_>, _: f32) {
                owner.destroy();
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        let mut scheduler = scheduler();
        let id = scheduler.world_mut().add_actor(
            Actor::new()
                .with_component(Doomed)
                .with_component(TargetComponent::new()),
        );

        let report = scheduler.frame_with_delta(&[], FRAME);

        assert_eq!(report.reaped_actors, vec![id]);
        assert!(!scheduler.world().contains(id));
        assert!(!scheduler.world().indices().refers_to(id));
    }

    //--- Pause scenario --------------------------------------------------

    #[test]
    fn escape_pauses_and_routes_input_to_menu_only() {
        let mut scheduler = scheduler();
        let id = scheduler.world_mut().add_actor(Actor::new().with_component(Recorder::default()));

        let report = scheduler.frame_with_delta(&[key(KeyCode::Escape)], FRAME);
        assert_eq!(report.mode, GameMode::Paused);
        assert_eq!(scheduler.ui().len(), 1);
        assert!(!scheduler.is_relative_mouse());

        // The pause lands before actor input, so gameplay never sees it.
        let before = (recorder(&scheduler, id).inputs, recorder(&scheduler, id).updates);
        scheduler.frame_with_delta(&[key_up(KeyCode::Escape), key(KeyCode::KeyW)], FRAME);
        let after = (recorder(&scheduler, id).inputs, recorder(&scheduler, id).updates);
        assert_eq!(before, (0, 0));
        assert_eq!(after, before);
    }

    #[test]
    fn second_escape_in_one_frame_closes_the_menu() {
        let mut scheduler = scheduler();

        let report = scheduler.frame_with_delta(
            &[key(KeyCode::Escape), key_up(KeyCode::Escape), key(KeyCode::Escape)],
            FRAME,
        );
        assert_eq!(report.reaped_screens, vec!["pause-menu".to_owned()]);
        assert_eq!(report.mode, GameMode::Gameplay);
        assert!(scheduler.ui().is_empty());

        // Mode and stack stay in step afterwards.
        let report =
            scheduler.frame_with_delta(&[key_up(KeyCode::Escape), key(KeyCode::Escape)], FRAME);
        assert_eq!(report.mode, GameMode::Paused);
        assert_eq!(scheduler.ui().len(), 1);

        let report =
            scheduler.frame_with_delta(&[key_up(KeyCode::Escape), key(KeyCode::Escape)], FRAME);
        assert_eq!(report.mode, GameMode::Gameplay);
        assert!(scheduler.ui().is_empty());
    }

    #[test]
    fn world_phases_hold_while_paused() {
        struct Spawner;
        impl Component for Spawner {
            fn kind(&self) -> ComponentKind {
                ComponentKind::Custom("spawner")
            }
            fn update(&mut self, _: &mut Actor, ctx: &mut ActorContext<'_>, _: f32) {
                ctx.spawn(Actor::named("spawned"));
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        let mut scheduler = scheduler();
        scheduler.world_mut().add_actor(Actor::new().with_component(Spawner));
        let doomed = scheduler.world_mut().add_actor(Actor::new());
        scheduler.request_mode(ModeRequest::Pause);
        scheduler.world_mut().actor_mut(doomed).unwrap().destroy();

        let report = scheduler.frame_with_delta(&[], FRAME);
        assert_eq!(report.promoted, 0);
        assert!(report.reaped_actors.is_empty());
        assert!(scheduler.world().contains(doomed));

        scheduler.request_mode(ModeRequest::Resume);
        let report = scheduler.frame_with_delta(&[], FRAME);
        assert_eq!(report.promoted, 1);
        assert_eq!(report.reaped_actors, vec![doomed]);
    }

    #[test]
    fn resume_closes_menu_and_reap_restores_gameplay() {
        let mut scheduler = scheduler();
        scheduler.frame_with_delta(&[key(KeyCode::Escape)], FRAME);
        scheduler.frame_with_delta(&[key_up(KeyCode::Escape), hover_menu_button(0)], FRAME);

        let report = scheduler.frame_with_delta(&click(), FRAME);

        assert_eq!(report.reaped_screens, vec!["pause-menu".to_owned()]);
        assert_eq!(report.mode, GameMode::Gameplay);
        assert!(scheduler.ui().is_empty());
        assert!(scheduler.is_relative_mouse());
    }

    #[test]
    fn closed_menu_is_still_on_stack_during_its_frame() {
        /// Closes on any key, records its state at update time.
        struct Observer {
            seen: Arc<Mutex<Vec<ScreenState>>>,
        }
        impl UiScreen for Observer {
            fn name(&self) -> &str {
                "observer"
            }
            fn on_push(&mut self, ctx: &mut crate::core::ui::ScreenContext<'_>) {
                ctx.request_mode(ModeRequest::Pause);
            }
            fn on_close(&mut self, ctx: &mut crate::core::ui::ScreenContext<'_>) {
                ctx.request_mode(ModeRequest::Resume);
            }
            fn handle_key_press(
                &mut self,
                _: crate::core::input::Press,
                ctx: &mut crate::core::ui::ScreenContext<'_>,
            ) {
                ctx.close();
            }
            fn update(&mut self, _: f32, ctx: &mut crate::core::ui::ScreenContext<'_>) {
                self.seen.lock().unwrap().push(ctx.state());
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = scheduler();
        scheduler.push_ui(Observer { seen: Arc::clone(&seen) });
        scheduler.frame_with_delta(&[], FRAME);
        assert_eq!(scheduler.mode(), GameMode::Paused);

        let report = scheduler.frame_with_delta(&[key(KeyCode::KeyQ)], FRAME);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![ScreenState::Active, ScreenState::Closing]
        );
        assert_eq!(report.reaped_screens, vec!["observer".to_owned()]);
        assert_eq!(scheduler.mode(), GameMode::Gameplay);
    }

    #[test]
    fn quit_through_confirmation_dialog() {
        let mut scheduler = scheduler();
        scheduler.frame_with_delta(&[key(KeyCode::Escape)], FRAME);
        scheduler.frame_with_delta(&[key_up(KeyCode::Escape), hover_menu_button(1)], FRAME);
        scheduler.frame_with_delta(&click(), FRAME);
        assert_eq!(scheduler.ui().len(), 2);

        // Dialog OK sits at the window centre.
        scheduler.frame_with_delta(&[InputEvent::MouseMoved { x: 512.0, y: 384.0 }], FRAME);
        let report = scheduler.frame_with_delta(&click(), FRAME);

        assert_eq!(report.mode, GameMode::Quit);
    }

    //--- Controls --------------------------------------------------------

    #[test]
    fn volume_keys_step_and_clamp() {
        let mut scheduler = scheduler();
        let master = StandardControls::MASTER_BUS;

        scheduler.frame_with_delta(&[key(KeyCode::Equal)], FRAME);
        assert_eq!(scheduler.audio().bus_volume(master), 1.0);

        scheduler.frame_with_delta(&[key_up(KeyCode::Equal), key(KeyCode::Minus)], FRAME);
        approx::assert_relative_eq!(scheduler.audio().bus_volume(master), 0.9, epsilon = 1e-6);
    }

    //--- Run loop --------------------------------------------------------

    #[test]
    fn run_exits_when_window_closes() {
        let mut scheduler = scheduler();
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        let (commands_tx, commands_rx) = crossbeam_channel::unbounded();
        scheduler.attach_platform(commands_tx);

        events_tx
            .send(PlatformEvent::Inputs {
                discrete: vec![key(KeyCode::KeyA)],
                continuous: Vec::new(),
            })
            .unwrap();
        events_tx.send(PlatformEvent::WindowClosed).unwrap();

        scheduler.run(&mut EventCollector::new(events_rx));

        assert_eq!(scheduler.mode(), GameMode::Quit);
        assert_eq!(commands_rx.try_recv(), Ok(PlatformCommand::Exit));
    }

    #[test]
    fn run_exits_when_platform_disconnects() {
        let mut scheduler = scheduler();
        let (events_tx, events_rx) = crossbeam_channel::unbounded::<PlatformEvent>();
        drop(events_tx);

        scheduler.run(&mut EventCollector::new(events_rx));
        assert_eq!(scheduler.mode(), GameMode::Quit);
    }
}
