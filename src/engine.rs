//=========================================================================
// Orrery Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ initializes renderer + audio
//         ├─ with_window_size()      ├─ spawns the scheduler thread
//         ├─ with_text_path() ...    ├─ runs the platform (main thread)
//         └─ with_renderer() ...     └─ joins, then returns
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::EventCollector;
use crate::core::scheduler::{FrameClock, FrameScheduler, GameplayControls, Pacing, Services};
use crate::core::services::{AudioSystem, LevelLoader, PhysWorld, Renderer};
use crate::error::EngineError;
use crate::platform::{Platform, WindowSettings};

//=== EngineConfig ========================================================

/// Startup parameters shared by the engine, scheduler and platform.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,

    /// Minimum wall time between frame starts.
    pub frame_interval: Duration,
    /// Upper bound on the delta handed to the update phase.
    pub max_delta: Duration,
    pub pacing: Pacing,

    /// Capacity of the platform → scheduler channel.
    pub channel_capacity: usize,

    /// Language table loaded at startup.
    pub text_path: Option<PathBuf>,
    /// Level handed to the level loader at startup.
    pub level_path: Option<PathBuf>,
    /// Audio event started once the level is loaded.
    pub music_event: Option<String>,
    /// Push the HUD as the bottom screen.
    pub hud: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Orrery".to_owned(),
            window_width: 1024,
            window_height: 768,
            frame_interval: FrameClock::DEFAULT_TARGET,
            max_delta: FrameClock::DEFAULT_MAX_DELTA,
            pacing: Pacing::default(),
            channel_capacity: 128,
            text_path: None,
            level_path: None,
            music_event: None,
            hud: true,
        }
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Window**: "Orrery", 1024x768
/// - **Frame interval**: 16 ms, sleep pacing
/// - **Max delta**: 50 ms
/// - **Channel capacity**: 128 events
/// - **Services**: headless renderer and audio, box collision, no level
///
/// # Examples
///
/// ```no_run
/// use orrery_engine::EngineBuilder;
///
/// EngineBuilder::new()
///     .with_title("Orrery")
///     .with_window_size(1024, 768)
///     .with_text_path("Assets/English.gptext")
///     .with_level_path("Assets/Level1.gplevel")
///     .with_music_event("event:/Music")
///     .build()
///     .run()
///     .expect("engine failed");
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    services: Services,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            services: Services::default(),
        }
    }

    //--- Window ---------------------------------------------------------

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be positive, got {}x{}",
            width,
            height
        );
        self.config.window_width = width;
        self.config.window_height = height;
        self
    }

    //--- Timing ----------------------------------------------------------

    /// Sets the target frames per second; the frame interval is `1 / tps`.
    ///
    /// Default: 62.5 (16 ms)
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.config.frame_interval = Duration::from_secs_f64(1.0 / tps);
        self
    }

    /// Caps the per-frame delta so a stall produces one bounded step.
    ///
    /// Default: 50 ms
    ///
    /// # Panics
    ///
    /// Panics if `max_delta` is zero.
    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        assert!(!max_delta.is_zero(), "Max delta must be positive, got {:?}", max_delta);
        self.config.max_delta = max_delta;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.config.pacing = pacing;
        self
    }

    /// Sets the channel capacity for platform → scheduler communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.channel_capacity = capacity;
        self
    }

    //--- Startup data ----------------------------------------------------

    pub fn with_text_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.text_path = Some(path.into());
        self
    }

    pub fn with_level_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.level_path = Some(path.into());
        self
    }

    pub fn with_music_event(mut self, event: impl Into<String>) -> Self {
        self.config.music_event = Some(event.into());
        self
    }

    pub fn without_hud(mut self) -> Self {
        self.config.hud = false;
        self
    }

    //--- Services --------------------------------------------------------

    pub fn with_renderer<R: Renderer + 'static>(mut self, renderer: R) -> Self {
        self.services.renderer = Box::new(renderer);
        self
    }

    pub fn with_audio<A: AudioSystem + 'static>(mut self, audio: A) -> Self {
        self.services.audio = Box::new(audio);
        self
    }

    pub fn with_physics<P: PhysWorld + 'static>(mut self, physics: P) -> Self {
        self.services.physics = Box::new(physics);
        self
    }

    pub fn with_level_loader<L: LevelLoader + 'static>(mut self, loader: L) -> Self {
        self.services.level_loader = Box::new(loader);
        self
    }

    pub fn with_controls<C: GameplayControls + 'static>(mut self, controls: C) -> Self {
        self.services.controls = Box::new(controls);
        self
    }

    //--- Build -----------------------------------------------------------

    pub fn build(self) -> Engine {
        info!(
            "Building engine ({}x{}, frame {:?}, channel: {})",
            self.config.window_width,
            self.config.window_height,
            self.config.frame_interval,
            self.config.channel_capacity
        );

        Engine {
            config: self.config,
            services: self.services,
            setup: None,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

type SetupFn = Box<dyn FnOnce(&mut FrameScheduler) + Send>;

/// Orrery Engine runtime.
///
/// ```text
/// Engine (Main Thread)
///   ├─► FrameScheduler (Scheduler Thread)
///   │     └─► World, UiStack, Resources, services
///   │
///   └─► Platform (Event Loop)
///         └─► Window, input
///
/// PlatformEvent   platform → scheduler (bounded)
/// PlatformCommand scheduler → platform
/// ```
pub struct Engine {
    config: EngineConfig,
    services: Services,
    setup: Option<SetupFn>,
}

impl Engine {
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registers a callback run on the scheduler thread after the startup
    /// data is loaded and before the first frame.
    ///
    /// ```no_run
    /// # use orrery_engine::EngineBuilder;
    /// use orrery_engine::core::world::Actor;
    ///
    /// EngineBuilder::new()
    ///     .build()
    ///     .init(|scheduler| {
    ///         scheduler.world_mut().add_actor(Actor::named("player"));
    ///     })
    ///     .run()
    ///     .unwrap();
    /// ```
    pub fn init<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut FrameScheduler) + Send + 'static,
    {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Starts the engine and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Initializes renderer and audio (errors return here)
    /// 2. Creates the event and command channels
    /// 3. Spawns the scheduler thread: load data, setup, frame loop, shutdown
    /// 4. Runs the platform event loop (blocks here)
    /// 5. Joins the scheduler thread
    pub fn run(self) -> Result<(), EngineError> {
        let Engine { config, services, setup } = self;
        info!("Starting engine runtime");

        //--- 1. Initialize subsystems -------------------------------------
        let mut scheduler = FrameScheduler::initialize(config.clone(), services)?;

        //--- 2. Channels --------------------------------------------------
        let (event_tx, event_rx) = bounded(config.channel_capacity);
        let (command_tx, command_rx) = unbounded();
        scheduler.attach_platform(command_tx);

        //--- 3. Scheduler thread ------------------------------------------
        let core_handle = thread::spawn(move || {
            scheduler.load_data();
            if let Some(setup) = setup {
                setup(&mut scheduler);
            }

            let mut collector = EventCollector::new(event_rx);
            scheduler.run(&mut collector);
            scheduler.shutdown();
        });
        info!("Scheduler thread spawned");

        //--- 4. Platform --------------------------------------------------
        let platform = Platform::new(
            WindowSettings {
                title: config.title.clone(),
                width: config.window_width,
                height: config.window_height,
            },
            event_tx,
            command_rx,
        );
        let platform_result = platform.run();
        info!("Platform event loop exited");

        //--- 5. Join ------------------------------------------------------
        match core_handle.join() {
            Ok(()) => info!("Scheduler thread terminated cleanly"),
            Err(e) => error!("Scheduler thread panicked: {:?}", e),
        }

        platform_result.map_err(|e| {
            error!("Platform error: {}", e);
            EngineError::from(e)
        })?;

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
