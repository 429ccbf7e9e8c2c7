//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges winit (OS events) with the frame scheduler thread.
//
// Architecture:
// ```text
//  Main Thread:                        Scheduler Thread:
//  ┌─────────────────────────────┐    ┌────────────────────┐
//  │  winit Event Loop           │    │  FrameScheduler    │
//  │   ↓                         │    │                    │
//  │  InputProcessor             │    │  EventCollector    │
//  │   ↓                         │    │   ↓                │
//  │  InputBuffer                │    │  frame()           │
//  │   ↓ (RedrawRequested)       │    │                    │
//  │  PlatformEvent ─────────────┼───►│                    │
//  │                             │    │                    │
//  │  about_to_wait ◄────────────┼────┤  PlatformCommand   │
//  │   ├─ cursor grab / release  │    │                    │
//  │   └─ exit                   │    └────────────────────┘
//  └─────────────────────────────┘
// ```
//
// Frame boundary is RedrawRequested: buffered input is sent as one batch.
// While the cursor is grabbed, raw device motion drives a virtual cursor
// so mouse deltas keep flowing when the OS pointer is pinned.
//
// winit requires the event loop on the main thread (macOS/iOS), so this
// runs on the thread that called `Engine::run()`.
//
//=========================================================================

//=== Module Declarations =================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, error, info, trace, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformCommand, PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowSettings ======================================================

#[derive(Debug, Clone)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window owner and input aggregator. Not `Send`; stays on the main thread.
pub(crate) struct Platform {
    settings: WindowSettings,
    window: Option<Window>,
    buffer: InputBuffer,
    input_processor: InputProcessor,

    event_sender: Sender<PlatformEvent>,
    commands: Receiver<PlatformCommand>,

    relative_mouse: bool,
    cursor: (f64, f64),

    /// Fatal error raised inside a winit callback, returned from `run`.
    failure: Option<PlatformError>,
}

impl Platform {
    pub fn new(
        settings: WindowSettings,
        event_sender: Sender<PlatformEvent>,
        commands: Receiver<PlatformCommand>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            cursor: (settings.width as f64 / 2.0, settings.height as f64 / 2.0),
            settings,
            window: None,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            event_sender,
            commands,
            relative_mouse: false,
            failure: None,
        }
    }

    /// Runs the winit event loop until the window closes or the scheduler
    /// sends [`PlatformCommand::Exit`].
    ///
    /// # Errors
    ///
    /// Fails when the event loop cannot be created or run, or when the
    /// window could not be created.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        let result = event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()));
        self.finish(result)
    }

    //--- Internals -------------------------------------------------------

    /// Folds a failure recorded during the loop into its result.
    fn finish(&mut self, result: Result<(), PlatformError>) -> Result<(), PlatformError> {
        result?;
        match self.failure.take() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Records a window creation failure and tells the scheduler to stop.
    fn window_creation_failed(&mut self, reason: String) {
        let failure = PlatformError::WindowCreation(reason);
        error!(target: "platform", "{}", failure);
        let _ = self.event_sender.send(PlatformEvent::WindowClosed);
        self.failure = Some(failure);
    }

    /// Sends buffered input as one batch. Empty buffers send nothing.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };
        let count = discrete.len() + continuous.len();
        trace!(target: "platform::input", "Flushing {} input events", count);

        if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events",
                count
            );
        }
    }

    /// Applies every command queued by the scheduler.
    ///
    /// Returns `false` once the loop should stop.
    fn drain_commands(&mut self) -> bool {
        loop {
            match self.commands.try_recv() {
                Ok(PlatformCommand::SetRelativeMouse(relative)) => self.set_relative_mouse(relative),
                Ok(PlatformCommand::Exit) => {
                    info!(target: "platform", "Exit requested by scheduler");
                    return false;
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => {
                    info!(target: "platform", "Scheduler gone, closing window");
                    return false;
                }
            }
        }
    }

    fn set_relative_mouse(&mut self, relative: bool) {
        self.relative_mouse = relative;
        let Some(window) = &self.window else {
            return;
        };

        let grab = if relative {
            window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = grab {
            warn!(target: "platform", "Cursor grab change failed: {}", e);
        }

        window.set_cursor_visible(!relative);
        debug!(target: "platform", "Relative mouse {}", if relative { "on" } else { "off" });
    }

    fn push_cursor(&mut self) {
        let event = self.input_processor.process_mouse_move(self.cursor.0, self.cursor.1);
        self.buffer.push_continuous(event);
    }

    #[cfg(test)]
    fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(PhysicalSize::new(self.settings.width, self.settings.height))
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);

                // A grab requested before the window existed.
                if self.relative_mouse {
                    self.set_relative_mouse(true);
                }
            }
            Err(e) => {
                self.window_creation_failed(e.to_string());
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::ModifiersChanged(state) => {
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } if !self.relative_mouse => {
                self.cursor = (position.x, position.y);
                self.push_cursor();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                match self.input_processor.process_key_event(&event) {
                    Some(event) => self.buffer.push_discrete(event),
                    None => trace!(target: "platform::input", "Key ignored: {:?}", event.physical_key),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(button, state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.relative_mouse {
                self.cursor.0 += delta.0;
                self.cursor.1 += delta.1;
                self.push_cursor();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.drain_commands() {
            event_loop.exit();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crossbeam_channel::unbounded;

    fn settings() -> WindowSettings {
        WindowSettings {
            title: "test".into(),
            width: 1024,
            height: 768,
        }
    }

    fn platform() -> (Platform, Receiver<PlatformEvent>, Sender<PlatformCommand>) {
        let (event_tx, event_rx) = unbounded();
        let (command_tx, command_rx) = unbounded();
        (Platform::new(settings(), event_tx, command_rx), event_rx, command_tx)
    }

    #[test]
    fn window_is_created_lazily() {
        let (platform, _, _) = platform();
        assert!(platform.window().is_none());
        assert_eq!(platform.cursor, (512.0, 384.0));
    }

    #[test]
    fn flush_sends_one_batch_then_nothing() {
        let (mut platform, events, _) = platform();
        platform.buffer.push_discrete(InputEvent::KeyDown {
            key: KeyCode::Space,
            modifiers: Modifiers::NONE,
        });
        platform.push_cursor();

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        match events.try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete.len(), 1);
                assert_eq!(continuous, vec![InputEvent::MouseMoved { x: 512.0, y: 384.0 }]);
            }
            other => panic!("Expected Inputs, got {:?}", other),
        }
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn flush_survives_disconnected_scheduler() {
        let (mut platform, events, _) = platform();
        platform.push_cursor();
        drop(events);

        platform.flush_input_buffer();
    }

    #[test]
    fn commands_are_applied_until_exit() {
        let (mut platform, _, commands) = platform();

        commands.send(PlatformCommand::SetRelativeMouse(true)).unwrap();
        assert!(platform.drain_commands());
        assert!(platform.relative_mouse);

        commands.send(PlatformCommand::SetRelativeMouse(false)).unwrap();
        commands.send(PlatformCommand::Exit).unwrap();
        assert!(!platform.drain_commands());
        assert!(!platform.relative_mouse);
    }

    #[test]
    fn window_creation_failure_is_returned_from_run() {
        let (mut platform, events, _) = platform();

        platform.window_creation_failed("no display".into());

        assert!(matches!(events.try_recv(), Ok(PlatformEvent::WindowClosed)));
        let result = platform.finish(Ok(()));
        assert!(matches!(result, Err(PlatformError::WindowCreation(reason)) if reason == "no display"));
        assert!(platform.finish(Ok(())).is_ok(), "failure is reported once");
    }

    #[test]
    fn loop_error_wins_over_recorded_failure() {
        let (mut platform, _, _) = platform();
        platform.window_creation_failed("no display".into());

        let result = platform.finish(Err(PlatformError::EventLoopExecution("lost".into())));
        assert!(matches!(result, Err(PlatformError::EventLoopExecution(_))));
    }

    #[test]
    fn scheduler_disconnect_stops_the_loop() {
        let (mut platform, _, commands) = platform();
        drop(commands);
        assert!(!platform.drain_commands());
    }
}
