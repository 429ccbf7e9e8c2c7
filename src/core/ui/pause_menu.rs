//=========================================================================
// Pause Menu
//=========================================================================
//
// Pushed over gameplay by Escape.
//
//   on_push    → Pause, release cursor
//   Resume     → close
//   Quit       → confirmation dialog; OK requests Quit
//   Escape     → close
//   on_close   → Resume, grab cursor
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use nalgebra::Vector2;

//=== Internal Dependencies ===============================================

use super::{ButtonPanel, DialogBox, ScreenContext, UiScreen};
use crate::core::input::{KeyCode, Press};
use crate::core::mode::ModeRequest;

//=== PauseMenu ===========================================================

pub struct PauseMenu {
    panel: ButtonPanel,
}

impl PauseMenu {
    pub fn new() -> Self {
        let mut panel = ButtonPanel::new(Vector2::new(0.0, 20.0), Vector2::new(200.0, 40.0), 50.0);
        panel.add_button("ResumeButton", |ctx: &mut ScreenContext<'_>| ctx.close());
        panel.add_button("QuitButton", |ctx: &mut ScreenContext<'_>| {
            ctx.push(DialogBox::new("QuitText", |ctx: &mut ScreenContext<'_>| {
                ctx.request_mode(ModeRequest::Quit)
            }));
        });

        Self { panel }
    }
}

impl Default for PauseMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl UiScreen for PauseMenu {
    fn name(&self) -> &str {
        "pause-menu"
    }

    fn title(&self) -> Option<&str> {
        Some("PauseTitle")
    }

    fn buttons(&self) -> Option<&ButtonPanel> {
        Some(&self.panel)
    }

    fn buttons_mut(&mut self) -> Option<&mut ButtonPanel> {
        Some(&mut self.panel)
    }

    fn on_push(&mut self, ctx: &mut ScreenContext<'_>) {
        ctx.request_mode(ModeRequest::Pause);
        ctx.set_relative_mouse(false);
    }

    fn on_close(&mut self, ctx: &mut ScreenContext<'_>) {
        ctx.set_relative_mouse(true);
        ctx.request_mode(ModeRequest::Resume);
    }

    fn handle_key_press(&mut self, press: Press, ctx: &mut ScreenContext<'_>) {
        match press {
            Press::Key(KeyCode::Escape) => ctx.close(),
            _ => {
                self.panel.handle_press(press, ctx);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::MouseButton;
    use crate::core::resources::Resources;
    use crate::core::ui::{ScreenEvent, ScreenState, UiStack};
    use crate::core::world::World;

    fn open_menu(stack: &mut UiStack, world: &World, resources: &Resources) {
        stack.push(PauseMenu::new());
        stack.apply_pushes(world, resources);
    }

    fn click(stack: &mut UiStack, button: usize, world: &World, resources: &Resources) {
        // Buttons are centred at y = 20 - 50 * index in UI space; the
        // stack is 1024x768, so UI y maps to pixel 384 - y.
        let y = 384.0 - (20.0 - 50.0 * button as f32);
        let mut input = crate::core::input::InputState::new();
        input.capture(&[crate::core::input::InputEvent::MouseMoved { x: 512.0, y }]);
        stack.process_input(&input, world, resources);
        stack.handle_key_press(Press::Mouse(MouseButton::Left), world, resources);
    }

    #[test]
    fn push_requests_pause_and_releases_cursor() {
        let (world, resources) = (World::new(), Resources::new());
        let mut stack = UiStack::new(1024, 768);
        open_menu(&mut stack, &world, &resources);

        assert_eq!(
            stack.take_events(),
            vec![
                ScreenEvent::Mode(ModeRequest::Pause),
                ScreenEvent::RelativeMouse(false)
            ]
        );
    }

    #[test]
    fn resume_button_closes_and_reap_requests_resume() {
        let (world, resources) = (World::new(), Resources::new());
        let mut stack = UiStack::new(1024, 768);
        open_menu(&mut stack, &world, &resources);
        stack.take_events();

        click(&mut stack, 0, &world, &resources);
        assert_eq!(stack.top().unwrap().1, ScreenState::Closing);
        assert!(stack.take_events().is_empty(), "no resume before the reap");

        stack.reap_closed(&world, &resources);
        assert!(stack.is_empty());
        assert_eq!(
            stack.take_events(),
            vec![
                ScreenEvent::RelativeMouse(true),
                ScreenEvent::Mode(ModeRequest::Resume)
            ]
        );
    }

    #[test]
    fn quit_button_opens_confirmation_whose_ok_requests_quit() {
        let (world, resources) = (World::new(), Resources::new());
        let mut stack = UiStack::new(1024, 768);
        open_menu(&mut stack, &world, &resources);
        stack.take_events();

        click(&mut stack, 1, &world, &resources);
        stack.apply_pushes(&world, &resources);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top().unwrap().0.title(), Some("QuitText"));

        // Dialog OK sits at y = 0.
        let mut input = crate::core::input::InputState::new();
        input.capture(&[crate::core::input::InputEvent::MouseMoved { x: 512.0, y: 384.0 }]);
        stack.process_input(&input, &world, &resources);
        stack.handle_key_press(Press::Mouse(MouseButton::Left), &world, &resources);

        assert_eq!(stack.take_events(), vec![ScreenEvent::Mode(ModeRequest::Quit)]);
    }

    #[test]
    fn escape_closes_menu() {
        let (world, resources) = (World::new(), Resources::new());
        let mut stack = UiStack::new(1024, 768);
        open_menu(&mut stack, &world, &resources);

        stack.handle_key_press(Press::Key(KeyCode::Escape), &world, &resources);
        assert_eq!(stack.top().unwrap().1, ScreenState::Closing);
    }
}
