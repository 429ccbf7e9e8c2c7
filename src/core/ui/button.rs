//=========================================================================
// Buttons
//=========================================================================
//
// Vertical list of labelled buttons in UI space (origin at the window
// centre, +y up).
//
//   hover(cursor)       highlight the button under the cursor
//   Left click / Enter  activate the highlighted button
//   Up / Down           move the highlight
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use nalgebra::Vector2;

//=== Internal Dependencies ===============================================

use super::ScreenContext;
use crate::core::input::{KeyCode, MouseButton, Press};

//=== Types ===============================================================

pub type ButtonAction = Box<dyn FnMut(&mut ScreenContext<'_>) + Send>;

//=== Button ==============================================================

pub struct Button {
    label: String,
    center: Vector2<f32>,
    size: Vector2<f32>,
    highlighted: bool,
    action: ButtonAction,
}

impl Button {
    /// Text key of the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn center(&self) -> Vector2<f32> {
        self.center
    }

    pub fn size(&self) -> Vector2<f32> {
        self.size
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn contains(&self, point: Vector2<f32>) -> bool {
        let half = self.size / 2.0;
        (point.x - self.center.x).abs() <= half.x && (point.y - self.center.y).abs() <= half.y
    }
}

//=== ButtonPanel =========================================================

pub struct ButtonPanel {
    buttons: Vec<Button>,
    origin: Vector2<f32>,
    button_size: Vector2<f32>,
    spacing: f32,
}

impl ButtonPanel {
    /// First button centred at `origin`, each next one `spacing` below.
    pub fn new(origin: Vector2<f32>, button_size: Vector2<f32>, spacing: f32) -> Self {
        Self {
            buttons: Vec::new(),
            origin,
            button_size,
            spacing,
        }
    }

    pub fn add_button<F>(&mut self, label: impl Into<String>, action: F)
    where
        F: FnMut(&mut ScreenContext<'_>) + Send + 'static,
    {
        let index = self.buttons.len() as f32;
        self.buttons.push(Button {
            label: label.into(),
            center: self.origin - Vector2::new(0.0, self.spacing * index),
            size: self.button_size,
            highlighted: false,
            action: Box::new(action),
        });
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter()
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.buttons.iter().position(Button::is_highlighted)
    }

    /// Highlights the button under `cursor`; none when it is over no
    /// button.
    pub fn hover(&mut self, cursor: Vector2<f32>) {
        for button in &mut self.buttons {
            button.highlighted = button.contains(cursor);
        }
    }

    /// Handles a discrete press. Returns `true` when consumed.
    pub fn handle_press(&mut self, press: Press, ctx: &mut ScreenContext<'_>) -> bool {
        match press {
            Press::Mouse(MouseButton::Left) | Press::Key(KeyCode::Enter) => self.activate(ctx),
            Press::Key(KeyCode::ArrowDown) => self.step_highlight(1),
            Press::Key(KeyCode::ArrowUp) => self.step_highlight(-1),
            _ => false,
        }
    }

    fn activate(&mut self, ctx: &mut ScreenContext<'_>) -> bool {
        let Some(button) = self.buttons.iter_mut().find(|button| button.highlighted) else {
            return false;
        };
        trace!("Button '{}' activated", button.label);
        (button.action)(ctx);
        true
    }

    fn step_highlight(&mut self, step: isize) -> bool {
        if self.buttons.is_empty() {
            return false;
        }

        let count = self.buttons.len() as isize;
        let next = match self.highlighted() {
            Some(current) => (current as isize + step).rem_euclid(count),
            None if step > 0 => 0,
            None => count - 1,
        } as usize;

        for (index, button) in self.buttons.iter_mut().enumerate() {
            button.highlighted = index == next;
        }
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
