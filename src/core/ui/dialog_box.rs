//=========================================================================
// Dialog Box
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use nalgebra::Vector2;

//=== Internal Dependencies ===============================================

use super::{ButtonPanel, ScreenContext, UiScreen};

//=== DialogBox ===========================================================

/// Modal OK/Cancel confirmation.
///
/// OK runs the supplied action and closes the dialog; Cancel only closes.
pub struct DialogBox {
    text_key: String,
    panel: ButtonPanel,
}

impl DialogBox {
    pub fn new<F>(text_key: impl Into<String>, mut on_ok: F) -> Self
    where
        F: FnMut(&mut ScreenContext<'_>) + Send + 'static,
    {
        let mut panel = ButtonPanel::new(Vector2::new(0.0, 0.0), Vector2::new(200.0, 40.0), 50.0);
        panel.add_button("OKButton", move |ctx: &mut ScreenContext<'_>| {
            on_ok(ctx);
            ctx.close();
        });
        panel.add_button("CancelButton", |ctx: &mut ScreenContext<'_>| ctx.close());

        Self {
            text_key: text_key.into(),
            panel,
        }
    }

    /// Text key of the dialog body.
    pub fn text_key(&self) -> &str {
        &self.text_key
    }
}

impl UiScreen for DialogBox {
    fn name(&self) -> &str {
        "dialog"
    }

    fn title(&self) -> Option<&str> {
        Some(&self.text_key)
    }

    fn buttons(&self) -> Option<&ButtonPanel> {
        Some(&self.panel)
    }

    fn buttons_mut(&mut self) -> Option<&mut ButtonPanel> {
        Some(&mut self.panel)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
