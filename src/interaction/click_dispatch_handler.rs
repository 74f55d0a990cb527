use tracing::trace;

use crate::api::PanelContext;
use crate::core::ScreenPoint;

use super::{GestureHandler, Modifiers, MouseEvent};

/// Auxiliary handler turning raw clicks and moves into chart mouse events.
///
/// A click whose pointer travelled more than [`Self::CLICK_TOLERANCE`] pixels
/// since the press is a drag and is not dispatched.
#[derive(Debug, Clone)]
pub struct ClickDispatchHandler {
    id: String,
    press: Option<ScreenPoint>,
}

impl Default for ClickDispatchHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickDispatchHandler {
    pub const DEFAULT_ID: &'static str = "click-dispatch";
    pub const CLICK_TOLERANCE: i32 = 2;

    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Self::DEFAULT_ID.to_owned(),
            press: None,
        }
    }
}

impl GestureHandler for ClickDispatchHandler {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_live_handler(&self) -> bool {
        false
    }

    fn modifier_mask(&self) -> Modifiers {
        Modifiers::NONE
    }

    fn mouse_pressed(&mut self, event: &MouseEvent, _panel: &mut PanelContext<'_>) {
        self.press = Some(event.position);
    }

    fn mouse_clicked(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        if let Some(press) = self.press.take() {
            let moved = (event.position.x - press.x).abs() > Self::CLICK_TOLERANCE
                || (event.position.y - press.y).abs() > Self::CLICK_TOLERANCE;
            if moved {
                trace!("pointer moved between press and release, click ignored");
                return;
            }
        }
        if !panel.has_chart() {
            return;
        }
        let anchor = panel.screen_to_logical(event.position);
        panel.set_anchor(Some(anchor));
        panel.fire_chart_mouse_clicked(event);
    }

    fn mouse_moved(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        if panel.has_chart() {
            panel.fire_chart_mouse_moved(event);
        }
    }
}
