use tracing::trace;

use crate::api::{PanelConfig, PanelContext};
use crate::core::ScreenPoint;

use super::{GestureHandler, Modifiers, MouseEvent};

/// Drag-to-pan live handler, selected when the pan modifier is held.
///
/// Without an explicit mask the handler follows the panel's
/// `pan_modifier_mask` setting.
#[derive(Debug, Clone)]
pub struct PanHandler {
    id: String,
    modifier_mask: Modifiers,
    fixed_mask: bool,
    enabled: bool,
    last: Option<ScreenPoint>,
}

impl Default for PanHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PanHandler {
    pub const DEFAULT_ID: &'static str = "pan";

    /// Uses Control, or Alt on macOS, until a panel configuration says
    /// otherwise.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Self::DEFAULT_ID.to_owned(),
            modifier_mask: Modifiers::platform_pan_mask(),
            fixed_mask: false,
            enabled: true,
            last: None,
        }
    }

    /// Pins the mask; panel configuration changes no longer touch it.
    #[must_use]
    pub fn with_modifier_mask(mask: Modifiers) -> Self {
        Self {
            modifier_mask: mask,
            fixed_mask: true,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.last.is_some()
    }
}

impl GestureHandler for PanHandler {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_live_handler(&self) -> bool {
        true
    }

    fn modifier_mask(&self) -> Modifiers {
        self.modifier_mask
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn config_changed(&mut self, config: &PanelConfig) {
        if !self.fixed_mask {
            self.modifier_mask = config.pan_modifier_mask;
        }
    }

    fn mouse_pressed(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        let pannable = panel.is_domain_pannable() || panel.is_range_pannable();
        let inside = panel
            .screen_data_area()
            .is_some_and(|area| area.contains(event.position.to_point()));
        if !pannable || !inside {
            trace!(pannable, inside, "pan gesture not started");
            self.last = None;
            panel.release_live_handler();
            return;
        }
        self.last = Some(event.position);
    }

    fn mouse_dragged(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        let Some(last) = self.last else {
            return;
        };
        if last == event.position {
            return;
        }
        if !panel.pan_by_screen_delta(last, event.position) {
            trace!("pan step ignored");
        }
        self.last = Some(event.position);
    }

    fn mouse_released(&mut self, _event: &MouseEvent, panel: &mut PanelContext<'_>) {
        self.last = None;
        panel.release_live_handler();
    }
}
