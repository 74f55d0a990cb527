use tracing::{trace, warn};

use crate::api::{AxisSelector, PanelContext, resolve_wheel_zoom_factor};

use super::{GestureHandler, Modifiers, WheelEvent};

/// Auxiliary handler zooming both axes around the pointer on wheel rotation.
///
/// The zoom factor is read from the panel configuration on every event
/// unless one was set with [`WheelZoomHandler::with_zoom_factor`].
#[derive(Debug, Clone)]
pub struct WheelZoomHandler {
    id: String,
    modifier_mask: Modifiers,
    enabled: bool,
    zoom_factor: Option<f64>,
}

impl Default for WheelZoomHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl WheelZoomHandler {
    pub const DEFAULT_ID: &'static str = "wheel-zoom";

    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Self::DEFAULT_ID.to_owned(),
            modifier_mask: Modifiers::NONE,
            enabled: true,
            zoom_factor: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_modifier_mask(mut self, mask: Modifiers) -> Self {
        self.modifier_mask = mask;
        self
    }

    #[must_use]
    pub fn with_zoom_factor(mut self, zoom_factor: f64) -> Self {
        self.zoom_factor = Some(zoom_factor);
        self
    }

    /// Explicit factor, `None` when the panel setting applies.
    #[must_use]
    pub fn zoom_factor(&self) -> Option<f64> {
        self.zoom_factor
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl GestureHandler for WheelZoomHandler {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_live_handler(&self) -> bool {
        false
    }

    fn modifier_mask(&self) -> Modifiers {
        self.modifier_mask
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn mouse_wheel_moved(&mut self, event: &WheelEvent, panel: &mut PanelContext<'_>) {
        if !panel.is_mouse_wheel_enabled() || !panel.has_chart() {
            return;
        }
        let inside = panel
            .screen_data_area()
            .is_some_and(|area| area.contains(event.position.to_point()));
        if !inside {
            trace!(x = event.position.x, y = event.position.y, "wheel outside data area");
            return;
        }

        let zoom_factor = self.zoom_factor.unwrap_or_else(|| panel.wheel_zoom_factor());
        let factor = match resolve_wheel_zoom_factor(event.rotation, zoom_factor) {
            Ok(Some(factor)) => factor,
            Ok(None) => return,
            Err(err) => {
                warn!(error = %err, "invalid wheel zoom factor");
                return;
            }
        };

        if let Err(err) = panel.zoom_by_factor_at(AxisSelector::Both, factor, event.position, true) {
            warn!(error = %err, "failed to apply wheel zoom");
        }
    }
}
