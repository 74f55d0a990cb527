use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::api::PanelContext;
use crate::core::{Point, Rect, ScreenPoint};

use super::{GestureHandler, Modifiers, MouseEvent};

/// What a completed drag toward the upper-left does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReverseDragPolicy {
    /// Zoom to the dragged rectangle like any other direction.
    #[default]
    Zoom,
    /// Treat the drag as an undo-zoom request and restore auto bounds.
    RestoreAutoBounds,
}

/// In-progress selection, from press to release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingZoomRectangle {
    pub origin: ScreenPoint,
    /// Screen data area the selection is clamped to.
    pub data_area: Rect,
    pub current: Option<Rect>,
}

/// Drag-to-zoom live handler.
///
/// The selection starts on a press inside the data area and becomes visible
/// once the drag exceeds the panel's trigger distance along a zoomable axis.
/// On release the rectangle is turned into fractional axis bounds.
#[derive(Debug, Clone)]
pub struct ZoomRectangleHandler {
    id: String,
    modifier_mask: Modifiers,
    enabled: bool,
    reverse_drag_policy: ReverseDragPolicy,
    pending: Option<PendingZoomRectangle>,
}

impl Default for ZoomRectangleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoomRectangleHandler {
    pub const DEFAULT_ID: &'static str = "zoom";

    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Self::DEFAULT_ID.to_owned(),
            modifier_mask: Modifiers::NONE,
            enabled: true,
            reverse_drag_policy: ReverseDragPolicy::default(),
            pending: None,
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
    pub fn with_reverse_drag_policy(mut self, policy: ReverseDragPolicy) -> Self {
        self.reverse_drag_policy = policy;
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingZoomRectangle> {
        self.pending
    }

    fn abandon(&mut self, panel: &mut PanelContext<'_>) {
        self.pending = None;
        panel.set_zoom_rectangle(None);
        panel.release_live_handler();
    }
}

/// Horizontal/vertical zoom directions in screen terms.
fn zoom_directions(panel: &PanelContext<'_>) -> (bool, bool) {
    let domain_is_horizontal = panel.orientation().domain_is_horizontal();
    let domain = panel.is_domain_zoomable();
    let range = panel.is_range_zoomable();
    if domain_is_horizontal {
        (domain, range)
    } else {
        (range, domain)
    }
}

/// Rectangle between the origin and `current` (clamped to the data area).
/// A non-zoomable direction spans the whole data area.
fn selection_rect(
    pending: &PendingZoomRectangle,
    current: ScreenPoint,
    horizontal: bool,
    vertical: bool,
) -> Rect {
    let area = pending.data_area;
    let origin = pending.origin.to_point();
    let corner = area.clamp_point(current.to_point());
    let (x0, x1) = if horizontal {
        (origin.x, corner.x)
    } else {
        (area.min_x(), area.max_x())
    };
    let (y0, y1) = if vertical {
        (origin.y, corner.y)
    } else {
        (area.min_y(), area.max_y())
    };
    Rect::from_corners(Point::new(x0, y0), Point::new(x1, y1))
}

fn exceeds_trigger(
    origin: ScreenPoint,
    current: ScreenPoint,
    trigger: f64,
    horizontal: bool,
    vertical: bool,
) -> bool {
    let dx = f64::from((current.x - origin.x).abs());
    let dy = f64::from((current.y - origin.y).abs());
    (horizontal && dx >= trigger) || (vertical && dy >= trigger)
}

impl GestureHandler for ZoomRectangleHandler {
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

    fn mouse_pressed(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        if !panel.has_chart() {
            self.abandon(panel);
            return;
        }
        let Some(data_area) = panel
            .screen_data_area_at(event.position)
            .filter(|area| area.contains(event.position.to_point()))
        else {
            trace!(x = event.position.x, y = event.position.y, "press outside data area");
            self.abandon(panel);
            return;
        };

        self.pending = Some(PendingZoomRectangle {
            origin: event.position,
            data_area,
            current: None,
        });
        let anchor = panel.screen_to_logical(event.position);
        panel.record_zoom_anchor(anchor);
    }

    fn mouse_dragged(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        if !panel.has_chart() {
            self.abandon(panel);
            return;
        }
        let Some(mut pending) = self.pending else {
            return;
        };
        let (horizontal, vertical) = zoom_directions(panel);
        if !horizontal && !vertical {
            return;
        }
        if pending.current.is_none()
            && !exceeds_trigger(
                pending.origin,
                event.position,
                panel.zoom_trigger_distance(),
                horizontal,
                vertical,
            )
        {
            return;
        }

        let rect = selection_rect(&pending, event.position, horizontal, vertical);
        pending.current = Some(rect);
        self.pending = Some(pending);
        panel.set_zoom_rectangle(Some(rect));
    }

    fn mouse_released(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        let pending = self.pending.take();
        panel.set_zoom_rectangle(None);
        panel.release_live_handler();

        let Some(pending) = pending else {
            return;
        };
        if !panel.has_chart() {
            return;
        }
        let (horizontal, vertical) = zoom_directions(panel);
        let triggered = pending.current.is_some()
            && exceeds_trigger(
                pending.origin,
                event.position,
                panel.zoom_trigger_distance(),
                horizontal,
                vertical,
            );
        if !triggered {
            trace!("zoom drag below trigger distance, treated as click");
            return;
        }

        let reversed = (horizontal && event.position.x < pending.origin.x)
            || (vertical && event.position.y < pending.origin.y);
        if reversed && self.reverse_drag_policy == ReverseDragPolicy::RestoreAutoBounds {
            debug!("reverse zoom drag, restoring auto bounds");
            panel.restore_auto_bounds();
            return;
        }

        let selection = selection_rect(&pending, event.position, horizontal, vertical);
        if !panel.zoom_to_screen_rect(selection) {
            trace!("zoom rectangle produced no axis change");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PendingZoomRectangle, exceeds_trigger, selection_rect};
    use crate::core::{Rect, ScreenPoint};

    fn pending() -> PendingZoomRectangle {
        PendingZoomRectangle {
            origin: ScreenPoint::new(50, 50),
            data_area: Rect::new(0.0, 0.0, 200.0, 200.0),
            current: None,
        }
    }

    #[test]
    fn selection_is_clamped_to_data_area() {
        let rect = selection_rect(&pending(), ScreenPoint::new(400, 150), true, true);
        assert_eq!(rect, Rect::new(50.0, 50.0, 150.0, 100.0));
    }

    #[test]
    fn non_zoomable_direction_spans_data_area() {
        let rect = selection_rect(&pending(), ScreenPoint::new(150, 150), true, false);
        assert_eq!(rect, Rect::new(50.0, 0.0, 100.0, 200.0));
    }

    #[test]
    fn trigger_only_counts_zoomable_directions() {
        let origin = ScreenPoint::new(0, 0);
        assert!(!exceeds_trigger(origin, ScreenPoint::new(3, 30), 10.0, true, false));
        assert!(exceeds_trigger(origin, ScreenPoint::new(3, 30), 10.0, true, true));
        assert!(exceeds_trigger(origin, ScreenPoint::new(-10, 0), 10.0, true, false));
    }
}
