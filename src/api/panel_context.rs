use crate::core::{Point, Rect, ScaleState, ScreenPoint};
use crate::error::ChartResult;
use crate::interaction::MouseEvent;

use super::panel_core::{ChartMouseKind, PanelCore};
use super::{
    AxisSelector, ChartEntity, InvalidationMask, InvalidationTopic, PlotOrientation,
};

/// Panel services available to gesture handlers during one event.
///
/// Handlers read the current scale, insets and data area through this view
/// and request zooms, pans and repaints; they never touch the render buffer.
pub struct PanelContext<'a> {
    core: &'a mut PanelCore,
    release_requested: bool,
}

impl<'a> PanelContext<'a> {
    pub(super) fn new(core: &'a mut PanelCore) -> Self {
        Self {
            core,
            release_requested: false,
        }
    }

    #[must_use]
    pub fn has_chart(&self) -> bool {
        self.core.chart.is_some()
    }

    #[must_use]
    pub fn scale_state(&self) -> ScaleState {
        self.core.scale
    }

    #[must_use]
    pub fn screen_to_logical(&self, point: ScreenPoint) -> Point {
        self.core.scale.screen_to_logical(point)
    }

    #[must_use]
    pub fn logical_to_screen(&self, point: Point) -> ScreenPoint {
        self.core.scale.logical_to_screen(point)
    }

    /// Data area of the last paint in screen pixels; `None` before the first
    /// paint or for an empty plot.
    #[must_use]
    pub fn screen_data_area(&self) -> Option<Rect> {
        self.core.screen_data_area()
    }

    #[must_use]
    pub fn screen_data_area_at(&self, point: ScreenPoint) -> Option<Rect> {
        self.core.screen_data_area_at(point)
    }

    #[must_use]
    pub fn orientation(&self) -> PlotOrientation {
        self.core.orientation()
    }

    #[must_use]
    pub fn is_domain_zoomable(&self) -> bool {
        self.core.is_domain_zoomable()
    }

    #[must_use]
    pub fn is_range_zoomable(&self) -> bool {
        self.core.is_range_zoomable()
    }

    #[must_use]
    pub fn is_domain_pannable(&self) -> bool {
        self.core.is_domain_pannable()
    }

    #[must_use]
    pub fn is_range_pannable(&self) -> bool {
        self.core.is_range_pannable()
    }

    #[must_use]
    pub fn zoom_trigger_distance(&self) -> f64 {
        self.core.config.zoom_trigger_distance
    }

    #[must_use]
    pub fn wheel_zoom_factor(&self) -> f64 {
        self.core.config.wheel_zoom_factor
    }

    #[must_use]
    pub fn is_mouse_wheel_enabled(&self) -> bool {
        self.core.config.mouse_wheel_enabled
    }

    #[must_use]
    pub fn context_menu_showing(&self) -> bool {
        self.core.context_menu_showing
    }

    /// Zooms to a screen-space selection. Returns `false` when nothing changed.
    pub fn zoom_to_screen_rect(&mut self, selection: Rect) -> bool {
        self.core.zoom_to_screen_rect(selection)
    }

    pub fn zoom_by_factor_at(
        &mut self,
        selector: AxisSelector,
        factor: f64,
        at: ScreenPoint,
        around_anchor: bool,
    ) -> ChartResult<bool> {
        self.core.zoom_by_factor(selector, factor, at, around_anchor)
    }

    pub fn restore_auto_bounds(&mut self) -> bool {
        self.core.restore_auto_bounds(AxisSelector::Both)
    }

    pub fn pan_by_screen_delta(&mut self, from: ScreenPoint, to: ScreenPoint) -> bool {
        self.core.pan_by_screen_delta(from, to)
    }

    /// Remembers the logical anchor used by later auto-bound restores.
    pub fn record_zoom_anchor(&mut self, anchor: Point) {
        self.core.zoom.record_anchor(anchor);
    }

    /// Sets or clears the selection overlay (screen pixels).
    pub fn set_zoom_rectangle(&mut self, rect: Option<Rect>) {
        if self.core.zoom_rectangle != rect {
            self.core.zoom_rectangle = rect;
            self.core
                .invalidate(InvalidationMask::overlay(InvalidationTopic::ZoomRectangle));
        }
    }

    #[must_use]
    pub fn zoom_rectangle(&self) -> Option<Rect> {
        self.core.zoom_rectangle
    }

    /// Sets the logical anchor passed to the next chart draw.
    pub fn set_anchor(&mut self, anchor: Option<Point>) {
        self.core.anchor = anchor;
        self.core
            .invalidate(InvalidationMask::full(InvalidationTopic::Anchor));
    }

    #[must_use]
    pub fn entity_at(&self, point: ScreenPoint) -> Option<&ChartEntity> {
        self.core.entity_at(point)
    }

    pub fn fire_chart_mouse_clicked(&self, event: &MouseEvent) {
        self.core.fire_chart_mouse(event, ChartMouseKind::Clicked);
    }

    pub fn fire_chart_mouse_moved(&self, event: &MouseEvent) {
        self.core.fire_chart_mouse(event, ChartMouseKind::Moved);
    }

    pub fn request_repaint(&mut self) {
        self.core
            .invalidate(InvalidationMask::overlay(InvalidationTopic::Explicit));
    }

    /// Gives up live ownership after the current event.
    pub fn release_live_handler(&mut self) {
        self.release_requested = true;
    }

    pub(crate) fn clear_release_request(&mut self) {
        self.release_requested = false;
    }

    pub(crate) fn take_release_request(&mut self) -> bool {
        std::mem::take(&mut self.release_requested)
    }
}
