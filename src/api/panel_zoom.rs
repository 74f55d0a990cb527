use tracing::trace;

use crate::core::{Rect, ScreenPoint};
use crate::error::ChartResult;

use super::{AxisSelector, DisplayPanel};

/// Menu-style zoom commands. Points are in screen pixels.
impl DisplayPanel {
    pub fn zoom_in_both(&mut self, at: ScreenPoint) -> ChartResult<bool> {
        self.zoom_with_configured_factor(AxisSelector::Both, self.core.config.zoom_in_factor, at)
    }

    pub fn zoom_in_domain(&mut self, at: ScreenPoint) -> ChartResult<bool> {
        self.zoom_with_configured_factor(AxisSelector::Domain, self.core.config.zoom_in_factor, at)
    }

    pub fn zoom_in_range(&mut self, at: ScreenPoint) -> ChartResult<bool> {
        self.zoom_with_configured_factor(AxisSelector::Range, self.core.config.zoom_in_factor, at)
    }

    pub fn zoom_out_both(&mut self, at: ScreenPoint) -> ChartResult<bool> {
        self.zoom_with_configured_factor(AxisSelector::Both, self.core.config.zoom_out_factor, at)
    }

    pub fn zoom_out_domain(&mut self, at: ScreenPoint) -> ChartResult<bool> {
        self.zoom_with_configured_factor(AxisSelector::Domain, self.core.config.zoom_out_factor, at)
    }

    pub fn zoom_out_range(&mut self, at: ScreenPoint) -> ChartResult<bool> {
        self.zoom_with_configured_factor(AxisSelector::Range, self.core.config.zoom_out_factor, at)
    }

    /// Scales the selected axes by an explicit factor (< 1 zooms in).
    pub fn zoom_by_factor(
        &mut self,
        selector: AxisSelector,
        factor: f64,
        at: ScreenPoint,
        around_anchor: bool,
    ) -> ChartResult<bool> {
        self.core.zoom_by_factor(selector, factor, at, around_anchor)
    }

    /// Zooms to a screen-space selection; zero-area selections are ignored.
    pub fn zoom(&mut self, selection: Rect) -> bool {
        self.core.zoom_to_screen_rect(selection)
    }

    /// Restores auto bounds on both axis groups with one notification.
    pub fn restore_auto_bounds(&mut self) -> bool {
        self.core.restore_auto_bounds(AxisSelector::Both)
    }

    pub fn restore_auto_domain_bounds(&mut self) -> bool {
        self.core.restore_auto_bounds(AxisSelector::Domain)
    }

    pub fn restore_auto_range_bounds(&mut self) -> bool {
        self.core.restore_auto_bounds(AxisSelector::Range)
    }

    fn zoom_with_configured_factor(
        &mut self,
        selector: AxisSelector,
        factor: f64,
        at: ScreenPoint,
    ) -> ChartResult<bool> {
        if self.core.chart.is_none() {
            trace!("menu zoom ignored, no chart");
            return Ok(false);
        }
        let around_anchor = self.core.config.zoom_around_anchor;
        self.core.zoom_by_factor(selector, factor, at, around_anchor)
    }
}
