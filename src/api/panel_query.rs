use crate::core::{Point, Rect, ScreenPoint};

use super::{ChartEntity, DisplayPanel};

impl DisplayPanel {
    #[must_use]
    pub fn translate_screen_to_logical(&self, point: ScreenPoint) -> Point {
        self.core.scale.screen_to_logical(point)
    }

    #[must_use]
    pub fn translate_logical_to_screen(&self, point: Point) -> ScreenPoint {
        self.core.scale.logical_to_screen(point)
    }

    /// Maps a logical rectangle to screen pixels.
    #[must_use]
    pub fn scale_rect(&self, rect: Rect) -> Rect {
        self.core.scale.scale_rect(rect)
    }

    #[must_use]
    pub fn screen_data_area(&self) -> Option<Rect> {
        self.core.screen_data_area()
    }

    #[must_use]
    pub fn screen_data_area_at(&self, point: ScreenPoint) -> Option<Rect> {
        self.core.screen_data_area_at(point)
    }

    #[must_use]
    pub fn entity_at(&self, point: ScreenPoint) -> Option<&ChartEntity> {
        self.core.entity_at(point)
    }

    /// Tooltip of the entity under `point`, when tooltips are enabled.
    #[must_use]
    pub fn tooltip_text(&self, point: ScreenPoint) -> Option<String> {
        if !self.core.config.display_tooltips {
            return None;
        }
        self.core.entity_at(point)?.tooltip.clone()
    }

    #[must_use]
    pub fn is_domain_zoomable(&self) -> bool {
        self.core.is_domain_zoomable()
    }

    #[must_use]
    pub fn is_range_zoomable(&self) -> bool {
        self.core.is_range_zoomable()
    }
}
