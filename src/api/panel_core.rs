use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::{Insets, Point, Rect, ScaleState, ScreenPoint, Viewport, compute_draw_layout};
use crate::error::ChartResult;
use crate::interaction::{MouseEvent, TooltipDelayScope, TooltipDelays};
use crate::render::RenderBuffer;

use super::{
    AxisSelector, Chart, ChartChangeListener, ChartEntity, ChartMouseEvent, ChartMouseListener,
    ChartRenderingInfo, InvalidationMask, PanelConfig, PanelInvalidation, PlotOrientation,
    ZoomController, with_notify_suppressed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChartMouseKind {
    Clicked,
    Moved,
}

/// Internal panel state used by the public facade (`DisplayPanel`) and by
/// gesture handlers through `PanelContext`.
pub(super) struct PanelCore {
    pub(super) chart: Option<Box<dyn Chart>>,
    pub(super) config: PanelConfig,
    pub(super) size: Viewport,
    pub(super) insets: Insets,
    pub(super) scale: ScaleState,
    pub(super) info: ChartRenderingInfo,
    pub(super) buffer: RenderBuffer,
    pub(super) zoom: ZoomController,
    pub(super) zoom_rectangle: Option<Rect>,
    pub(super) anchor: Option<Point>,
    pub(super) invalidation: Rc<PanelInvalidation>,
    pub(super) context_menu_showing: bool,
    pub(super) chart_mouse_listeners: Vec<Rc<dyn ChartMouseListener>>,
    pub(super) tooltip_scope: TooltipDelayScope,
    pub(super) tooltip_manager: Rc<Cell<TooltipDelays>>,
}

impl PanelCore {
    pub(super) fn new(config: PanelConfig) -> Self {
        Self {
            chart: None,
            config,
            size: Viewport::default(),
            insets: Insets::default(),
            scale: ScaleState::default(),
            info: ChartRenderingInfo::new(),
            buffer: RenderBuffer::new(),
            zoom: ZoomController::new(),
            zoom_rectangle: None,
            anchor: None,
            invalidation: Rc::new(PanelInvalidation::new()),
            context_menu_showing: false,
            chart_mouse_listeners: Vec::new(),
            tooltip_scope: TooltipDelayScope::new(),
            tooltip_manager: Rc::new(Cell::new(TooltipDelays::default())),
        }
    }

    /// The listener registered on the hosted chart.
    pub(super) fn listener(&self) -> Rc<dyn ChartChangeListener> {
        self.invalidation.clone()
    }

    pub(super) fn invalidate(&self, mask: InvalidationMask) {
        self.invalidation.invalidate(mask);
    }

    /// Panel area left after insets, in screen pixels.
    pub(super) fn available_size(&self) -> Viewport {
        Viewport::new(
            self.size.width.saturating_sub(self.insets.horizontal()),
            self.size.height.saturating_sub(self.insets.vertical()),
        )
    }

    /// Empty panels keep the previous scale factors.
    pub(super) fn refresh_scale(&mut self) {
        let available = self.available_size();
        if available.width == 0 || available.height == 0 {
            self.scale = ScaleState::new(self.scale.scale, self.insets);
            return;
        }
        let layout = compute_draw_layout(
            f64::from(available.width),
            f64::from(available.height),
            self.config.draw_bounds,
        );
        self.scale = ScaleState::new(layout.scale, self.insets);
    }

    pub(super) fn orientation(&self) -> PlotOrientation {
        let Some(chart) = self.chart.as_deref() else {
            return PlotOrientation::default();
        };
        chart
            .zoomable()
            .map(|axes| axes.orientation())
            .or_else(|| chart.pannable().map(|axes| axes.orientation()))
            .unwrap_or_default()
    }

    pub(super) fn is_domain_zoomable(&self) -> bool {
        self.config.domain_zoomable
            && self
                .chart
                .as_deref()
                .and_then(|chart| chart.zoomable())
                .is_some_and(|axes| axes.is_domain_zoomable())
    }

    pub(super) fn is_range_zoomable(&self) -> bool {
        self.config.range_zoomable
            && self
                .chart
                .as_deref()
                .and_then(|chart| chart.zoomable())
                .is_some_and(|axes| axes.is_range_zoomable())
    }

    pub(super) fn is_domain_pannable(&self) -> bool {
        self.chart
            .as_deref()
            .and_then(|chart| chart.pannable())
            .is_some_and(|axes| axes.is_domain_pannable())
    }

    pub(super) fn is_range_pannable(&self) -> bool {
        self.chart
            .as_deref()
            .and_then(|chart| chart.pannable())
            .is_some_and(|axes| axes.is_range_pannable())
    }

    /// Data area of the last draw mapped to screen pixels.
    pub(super) fn screen_data_area(&self) -> Option<Rect> {
        let area = self.info.plot_info.data_area;
        (!area.is_empty()).then(|| self.scale.scale_rect(area))
    }

    /// Screen data area of the subplot under `point`, or of the whole plot.
    pub(super) fn screen_data_area_at(&self, point: ScreenPoint) -> Option<Rect> {
        let logical = self.scale.screen_to_logical(point);
        let area = self.info.plot_info.data_area_at(logical);
        (!area.is_empty()).then(|| self.scale.scale_rect(area))
    }

    pub(super) fn entity_at(&self, point: ScreenPoint) -> Option<&ChartEntity> {
        let logical = self.scale.screen_to_logical(point);
        self.info.entities.entity_at(logical.x, logical.y)
    }

    fn zoom_selector(&self, selector: AxisSelector) -> Option<AxisSelector> {
        selector.restrict(self.config.domain_zoomable, self.config.range_zoomable)
    }

    pub(super) fn zoom_by_factor(
        &mut self,
        selector: AxisSelector,
        factor: f64,
        at: ScreenPoint,
        around_anchor: bool,
    ) -> ChartResult<bool> {
        let Some(selector) = self.zoom_selector(selector) else {
            return Ok(false);
        };
        let anchor = self.scale.screen_to_logical(at);
        let Some(axes) = self.chart.as_deref_mut().and_then(|chart| chart.zoomable_mut()) else {
            trace!("zoom ignored, chart has no zoomable axes");
            return Ok(false);
        };
        self.zoom.zoom_by_factor(
            axes,
            &self.info.plot_info,
            selector,
            factor,
            anchor,
            around_anchor,
        )
    }

    /// Zooms to a screen-space selection; zero-area selections are ignored.
    pub(super) fn zoom_to_screen_rect(&mut self, selection: Rect) -> bool {
        if selection.is_empty() {
            return false;
        }
        let center = selection.center();
        let Some(data_area) =
            self.screen_data_area_at(ScreenPoint::new(center.x as i32, center.y as i32))
        else {
            return false;
        };
        let origin = ScreenPoint::new(
            selection.min_x().ceil() as i32,
            selection.min_y().ceil() as i32,
        );
        let anchor = self.scale.screen_to_logical(origin);

        let Some(selector) = self.zoom_selector(AxisSelector::Both) else {
            return false;
        };
        let Some(axes) = self.chart.as_deref_mut().and_then(|chart| chart.zoomable_mut()) else {
            return false;
        };
        self.zoom.zoom_to_rectangle(
            axes,
            &self.info.plot_info,
            selector,
            selection,
            data_area,
            anchor,
        )
    }

    /// Restores automatic bounds; only a chart without zoom capability refuses.
    pub(super) fn restore_auto_bounds(&mut self, selector: AxisSelector) -> bool {
        let Some(axes) = self.chart.as_deref_mut().and_then(|chart| chart.zoomable_mut()) else {
            return false;
        };
        self.zoom
            .restore_auto_bounds(axes, &self.info.plot_info, selector)
    }

    /// Pans by the screen delta between two drag points, one notification
    /// per call.
    pub(super) fn pan_by_screen_delta(&mut self, from: ScreenPoint, to: ScreenPoint) -> bool {
        let Some(data_area) = self.screen_data_area() else {
            return false;
        };
        let dx = f64::from(to.x - from.x);
        let dy = f64::from(to.y - from.y);
        let width_percent = -dx / data_area.width;
        let height_percent = dy / data_area.height;
        let source = self.scale.screen_to_logical(from);

        let Some(axes) = self.chart.as_deref_mut().and_then(|chart| chart.pannable_mut()) else {
            return false;
        };
        let (domain_percent, range_percent) = if axes.orientation().domain_is_horizontal() {
            (width_percent, height_percent)
        } else {
            (height_percent, width_percent)
        };
        let info = &self.info.plot_info;
        debug!(domain_percent, range_percent, "pan");
        with_notify_suppressed(axes, |axes| {
            if axes.is_domain_pannable() {
                axes.pan_domain_axes(domain_percent, info, source);
            }
            if axes.is_range_pannable() {
                axes.pan_range_axes(range_percent, info, source);
            }
        });
        true
    }

    pub(super) fn fire_chart_mouse(&self, event: &MouseEvent, kind: ChartMouseKind) {
        if self.chart_mouse_listeners.is_empty() {
            return;
        }
        let chart_event = ChartMouseEvent {
            screen: event.position,
            logical: self.scale.screen_to_logical(event.position),
            entity: self.entity_at(event.position).cloned(),
            modifiers: event.modifiers,
            click_count: event.click_count,
        };
        for listener in &self.chart_mouse_listeners {
            match kind {
                ChartMouseKind::Clicked => listener.chart_mouse_clicked(&chart_event),
                ChartMouseKind::Moved => listener.chart_mouse_moved(&chart_event),
            }
        }
    }
}
