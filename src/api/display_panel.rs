use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::{Insets, Point, Rect, ScaleState, Viewport};
use crate::error::ChartResult;
use crate::interaction::{
    ClickDispatchHandler, GestureArbiter, GestureHandler, PanHandler, TooltipDelays,
    WheelZoomHandler, ZoomRectangleHandler,
};
use crate::render::RenderBuffer;

use super::panel_core::PanelCore;
use super::{
    Chart, ChartMouseListener, ChartRenderingInfo, InvalidationMask, InvalidationTopic,
    PanelConfig,
};

/// Interactive host for one chart.
///
/// `DisplayPanel` owns the off-screen buffer, the scale state and the
/// gesture handlers. Hosts forward input events, call `paint` when
/// `needs_repaint` reports pending work, and resize it with `set_size`.
pub struct DisplayPanel {
    pub(super) arbiter: GestureArbiter,
    pub(super) core: PanelCore,
}

impl std::fmt::Debug for DisplayPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayPanel")
            .field("arbiter", &self.arbiter)
            .field("has_chart", &self.core.chart.is_some())
            .field("size", &self.core.size)
            .field("config", &self.core.config)
            .finish_non_exhaustive()
    }
}

impl DisplayPanel {
    /// Creates an empty panel with the default zoom, pan, wheel and click
    /// handlers installed.
    pub fn new(config: PanelConfig) -> ChartResult<Self> {
        let mut panel = Self::without_handlers(config)?;
        panel.add_handler(Box::new(ZoomRectangleHandler::new()))?;
        panel.add_handler(Box::new(PanHandler::new()))?;
        panel.add_handler(Box::new(WheelZoomHandler::new()))?;
        panel.add_handler(Box::new(ClickDispatchHandler::new()))?;
        Ok(panel)
    }

    /// Creates a panel with an empty handler registry.
    pub fn without_handlers(config: PanelConfig) -> ChartResult<Self> {
        config.validate()?;
        warn_unordered_bounds(&config);
        Ok(Self {
            arbiter: GestureArbiter::new(),
            core: PanelCore::new(config),
        })
    }

    #[must_use]
    pub fn with_chart(mut self, chart: Box<dyn Chart>) -> Self {
        self.set_chart(Some(chart));
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: Viewport) -> Self {
        self.set_size(size);
        self
    }

    #[must_use]
    pub fn chart(&self) -> Option<&dyn Chart> {
        self.core.chart.as_deref()
    }

    pub fn chart_mut(&mut self) -> Option<&mut dyn Chart> {
        match self.core.chart.as_mut() {
            Some(chart) => Some(chart.as_mut()),
            None => None,
        }
    }

    /// The hosted chart downcast to its concrete type.
    #[must_use]
    pub fn chart_as<T: Chart + 'static>(&self) -> Option<&T> {
        self.chart()?.as_any().downcast_ref::<T>()
    }

    pub fn chart_as_mut<T: Chart + 'static>(&mut self) -> Option<&mut T> {
        self.chart_mut()?.as_any_mut().downcast_mut::<T>()
    }

    /// Replaces the hosted chart, moving the change listener across, and
    /// returns the previous one.
    pub fn set_chart(&mut self, chart: Option<Box<dyn Chart>>) -> Option<Box<dyn Chart>> {
        let listener = self.core.listener();
        let mut previous = std::mem::replace(&mut self.core.chart, chart);
        if let Some(old) = previous.as_deref_mut() {
            old.remove_change_listener(&listener);
        }
        if let Some(new) = self.core.chart.as_deref_mut() {
            new.add_change_listener(listener);
        }
        self.core.info.clear();
        self.core.zoom_rectangle = None;
        self.core.anchor = None;
        debug!(has_chart = self.core.chart.is_some(), "panel chart replaced");
        self.core
            .invalidate(InvalidationMask::full(InvalidationTopic::ChartReplaced));
        previous
    }

    pub fn take_chart(&mut self) -> Option<Box<dyn Chart>> {
        self.set_chart(None)
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.core.config
    }

    /// Installs a new configuration and hands it to every registered
    /// handler, so the pan mask and wheel factor take effect on the next
    /// gesture unless a handler pinned its own.
    pub fn set_config(&mut self, config: PanelConfig) -> ChartResult<()> {
        config.validate()?;
        warn_unordered_bounds(&config);
        if !config.display_tooltips {
            self.core.tooltip_scope.exit(&self.core.tooltip_manager);
        }
        self.arbiter.config_changed(&config);
        self.core.config = config;
        self.core.refresh_scale();
        self.core
            .invalidate(InvalidationMask::full(InvalidationTopic::Config));
        Ok(())
    }

    #[must_use]
    pub fn size(&self) -> Viewport {
        self.core.size
    }

    /// Sets the full panel size in screen pixels, insets included.
    pub fn set_size(&mut self, size: Viewport) {
        if self.core.size == size {
            return;
        }
        self.core.size = size;
        self.core.refresh_scale();
        self.core
            .invalidate(InvalidationMask::full(InvalidationTopic::Resize));
    }

    #[must_use]
    pub fn insets(&self) -> Insets {
        self.core.insets
    }

    pub fn set_insets(&mut self, insets: Insets) {
        if self.core.insets == insets {
            return;
        }
        self.core.insets = insets;
        self.core.refresh_scale();
        self.core
            .invalidate(InvalidationMask::full(InvalidationTopic::Resize));
    }

    #[must_use]
    pub fn scale_state(&self) -> ScaleState {
        self.core.scale
    }

    #[must_use]
    pub fn rendering_info(&self) -> &ChartRenderingInfo {
        &self.core.info
    }

    #[must_use]
    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.core.buffer
    }

    /// Forces the next paint to redraw the chart.
    pub fn mark_dirty(&mut self) {
        self.core.buffer.mark_dirty();
        self.core
            .invalidate(InvalidationMask::full(InvalidationTopic::Explicit));
    }

    #[must_use]
    pub fn needs_repaint(&self) -> bool {
        !self.core.invalidation.pending().is_none()
    }

    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationMask {
        self.core.invalidation.pending()
    }

    /// Change events received from the hosted chart.
    #[must_use]
    pub fn chart_change_count(&self) -> u64 {
        self.core.invalidation.chart_events()
    }

    #[must_use]
    pub fn zoom_rectangle(&self) -> Option<Rect> {
        self.core.zoom_rectangle
    }

    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.core.anchor
    }

    pub fn set_anchor(&mut self, anchor: Option<Point>) {
        self.core.anchor = anchor;
        self.core
            .invalidate(InvalidationMask::full(InvalidationTopic::Anchor));
    }

    /// Registers a handler; it is first handed the current configuration.
    pub fn add_handler(&mut self, mut handler: Box<dyn GestureHandler>) -> ChartResult<()> {
        handler.config_changed(&self.core.config);
        self.arbiter.add_handler(handler)
    }

    pub fn remove_handler(&mut self, id: &str) -> Option<Box<dyn GestureHandler>> {
        self.arbiter.remove_handler(id)
    }

    #[must_use]
    pub fn handler(&self, id: &str) -> Option<&dyn GestureHandler> {
        self.arbiter.handler(id)
    }

    #[must_use]
    pub fn gesture_arbiter(&self) -> &GestureArbiter {
        &self.arbiter
    }

    #[must_use]
    pub fn live_handler_id(&self) -> Option<&str> {
        self.arbiter.live_handler_id()
    }

    pub fn clear_live_handler(&mut self) {
        self.arbiter.clear_live_handler();
    }

    #[must_use]
    pub fn context_menu_showing(&self) -> bool {
        self.core.context_menu_showing
    }

    /// While set, drag events are not forwarded to handlers.
    pub fn set_context_menu_showing(&mut self, showing: bool) {
        self.core.context_menu_showing = showing;
    }

    pub fn add_chart_mouse_listener(&mut self, listener: Rc<dyn ChartMouseListener>) {
        self.core.chart_mouse_listeners.push(listener);
    }

    pub fn remove_chart_mouse_listener(&mut self, listener: &Rc<dyn ChartMouseListener>) {
        self.core
            .chart_mouse_listeners
            .retain(|registered| !Rc::ptr_eq(registered, listener));
    }

    /// Shares the tooltip timing that enter/exit events save and restore.
    pub fn set_tooltip_manager(&mut self, manager: Rc<Cell<TooltipDelays>>) {
        self.core.tooltip_scope.exit(&self.core.tooltip_manager);
        self.core.tooltip_manager = manager;
    }

    #[must_use]
    pub fn tooltip_manager(&self) -> Rc<Cell<TooltipDelays>> {
        Rc::clone(&self.core.tooltip_manager)
    }
}

fn warn_unordered_bounds(config: &PanelConfig) {
    if !config.draw_bounds.is_ordered() {
        warn!(
            min_width = config.draw_bounds.min_width,
            min_height = config.draw_bounds.min_height,
            max_width = config.draw_bounds.max_width,
            max_height = config.draw_bounds.max_height,
            "draw bounds minimum exceeds maximum"
        );
    }
}
