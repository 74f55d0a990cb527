mod chart_model;
mod chart_mouse;
mod display_panel;
mod headless_chart;
mod invalidation;
mod panel_config;
mod panel_context;
mod panel_core;
mod panel_input;
mod panel_paint;
mod panel_query;
mod panel_zoom;
mod rendering_info;
mod wheel_zoom_factor_resolver;
mod zoom_controller;
mod zoom_fraction_resolver;

pub use chart_model::{
    AxisZoom, Chart, ChartChangeEvent, ChartChangeKind, ChartChangeListener, PannableAxes, Plot,
    PlotOrientation, ZoomableAxes, with_notify_suppressed,
};
pub use chart_mouse::{ChartMouseEvent, ChartMouseListener};
pub use display_panel::DisplayPanel;
pub use headless_chart::{HeadlessAxis, HeadlessChart};
pub use invalidation::{
    InvalidationLevel, InvalidationMask, InvalidationTopic, InvalidationTopics, PanelInvalidation,
};
pub use panel_config::PanelConfig;
pub use panel_context::PanelContext;
pub use panel_paint::PaintOutcome;
pub use rendering_info::{ChartEntity, ChartRenderingInfo, EntityCollection, PlotRenderingInfo};
pub use wheel_zoom_factor_resolver::resolve_wheel_zoom_factor;
pub use zoom_controller::{AxisRangeRequest, AxisSelector, ZoomController, apply_requests};
pub use zoom_fraction_resolver::ZoomFractions;
