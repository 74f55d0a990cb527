use std::any::Any;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{Point, Rect};
use crate::error::ChartResult;
use crate::render::RenderFrame;

use super::{ChartRenderingInfo, PlotRenderingInfo};

/// Which screen direction the domain axis runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlotOrientation {
    /// Domain along screen X, range along screen Y.
    #[default]
    Vertical,
    /// Domain along screen Y, range along screen X.
    Horizontal,
}

impl PlotOrientation {
    #[must_use]
    pub const fn domain_is_horizontal(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// Range change requested from an axis group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisZoom {
    /// Scale the visible length by `factor` (< 1 zooms in), optionally keeping
    /// the value under the anchor fixed.
    Factor { factor: f64, around_anchor: bool },
    /// Keep the `[lower, upper]` fraction of the current range.
    Bounds { lower: f64, upper: f64 },
    /// Recompute automatic bounds.
    ResetAuto,
}

/// Plot-level state shared by the zoom and pan capabilities.
pub trait Plot {
    fn orientation(&self) -> PlotOrientation;

    fn is_notify(&self) -> bool;

    /// Re-enabling notification fires one change event.
    fn set_notify(&mut self, notify: bool);
}

pub trait ZoomableAxes: Plot {
    fn is_domain_zoomable(&self) -> bool;

    fn is_range_zoomable(&self) -> bool;

    fn zoom_domain_axes(&mut self, zoom: AxisZoom, info: &PlotRenderingInfo, source: Point);

    fn zoom_range_axes(&mut self, zoom: AxisZoom, info: &PlotRenderingInfo, source: Point);
}

pub trait PannableAxes: Plot {
    fn is_domain_pannable(&self) -> bool;

    fn is_range_pannable(&self) -> bool;

    /// Shifts the domain by `percent` of its current length.
    fn pan_domain_axes(&mut self, percent: f64, info: &PlotRenderingInfo, source: Point);

    fn pan_range_axes(&mut self, percent: f64, info: &PlotRenderingInfo, source: Point);
}

/// Runs `apply` with change notification switched off, then restores the
/// previous flag so at most one event fires for the whole batch.
pub fn with_notify_suppressed<P, R>(plot: &mut P, apply: impl FnOnce(&mut P) -> R) -> R
where
    P: Plot + ?Sized,
{
    let saved = plot.is_notify();
    plot.set_notify(false);
    let result = apply(&mut *plot);
    plot.set_notify(saved);
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartChangeKind {
    General,
    AxisRange,
    DataUpdated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartChangeEvent {
    pub kind: ChartChangeKind,
}

impl ChartChangeEvent {
    #[must_use]
    pub const fn new(kind: ChartChangeKind) -> Self {
        Self { kind }
    }
}

pub trait ChartChangeListener {
    fn chart_changed(&self, event: &ChartChangeEvent);
}

/// Renderable chart hosted by a [`super::DisplayPanel`].
///
/// `draw` appends primitives in logical coordinates; when `info` is present
/// it must be filled with the chart and data areas and the entities drawn.
/// Zoom and pan are optional capabilities exposed through the accessor
/// methods.
pub trait Chart {
    fn draw(
        &mut self,
        frame: &mut RenderFrame,
        area: Rect,
        anchor: Option<Point>,
        info: Option<&mut ChartRenderingInfo>,
    ) -> ChartResult<()>;

    fn add_change_listener(&mut self, listener: Rc<dyn ChartChangeListener>);

    fn remove_change_listener(&mut self, listener: &Rc<dyn ChartChangeListener>);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn zoomable(&self) -> Option<&dyn ZoomableAxes> {
        None
    }

    fn zoomable_mut(&mut self) -> Option<&mut dyn ZoomableAxes> {
        None
    }

    fn pannable(&self) -> Option<&dyn PannableAxes> {
        None
    }

    fn pannable_mut(&mut self) -> Option<&mut dyn PannableAxes> {
        None
    }
}
