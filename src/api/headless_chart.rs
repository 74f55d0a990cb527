use std::any::Any;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Point, Rect};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RectPrimitive, RenderFrame};

use super::{
    AxisZoom, Chart, ChartChangeEvent, ChartChangeKind, ChartChangeListener, ChartEntity,
    ChartRenderingInfo, PannableAxes, Plot, PlotOrientation, PlotRenderingInfo, ZoomableAxes,
};

/// Numeric axis range with an automatic fallback range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadlessAxis {
    lower: f64,
    upper: f64,
    auto_lower: f64,
    auto_upper: f64,
    #[serde(default)]
    inverted: bool,
}

impl HeadlessAxis {
    pub fn new(lower: f64, upper: f64) -> ChartResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(ChartError::InvalidData(
                "axis range must be finite with lower < upper".to_owned(),
            ));
        }
        Ok(Self {
            lower,
            upper,
            auto_lower: lower,
            auto_upper: upper,
            inverted: false,
        })
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    #[must_use]
    pub fn auto_range(&self) -> (f64, f64) {
        (self.auto_lower, self.auto_upper)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.upper - self.lower
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    #[must_use]
    pub fn is_auto_range(&self) -> bool {
        self.lower == self.auto_lower && self.upper == self.auto_upper
    }

    /// Returns `true` when the range changed; invalid ranges are ignored.
    pub fn set_range(&mut self, lower: f64, upper: f64) -> bool {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            trace!(lower, upper, "axis range rejected");
            return false;
        }
        if lower == self.lower && upper == self.upper {
            return false;
        }
        self.lower = lower;
        self.upper = upper;
        true
    }

    pub fn restore_auto_range(&mut self) -> bool {
        self.set_range(self.auto_lower, self.auto_upper)
    }

    /// Resizes around the central value; a non-positive percent restores
    /// the automatic range.
    pub fn resize_range(&mut self, percent: f64) -> bool {
        if percent <= 0.0 {
            return self.restore_auto_range();
        }
        let center = (self.lower + self.upper) / 2.0;
        let half = self.length() * percent / 2.0;
        self.set_range(center - half, center + half)
    }

    /// Resizes keeping `anchor` at the same relative position.
    pub fn resize_range_around(&mut self, percent: f64, anchor: f64) -> bool {
        if percent <= 0.0 {
            return self.restore_auto_range();
        }
        let left = anchor - self.lower;
        let right = self.upper - anchor;
        self.set_range(anchor - left * percent, anchor + right * percent)
    }

    /// Keeps the `[lower_percent, upper_percent]` slice of the current range,
    /// measured from the visual start of the axis.
    pub fn zoom_range(&mut self, lower_percent: f64, upper_percent: f64) -> bool {
        let start = self.lower;
        let length = self.length();
        let (r0, r1) = if self.inverted {
            (
                start + length * (1.0 - upper_percent),
                start + length * (1.0 - lower_percent),
            )
        } else {
            (start + length * lower_percent, start + length * upper_percent)
        };
        if r1 > r0 {
            self.set_range(r0, r1)
        } else {
            false
        }
    }

    /// Shifts the range by `percent` of its length.
    pub fn pan(&mut self, percent: f64) -> bool {
        let adjustment = self.length() * percent;
        self.set_range(self.lower + adjustment, self.upper + adjustment)
    }

    /// Value at a logical coordinate inside `area`. Horizontal axes grow
    /// rightward, vertical axes grow upward.
    #[must_use]
    pub fn java2d_to_value(&self, coordinate: f64, area: Rect, along_x: bool) -> f64 {
        let (min, extent) = if along_x {
            (area.min_x(), area.width)
        } else {
            (area.min_y(), area.height)
        };
        if extent <= 0.0 {
            return (self.lower + self.upper) / 2.0;
        }
        let ratio = (coordinate - min) / extent;
        let from_start = if along_x { ratio } else { 1.0 - ratio };
        if self.inverted {
            self.upper - from_start * self.length()
        } else {
            self.lower + from_start * self.length()
        }
    }
}

/// Space reserved around the data area for axes, in logical pixels.
const AXIS_MARGINS: (f64, f64, f64, f64) = (40.0, 10.0, 10.0, 30.0);

/// Self-contained two-axis chart for headless hosts and tests.
///
/// Draws a plot background and data-area frame, records its areas and
/// entities, and implements the zoom and pan capabilities with change
/// notification that honors the notify flag.
pub struct HeadlessChart {
    domain: HeadlessAxis,
    range: HeadlessAxis,
    orientation: PlotOrientation,
    notify: bool,
    listeners: Vec<Rc<dyn ChartChangeListener>>,
    domain_zoomable: bool,
    range_zoomable: bool,
    domain_pannable: bool,
    range_pannable: bool,
    zoom_capable: bool,
    pan_capable: bool,
    subplot_count: usize,
    entities: Vec<ChartEntity>,
    background: Color,
    frame_color: Color,
    draw_count: u64,
    notifications_fired: u64,
    last_anchor: Option<Point>,
    last_area: Option<Rect>,
}

impl std::fmt::Debug for HeadlessChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessChart")
            .field("domain", &self.domain)
            .field("range", &self.range)
            .field("orientation", &self.orientation)
            .field("notify", &self.notify)
            .field("listeners", &self.listeners.len())
            .field("draw_count", &self.draw_count)
            .field("notifications_fired", &self.notifications_fired)
            .finish_non_exhaustive()
    }
}

impl HeadlessChart {
    #[must_use]
    pub fn new(domain: HeadlessAxis, range: HeadlessAxis) -> Self {
        Self {
            domain,
            range,
            orientation: PlotOrientation::Vertical,
            notify: true,
            listeners: Vec::new(),
            domain_zoomable: true,
            range_zoomable: true,
            domain_pannable: true,
            range_pannable: true,
            zoom_capable: true,
            pan_capable: true,
            subplot_count: 0,
            entities: Vec::new(),
            background: Color::rgb(1.0, 1.0, 1.0),
            frame_color: Color::rgb(0.5, 0.5, 0.5),
            draw_count: 0,
            notifications_fired: 0,
            last_anchor: None,
            last_area: None,
        }
    }

    /// Domain `[0, 100]`, range `[0, 50]`.
    pub fn with_default_axes() -> ChartResult<Self> {
        Ok(Self::new(HeadlessAxis::new(0.0, 100.0)?, HeadlessAxis::new(0.0, 50.0)?))
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: PlotOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_zoomable(mut self, domain: bool, range: bool) -> Self {
        self.domain_zoomable = domain;
        self.range_zoomable = range;
        self
    }

    #[must_use]
    pub fn with_pannable(mut self, domain: bool, range: bool) -> Self {
        self.domain_pannable = domain;
        self.range_pannable = range;
        self
    }

    /// Hides the zoom and pan capabilities entirely.
    #[must_use]
    pub fn without_axis_capabilities(mut self) -> Self {
        self.zoom_capable = false;
        self.pan_capable = false;
        self
    }

    /// Splits the data area into `count` stacked subplots sharing the axes.
    #[must_use]
    pub fn with_subplots(mut self, count: usize) -> Self {
        self.subplot_count = count;
        self
    }

    #[must_use]
    pub fn with_entity(mut self, entity: ChartEntity) -> Self {
        self.entities.push(entity);
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    #[must_use]
    pub fn domain_axis(&self) -> &HeadlessAxis {
        &self.domain
    }

    #[must_use]
    pub fn range_axis(&self) -> &HeadlessAxis {
        &self.range
    }

    pub fn set_domain_range(&mut self, lower: f64, upper: f64) -> bool {
        let changed = self.domain.set_range(lower, upper);
        if changed {
            self.fire(ChartChangeKind::AxisRange);
        }
        changed
    }

    pub fn set_range_range(&mut self, lower: f64, upper: f64) -> bool {
        let changed = self.range.set_range(lower, upper);
        if changed {
            self.fire(ChartChangeKind::AxisRange);
        }
        changed
    }

    /// Signals a data change to listeners.
    pub fn notify_data_changed(&mut self) {
        self.fire(ChartChangeKind::DataUpdated);
    }

    #[must_use]
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    /// Change events delivered to listeners so far.
    #[must_use]
    pub fn notifications_fired(&self) -> u64 {
        self.notifications_fired
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn last_anchor(&self) -> Option<Point> {
        self.last_anchor
    }

    #[must_use]
    pub fn last_area(&self) -> Option<Rect> {
        self.last_area
    }

    /// Data area for a chart area, after axis margins.
    #[must_use]
    pub fn data_area_for(area: Rect) -> Rect {
        let (left, top, right, bottom) = AXIS_MARGINS;
        Rect::new(
            area.x + left,
            area.y + top,
            (area.width - left - right).max(0.0),
            (area.height - top - bottom).max(0.0),
        )
    }

    fn fire(&mut self, kind: ChartChangeKind) {
        if !self.notify {
            return;
        }
        self.notifications_fired += 1;
        let event = ChartChangeEvent::new(kind);
        for listener in &self.listeners {
            listener.chart_changed(&event);
        }
    }

    fn subplot_infos(&self, data_area: Rect) -> Vec<PlotRenderingInfo> {
        if self.subplot_count == 0 || data_area.is_empty() {
            return Vec::new();
        }
        let height = data_area.height / self.subplot_count as f64;
        (0..self.subplot_count)
            .map(|index| {
                let area = Rect::new(
                    data_area.x,
                    data_area.y + height * index as f64,
                    data_area.width,
                    height,
                );
                PlotRenderingInfo::new(area, area)
            })
            .collect()
    }

    fn zoom_axis(
        axis: &mut HeadlessAxis,
        zoom: AxisZoom,
        area: Rect,
        coordinate: f64,
        along_x: bool,
    ) -> bool {
        match zoom {
            AxisZoom::Factor {
                factor,
                around_anchor: true,
            } => {
                let anchor = axis.java2d_to_value(coordinate, area, along_x);
                axis.resize_range_around(factor, anchor)
            }
            AxisZoom::Factor {
                factor,
                around_anchor: false,
            } => axis.resize_range(factor),
            AxisZoom::Bounds { lower, upper } => axis.zoom_range(lower, upper),
            AxisZoom::ResetAuto => axis.restore_auto_range(),
        }
    }
}

impl Chart for HeadlessChart {
    fn draw(
        &mut self,
        frame: &mut RenderFrame,
        area: Rect,
        anchor: Option<Point>,
        info: Option<&mut ChartRenderingInfo>,
    ) -> ChartResult<()> {
        self.draw_count += 1;
        self.last_anchor = anchor;
        self.last_area = Some(area);

        let data_area = Self::data_area_for(area);
        frame.push_rect(RectPrimitive::filled(area, self.background));
        if !data_area.is_empty() {
            frame.push_rect(RectPrimitive::outlined(data_area, self.frame_color, 1.0));
        }

        if let Some(info) = info {
            info.chart_area = area;
            info.plot_info = PlotRenderingInfo {
                plot_area: area,
                data_area,
                subplots: self.subplot_infos(data_area),
            };
            for entity in &self.entities {
                info.entities.add(entity.clone());
            }
        }
        Ok(())
    }

    fn add_change_listener(&mut self, listener: Rc<dyn ChartChangeListener>) {
        self.listeners.push(listener);
    }

    fn remove_change_listener(&mut self, listener: &Rc<dyn ChartChangeListener>) {
        self.listeners
            .retain(|registered| !Rc::ptr_eq(registered, listener));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn zoomable(&self) -> Option<&dyn ZoomableAxes> {
        self.zoom_capable.then_some(self as &dyn ZoomableAxes)
    }

    fn zoomable_mut(&mut self) -> Option<&mut dyn ZoomableAxes> {
        if self.zoom_capable {
            Some(self)
        } else {
            None
        }
    }

    fn pannable(&self) -> Option<&dyn PannableAxes> {
        self.pan_capable.then_some(self as &dyn PannableAxes)
    }

    fn pannable_mut(&mut self) -> Option<&mut dyn PannableAxes> {
        if self.pan_capable {
            Some(self)
        } else {
            None
        }
    }
}

impl Plot for HeadlessChart {
    fn orientation(&self) -> PlotOrientation {
        self.orientation
    }

    fn is_notify(&self) -> bool {
        self.notify
    }

    fn set_notify(&mut self, notify: bool) {
        self.notify = notify;
        if notify {
            self.fire(ChartChangeKind::General);
        }
    }
}

impl ZoomableAxes for HeadlessChart {
    fn is_domain_zoomable(&self) -> bool {
        self.domain_zoomable
    }

    fn is_range_zoomable(&self) -> bool {
        self.range_zoomable
    }

    fn zoom_domain_axes(&mut self, zoom: AxisZoom, info: &PlotRenderingInfo, source: Point) {
        let along_x = self.orientation.domain_is_horizontal();
        let coordinate = if along_x { source.x } else { source.y };
        if Self::zoom_axis(&mut self.domain, zoom, info.data_area, coordinate, along_x) {
            self.fire(ChartChangeKind::AxisRange);
        }
    }

    fn zoom_range_axes(&mut self, zoom: AxisZoom, info: &PlotRenderingInfo, source: Point) {
        let along_x = !self.orientation.domain_is_horizontal();
        let coordinate = if along_x { source.x } else { source.y };
        if Self::zoom_axis(&mut self.range, zoom, info.data_area, coordinate, along_x) {
            self.fire(ChartChangeKind::AxisRange);
        }
    }
}

impl PannableAxes for HeadlessChart {
    fn is_domain_pannable(&self) -> bool {
        self.domain_pannable
    }

    fn is_range_pannable(&self) -> bool {
        self.range_pannable
    }

    fn pan_domain_axes(&mut self, percent: f64, _info: &PlotRenderingInfo, _source: Point) {
        let percent = if self.domain.is_inverted() { -percent } else { percent };
        if self.domain.pan(percent) {
            self.fire(ChartChangeKind::AxisRange);
        }
    }

    fn pan_range_axes(&mut self, percent: f64, _info: &PlotRenderingInfo, _source: Point) {
        let percent = if self.range.is_inverted() { -percent } else { percent };
        if self.range.pan(percent) {
            self.fire(ChartChangeKind::AxisRange);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::HeadlessAxis;
    use crate::core::Rect;

    #[test]
    fn resize_range_keeps_center() {
        let mut axis = HeadlessAxis::new(0.0, 100.0).expect("axis");
        assert!(axis.resize_range(0.5));
        assert_eq!(axis.range(), (25.0, 75.0));
    }

    #[test]
    fn resize_around_anchor_keeps_anchor_fixed() {
        let mut axis = HeadlessAxis::new(0.0, 100.0).expect("axis");
        assert!(axis.resize_range_around(0.5, 20.0));
        assert_eq!(axis.range(), (10.0, 60.0));
    }

    #[test]
    fn non_positive_resize_restores_auto_range() {
        let mut axis = HeadlessAxis::new(0.0, 100.0).expect("axis");
        axis.set_range(10.0, 20.0);
        assert!(axis.resize_range(0.0));
        assert!(axis.is_auto_range());
    }

    #[test]
    fn zoom_range_respects_inversion() {
        let mut axis = HeadlessAxis::new(0.0, 100.0).expect("axis");
        assert!(axis.zoom_range(0.25, 0.5));
        assert_eq!(axis.range(), (25.0, 50.0));

        let mut inverted = HeadlessAxis::new(0.0, 100.0)
            .expect("axis")
            .with_inverted(true);
        assert!(inverted.zoom_range(0.25, 0.5));
        assert_eq!(inverted.range(), (50.0, 75.0));
    }

    #[test]
    fn empty_zoom_slice_is_ignored() {
        let mut axis = HeadlessAxis::new(0.0, 100.0).expect("axis");
        assert!(!axis.zoom_range(0.5, 0.5));
        assert_eq!(axis.range(), (0.0, 100.0));
    }

    #[test]
    fn java2d_to_value_maps_both_directions() {
        let axis = HeadlessAxis::new(0.0, 100.0).expect("axis");
        let area = Rect::new(10.0, 10.0, 200.0, 100.0);
        assert_relative_eq!(axis.java2d_to_value(110.0, area, true), 50.0);
        assert_relative_eq!(axis.java2d_to_value(110.0, area, false), 0.0);
        assert_relative_eq!(axis.java2d_to_value(10.0, area, false), 100.0);
    }

    #[test]
    fn pan_shifts_by_length_fraction() {
        let mut axis = HeadlessAxis::new(0.0, 100.0).expect("axis");
        assert!(axis.pan(0.1));
        assert_relative_eq!(axis.range().0, 10.0);
        assert_relative_eq!(axis.range().1, 110.0);
    }

    #[test]
    fn rejects_invalid_axis() {
        assert!(HeadlessAxis::new(1.0, 1.0).is_err());
        assert!(HeadlessAxis::new(f64::NAN, 1.0).is_err());
    }
}
