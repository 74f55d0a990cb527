use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{Point, Rect};
use crate::error::{ChartError, ChartResult};

use super::zoom_fraction_resolver::resolve_zoom_fractions;
use super::{AxisZoom, PlotRenderingInfo, ZoomableAxes, with_notify_suppressed};

/// Axis group targeted by a zoom request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisSelector {
    Domain,
    Range,
    Both,
}

impl AxisSelector {
    /// `None` when neither axis group is selected.
    #[must_use]
    pub const fn from_flags(domain: bool, range: bool) -> Option<Self> {
        match (domain, range) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::Domain),
            (false, true) => Some(Self::Range),
            (false, false) => None,
        }
    }

    #[must_use]
    pub const fn includes_domain(self) -> bool {
        matches!(self, Self::Domain | Self::Both)
    }

    #[must_use]
    pub const fn includes_range(self) -> bool {
        matches!(self, Self::Range | Self::Both)
    }

    /// Keeps only the axis groups that are also allowed by the flags.
    #[must_use]
    pub const fn restrict(self, domain: bool, range: bool) -> Option<Self> {
        Self::from_flags(
            self.includes_domain() && domain,
            self.includes_range() && range,
        )
    }
}

/// One range change addressed to the domain or range axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRangeRequest {
    pub selector: AxisSelector,
    /// Logical point the zoom is anchored at.
    pub anchor: Point,
    pub mode: AxisZoom,
}

type RequestBatch = SmallVec<[AxisRangeRequest; 2]>;

/// Turns factor zooms, selections and auto-bound resets into axis requests.
///
/// Every batch is applied inside one notify-suppression window on the axis
/// collaborator, so a request touching both axis groups produces a single
/// change event. The only state kept is the most recent anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoomController {
    last_anchor: Option<Point>,
}

impl ZoomController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_anchor(&mut self, anchor: Point) {
        self.last_anchor = Some(anchor);
    }

    #[must_use]
    pub fn last_anchor(&self) -> Option<Point> {
        self.last_anchor
    }

    /// Scales the selected axes by `factor` (< 1 zooms in).
    ///
    /// Returns `Ok(false)` when no selected axis group is zoomable.
    pub fn zoom_by_factor(
        &mut self,
        axes: &mut dyn ZoomableAxes,
        info: &PlotRenderingInfo,
        selector: AxisSelector,
        factor: f64,
        anchor: Point,
        around_anchor: bool,
    ) -> ChartResult<bool> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        let Some(selector) = selector.restrict(axes.is_domain_zoomable(), axes.is_range_zoomable())
        else {
            trace!("zoom by factor ignored, no zoomable axis selected");
            return Ok(false);
        };

        self.last_anchor = Some(anchor);
        debug!(?selector, factor, around_anchor, "zoom by factor");
        let request = AxisRangeRequest {
            selector,
            anchor,
            mode: AxisZoom::Factor {
                factor,
                around_anchor,
            },
        };
        apply_requests(axes, info, &[request]);
        Ok(true)
    }

    /// Zooms the selected axes to a screen-space selection inside a
    /// screen-space data area.
    ///
    /// Degenerate selections and plots without zoomable axes are no-ops.
    pub fn zoom_to_rectangle(
        &mut self,
        axes: &mut dyn ZoomableAxes,
        info: &PlotRenderingInfo,
        selector: AxisSelector,
        selection: Rect,
        data_area: Rect,
        anchor: Point,
    ) -> bool {
        let Some(fractions) = resolve_zoom_fractions(selection, data_area) else {
            trace!("zoom rectangle ignored, degenerate geometry");
            return false;
        };

        let Some(selector) = selector.restrict(axes.is_domain_zoomable(), axes.is_range_zoomable())
        else {
            return false;
        };
        let orientation = axes.orientation();
        let mut requests = RequestBatch::new();
        if selector.includes_domain() {
            let (lower, upper) = fractions.domain(orientation);
            requests.push(AxisRangeRequest {
                selector: AxisSelector::Domain,
                anchor,
                mode: AxisZoom::Bounds { lower, upper },
            });
        }
        if selector.includes_range() {
            let (lower, upper) = fractions.range(orientation);
            requests.push(AxisRangeRequest {
                selector: AxisSelector::Range,
                anchor,
                mode: AxisZoom::Bounds { lower, upper },
            });
        }
        self.last_anchor = Some(anchor);
        debug!(?fractions, ?orientation, "zoom to rectangle");
        apply_requests(axes, info, &requests);
        true
    }

    /// Restores automatic bounds around the last anchor, or the origin.
    ///
    /// Zoomability flags are not consulted, so axes moved by panning can
    /// always be restored.
    pub fn restore_auto_bounds(
        &mut self,
        axes: &mut dyn ZoomableAxes,
        info: &PlotRenderingInfo,
        selector: AxisSelector,
    ) -> bool {
        let anchor = self.last_anchor.unwrap_or_default();
        debug!(?selector, "restore auto bounds");
        let request = AxisRangeRequest {
            selector,
            anchor,
            mode: AxisZoom::ResetAuto,
        };
        apply_requests(axes, info, &[request]);
        true
    }
}

/// Applies a batch domain-first, then range, under one notify window.
pub fn apply_requests(
    axes: &mut dyn ZoomableAxes,
    info: &PlotRenderingInfo,
    requests: &[AxisRangeRequest],
) {
    if requests.is_empty() {
        return;
    }
    with_notify_suppressed(axes, |axes| {
        for request in requests {
            if request.selector.includes_domain() {
                axes.zoom_domain_axes(request.mode, info, request.anchor);
            }
        }
        for request in requests {
            if request.selector.includes_range() {
                axes.zoom_range_axes(request.mode, info, request.anchor);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::AxisSelector;

    #[test]
    fn selector_from_flags() {
        assert_eq!(AxisSelector::from_flags(true, true), Some(AxisSelector::Both));
        assert_eq!(AxisSelector::from_flags(true, false), Some(AxisSelector::Domain));
        assert_eq!(AxisSelector::from_flags(false, true), Some(AxisSelector::Range));
        assert_eq!(AxisSelector::from_flags(false, false), None);
    }

    #[test]
    fn restrict_drops_disallowed_groups() {
        assert_eq!(
            AxisSelector::Both.restrict(false, true),
            Some(AxisSelector::Range)
        );
        assert_eq!(AxisSelector::Domain.restrict(false, true), None);
        assert_eq!(AxisSelector::Range.restrict(true, true), Some(AxisSelector::Range));
    }
}
