use crate::core::Rect;

use super::PlotOrientation;

/// Selection bounds as fractions of the data area, per screen direction.
///
/// Vertical fractions are measured upward from the bottom edge so that
/// `0.0` is the lowest visible value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFractions {
    pub horizontal: (f64, f64),
    pub vertical: (f64, f64),
}

impl ZoomFractions {
    #[must_use]
    pub fn domain(self, orientation: PlotOrientation) -> (f64, f64) {
        if orientation.domain_is_horizontal() {
            self.horizontal
        } else {
            self.vertical
        }
    }

    #[must_use]
    pub fn range(self, orientation: PlotOrientation) -> (f64, f64) {
        if orientation.domain_is_horizontal() {
            self.vertical
        } else {
            self.horizontal
        }
    }
}

/// Converts a screen selection into data-area fractions.
///
/// Returns `None` for a zero-area selection or data area. Selections reaching
/// past the data area yield fractions outside `[0, 1]` unchanged.
pub(super) fn resolve_zoom_fractions(selection: Rect, data_area: Rect) -> Option<ZoomFractions> {
    if selection.is_empty() || data_area.is_empty() {
        return None;
    }
    if !selection.is_finite() || !data_area.is_finite() {
        return None;
    }

    let horizontal = (
        (selection.min_x() - data_area.min_x()) / data_area.width,
        (selection.max_x() - data_area.min_x()) / data_area.width,
    );
    let vertical = (
        (data_area.max_y() - selection.max_y()) / data_area.height,
        (data_area.max_y() - selection.min_y()) / data_area.height,
    );
    Some(ZoomFractions {
        horizontal,
        vertical,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::resolve_zoom_fractions;
    use crate::api::PlotOrientation;
    use crate::core::Rect;

    #[test]
    fn centered_selection_maps_to_quarter_fractions() {
        let fractions = resolve_zoom_fractions(
            Rect::new(50.0, 50.0, 100.0, 100.0),
            Rect::new(0.0, 0.0, 200.0, 200.0),
        )
        .expect("fractions");

        let domain = fractions.domain(PlotOrientation::Vertical);
        let range = fractions.range(PlotOrientation::Vertical);
        assert_relative_eq!(domain.0, 0.25);
        assert_relative_eq!(domain.1, 0.75);
        assert_relative_eq!(range.0, 0.25);
        assert_relative_eq!(range.1, 0.75);
    }

    #[test]
    fn vertical_fractions_are_measured_from_bottom() {
        let fractions = resolve_zoom_fractions(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Rect::new(0.0, 0.0, 100.0, 200.0),
        )
        .expect("fractions");
        assert_relative_eq!(fractions.vertical.0, 0.75);
        assert_relative_eq!(fractions.vertical.1, 1.0);
    }

    #[test]
    fn horizontal_orientation_swaps_axes() {
        let fractions = resolve_zoom_fractions(
            Rect::new(0.0, 150.0, 50.0, 50.0),
            Rect::new(0.0, 0.0, 200.0, 200.0),
        )
        .expect("fractions");
        assert_eq!(fractions.domain(PlotOrientation::Horizontal), fractions.vertical);
        assert_eq!(fractions.range(PlotOrientation::Horizontal), fractions.horizontal);
    }

    #[test]
    fn degenerate_selection_is_ignored() {
        let area = Rect::new(0.0, 0.0, 200.0, 200.0);
        assert!(resolve_zoom_fractions(Rect::new(10.0, 10.0, 0.0, 50.0), area).is_none());
        assert!(resolve_zoom_fractions(Rect::new(10.0, 10.0, 50.0, 50.0), Rect::default()).is_none());
    }

    #[test]
    fn selection_outside_data_area_passes_through() {
        let fractions = resolve_zoom_fractions(
            Rect::new(300.0, 0.0, 100.0, 100.0),
            Rect::new(0.0, 0.0, 200.0, 200.0),
        )
        .expect("fractions");
        assert!(fractions.horizontal.0 > 1.0);
    }
}
