use serde::{Deserialize, Serialize};

use super::coordinate_mapper::DrawScale;

/// Logical draw-size limits. Panels smaller than the minimum are drawn at the
/// minimum size and scaled down; panels larger than the maximum are drawn at
/// the maximum size and scaled up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawBounds {
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
}

impl DrawBounds {
    #[must_use]
    pub const fn new(min_width: u32, min_height: u32, max_width: u32, max_height: u32) -> Self {
        Self {
            min_width,
            min_height,
            max_width,
            max_height,
        }
    }

    #[must_use]
    pub fn is_ordered(self) -> bool {
        self.min_width <= self.max_width && self.min_height <= self.max_height
    }
}

impl Default for DrawBounds {
    fn default() -> Self {
        Self::new(300, 200, 1024, 768)
    }
}

/// Result of fitting the available area into [`DrawBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawLayout {
    pub scale: DrawScale,
    pub logical_width: f64,
    pub logical_height: f64,
    /// `true` when at least one axis is not drawn 1:1.
    pub scaling: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisFit {
    scale: f64,
    logical: f64,
    scaling: bool,
}

fn fit_axis(available: f64, min: u32, max: u32) -> AxisFit {
    let min = f64::from(min);
    let max = f64::from(max);
    if available < min {
        AxisFit {
            scale: available / min,
            logical: min,
            scaling: true,
        }
    } else if available > max {
        AxisFit {
            scale: available / max,
            logical: max,
            scaling: true,
        }
    } else {
        AxisFit {
            scale: 1.0,
            logical: available,
            scaling: false,
        }
    }
}

/// Computes scale factors and the logical drawing size, independently per axis.
///
/// Zero or negative available sizes produce zero or negative scales; callers
/// skip painting for such panels.
#[must_use]
pub fn compute_draw_layout(available_width: f64, available_height: f64, bounds: DrawBounds) -> DrawLayout {
    let horizontal = fit_axis(available_width, bounds.min_width, bounds.max_width);
    let vertical = fit_axis(available_height, bounds.min_height, bounds.max_height);
    DrawLayout {
        scale: DrawScale::new(horizontal.scale, vertical.scale),
        logical_width: horizontal.logical,
        logical_height: vertical.logical,
        scaling: horizontal.scaling || vertical.scaling,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{DrawBounds, compute_draw_layout};

    #[test]
    fn size_inside_bounds_is_drawn_one_to_one() {
        let layout = compute_draw_layout(300.0, 200.0, DrawBounds::default());
        assert_eq!(layout.scale.x, 1.0);
        assert_eq!(layout.scale.y, 1.0);
        assert_eq!((layout.logical_width, layout.logical_height), (300.0, 200.0));
        assert!(!layout.scaling);
    }

    #[test]
    fn small_panel_scales_down_from_minimum_size() {
        let layout = compute_draw_layout(100.0, 100.0, DrawBounds::default());
        assert_relative_eq!(layout.scale.x, 100.0 / 300.0);
        assert_relative_eq!(layout.scale.y, 0.5);
        assert_eq!((layout.logical_width, layout.logical_height), (300.0, 200.0));
        assert!(layout.scaling);
    }

    #[test]
    fn large_panel_scales_up_from_maximum_size() {
        let layout = compute_draw_layout(2048.0, 768.0, DrawBounds::default());
        assert_relative_eq!(layout.scale.x, 2.0);
        assert_eq!(layout.scale.y, 1.0);
        assert_eq!(layout.logical_width, 1024.0);
        assert!(layout.scaling);
    }

    #[test]
    fn zero_available_size_is_degenerate_not_an_error() {
        let layout = compute_draw_layout(0.0, -10.0, DrawBounds::default());
        assert_eq!(layout.scale.x, 0.0);
        assert!(layout.scale.y < 0.0);
    }
}
