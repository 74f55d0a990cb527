//! Screen <-> logical coordinate translation.
//!
//! Screen space is the panel's device pixels. Logical space is the space the
//! chart draws in before the panel's scale transform and insets are applied.

use serde::{Deserialize, Serialize};

use super::geometry::{Insets, Point, Rect, ScreenPoint};

/// Per-axis factor applied when logical space is drawn onto the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawScale {
    pub x: f64,
    pub y: f64,
}

impl DrawScale {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self.x == 1.0 && self.y == 1.0
    }
}

impl Default for DrawScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Scale factors and insets in effect for the current paint cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleState {
    pub scale: DrawScale,
    pub insets: Insets,
}

impl ScaleState {
    #[must_use]
    pub const fn new(scale: DrawScale, insets: Insets) -> Self {
        Self { scale, insets }
    }

    #[must_use]
    pub fn screen_to_logical(self, point: ScreenPoint) -> Point {
        screen_to_logical(point.to_point(), self.insets, self.scale)
    }

    #[must_use]
    pub fn logical_to_screen(self, point: Point) -> ScreenPoint {
        logical_to_screen(point, self.insets, self.scale)
    }

    #[must_use]
    pub fn scale_rect(self, rect: Rect) -> Rect {
        scale_rect(rect, self.insets, self.scale)
    }
}

#[must_use]
pub fn screen_to_logical(point: Point, insets: Insets, scale: DrawScale) -> Point {
    Point::new(
        (point.x - f64::from(insets.left)) / scale.x,
        (point.y - f64::from(insets.top)) / scale.y,
    )
}

/// Inverse of [`screen_to_logical`], truncated toward zero.
#[must_use]
pub fn logical_to_screen(point: Point, insets: Insets, scale: DrawScale) -> ScreenPoint {
    let x = point.x * scale.x + f64::from(insets.left);
    let y = point.y * scale.y + f64::from(insets.top);
    ScreenPoint::new(x as i32, y as i32)
}

/// Maps a logical rectangle onto the screen. Width and height are only scaled.
#[must_use]
pub fn scale_rect(rect: Rect, insets: Insets, scale: DrawScale) -> Rect {
    Rect::new(
        rect.x * scale.x + f64::from(insets.left),
        rect.y * scale.y + f64::from(insets.top),
        rect.width * scale.x,
        rect.height * scale.y,
    )
}
