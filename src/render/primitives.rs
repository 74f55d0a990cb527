use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::core::Rect;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            f64::from(alpha) / 255.0,
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Quantizes to 8-bit straight-alpha channels.
    #[must_use]
    pub fn to_rgba8(self) -> Rgba<u8> {
        let quantize = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
            quantize(self.alpha),
        ])
    }
}

/// Draw command for one line segment in logical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one axis-aligned rectangle in logical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub fill_color: Option<Color>,
    pub border_color: Color,
    pub border_width: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn filled(rect: Rect, fill_color: Color) -> Self {
        Self {
            rect,
            fill_color: Some(fill_color),
            border_color: Color::TRANSPARENT,
            border_width: 0.0,
        }
    }

    #[must_use]
    pub const fn outlined(rect: Rect, border_color: Color, border_width: f64) -> Self {
        Self {
            rect,
            fill_color: None,
            border_color,
            border_width,
        }
    }

    #[must_use]
    pub const fn with_fill(mut self, fill_color: Color) -> Self {
        self.fill_color = Some(fill_color);
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.rect.is_finite() || self.rect.width < 0.0 || self.rect.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rectangle geometry must be finite with non-negative size".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "rectangle border width must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(fill) = self.fill_color {
            fill.validate()?;
        }
        self.border_color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, RectPrimitive};
    use crate::core::Rect;

    #[test]
    fn color_quantizes_to_rgba8() {
        let rgba = Color::rgba(0.0, 0.0, 1.0, 63.0 / 255.0).to_rgba8();
        assert_eq!(rgba.0, [0, 0, 255, 63]);
    }

    #[test]
    fn rect_rejects_negative_size() {
        let rect = RectPrimitive::filled(Rect::new(0.0, 0.0, -1.0, 4.0), Color::BLUE);
        assert!(rect.validate().is_err());
    }
}
