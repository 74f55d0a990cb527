use serde::{Deserialize, Serialize};

use crate::core::DrawBounds;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{Modifiers, TooltipDelays};
use crate::render::{Color, RectOverlayStyle};

/// Display panel configuration.
///
/// Serializable so hosts can persist panel setup next to their chart setup.
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub draw_bounds: DrawBounds,
    #[serde(default = "default_true")]
    pub buffer_used: bool,
    #[serde(default = "default_zoom_in_factor")]
    pub zoom_in_factor: f64,
    #[serde(default = "default_zoom_out_factor")]
    pub zoom_out_factor: f64,
    #[serde(default)]
    pub zoom_around_anchor: bool,
    #[serde(default = "default_wheel_zoom_factor")]
    pub wheel_zoom_factor: f64,
    #[serde(default = "default_true")]
    pub mouse_wheel_enabled: bool,
    /// Minimum drag distance, in screen pixels, before a zoom rectangle shows.
    #[serde(default = "default_zoom_trigger_distance")]
    pub zoom_trigger_distance: f64,
    #[serde(default = "default_true")]
    pub domain_zoomable: bool,
    #[serde(default = "default_true")]
    pub range_zoomable: bool,
    #[serde(default = "default_true")]
    pub fill_zoom_rectangle: bool,
    #[serde(default = "default_zoom_fill_color")]
    pub zoom_fill_color: Color,
    #[serde(default = "default_zoom_outline_color")]
    pub zoom_outline_color: Color,
    #[serde(default = "default_true")]
    pub display_tooltips: bool,
    #[serde(default)]
    pub tooltip_delays: TooltipDelays,
    #[serde(default = "default_pan_modifier_mask")]
    pub pan_modifier_mask: Modifiers,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            draw_bounds: DrawBounds::default(),
            buffer_used: true,
            zoom_in_factor: default_zoom_in_factor(),
            zoom_out_factor: default_zoom_out_factor(),
            zoom_around_anchor: false,
            wheel_zoom_factor: default_wheel_zoom_factor(),
            mouse_wheel_enabled: true,
            zoom_trigger_distance: default_zoom_trigger_distance(),
            domain_zoomable: true,
            range_zoomable: true,
            fill_zoom_rectangle: true,
            zoom_fill_color: default_zoom_fill_color(),
            zoom_outline_color: default_zoom_outline_color(),
            display_tooltips: true,
            tooltip_delays: TooltipDelays::default(),
            pan_modifier_mask: default_pan_modifier_mask(),
        }
    }
}

impl PanelConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_draw_bounds(mut self, bounds: DrawBounds) -> Self {
        self.draw_bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_buffer_used(mut self, buffer_used: bool) -> Self {
        self.buffer_used = buffer_used;
        self
    }

    #[must_use]
    pub fn with_zoom_factors(mut self, zoom_in: f64, zoom_out: f64) -> Self {
        self.zoom_in_factor = zoom_in;
        self.zoom_out_factor = zoom_out;
        self
    }

    #[must_use]
    pub fn with_zoom_around_anchor(mut self, around_anchor: bool) -> Self {
        self.zoom_around_anchor = around_anchor;
        self
    }

    #[must_use]
    pub fn with_wheel_zoom_factor(mut self, factor: f64) -> Self {
        self.wheel_zoom_factor = factor;
        self
    }

    #[must_use]
    pub fn with_mouse_wheel_enabled(mut self, enabled: bool) -> Self {
        self.mouse_wheel_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_zoom_trigger_distance(mut self, distance: f64) -> Self {
        self.zoom_trigger_distance = distance;
        self
    }

    #[must_use]
    pub fn with_zoomable(mut self, domain: bool, range: bool) -> Self {
        self.domain_zoomable = domain;
        self.range_zoomable = range;
        self
    }

    #[must_use]
    pub fn with_fill_zoom_rectangle(mut self, fill: bool) -> Self {
        self.fill_zoom_rectangle = fill;
        self
    }

    #[must_use]
    pub fn with_zoom_rectangle_colors(mut self, fill: Color, outline: Color) -> Self {
        self.zoom_fill_color = fill;
        self.zoom_outline_color = outline;
        self
    }

    #[must_use]
    pub fn with_display_tooltips(mut self, display: bool) -> Self {
        self.display_tooltips = display;
        self
    }

    #[must_use]
    pub fn with_tooltip_delays(mut self, delays: TooltipDelays) -> Self {
        self.tooltip_delays = delays;
        self
    }

    #[must_use]
    pub fn with_pan_modifier_mask(mut self, mask: Modifiers) -> Self {
        self.pan_modifier_mask = mask;
        self
    }

    #[must_use]
    pub fn zoom_rectangle_style(&self) -> RectOverlayStyle {
        RectOverlayStyle {
            filled: self.fill_zoom_rectangle,
            fill_color: self.zoom_fill_color,
            outline_color: self.zoom_outline_color,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("zoom_in_factor", self.zoom_in_factor),
            ("zoom_out_factor", self.zoom_out_factor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("wheel_zoom_factor", self.wheel_zoom_factor),
            ("zoom_trigger_distance", self.zoom_trigger_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        self.zoom_fill_color.validate()?;
        self.zoom_outline_color.validate()?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize panel config: {e}")))
    }

    /// Parses and validates a config document.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse panel config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_true() -> bool {
    true
}

fn default_zoom_in_factor() -> f64 {
    0.5
}

fn default_zoom_out_factor() -> f64 {
    2.0
}

fn default_wheel_zoom_factor() -> f64 {
    0.10
}

fn default_zoom_trigger_distance() -> f64 {
    10.0
}

fn default_zoom_fill_color() -> Color {
    Color::from_rgba8(0, 0, 255, 63)
}

fn default_zoom_outline_color() -> Color {
    Color::BLUE
}

fn default_pan_modifier_mask() -> Modifiers {
    Modifiers::platform_pan_mask()
}
