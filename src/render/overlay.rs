//! Screen-space overlays composed after the base chart image.

use cairo::{Antialias, Context, Operator};
use serde::{Deserialize, Serialize};

use crate::core::Rect;
use crate::error::ChartResult;
use crate::render::Color;

use super::cairo_backend::{apply_color, map_backend_error};

/// How overlay pixels are combined with the pixels already on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OverlayComposite {
    /// Regular source-over alpha blending.
    #[default]
    Alpha,
    /// Legacy toggle: inverts the covered pixels, so drawing the same overlay
    /// twice restores an opaque target.
    Invert,
}

/// Appearance of a rectangle overlay such as the pending zoom selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectOverlayStyle {
    pub filled: bool,
    pub fill_color: Color,
    pub outline_color: Color,
}

/// Draws `rect` (screen pixels) onto `context`.
///
/// Edges snap to whole pixels and antialiasing is off, so outlines touch each
/// border pixel exactly once and the invert composite stays self-inverse.
pub fn draw_rect_overlay(
    context: &Context,
    rect: Rect,
    style: RectOverlayStyle,
    composite: OverlayComposite,
) -> ChartResult<()> {
    if rect.is_empty() || !rect.is_finite() {
        return Ok(());
    }
    let left = rect.min_x().round();
    let top = rect.min_y().round();
    let width = rect.max_x().round() - left;
    let height = rect.max_y().round() - top;
    if width < 1.0 || height < 1.0 {
        return Ok(());
    }

    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    context.set_antialias(Antialias::None);
    match composite {
        OverlayComposite::Alpha => {
            context.set_operator(Operator::Over);
            apply_color(
                context,
                if style.filled {
                    style.fill_color
                } else {
                    style.outline_color
                },
            );
        }
        OverlayComposite::Invert => {
            // Difference against opaque white maps each channel c to 255 - c.
            context.set_operator(Operator::Difference);
            apply_color(context, Color::rgb(1.0, 1.0, 1.0));
        }
    }

    let drawn = if style.filled {
        context.rectangle(left, top, width, height);
        context.fill()
    } else {
        context.set_line_width(1.0);
        context.rectangle(left + 0.5, top + 0.5, width - 1.0, height - 1.0);
        context.stroke()
    };
    drawn.map_err(|err| map_backend_error("failed to draw rectangle overlay", err))?;

    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))
}
