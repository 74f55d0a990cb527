use cairo::Context;
use image::RgbaImage;
use tracing::{debug, trace, warn};

use crate::core::{Point, Rect, ScaleState, compute_draw_layout};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    FrameTransform, OverlayComposite, RenderFrame, draw_frame, draw_rect_overlay,
    image_to_surface, surface_to_image,
};

use super::{Chart, ChartRenderingInfo, DisplayPanel, InvalidationLevel, InvalidationMask};

/// What one `paint` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaintOutcome {
    /// `false` when there was no chart or no drawable area.
    pub painted: bool,
    pub chart_redrawn: bool,
    pub buffer_reallocated: bool,
    pub overlay_drawn: bool,
}

impl DisplayPanel {
    /// Paints the panel onto `target`, an image of the panel's full size.
    ///
    /// `target` is copied into a cairo surface, painted through
    /// [`DisplayPanel::paint_on_cairo_context`] and copied back when anything
    /// was drawn.
    pub fn paint(&mut self, target: &mut RgbaImage) -> ChartResult<PaintOutcome> {
        let surface = image_to_surface(target)?;
        let outcome = {
            let context = Context::new(&surface).map_err(|err| {
                ChartError::Backend(format!("failed to create cairo context: {err}"))
            })?;
            self.paint_on_cairo_context(&context)?
        };
        if outcome.painted {
            *target = surface_to_image(&surface)?;
        }
        Ok(outcome)
    }

    /// Paints the panel onto a host cairo context whose origin is the panel's
    /// top-left corner.
    ///
    /// With buffering on, the chart is redrawn into the off-screen buffer
    /// only when it is dirty and the buffer is then composited at the inset
    /// origin. With buffering off, the chart is drawn straight onto the
    /// context. The zoom rectangle is drawn last and the anchor is cleared.
    /// A failed paint keeps the pending invalidation so the host retries.
    pub fn paint_on_cairo_context(&mut self, context: &Context) -> ChartResult<PaintOutcome> {
        let pending = self.core.invalidation.take();
        let result = self.paint_pending(context, pending);
        if let Err(err) = &result {
            warn!(error = %err, "paint failed, repaint stays pending");
            self.core.invalidation.invalidate(pending);
        }
        result
    }

    fn paint_pending(
        &mut self,
        context: &Context,
        pending: InvalidationMask,
    ) -> ChartResult<PaintOutcome> {
        let mut outcome = PaintOutcome::default();
        if self.core.chart.is_none() {
            trace!("paint skipped, no chart");
            return Ok(outcome);
        }
        let available = self.core.available_size();
        if available.width == 0 || available.height == 0 {
            trace!(
                width = available.width,
                height = available.height,
                "paint skipped, empty drawing area"
            );
            return Ok(outcome);
        }

        let insets = self.core.insets;
        let origin = (f64::from(insets.left), f64::from(insets.top));
        let layout = compute_draw_layout(
            f64::from(available.width),
            f64::from(available.height),
            self.core.config.draw_bounds,
        );
        self.core.scale = ScaleState::new(layout.scale, insets);
        let chart_area = if layout.scaling {
            Rect::new(0.0, 0.0, layout.logical_width, layout.logical_height)
        } else {
            Rect::new(
                0.0,
                0.0,
                f64::from(available.width),
                f64::from(available.height),
            )
        };

        if self.core.config.buffer_used {
            let core = &mut self.core;
            if pending.level() == InvalidationLevel::Full {
                core.buffer.mark_dirty();
            }
            outcome.buffer_reallocated =
                core.buffer.ensure_sized(available.width, available.height)?;
            if core.buffer.is_dirty() {
                let scale = layout.scaling.then_some(layout.scale);
                let chart = &mut core.chart;
                let info = &mut core.info;
                let anchor = core.anchor;
                core.buffer.redraw_into(scale, |frame| {
                    draw_chart(chart, frame, chart_area, anchor, info)
                })?;
                outcome.chart_redrawn = true;
                debug!(
                    width = available.width,
                    height = available.height,
                    scaling = layout.scaling,
                    "chart redrawn into buffer"
                );
            }
            core.buffer.paint_on_cairo_context(context, origin)?;
        } else {
            let transform = FrameTransform::scaled(layout.scale).with_offset(origin.0, origin.1);
            let mut frame = RenderFrame::new(self.core.size).with_transform(transform);
            let core = &mut self.core;
            draw_chart(
                &mut core.chart,
                &mut frame,
                chart_area,
                core.anchor,
                &mut core.info,
            )?;
            draw_frame(context, &frame)?;
            outcome.chart_redrawn = true;
        }

        if let Some(rect) = self.core.zoom_rectangle {
            let composite = if self.core.config.buffer_used {
                OverlayComposite::Alpha
            } else {
                OverlayComposite::Invert
            };
            draw_rect_overlay(
                context,
                rect,
                self.core.config.zoom_rectangle_style(),
                composite,
            )?;
            outcome.overlay_drawn = true;
        }

        self.core.anchor = None;
        outcome.painted = true;
        Ok(outcome)
    }
}

fn draw_chart(
    chart: &mut Option<Box<dyn Chart>>,
    frame: &mut RenderFrame,
    area: Rect,
    anchor: Option<Point>,
    info: &mut ChartRenderingInfo,
) -> ChartResult<()> {
    let Some(chart) = chart.as_deref_mut() else {
        return Ok(());
    };
    info.clear();
    chart.draw(frame, area, anchor, Some(info))
}
