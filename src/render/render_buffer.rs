use cairo::{Context, ImageSurface};
use image::{Rgba, RgbaImage};
use tracing::{debug, trace};

use crate::core::{DrawScale, Viewport};
use crate::error::ChartResult;
use crate::render::{
    CairoRenderer, FrameTransform, RenderFrame, Renderer, surface_pixel, surface_to_image,
};

use super::cairo_backend::map_backend_error;

/// Off-screen chart image reused between paints until invalidated.
///
/// The buffer is a cairo surface allocated lazily and replaced whenever the
/// requested size changes. A redraw clears every pixel to fully transparent
/// before the chart draws, so non-rectangular hosts can composite the result.
#[derive(Debug, Default)]
pub struct RenderBuffer {
    renderer: Option<CairoRenderer>,
    dirty: bool,
}

impl RenderBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new transparent buffer when absent or when the size differs.
    ///
    /// Returns `true` when a new buffer was allocated; the buffer is then dirty.
    pub fn ensure_sized(&mut self, width: u32, height: u32) -> ChartResult<bool> {
        let matches = self
            .renderer
            .as_ref()
            .is_some_and(|renderer| renderer.width() == width && renderer.height() == height);
        if matches {
            return Ok(false);
        }
        debug!(width, height, "allocating render buffer");
        self.renderer = Some(CairoRenderer::new(width, height)?);
        self.dirty = true;
        Ok(true)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.renderer.is_none()
    }

    #[must_use]
    pub fn size(&self) -> Option<Viewport> {
        self.renderer
            .as_ref()
            .map(|renderer| Viewport::new(renderer.width(), renderer.height()))
    }

    #[must_use]
    pub fn surface(&self) -> Option<&ImageSurface> {
        self.renderer.as_ref().map(CairoRenderer::surface)
    }

    /// Clears the buffer, runs `render_fn` once against a fresh frame and
    /// rasterizes the result.
    ///
    /// `scale` is applied to everything the callback draws. The dirty flag is
    /// cleared only when drawing succeeds. Without an allocated buffer this is
    /// a no-op.
    pub fn redraw_into<F>(&mut self, scale: Option<DrawScale>, render_fn: F) -> ChartResult<()>
    where
        F: FnOnce(&mut RenderFrame) -> ChartResult<()>,
    {
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };

        let viewport = Viewport::new(renderer.width(), renderer.height());
        let transform = FrameTransform::scaled(scale.unwrap_or_default());
        let mut frame = RenderFrame::new(viewport).with_transform(transform);
        render_fn(&mut frame)?;
        renderer.render(&frame)?;

        trace!(
            lines = frame.lines.len(),
            rects = frame.rects.len(),
            "render buffer redrawn"
        );
        self.dirty = false;
        Ok(())
    }

    /// Composites the buffer onto `context` with its top-left corner at `offset`.
    pub fn paint_on_cairo_context(&self, context: &Context, offset: (f64, f64)) -> ChartResult<()> {
        let Some(surface) = self.surface() else {
            return Ok(());
        };
        context
            .set_source_surface(surface, offset.0, offset.1)
            .map_err(|err| map_backend_error("failed to set buffer source", err))?;
        context
            .paint()
            .map_err(|err| map_backend_error("failed to paint render buffer", err))
    }

    /// Copies the buffer out as straight-alpha RGBA.
    pub fn to_image(&self) -> ChartResult<Option<RgbaImage>> {
        self.surface().map(surface_to_image).transpose()
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        surface_pixel(self.surface()?, x, y)
    }
}

#[cfg(test)]
mod tests {
    use cairo::Context;
    use image::{Rgba, RgbaImage};

    use super::RenderBuffer;
    use crate::core::Rect;
    use crate::render::{Color, RectPrimitive, image_to_surface, surface_to_image};

    #[test]
    fn ensure_sized_allocates_once_per_size() {
        let mut buffer = RenderBuffer::new();
        assert!(buffer.ensure_sized(40, 30).expect("alloc"));
        assert!(buffer.is_dirty());

        buffer.redraw_into(None, |_| Ok(())).expect("redraw");
        assert!(!buffer.is_dirty());

        assert!(!buffer.ensure_sized(40, 30).expect("alloc"));
        assert!(!buffer.is_dirty());

        assert!(buffer.ensure_sized(41, 30).expect("alloc"));
        assert!(buffer.is_dirty());
    }

    #[test]
    fn redraw_clears_previous_pixels_to_transparent() {
        let mut buffer = RenderBuffer::new();
        buffer.ensure_sized(10, 10).expect("alloc");
        buffer
            .redraw_into(None, |frame| {
                frame.push_rect(RectPrimitive::filled(
                    Rect::new(0.0, 0.0, 10.0, 10.0),
                    Color::rgb(0.0, 1.0, 0.0),
                ));
                Ok(())
            })
            .expect("first redraw");
        assert_eq!(buffer.pixel(5, 5).map(|p| p.0), Some([0, 255, 0, 255]));

        buffer.mark_dirty();
        buffer.redraw_into(None, |_| Ok(())).expect("second redraw");
        assert_eq!(buffer.pixel(5, 5).map(|p| p.0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn failed_render_keeps_buffer_dirty() {
        let mut buffer = RenderBuffer::new();
        buffer.ensure_sized(10, 10).expect("alloc");
        let result = buffer.redraw_into(None, |_| {
            Err(crate::error::ChartError::InvalidData("boom".to_owned()))
        });
        assert!(result.is_err());
        assert!(buffer.is_dirty());
    }

    #[test]
    fn paint_composites_at_offset() {
        let mut buffer = RenderBuffer::new();
        buffer.ensure_sized(4, 4).expect("alloc");
        buffer
            .redraw_into(None, |frame| {
                frame.push_rect(RectPrimitive::filled(
                    Rect::new(0.0, 0.0, 4.0, 4.0),
                    Color::rgb(1.0, 0.0, 0.0),
                ));
                Ok(())
            })
            .expect("redraw");

        let surface = image_to_surface(&RgbaImage::new(10, 10)).expect("surface");
        {
            let context = Context::new(&surface).expect("context");
            buffer
                .paint_on_cairo_context(&context, (3.0, 2.0))
                .expect("paint");
        }
        let target = surface_to_image(&surface).expect("image");
        assert_eq!(target.get_pixel(3, 2).0, [255, 0, 0, 255]);
        assert_eq!(target.get_pixel(2, 2).0, [0, 0, 0, 0]);
        assert_eq!(target.get_pixel(6, 5).0, [255, 0, 0, 255]);
        assert_eq!(target.get_pixel(7, 6), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn to_image_copies_buffer_pixels() {
        let mut buffer = RenderBuffer::new();
        assert!(buffer.to_image().expect("copy").is_none());
        buffer.ensure_sized(3, 3).expect("alloc");
        buffer.redraw_into(None, |_| Ok(())).expect("redraw");
        let image = buffer.to_image().expect("copy").expect("allocated");
        assert_eq!(image.dimensions(), (3, 3));
    }
}
