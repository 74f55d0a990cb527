use cairo::{Context, Format, ImageSurface, Operator};
use image::{Rgba, RgbaImage};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RectPrimitive, RenderFrame, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> ChartResult<()>;
}

/// Cairo renderer backend over an owned ARGB32 image surface.
///
/// The surface is cleared to `clear_color` before every frame; the default
/// clear color is fully transparent so hosts can composite the result.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidViewport { width, height };
        let surface_width = i32::try_from(width).map_err(|_| invalid())?;
        let surface_height = i32::try_from(height).map_err(|_| invalid())?;
        if surface_width <= 0 || surface_height <= 0 {
            return Err(invalid());
        }

        let surface = ImageSurface::create(Format::ARgb32, surface_width, surface_height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::TRANSPARENT,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.surface.width().unsigned_abs()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.surface.height().unsigned_abs()
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        // Source so a transparent clear erases instead of blending.
        context.set_operator(Operator::Source);
        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context.set_operator(Operator::Over);

        self.last_stats = draw_frame(context, frame)?;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Draws `frame` over whatever `context` already holds, without clearing.
///
/// Rectangles go first so lines stay visible on top of filled backgrounds.
pub fn draw_frame(context: &Context, frame: &RenderFrame) -> ChartResult<CairoRenderStats> {
    frame.validate()?;
    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    context.translate(frame.transform.offset_x, frame.transform.offset_y);
    context.scale(frame.transform.scale.x, frame.transform.scale.y);

    let mut stats = CairoRenderStats::default();

    for rect in &frame.rects {
        draw_rect(context, *rect)?;
        stats.rects_drawn += 1;
    }

    for line in &frame.lines {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }

    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
    Ok(stats)
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    let stroked = rect.border_width > 0.0;
    context.rectangle(rect.rect.x, rect.rect.y, rect.rect.width, rect.rect.height);

    match rect.fill_color {
        Some(fill) if stroked => {
            apply_color(context, fill);
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        }
        Some(fill) => {
            apply_color(context, fill);
            return context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err));
        }
        None if !stroked => {
            context.new_path();
            return Ok(());
        }
        None => {}
    }

    apply_color(context, rect.border_color);
    context.set_line_width(rect.border_width);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
}

pub(crate) fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

/// Converts straight-alpha RGBA into cairo's premultiplied native-endian ARGB32.
pub fn image_to_surface(image: &RgbaImage) -> ChartResult<ImageSurface> {
    let invalid = || ChartError::InvalidViewport {
        width: image.width(),
        height: image.height(),
    };
    let width = i32::try_from(image.width()).map_err(|_| invalid())?;
    let height = i32::try_from(image.height()).map_err(|_| invalid())?;
    let stride = Format::ARgb32
        .stride_for_width(image.width())
        .map_err(|err| map_backend_error("failed to compute surface stride", err))?;
    let row_bytes = usize::try_from(stride)
        .map_err(|_| ChartError::Backend("negative cairo stride".to_owned()))?;

    let mut data = vec![0_u8; row_bytes * image.height() as usize];
    for (x, y, pixel) in image.enumerate_pixels() {
        let offset = y as usize * row_bytes + x as usize * 4;
        data[offset..offset + 4].copy_from_slice(&rgba_to_argb(*pixel).to_ne_bytes());
    }

    ImageSurface::create_for_data(data, Format::ARgb32, width, height, stride)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

/// Reads an ARGB32 surface back into straight-alpha RGBA.
pub fn surface_to_image(surface: &ImageSurface) -> ChartResult<RgbaImage> {
    let width = surface.width().unsigned_abs();
    let height = surface.height().unsigned_abs();
    let row_bytes = surface.stride().unsigned_abs() as usize;
    let mut image = RgbaImage::new(width, height);

    surface
        .with_data(|data| {
            for (x, y, pixel) in image.enumerate_pixels_mut() {
                let offset = y as usize * row_bytes + x as usize * 4;
                if let Some(word) = read_word(data, offset) {
                    *pixel = argb_to_rgba(word);
                }
            }
        })
        .map_err(|err| ChartError::Backend(format!("failed to read cairo surface: {err}")))?;
    Ok(image)
}

/// One pixel of an ARGB32 surface, `None` when out of bounds or unreadable.
pub(crate) fn surface_pixel(surface: &ImageSurface, x: u32, y: u32) -> Option<Rgba<u8>> {
    if x >= surface.width().unsigned_abs() || y >= surface.height().unsigned_abs() {
        return None;
    }
    let offset = y as usize * surface.stride().unsigned_abs() as usize + x as usize * 4;
    let mut pixel = None;
    surface
        .with_data(|data| pixel = read_word(data, offset).map(argb_to_rgba))
        .ok()?;
    pixel
}

fn read_word(data: &[u8], offset: usize) -> Option<u32> {
    let bytes: [u8; 4] = data.get(offset..offset + 4)?.try_into().ok()?;
    Some(u32::from_ne_bytes(bytes))
}

fn rgba_to_argb(pixel: Rgba<u8>) -> u32 {
    let [red, green, blue, alpha] = pixel.0;
    let premultiply = |channel: u8| ((u16::from(channel) * u16::from(alpha) + 127) / 255) as u32;
    (u32::from(alpha) << 24) | (premultiply(red) << 16) | (premultiply(green) << 8) | premultiply(blue)
}

fn argb_to_rgba(word: u32) -> Rgba<u8> {
    let alpha = (word >> 24) as u8;
    if alpha == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let unpremultiply = |shift: u32| {
        let channel = (word >> shift) & 0xff;
        ((channel * 255 + u32::from(alpha) / 2) / u32::from(alpha)).min(255) as u8
    };
    Rgba([unpremultiply(16), unpremultiply(8), unpremultiply(0), alpha])
}

pub(crate) fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
