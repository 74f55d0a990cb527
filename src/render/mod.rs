mod cairo_backend;
mod frame;
mod overlay;
mod primitives;
mod render_buffer;

pub use cairo_backend::{
    CairoContextRenderer, CairoRenderStats, CairoRenderer, draw_frame, image_to_surface,
    surface_to_image,
};
pub(crate) use cairo_backend::surface_pixel;
pub use frame::{FrameTransform, RenderFrame};
pub use overlay::{OverlayComposite, RectOverlayStyle, draw_rect_overlay};
pub use primitives::{Color, LinePrimitive, RectPrimitive};
pub use render_buffer::RenderBuffer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code remains
/// isolated from chart, gesture and zoom logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
