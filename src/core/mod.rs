pub mod coordinate_mapper;
pub mod geometry;
pub mod scale_calculator;

pub use coordinate_mapper::{DrawScale, ScaleState, logical_to_screen, scale_rect, screen_to_logical};
pub use geometry::{Insets, Point, Rect, ScreenPoint, Viewport};
pub use scale_calculator::{DrawBounds, DrawLayout, compute_draw_layout};
