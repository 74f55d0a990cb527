use crate::core::{DrawScale, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, RectPrimitive};

/// Logical-to-target transform applied by renderers: scale first, then offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTransform {
    pub scale: DrawScale,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FrameTransform {
    #[must_use]
    pub const fn scaled(scale: DrawScale) -> Self {
        Self {
            scale,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    #[must_use]
    pub const fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    #[must_use]
    pub fn apply_x(self, x: f64) -> f64 {
        x * self.scale.x + self.offset_x
    }

    #[must_use]
    pub fn apply_y(self, y: f64) -> f64 {
        y * self.scale.y + self.offset_y
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// This is the drawing context handed to `Chart::draw`: charts append
/// primitives in logical space and the renderer applies `transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub transform: FrameTransform,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            transform: FrameTransform::default(),
            lines: Vec::new(),
            rects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: FrameTransform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.lines.push(line);
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.rects.push(rect);
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty()
    }
}
