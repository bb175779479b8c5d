use crate::core::Viewport;
use crate::error::{PlotError, PlotResult};
use crate::render::{DrawingBackend, Primitive};

/// Primitive counts per kind for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrimitiveCounts {
    pub lines: usize,
    pub polylines: usize,
    pub polygons: usize,
    pub rects: usize,
    pub ellipses: usize,
    pub texts: usize,
    pub images: usize,
}

impl PrimitiveCounts {
    #[must_use]
    pub fn total(self) -> usize {
        self.lines
            + self.polylines
            + self.polygons
            + self.rects
            + self.ellipses
            + self.texts
            + self.images
    }

    pub(crate) fn record(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Line(_) => self.lines += 1,
            Primitive::Polyline(_) => self.polylines += 1,
            Primitive::Polygon(_) => self.polygons += 1,
            Primitive::Rect(_) => self.rects += 1,
            Primitive::Ellipse(_) => self.ellipses += 1,
            Primitive::Text(_) => self.texts += 1,
            Primitive::Image(_) => self.images += 1,
        }
    }
}

/// Backend-agnostic scene for one plot draw pass.
///
/// Primitives are kept in paint order: later entries draw on top.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub primitives: Vec<Primitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn extend<I>(&mut self, primitives: I)
    where
        I: IntoIterator<Item = Primitive>,
    {
        self.primitives.extend(primitives);
    }

    #[must_use]
    pub fn with(mut self, primitive: impl Into<Primitive>) -> Self {
        self.push(primitive);
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for primitive in &self.primitives {
            primitive.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[must_use]
    pub fn counts(&self) -> PrimitiveCounts {
        let mut counts = PrimitiveCounts::default();
        for primitive in &self.primitives {
            counts.record(primitive);
        }
        counts
    }

    /// Replays the frame on `backend` in paint order.
    pub fn submit<B: DrawingBackend + ?Sized>(&self, backend: &mut B) -> PlotResult<()> {
        backend.begin_frame(self.viewport)?;
        for primitive in &self.primitives {
            match primitive {
                Primitive::Line(line) => backend.draw_line(line)?,
                Primitive::Polyline(polyline) => backend.draw_polyline(polyline)?,
                Primitive::Polygon(polygon) => backend.draw_polygon(polygon)?,
                Primitive::Rect(rect) => backend.draw_rectangle(rect)?,
                Primitive::Ellipse(ellipse) => backend.draw_ellipse(ellipse)?,
                Primitive::Text(text) => backend.draw_text(text)?,
                Primitive::Image(image) => backend.draw_image(image)?,
            }
        }
        backend.end_frame()
    }
}
