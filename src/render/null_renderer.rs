use crate::core::Viewport;
use crate::error::{PlotError, PlotResult};
use crate::layout::{HeuristicTextMeasurer, TextMeasurer, TextSize};
use crate::render::{
    DrawingBackend, EllipsePrimitive, ImagePrimitive, LinePrimitive, PolygonPrimitive,
    PolylinePrimitive, Primitive, PrimitiveCounts, RectPrimitive, TextPrimitive,
};

/// No-op backend used by tests and headless plot usage.
///
/// It still validates every primitive so tests can catch invalid geometry
/// before a real backend is introduced. Text is measured heuristically.
#[derive(Debug, Default)]
pub struct NullBackend {
    pub measurer: HeuristicTextMeasurer,
    pub frames_begun: usize,
    pub frames_ended: usize,
    pub last_viewport: Option<Viewport>,
    pub last_counts: PrimitiveCounts,
    /// Text of every label drawn in the current frame, in paint order.
    pub last_texts: Vec<String>,
    in_frame: bool,
}

impl NullBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn accept(&mut self, primitive: Primitive) -> PlotResult<()> {
        if !self.in_frame {
            return Err(PlotError::Backend(
                "draw call outside begin_frame/end_frame".to_owned(),
            ));
        }
        primitive.validate()?;
        self.last_counts.record(&primitive);
        if let Primitive::Text(text) = primitive {
            self.last_texts.push(text.text);
        }
        Ok(())
    }
}

impl TextMeasurer for NullBackend {
    fn measure_text(&self, text: &str, font_size_px: f64) -> TextSize {
        self.measurer.measure_text(text, font_size_px)
    }
}

impl DrawingBackend for NullBackend {
    fn begin_frame(&mut self, viewport: Viewport) -> PlotResult<()> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.frames_begun += 1;
        self.last_viewport = Some(viewport);
        self.last_counts = PrimitiveCounts::default();
        self.last_texts.clear();
        self.in_frame = true;
        Ok(())
    }

    fn draw_line(&mut self, line: &LinePrimitive) -> PlotResult<()> {
        self.accept(Primitive::Line(*line))
    }

    fn draw_polyline(&mut self, polyline: &PolylinePrimitive) -> PlotResult<()> {
        self.accept(Primitive::Polyline(polyline.clone()))
    }

    fn draw_polygon(&mut self, polygon: &PolygonPrimitive) -> PlotResult<()> {
        self.accept(Primitive::Polygon(polygon.clone()))
    }

    fn draw_rectangle(&mut self, rect: &RectPrimitive) -> PlotResult<()> {
        self.accept(Primitive::Rect(*rect))
    }

    fn draw_ellipse(&mut self, ellipse: &EllipsePrimitive) -> PlotResult<()> {
        self.accept(Primitive::Ellipse(*ellipse))
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> PlotResult<()> {
        self.accept(Primitive::Text(text.clone()))
    }

    fn draw_image(&mut self, image: &ImagePrimitive) -> PlotResult<()> {
        self.accept(Primitive::Image(image.clone()))
    }

    fn end_frame(&mut self) -> PlotResult<()> {
        self.in_frame = false;
        self.frames_ended += 1;
        Ok(())
    }
}
