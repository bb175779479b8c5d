use crate::core::Viewport;
use crate::error::PlotResult;
use crate::layout::TextMeasurer;
use crate::render::{
    EllipsePrimitive, ImagePrimitive, LinePrimitive, PolygonPrimitive, PolylinePrimitive,
    RectPrimitive, TextPrimitive,
};

/// Contract implemented by any drawing backend.
///
/// Backends receive fully resolved screen-space primitives in paint order, so
/// drawing code stays isolated from axis, layout and interaction logic. Text
/// metrics come from the same backend so layout matches what gets painted.
pub trait DrawingBackend: TextMeasurer {
    fn begin_frame(&mut self, _viewport: Viewport) -> PlotResult<()> {
        Ok(())
    }

    fn draw_line(&mut self, line: &LinePrimitive) -> PlotResult<()>;
    fn draw_polyline(&mut self, polyline: &PolylinePrimitive) -> PlotResult<()>;
    fn draw_polygon(&mut self, polygon: &PolygonPrimitive) -> PlotResult<()>;
    fn draw_rectangle(&mut self, rect: &RectPrimitive) -> PlotResult<()>;
    fn draw_ellipse(&mut self, ellipse: &EllipsePrimitive) -> PlotResult<()>;
    fn draw_text(&mut self, text: &TextPrimitive) -> PlotResult<()>;
    fn draw_image(&mut self, image: &ImagePrimitive) -> PlotResult<()>;

    fn end_frame(&mut self) -> PlotResult<()> {
        Ok(())
    }
}
