mod axis_renderer;
mod backend;
mod frame;
mod null_renderer;
mod primitives;
mod series_renderer;
mod style;

pub use axis_renderer::{
    axis_primitives, grid_primitives, legend_primitives, polar_grid_primitives, title_primitive,
};
pub use backend::DrawingBackend;
pub use frame::{PrimitiveCounts, RenderFrame};
pub use null_renderer::NullBackend;
pub use primitives::{
    Color, EllipsePrimitive, ImagePrimitive, LinePrimitive, LineStrokeStyle, PolygonPrimitive,
    PolylinePrimitive, Primitive, RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};
pub use series_renderer::{SeriesAxes, SeriesProjection, project_series};
pub use style::PlotStyle;
