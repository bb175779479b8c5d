pub mod axis;
pub mod category;
pub mod primitives;
pub mod range;
pub mod series;
pub mod tick_labels;
pub mod ticks;
pub mod tracker;
pub mod transform;
pub mod types;

pub use axis::{
    Axis, AxisChange, AxisChangeKind, AxisKind, AxisMap, AxisOrientation, AxisPosition,
    DesiredRange, PolarFrame,
};
pub use category::{CategoryLookup, CategoryValue};
pub use range::ValueRange;
pub use series::{Series, SeriesData, SeriesKind, SeriesStyle, TrackingMode};
pub use tick_labels::{AngleUnit, DateTimeUnit, NumberLabelFormat};
pub use ticks::{Tick, TickOptions, TickSet};
pub use tracker::{HitGeometry, HitResult, RenderedBar, RenderedPoint, RenderedSeries, SegmentHit};
pub use transform::{AngularTransform, AxisPair, CoordinateTransform, PolarTransform, TransformSpace};
pub use types::{DataPoint, ScreenPoint, ScreenRect, ScreenVector, Thickness, Viewport};
