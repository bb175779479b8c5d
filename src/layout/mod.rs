//! Plot-area layout: text measurement, legend flow and the iterative solver.

mod engine;
mod legend;
mod measure;

pub use engine::{AxisBand, LayoutConfig, LayoutEngine, LayoutInput, LayoutState, PlotLayout};
pub use legend::{
    LegendBlock, LegendConfig, LegendEdge, LegendItemPlacement, LegendOrientation,
    LegendPlacement, arrange_legend, measure_legend,
};
pub use measure::{HeuristicTextMeasurer, TextMeasurer, TextSize};
