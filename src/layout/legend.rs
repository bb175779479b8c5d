use serde::{Deserialize, Serialize};

use crate::core::{ScreenPoint, ScreenRect};
use crate::error::{PlotError, PlotResult};
use crate::layout::{TextMeasurer, TextSize};

/// Whether the legend takes space from the plot or floats over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LegendPlacement {
    #[default]
    Outside,
    Inside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LegendEdge {
    Top,
    #[default]
    Right,
    Bottom,
    Left,
}

impl LegendEdge {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LegendOrientation {
    Horizontal,
    #[default]
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub visible: bool,
    pub placement: LegendPlacement,
    pub edge: LegendEdge,
    pub orientation: LegendOrientation,
    pub font_size_px: f64,
    pub symbol_width_px: f64,
    /// Gap between entries and between the legend and its neighbours.
    pub item_spacing_px: f64,
    pub padding_px: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            visible: true,
            placement: LegendPlacement::Outside,
            edge: LegendEdge::Right,
            orientation: LegendOrientation::Vertical,
            font_size_px: 12.0,
            symbol_width_px: 20.0,
            item_spacing_px: 8.0,
            padding_px: 6.0,
        }
    }
}

impl LegendConfig {
    pub fn validate(self) -> PlotResult<()> {
        for (name, value) in [
            ("font_size_px", self.font_size_px),
            ("symbol_width_px", self.symbol_width_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlotError::InvalidData(format!(
                    "legend `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("item_spacing_px", self.item_spacing_px),
            ("padding_px", self.padding_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlotError::InvalidData(format!(
                    "legend `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

const SYMBOL_TEXT_GAP_PX: f64 = 4.0;

/// Placed legend entry, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendItemPlacement {
    pub entry: usize,
    pub symbol: ScreenRect,
    /// Left-middle anchor of the entry text.
    pub text_anchor: ScreenPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendBlock {
    pub bounds: ScreenRect,
    pub items: Vec<LegendItemPlacement>,
}

struct FlowItem {
    x: f64,
    y: f64,
    height: f64,
}

/// Lays entries out left to right (wrapping at `max_width`) or top to bottom.
fn flow(
    titles: &[String],
    config: &LegendConfig,
    measurer: &dyn TextMeasurer,
    max_width: f64,
) -> (Vec<FlowItem>, TextSize) {
    let inner_max = (max_width - config.padding_px * 2.0).max(0.0);
    let mut items = Vec::with_capacity(titles.len());
    let (mut x, mut y, mut row_height, mut width) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);

    for title in titles {
        let text = measurer.measure_text(title, config.font_size_px);
        let item_width = config.symbol_width_px + SYMBOL_TEXT_GAP_PX + text.width;
        let item_height = text.height.max(config.font_size_px);

        let wraps = match config.orientation {
            LegendOrientation::Vertical => !items.is_empty(),
            LegendOrientation::Horizontal => x > 0.0 && x + item_width > inner_max,
        };
        if wraps {
            y += row_height + config.item_spacing_px;
            x = 0.0;
            row_height = 0.0;
        }
        items.push(FlowItem {
            x,
            y,
            height: item_height,
        });
        width = width.max(x + item_width);
        row_height = row_height.max(item_height);
        x += item_width + config.item_spacing_px;
    }

    let size = if items.is_empty() {
        TextSize::default()
    } else {
        TextSize::new(
            width + config.padding_px * 2.0,
            y + row_height + config.padding_px * 2.0,
        )
    };
    (items, size)
}

/// Size the legend needs for `titles` when at most `max_width` is available.
#[must_use]
pub fn measure_legend(
    titles: &[String],
    config: &LegendConfig,
    measurer: &dyn TextMeasurer,
    max_width: f64,
) -> TextSize {
    flow(titles, config, measurer, max_width).1
}

/// Places entries inside `bounds` (whose size came from [`measure_legend`]).
#[must_use]
pub fn arrange_legend(
    titles: &[String],
    config: &LegendConfig,
    measurer: &dyn TextMeasurer,
    bounds: ScreenRect,
) -> LegendBlock {
    let (items, _) = flow(titles, config, measurer, bounds.width);
    let symbol_height = config.font_size_px * 0.8;
    let items = items
        .into_iter()
        .enumerate()
        .map(|(entry, item)| {
            let left = bounds.left + config.padding_px + item.x;
            let middle = bounds.top + config.padding_px + item.y + item.height * 0.5;
            LegendItemPlacement {
                entry,
                symbol: ScreenRect::new(
                    left,
                    middle - symbol_height * 0.5,
                    config.symbol_width_px,
                    symbol_height,
                ),
                text_anchor: ScreenPoint::new(
                    left + config.symbol_width_px + SYMBOL_TEXT_GAP_PX,
                    middle,
                ),
            }
        })
        .collect();
    LegendBlock { bounds, items }
}

#[cfg(test)]
mod tests {
    use super::{LegendConfig, LegendOrientation, measure_legend};
    use crate::layout::HeuristicTextMeasurer;

    #[test]
    fn horizontal_legend_wraps_at_available_width() {
        let titles: Vec<String> = ["alpha", "beta", "gamma", "delta"]
            .iter()
            .map(|title| (*title).to_owned())
            .collect();
        let config = LegendConfig {
            orientation: LegendOrientation::Horizontal,
            ..LegendConfig::default()
        };
        let measurer = HeuristicTextMeasurer::default();
        let wide = measure_legend(&titles, &config, &measurer, 2000.0);
        let narrow = measure_legend(&titles, &config, &measurer, 120.0);
        assert!(narrow.height > wide.height);
        assert!(narrow.width <= wide.width);
    }

    #[test]
    fn empty_legend_has_no_size() {
        let measurer = HeuristicTextMeasurer::default();
        let size = measure_legend(&[], &LegendConfig::default(), &measurer, 500.0);
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 0.0);
    }
}
