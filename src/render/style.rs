use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::render::Color;

/// Colors and stroke widths for everything that is not a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub background: Option<Color>,
    pub plot_background: Option<Color>,
    pub plot_border: Option<Color>,
    pub axis_color: Color,
    pub text_color: Color,
    pub major_grid_color: Color,
    pub axis_line_width: f64,
    pub grid_line_width: f64,
    pub minor_tick_length_ratio: f64,
    pub legend_background: Option<Color>,
    pub legend_border: Option<Color>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: None,
            plot_background: None,
            plot_border: Some(Color::rgb(0.2, 0.2, 0.2)),
            axis_color: Color::rgb(0.2, 0.2, 0.2),
            text_color: Color::BLACK,
            major_grid_color: Color::rgba(0.0, 0.0, 0.0, 0.12),
            axis_line_width: 1.0,
            grid_line_width: 1.0,
            minor_tick_length_ratio: 0.6,
            legend_background: Some(Color::rgba(1.0, 1.0, 1.0, 0.85)),
            legend_border: Some(Color::rgb(0.6, 0.6, 0.6)),
        }
    }
}

impl PlotStyle {
    pub fn validate(self) -> PlotResult<()> {
        for color in [
            self.background,
            self.plot_background,
            self.plot_border,
            Some(self.axis_color),
            Some(self.text_color),
            Some(self.major_grid_color),
            self.legend_background,
            self.legend_border,
        ]
        .into_iter()
        .flatten()
        {
            color.validate()?;
        }
        for (name, value) in [
            ("axis_line_width", self.axis_line_width),
            ("grid_line_width", self.grid_line_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlotError::InvalidData(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.minor_tick_length_ratio.is_finite()
            || !(0.0..=1.0).contains(&self.minor_tick_length_ratio)
        {
            return Err(PlotError::InvalidData(
                "style `minor_tick_length_ratio` must be in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}
