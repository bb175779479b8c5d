use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::layout::{LayoutConfig, LegendConfig};
use crate::render::PlotStyle;

/// Tracker behaviour for `PlotAction::Track`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub enabled: bool,
    /// Maximum pointer distance, in pixels, for a hit.
    pub tolerance_px: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance_px: 10.0,
        }
    }
}

impl TrackerConfig {
    pub fn validate(self) -> PlotResult<()> {
        if !self.tolerance_px.is_finite() || self.tolerance_px < 0.0 {
            return Err(PlotError::InvalidData(
                "tracker tolerance must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Public bootstrap configuration for [`crate::api::PlotModel`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotModelConfig {
    pub title: Option<String>,
    pub layout: LayoutConfig,
    pub legend: LegendConfig,
    pub tracker: TrackerConfig,
    pub style: PlotStyle,
}

impl PlotModelConfig {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendConfig) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_tracker(mut self, tracker: TrackerConfig) -> Self {
        self.tracker = tracker;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        self.layout.validate()?;
        self.legend.validate()?;
        self.tracker.validate()?;
        self.style.validate()
    }
}
