use serde::{Deserialize, Serialize};

use crate::core::category::{CategoryLookup, CategoryValue};
use crate::core::types::DataPoint;
use crate::error::{PlotError, PlotResult};
use crate::render::Color;

/// Geometry family of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SeriesKind {
    Line,
    Scatter { marker_size_px: f64 },
    /// Filled between the line and `baseline` (Y value).
    Area { baseline: f64 },
    /// Vertical bars from `baseline` up to each value.
    Bar { baseline: f64 },
}

impl SeriesKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Scatter { .. } => "scatter",
            Self::Area { .. } => "area",
            Self::Bar { .. } => "bar",
        }
    }

    /// Y value that must stay visible when the series auto-scales.
    #[must_use]
    pub fn baseline(self) -> Option<f64> {
        match self {
            Self::Area { baseline } | Self::Bar { baseline } => Some(baseline),
            _ => None,
        }
    }
}

/// How the tracker resolves a pointer against a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackingMode {
    /// Nearest point on the drawn geometry, interpolating along segments.
    #[default]
    Interpolate,
    /// Nearest data vertex only.
    NearestVertex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesData {
    Points(Vec<DataPoint>),
    /// Values keyed by category label, resolved against the X axis categories.
    Categorized(Vec<CategoryValue>),
}

impl Default for SeriesData {
    fn default() -> Self {
        Self::Points(Vec::new())
    }
}

impl SeriesData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Points(points) => points.len(),
            Self::Categorized(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: Color,
    pub stroke_width: f64,
    /// Fill for areas, bars and markers; derived from `color` when `None`.
    pub fill: Option<Color>,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.12, 0.47, 0.71),
            stroke_width: 1.5,
            fill: None,
        }
    }
}

impl SeriesStyle {
    pub fn validate(self) -> PlotResult<()> {
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(PlotError::InvalidData(
                "series stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()?;
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn fill_color(self) -> Color {
        self.fill.unwrap_or(self.color.with_alpha(0.35))
    }
}

/// Outcome of resolving series data into numeric points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPoints {
    /// One slot per input item; `None` marks items that could not be placed.
    pub points: Vec<Option<DataPoint>>,
    pub unresolved: usize,
}

/// A data series bound to one X axis and one Y axis by id.
///
/// Axis ids left unset bind to the model's default axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    id: String,
    title: Option<String>,
    kind: SeriesKind,
    data: SeriesData,
    x_axis: Option<String>,
    y_axis: Option<String>,
    visible: bool,
    tracking: TrackingMode,
    style: SeriesStyle,
}

impl Series {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: SeriesKind) -> Self {
        Self {
            id: id.into(),
            title: None,
            kind,
            data: SeriesData::default(),
            x_axis: None,
            y_axis: None,
            visible: true,
            tracking: TrackingMode::default(),
            style: SeriesStyle::default(),
        }
    }

    #[must_use]
    pub fn line(id: impl Into<String>) -> Self {
        Self::new(id, SeriesKind::Line)
    }

    #[must_use]
    pub fn scatter(id: impl Into<String>, marker_size_px: f64) -> Self {
        Self::new(id, SeriesKind::Scatter { marker_size_px })
    }

    #[must_use]
    pub fn with_points<I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = DataPoint>,
    {
        self.data = SeriesData::Points(points.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_xy<I>(self, points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.with_points(points.into_iter().map(|(x, y)| DataPoint::new(x, y)))
    }

    #[must_use]
    pub fn with_categories<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = CategoryValue>,
    {
        self.data = SeriesData::Categorized(values.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_axes(mut self, x_axis: impl Into<String>, y_axis: impl Into<String>) -> Self {
        self.x_axis = Some(x_axis.into());
        self.y_axis = Some(y_axis.into());
        self
    }

    #[must_use]
    pub fn with_tracking(mut self, tracking: TrackingMode) -> Self {
        self.tracking = tracking;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_data(&mut self, data: SeriesData) {
        self.data = data;
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    #[must_use]
    pub fn data(&self) -> &SeriesData {
        &self.data
    }

    #[must_use]
    pub fn x_axis(&self) -> Option<&str> {
        self.x_axis.as_deref()
    }

    #[must_use]
    pub fn y_axis(&self) -> Option<&str> {
        self.y_axis.as_deref()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn tracking(&self) -> TrackingMode {
        self.tracking
    }

    #[must_use]
    pub fn style(&self) -> SeriesStyle {
        self.style
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.id.trim().is_empty() {
            return Err(PlotError::InvalidData("series id must not be empty".to_owned()));
        }
        match self.kind {
            SeriesKind::Scatter { marker_size_px }
                if !marker_size_px.is_finite() || marker_size_px <= 0.0 =>
            {
                return Err(PlotError::InvalidData(format!(
                    "series `{}`: marker size must be finite and > 0",
                    self.id
                )));
            }
            SeriesKind::Area { baseline } | SeriesKind::Bar { baseline } if !baseline.is_finite() => {
                return Err(PlotError::InvalidData(format!(
                    "series `{}`: baseline must be finite",
                    self.id
                )));
            }
            _ => {}
        }
        self.style.validate()
    }

    /// Turns the series data into numeric points.
    ///
    /// Categorized values take the X position of their label in `categories`;
    /// labels the axis does not know are left unresolved.
    #[must_use]
    pub fn resolve_points(&self, categories: &CategoryLookup) -> ResolvedPoints {
        match &self.data {
            SeriesData::Points(points) => ResolvedPoints {
                points: points.iter().copied().map(Some).collect(),
                unresolved: 0,
            },
            SeriesData::Categorized(values) => {
                let mut unresolved = 0;
                let points = values
                    .iter()
                    .map(|item| match categories.index_of(&item.category) {
                        Some(index) => Some(DataPoint::new(index as f64, item.value)),
                        None => {
                            unresolved += 1;
                            None
                        }
                    })
                    .collect();
                ResolvedPoints { points, unresolved }
            }
        }
    }
}
