use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::category::CategoryLookup;
use crate::core::range::{ValueRange, shift_into};
use crate::core::tick_labels::AngleUnit;
use crate::core::ticks::{
    MAX_TARGET_TICKS, MIN_TARGET_TICKS, TickOptions, TickSet, angular_ticks,
    axis_tick_target_count, category_ticks, date_time_ticks, linear_ticks, log_ticks,
};
use crate::core::transform::{AngularTransform, CoordinateTransform, TransformSpace};
use crate::core::types::ScreenPoint;
use crate::error::{PlotError, PlotResult};

/// Edge of the plot area an axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisPosition {
    Left,
    Right,
    Top,
    Bottom,
    /// Polar axes are not attached to an edge.
    None,
}

impl AxisPosition {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    Horizontal,
    Vertical,
    Angular,
    Magnitude,
}

/// Closed set of axis kinds; each selects a transform and a tick strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AxisKind {
    Linear,
    Logarithmic {
        base: f64,
    },
    /// Values are category indices; `gap_ratio` is the empty share of each band.
    Category {
        labels: Vec<String>,
        gap_ratio: f64,
    },
    /// Values are seconds since the Unix epoch (UTC).
    DateTime,
    /// Values are angles in `unit`, swept from `start_angle_deg` to `end_angle_deg`.
    Angular {
        unit: AngleUnit,
        start_angle_deg: f64,
        end_angle_deg: f64,
    },
    /// Radius axis of a polar plot.
    Magnitude,
}

impl AxisKind {
    #[must_use]
    pub fn log10() -> Self {
        Self::Logarithmic { base: 10.0 }
    }

    #[must_use]
    pub fn category<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Category {
            labels: labels.into_iter().map(Into::into).collect(),
            gap_ratio: 0.2,
        }
    }

    #[must_use]
    pub fn angular_degrees() -> Self {
        Self::Angular {
            unit: AngleUnit::Degrees,
            start_angle_deg: 0.0,
            end_angle_deg: 360.0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Logarithmic { .. } => "logarithmic",
            Self::Category { .. } => "category",
            Self::DateTime => "date-time",
            Self::Angular { .. } => "angular",
            Self::Magnitude => "magnitude",
        }
    }

    #[must_use]
    pub fn transform_space(&self) -> TransformSpace {
        match self {
            Self::Logarithmic { base } => TransformSpace::Logarithmic { base: *base },
            _ => TransformSpace::Linear,
        }
    }

    #[must_use]
    pub fn is_polar(&self) -> bool {
        matches!(self, Self::Angular { .. } | Self::Magnitude)
    }

    fn default_range(&self) -> (f64, f64) {
        match self {
            Self::Linear | Self::Magnitude => (0.0, 1.0),
            Self::Logarithmic { base } => (1.0, *base),
            Self::Category { labels, .. } => (-0.5, labels.len().max(1) as f64 - 0.5),
            Self::DateTime => (0.0, 86_400.0),
            Self::Angular { unit, .. } => (0.0, unit.full_turn()),
        }
    }

    fn default_absolute(&self) -> (f64, f64) {
        match self {
            Self::Logarithmic { .. } => (f64::MIN_POSITIVE, f64::MAX),
            _ => (-f64::MAX, f64::MAX),
        }
    }

    fn validate(&self, axis: &str) -> PlotResult<()> {
        match self {
            Self::Logarithmic { base } if !base.is_finite() || *base <= 1.0 => {
                Err(PlotError::axis_config(axis, "logarithm base must be finite and > 1"))
            }
            Self::Category { gap_ratio, .. }
                if !gap_ratio.is_finite() || !(0.0..1.0).contains(gap_ratio) =>
            {
                Err(PlotError::axis_config(axis, "category gap ratio must be in [0, 1)"))
            }
            Self::Angular {
                start_angle_deg,
                end_angle_deg,
                ..
            } if !start_angle_deg.is_finite()
                || !end_angle_deg.is_finite()
                || start_angle_deg == end_angle_deg =>
            {
                Err(PlotError::axis_config(
                    axis,
                    "angular sweep must be finite and non-zero",
                ))
            }
            _ => Ok(()),
        }
    }
}

/// User-requested bounds; `None` means "follow the data".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DesiredRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl DesiredRange {
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn fixed(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisChangeKind {
    Panned,
    Zoomed,
    Reset,
    AutoScaled,
    RangeSet,
}

/// Outcome of a successful axis mutation, forwarded to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisChange {
    pub kind: AxisChangeKind,
    /// Desired range after the change; `None` bounds follow the data.
    pub desired: DesiredRange,
}

/// Centre and radius assigned to polar axes by the layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarFrame {
    pub center: ScreenPoint,
    pub radius: f64,
}

/// Axes keyed by id, in insertion order (which is also stacking order).
pub type AxisMap = IndexMap<String, Axis>;

const DEFAULT_PADDING: f64 = 0.01;
const DEFAULT_MIN_SPAN: f64 = 1e-12;
/// Spans narrower than this share of the range magnitude cannot be resolved.
const RELATIVE_MIN_SPAN: f64 = 1e-12;

/// Axis model: ranges, screen extent, ticks and the interaction operations.
#[derive(Debug, Clone)]
pub struct Axis {
    id: String,
    title: Option<String>,
    position: AxisPosition,
    kind: AxisKind,
    configured: DesiredRange,
    desired: DesiredRange,
    data_range: Option<(f64, f64)>,
    actual: ValueRange,
    absolute: (f64, f64),
    padding: (f64, f64),
    min_span: f64,
    screen_start: f64,
    screen_end: f64,
    reversed: bool,
    visible: bool,
    pan_enabled: bool,
    zoom_enabled: bool,
    show_major_grid: bool,
    label_angle_deg: f64,
    tick_options: TickOptions,
    ticks: TickSet,
    categories: CategoryLookup,
    polar_frame: Option<PolarFrame>,
}

impl Axis {
    /// Creates an axis, rejecting configurations that can never render.
    pub fn new(id: impl Into<String>, position: AxisPosition, kind: AxisKind) -> PlotResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PlotError::axis_config("<empty>", "axis id must not be empty"));
        }
        kind.validate(&id)?;
        if kind.is_polar() != (position == AxisPosition::None) {
            return Err(PlotError::axis_config(
                &id,
                "polar axes use position `None`; cartesian axes need an edge",
            ));
        }

        let (default_min, default_max) = kind.default_range();
        let actual = ValueRange::new(default_min, default_max)?;
        let categories = match &kind {
            AxisKind::Category { labels, .. } => CategoryLookup::new(labels.iter().cloned()),
            _ => CategoryLookup::default(),
        };
        let padding = match kind {
            AxisKind::Category { .. } | AxisKind::Angular { .. } => (0.0, 0.0),
            _ => (DEFAULT_PADDING, DEFAULT_PADDING),
        };
        let absolute = kind.default_absolute();

        Ok(Self {
            id,
            title: None,
            position,
            kind,
            configured: DesiredRange::default(),
            desired: DesiredRange::default(),
            data_range: None,
            actual,
            absolute,
            padding,
            min_span: DEFAULT_MIN_SPAN,
            screen_start: 0.0,
            screen_end: 0.0,
            reversed: false,
            visible: true,
            pan_enabled: true,
            zoom_enabled: true,
            show_major_grid: false,
            label_angle_deg: 0.0,
            tick_options: TickOptions::default(),
            ticks: TickSet::default(),
            categories,
            polar_frame: None,
        })
    }

    pub fn linear(id: impl Into<String>, position: AxisPosition) -> PlotResult<Self> {
        Self::new(id, position, AxisKind::Linear)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Fixes the configured range; `reset` returns here.
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> PlotResult<Self> {
        for bound in [min, max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(PlotError::axis_config(&self.id, "range bounds must be finite"));
            }
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min >= max {
                return Err(PlotError::axis_config(&self.id, "range min must be < max"));
            }
        }
        self.configured = DesiredRange::new(min, max);
        self.desired = self.configured;
        Ok(self)
    }

    /// Hard clamp beyond which pan and zoom cannot go.
    pub fn with_absolute_range(mut self, min: f64, max: f64) -> PlotResult<Self> {
        if min.is_nan() || max.is_nan() || min >= max {
            return Err(PlotError::axis_config(
                &self.id,
                format!("absolute range min ({min}) must be < max ({max})"),
            ));
        }
        if let AxisKind::Logarithmic { .. } = self.kind {
            if max <= 0.0 {
                return Err(PlotError::axis_config(
                    &self.id,
                    "logarithmic absolute range must contain positive values",
                ));
            }
        }
        let floor = self.kind.default_absolute();
        let (min, max) = (min.max(floor.0), max.min(floor.1));
        if min >= max {
            return Err(PlotError::axis_config(
                &self.id,
                "absolute range leaves no usable span for this axis kind",
            ));
        }
        self.absolute = (min, max);
        Ok(self)
    }

    /// Fractions of the data span added below and above the data.
    pub fn with_padding(mut self, min_padding: f64, max_padding: f64) -> PlotResult<Self> {
        if !min_padding.is_finite()
            || !max_padding.is_finite()
            || min_padding < 0.0
            || max_padding < 0.0
        {
            return Err(PlotError::axis_config(
                &self.id,
                "padding fractions must be finite and >= 0",
            ));
        }
        self.padding = (min_padding, max_padding);
        Ok(self)
    }

    /// Narrowest range zooming may reach, in the axis' uniform space
    /// (axis units, or powers of the base for logarithmic axes).
    pub fn with_min_span(mut self, min_span: f64) -> PlotResult<Self> {
        if !min_span.is_finite() || min_span <= 0.0 {
            return Err(PlotError::axis_config(&self.id, "min span must be finite and > 0"));
        }
        self.min_span = min_span;
        Ok(self)
    }

    #[must_use]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    #[must_use]
    pub fn with_tick_options(mut self, options: TickOptions) -> Self {
        self.tick_options = options;
        self
    }

    #[must_use]
    pub fn with_pan_enabled(mut self, enabled: bool) -> Self {
        self.pan_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_zoom_enabled(mut self, enabled: bool) -> Self {
        self.zoom_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_major_grid(mut self, show: bool) -> Self {
        self.show_major_grid = show;
        self
    }

    /// Tick label rotation in degrees (counter-clockwise).
    #[must_use]
    pub fn with_label_angle(mut self, degrees: f64) -> Self {
        if degrees.is_finite() {
            self.label_angle_deg = degrees;
        }
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
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
    pub fn position(&self) -> AxisPosition {
        self.position
    }

    #[must_use]
    pub fn kind(&self) -> &AxisKind {
        &self.kind
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        match self.kind {
            AxisKind::Angular { .. } => AxisOrientation::Angular,
            AxisKind::Magnitude => AxisOrientation::Magnitude,
            _ if self.position.is_horizontal() => AxisOrientation::Horizontal,
            _ => AxisOrientation::Vertical,
        }
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.orientation() == AxisOrientation::Horizontal
    }

    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.orientation() == AxisOrientation::Vertical
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    #[must_use]
    pub fn shows_major_grid(&self) -> bool {
        self.show_major_grid
    }

    #[must_use]
    pub fn label_angle_deg(&self) -> f64 {
        self.label_angle_deg
    }

    #[must_use]
    pub fn desired_range(&self) -> DesiredRange {
        self.desired
    }

    #[must_use]
    pub fn configured_range(&self) -> DesiredRange {
        self.configured
    }

    /// Range rendered by the last update pass.
    #[must_use]
    pub fn actual_range(&self) -> (f64, f64) {
        self.actual.as_tuple()
    }

    /// Padded range derived from data by the last auto-scale.
    #[must_use]
    pub fn data_range(&self) -> Option<(f64, f64)> {
        self.data_range
    }

    #[must_use]
    pub fn absolute_range(&self) -> (f64, f64) {
        self.absolute
    }

    #[must_use]
    pub fn padding(&self) -> (f64, f64) {
        self.padding
    }

    #[must_use]
    pub fn min_span(&self) -> f64 {
        self.min_span
    }

    #[must_use]
    pub fn screen_extent(&self) -> (f64, f64) {
        (self.screen_start, self.screen_end)
    }

    #[must_use]
    pub fn ticks(&self) -> &TickSet {
        &self.ticks
    }

    #[must_use]
    pub fn tick_options(&self) -> TickOptions {
        self.tick_options
    }

    #[must_use]
    pub fn categories(&self) -> &CategoryLookup {
        &self.categories
    }

    #[must_use]
    pub fn polar_frame(&self) -> Option<PolarFrame> {
        self.polar_frame
    }

    /// Category band width in pixels (0 for non-category axes).
    #[must_use]
    pub fn band_width_px(&self) -> f64 {
        match (&self.kind, self.transform()) {
            (AxisKind::Category { gap_ratio, .. }, Ok(transform)) => {
                transform.extent_px(1.0) * (1.0 - gap_ratio)
            }
            _ => 0.0,
        }
    }

    /// Value↔screen transform for the current actual range and screen extent.
    ///
    /// Angular axes map to angles instead; see [`Axis::angular_transform`].
    pub fn transform(&self) -> PlotResult<CoordinateTransform> {
        if let AxisKind::Angular { .. } = self.kind {
            return Err(PlotError::InvalidData(format!(
                "axis `{}` is angular and has no linear screen transform",
                self.id
            )));
        }
        let (min, max) = self.actual.as_tuple();
        CoordinateTransform::new(
            self.kind.transform_space(),
            min,
            max,
            self.screen_start,
            self.screen_end,
        )
    }

    pub fn angular_transform(&self) -> PlotResult<AngularTransform> {
        match self.kind {
            AxisKind::Angular {
                start_angle_deg,
                end_angle_deg,
                ..
            } => {
                let (min, max) = self.actual.as_tuple();
                let (start, end) = if self.reversed {
                    (end_angle_deg, start_angle_deg)
                } else {
                    (start_angle_deg, end_angle_deg)
                };
                AngularTransform::new(min, max, start.to_radians(), end.to_radians())
            }
            _ => Err(PlotError::InvalidData(format!(
                "axis `{}` is not angular",
                self.id
            ))),
        }
    }

    fn space(&self) -> TransformSpace {
        self.kind.transform_space()
    }

    fn absolute_transformed(&self) -> (f64, f64) {
        let space = self.space();
        let low = space.forward(self.absolute.0).unwrap_or(-f64::MAX);
        let high = space.forward(self.absolute.1).unwrap_or(f64::MAX);
        (low, high)
    }

    fn effective_min_span(&self, center: f64) -> f64 {
        self.min_span.max(center.abs() * RELATIVE_MIN_SPAN)
    }

    /// Cuts a transformed window to the absolute clamp. A window the clamp
    /// narrows below `min_span` becomes the narrowest legal one.
    fn clamp_window(&self, low: f64, high: f64, min_span: f64) -> (f64, f64) {
        let absolute = self.absolute_transformed();
        let low = low.max(absolute.0);
        let high = high.min(absolute.1);
        if high - low < min_span {
            return shift_into(low, low + min_span, absolute);
        }
        (low, high)
    }

    /// Applies a new transformed-space range to the desired range if it is
    /// finite, non-degenerate and resolvable; otherwise leaves state alone.
    fn commit_transformed(&mut self, low: f64, high: f64, kind: AxisChangeKind) -> Option<AxisChange> {
        let space = self.space();
        let min = space.inverse(low);
        let max = space.inverse(high);
        if !min.is_finite()
            || !max.is_finite()
            || !(max - min).is_finite()
            || !(high - low).is_finite()
            || min >= max
            || !(high > low)
        {
            trace!(axis = %self.id, ?kind, min, max, "rejected axis range change");
            return None;
        }
        self.desired = DesiredRange::fixed(min, max);
        self.actual = ValueRange::new(min, max).ok()?;
        debug!(axis = %self.id, ?kind, min, max, "axis range changed");
        Some(AxisChange {
            kind,
            desired: self.desired,
        })
    }

    /// Shifts the range by a screen-space delta (content follows the pointer).
    pub fn pan(&mut self, screen_delta: f64) -> Option<AxisChange> {
        if !self.pan_enabled || self.kind.is_polar() || !screen_delta.is_finite() {
            return None;
        }
        if screen_delta == 0.0 {
            return None;
        }
        let transform = self.transform().ok()?;
        let origin = transform.screen_to_transformed(self.screen_start).ok()?;
        let moved = transform
            .screen_to_transformed(self.screen_start - screen_delta)
            .ok()?;
        let shift = moved - origin;
        let range = transform.transformed_range();
        let (low, high) = shift_into(
            range.min() + shift,
            range.max() + shift,
            self.absolute_transformed(),
        );
        self.commit_transformed(low, high, AxisChangeKind::Panned)
    }

    /// Scales the range around the value under `screen_position`.
    ///
    /// `factor > 1` zooms in. The result never goes below the minimum span
    /// and never leaves the absolute range.
    pub fn zoom_at(&mut self, screen_position: f64, factor: f64) -> Option<AxisChange> {
        if !self.zoom_enabled || !factor.is_finite() || factor <= 0.0 {
            return None;
        }
        if matches!(self.kind, AxisKind::Angular { .. }) {
            return None;
        }
        let transform = self.transform().ok()?;
        let anchor = transform.screen_to_transformed(screen_position).ok()?;
        self.zoom_transformed(anchor, factor)
    }

    /// Zooms around the centre of the current range.
    pub fn zoom(&mut self, factor: f64) -> Option<AxisChange> {
        if !self.zoom_enabled || !factor.is_finite() || factor <= 0.0 {
            return None;
        }
        if matches!(self.kind, AxisKind::Angular { .. }) {
            return None;
        }
        let anchor = self.transform().ok()?.transformed_range().center();
        self.zoom_transformed(anchor, factor)
    }

    fn zoom_transformed(&mut self, anchor: f64, factor: f64) -> Option<AxisChange> {
        let current = self.transform().ok()?.transformed_range();
        let mut low = anchor + (current.min() - anchor) / factor;
        let mut high = anchor + (current.max() - anchor) / factor;

        let min_span = self.effective_min_span(anchor);
        if high - low < min_span {
            let ratio = if current.span() > 0.0 {
                ((anchor - current.min()) / current.span()).clamp(0.0, 1.0)
            } else {
                0.5
            };
            low = anchor - ratio * min_span;
            high = low + min_span;
        }

        let (low, high) = self.clamp_window(low, high, min_span);
        self.commit_transformed(low, high, AxisChangeKind::Zoomed)
    }

    /// Restores the configured range (auto-scaled bounds follow the data again).
    pub fn reset(&mut self) -> Option<AxisChange> {
        self.desired = self.configured;
        self.update_actual_range();
        debug!(axis = %self.id, "axis reset");
        Some(AxisChange {
            kind: AxisChangeKind::Reset,
            desired: self.desired,
        })
    }

    /// Sets the desired range directly, cut to the absolute clamp and
    /// widened to the minimum span.
    pub fn set_range(&mut self, min: f64, max: f64) -> PlotResult<AxisChange> {
        let range = ValueRange::new(min, max)?;
        let space = self.space();
        let mut low = space.forward(range.min())?;
        let mut high = space.forward(range.max())?;
        let center = (low + high) * 0.5;
        let min_span = self.effective_min_span(center);
        if high - low < min_span {
            low = center - min_span * 0.5;
            high = center + min_span * 0.5;
        }
        let (low, high) = self.clamp_window(low, high, min_span);
        self.commit_transformed(low, high, AxisChangeKind::RangeSet)
            .ok_or(PlotError::DegenerateRange { min, max })
    }

    /// Derives the data-driven range from the extent of the bound series.
    ///
    /// Padding fractions are applied in the axis' uniform space. With no
    /// usable data the axis falls back to its kind's default range.
    pub fn auto_scale(&mut self, data_min: f64, data_max: f64) -> Option<AxisChange> {
        self.data_range = self.padded_data_range(data_min, data_max);
        trace!(axis = %self.id, data_range = ?self.data_range, "axis auto-scaled");
        Some(AxisChange {
            kind: AxisChangeKind::AutoScaled,
            desired: self.desired,
        })
    }

    /// Clears the data-driven range (no series bound to this axis).
    pub fn clear_data_range(&mut self) {
        self.data_range = None;
    }

    fn padded_data_range(&self, data_min: f64, data_max: f64) -> Option<(f64, f64)> {
        let space = self.space();
        if !space.accepts(data_min) || !space.accepts(data_max) || data_min > data_max {
            return None;
        }
        match &self.kind {
            AxisKind::Angular { unit, .. } => return Some((0.0, unit.full_turn())),
            AxisKind::Category { .. } => {
                let last = self.categories.len().max(1) as f64 - 1.0;
                return Some((data_min.min(0.0) - 0.5, data_max.max(last) + 0.5));
            }
            _ => {}
        }

        let low = space.forward(data_min).ok()?;
        let high = space.forward(data_max).ok()?;
        let span = high - low;
        let padded_low = low - span * self.padding.0;
        let padded_high = high + span * self.padding.1;
        let mut min = space.inverse(padded_low);
        let max = space.inverse(padded_high);
        if matches!(self.kind, AxisKind::Magnitude) {
            min = min.min(0.0).max(data_min.min(0.0));
        }
        Some((min, max))
    }

    /// Recomputes the actual range from desired, data and default ranges.
    ///
    /// Returns `true` when a degenerate or out-of-domain range had to be
    /// repaired.
    pub fn update_actual_range(&mut self) -> bool {
        let fallback = self.data_range.unwrap_or_else(|| self.kind.default_range());
        let mut min = self.desired.min.unwrap_or(fallback.0);
        let mut max = self.desired.max.unwrap_or(fallback.1);
        let mut recovered = false;

        if !min.is_finite() || !max.is_finite() {
            (min, max) = self.kind.default_range();
            recovered = true;
        }
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }

        let space = self.space();
        if let TransformSpace::Logarithmic { base } = space {
            if max <= 0.0 {
                (min, max) = (1.0, base);
                recovered = true;
            } else if min <= 0.0 {
                min = max / base;
                recovered = true;
            }
        }

        min = min.max(self.absolute.0);
        max = max.min(self.absolute.1);

        if max <= min {
            (min, max) = expand_zero_range(space, min);
            recovered = true;
        }

        // Both bounds are now valid for the space.
        let (mut low, mut high) = match (space.forward(min), space.forward(max)) {
            (Ok(low), Ok(high)) => (low, high),
            _ => {
                let (min, max) = self.kind.default_range();
                self.actual = ValueRange::new(min, max).unwrap_or(self.actual);
                return true;
            }
        };
        let min_span = self.effective_min_span((low + high) * 0.5);
        if high - low < min_span {
            let center = (low + high) * 0.5;
            low = center - min_span * 0.5;
            high = center + min_span * 0.5;
            recovered = true;
        }
        let (low, high) = shift_into(low, high, self.absolute_transformed());
        if !(high - low).is_finite() {
            debug!(axis = %self.id, low, high, "keeping previous actual range");
            return true;
        }

        match ValueRange::new(space.inverse(low), space.inverse(high)) {
            Ok(range) => self.actual = range,
            Err(err) => {
                debug!(axis = %self.id, error = %err, "keeping previous actual range");
                recovered = true;
            }
        }
        if recovered {
            debug!(axis = %self.id, range = ?self.actual.as_tuple(), "recovered axis range");
        }
        recovered
    }

    /// Number of major ticks wanted for a screen extent of `extent_px`.
    #[must_use]
    pub fn desired_tick_count(&self, extent_px: f64) -> usize {
        axis_tick_target_count(
            extent_px,
            self.tick_options.target_spacing_px,
            MIN_TARGET_TICKS,
            MAX_TARGET_TICKS,
        )
    }

    /// Regenerates ticks for the given screen extent; returns `true` when the
    /// overflow guard coarsened the interval.
    pub fn update_ticks(&mut self, extent_px: f64) -> bool {
        let desired = self.desired_tick_count(extent_px);
        let range = self.actual.as_tuple();
        self.ticks = match &self.kind {
            AxisKind::Linear | AxisKind::Magnitude => {
                linear_ticks(range, desired, &self.tick_options)
            }
            AxisKind::Logarithmic { base } => log_ticks(range, *base, desired, &self.tick_options),
            AxisKind::Category { .. } => category_ticks(range, &self.categories),
            AxisKind::DateTime => date_time_ticks(range, desired, &self.tick_options),
            AxisKind::Angular { unit, .. } => {
                angular_ticks(range, *unit, desired, &self.tick_options)
            }
        };
        if self.ticks.coarsened {
            debug!(axis = %self.id, step = self.ticks.major_step, "tick density coarsened");
        }
        self.ticks.coarsened
    }

    /// Length of the screen extent in pixels.
    #[must_use]
    pub fn extent_px(&self) -> f64 {
        match (&self.kind, self.polar_frame) {
            (AxisKind::Angular { .. }, Some(frame)) => std::f64::consts::TAU * frame.radius,
            (AxisKind::Magnitude, Some(frame)) => frame.radius,
            _ => (self.screen_end - self.screen_start).abs(),
        }
    }

    /// Written by the layout pass only.
    pub(crate) fn set_screen_extent(&mut self, start: f64, end: f64) {
        if self.reversed {
            self.screen_start = end;
            self.screen_end = start;
        } else {
            self.screen_start = start;
            self.screen_end = end;
        }
    }

    pub(crate) fn set_polar_frame(&mut self, frame: PolarFrame) {
        self.polar_frame = Some(frame);
        if matches!(self.kind, AxisKind::Magnitude) {
            self.set_screen_extent(0.0, frame.radius);
        }
    }
}

fn expand_zero_range(space: TransformSpace, value: f64) -> (f64, f64) {
    match space {
        TransformSpace::Logarithmic { base } => (value / base, value * base),
        TransformSpace::Linear => {
            let half = if value == 0.0 { 0.5 } else { value.abs() * 0.5 };
            (value - half, value + half)
        }
    }
}
