use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::range::ValueRange;
use crate::core::types::{DataPoint, ScreenPoint};
use crate::error::{PlotError, PlotResult};

/// Value space in which an axis is uniform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformSpace {
    /// Uniform in raw axis units.
    Linear,
    /// Uniform in `log_base(value)`; only positive values are valid.
    Logarithmic { base: f64 },
}

impl TransformSpace {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Logarithmic { .. } => "logarithmic",
        }
    }

    /// Whether `value` can be mapped by this space.
    #[must_use]
    pub fn accepts(self, value: f64) -> bool {
        match self {
            Self::Linear => value.is_finite(),
            Self::Logarithmic { .. } => value.is_finite() && value > 0.0,
        }
    }

    /// Maps a raw value into the uniform space.
    pub fn forward(self, value: f64) -> PlotResult<f64> {
        if !self.accepts(value) {
            return Err(PlotError::InvalidDataValue {
                value,
                axis_kind: self.name(),
            });
        }
        Ok(match self {
            Self::Linear => value,
            Self::Logarithmic { base } if base == 10.0 => value.log10(),
            Self::Logarithmic { base } => value.log(base),
        })
    }

    /// Maps a uniform-space value back to raw axis units.
    #[must_use]
    pub fn inverse(self, transformed: f64) -> f64 {
        match self {
            Self::Linear => transformed,
            Self::Logarithmic { base } => base.powf(transformed),
        }
    }
}

/// Affine mapping between one axis' value range and its screen extent.
///
/// The mapping is `s0 + (t(v) - t(min)) / (t(max) - t(min)) * (s1 - s0)` where
/// `t` is the identity for linear axes and `log_base` for logarithmic ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTransform {
    space: TransformSpace,
    transformed: ValueRange,
    screen_start: f64,
    screen_end: f64,
    recovered_degenerate: bool,
}

impl CoordinateTransform {
    pub fn new(
        space: TransformSpace,
        data_min: f64,
        data_max: f64,
        screen_start: f64,
        screen_end: f64,
    ) -> PlotResult<Self> {
        if !data_min.is_finite() || !data_max.is_finite() {
            return Err(PlotError::InvalidData(
                "transform range must be finite".to_owned(),
            ));
        }
        if !screen_start.is_finite() || !screen_end.is_finite() {
            return Err(PlotError::InvalidData(
                "transform screen extent must be finite".to_owned(),
            ));
        }

        let (data_min, data_max) = clamp_range_to_space(space, data_min, data_max);
        let (transformed, recovered_degenerate) =
            ValueRange::new_recovering(space.forward(data_min)?, space.forward(data_max)?)?;

        Ok(Self {
            space,
            transformed,
            screen_start,
            screen_end,
            recovered_degenerate,
        })
    }

    /// Linear transform shortcut.
    pub fn linear(
        data_min: f64,
        data_max: f64,
        screen_start: f64,
        screen_end: f64,
    ) -> PlotResult<Self> {
        Self::new(
            TransformSpace::Linear,
            data_min,
            data_max,
            screen_start,
            screen_end,
        )
    }

    #[must_use]
    pub fn space(self) -> TransformSpace {
        self.space
    }

    /// Effective data range after log clamping and degenerate recovery.
    #[must_use]
    pub fn data_range(self) -> (f64, f64) {
        (
            self.space.inverse(self.transformed.min()),
            self.space.inverse(self.transformed.max()),
        )
    }

    #[must_use]
    pub fn transformed_range(self) -> ValueRange {
        self.transformed
    }

    #[must_use]
    pub fn screen_range(self) -> (f64, f64) {
        (self.screen_start, self.screen_end)
    }

    /// Whether construction had to widen a zero-width range.
    #[must_use]
    pub fn recovered_degenerate(self) -> bool {
        self.recovered_degenerate
    }

    /// Signed pixels per transformed unit.
    #[must_use]
    pub fn scale(self) -> f64 {
        (self.screen_end - self.screen_start) / self.transformed.span()
    }

    /// Pixels covered by `units` transformed units, always >= 0.
    #[must_use]
    pub fn extent_px(self, units: f64) -> f64 {
        (self.scale() * units).abs()
    }

    pub fn to_screen(self, value: f64) -> PlotResult<f64> {
        let transformed = self.space.forward(value)?;
        Ok(self.transformed_to_screen(transformed))
    }

    #[must_use]
    pub fn transformed_to_screen(self, transformed: f64) -> f64 {
        let normalized = (transformed - self.transformed.min()) / self.transformed.span();
        self.screen_start + normalized * (self.screen_end - self.screen_start)
    }

    pub fn to_data(self, screen: f64) -> PlotResult<f64> {
        Ok(self.space.inverse(self.screen_to_transformed(screen)?))
    }

    pub fn screen_to_transformed(self, screen: f64) -> PlotResult<f64> {
        if !screen.is_finite() {
            return Err(PlotError::InvalidData(
                "screen position must be finite".to_owned(),
            ));
        }
        let extent = self.screen_end - self.screen_start;
        if extent == 0.0 {
            return Err(PlotError::DegenerateRange {
                min: self.screen_start,
                max: self.screen_end,
            });
        }
        let normalized = (screen - self.screen_start) / extent;
        Ok(self.transformed.min() + normalized * self.transformed.span())
    }
}

fn clamp_range_to_space(space: TransformSpace, min: f64, max: f64) -> (f64, f64) {
    match space {
        TransformSpace::Linear => (min, max),
        TransformSpace::Logarithmic { base } => {
            let (low, high) = if min <= max { (min, max) } else { (max, min) };
            if high <= 0.0 {
                (1.0, base)
            } else if low <= 0.0 {
                (high / base, high)
            } else {
                (low, high)
            }
        }
    }
}

/// Maps an angular axis value to radians.
///
/// `[data_min, data_max]` is spread over the sweep from `start_angle` to
/// `end_angle` (radians, counter-clockwise positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularTransform {
    range: ValueRange,
    start_angle: f64,
    end_angle: f64,
}

impl AngularTransform {
    pub fn new(data_min: f64, data_max: f64, start_angle: f64, end_angle: f64) -> PlotResult<Self> {
        if !start_angle.is_finite() || !end_angle.is_finite() || start_angle == end_angle {
            return Err(PlotError::InvalidData(
                "angular sweep must be finite and non-zero".to_owned(),
            ));
        }
        let (range, _) = ValueRange::new_recovering(data_min, data_max)?;
        Ok(Self {
            range,
            start_angle,
            end_angle,
        })
    }

    #[must_use]
    pub fn data_range(self) -> (f64, f64) {
        self.range.as_tuple()
    }

    #[must_use]
    pub fn sweep(self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn to_angle(self, value: f64) -> PlotResult<f64> {
        if !value.is_finite() {
            return Err(PlotError::InvalidDataValue {
                value,
                axis_kind: "angular",
            });
        }
        let normalized = (value - self.range.min()) / self.range.span();
        Ok(self.start_angle + normalized * self.sweep())
    }

    /// Inverse of [`AngularTransform::to_angle`].
    ///
    /// Angles outside the sweep are wrapped by whole turns first, so `atan2`
    /// output can be fed in directly.
    pub fn to_value(self, angle: f64) -> PlotResult<f64> {
        if !angle.is_finite() {
            return Err(PlotError::InvalidData("angle must be finite".to_owned()));
        }
        let mut normalized = (angle - self.start_angle) / self.sweep();
        let tolerance = 1e-12;
        if !(-tolerance..=1.0 + tolerance).contains(&normalized) {
            let turns = TAU / self.sweep().abs();
            normalized = normalized.rem_euclid(turns);
        }
        Ok(self.range.min() + normalized * self.range.span())
    }
}

/// Composition of an angular and a magnitude transform around a centre point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarTransform {
    angular: AngularTransform,
    magnitude: CoordinateTransform,
    center: ScreenPoint,
}

impl PolarTransform {
    /// `magnitude` must map onto `[0, radius]` pixels.
    #[must_use]
    pub fn new(
        angular: AngularTransform,
        magnitude: CoordinateTransform,
        center: ScreenPoint,
    ) -> Self {
        Self {
            angular,
            magnitude,
            center,
        }
    }

    #[must_use]
    pub fn center(self) -> ScreenPoint {
        self.center
    }

    #[must_use]
    pub fn radius(self) -> f64 {
        self.magnitude.screen_range().1.abs()
    }

    #[must_use]
    pub fn angular(self) -> AngularTransform {
        self.angular
    }

    #[must_use]
    pub fn magnitude(self) -> CoordinateTransform {
        self.magnitude
    }

    /// `point.x` is the angular value, `point.y` the magnitude.
    pub fn to_screen(self, point: DataPoint) -> PlotResult<ScreenPoint> {
        let angle = self.angular.to_angle(point.x)?;
        let radius = self.magnitude.to_screen(point.y)?;
        Ok(ScreenPoint::new(
            self.center.x + radius * angle.cos(),
            self.center.y - radius * angle.sin(),
        ))
    }

    pub fn to_data(self, point: ScreenPoint) -> PlotResult<DataPoint> {
        if !point.is_finite() {
            return Err(PlotError::InvalidData(
                "screen point must be finite".to_owned(),
            ));
        }
        let dx = point.x - self.center.x;
        let dy = self.center.y - point.y;
        let radius = dx.hypot(dy);
        let angle = dy.atan2(dx);
        Ok(DataPoint::new(
            self.angular.to_value(angle)?,
            self.magnitude.to_data(radius)?,
        ))
    }
}

/// Resolved transform pair for one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisPair {
    Cartesian {
        x: CoordinateTransform,
        y: CoordinateTransform,
    },
    Polar(PolarTransform),
}

impl AxisPair {
    pub fn to_screen(&self, point: DataPoint) -> PlotResult<ScreenPoint> {
        match self {
            Self::Cartesian { x, y } => Ok(ScreenPoint::new(
                x.to_screen(point.x)?,
                y.to_screen(point.y)?,
            )),
            Self::Polar(polar) => polar.to_screen(point),
        }
    }

    pub fn to_data(&self, point: ScreenPoint) -> PlotResult<DataPoint> {
        match self {
            Self::Cartesian { x, y } => Ok(DataPoint::new(x.to_data(point.x)?, y.to_data(point.y)?)),
            Self::Polar(polar) => polar.to_data(point),
        }
    }

    /// Whether both coordinates of `point` are inside the transforms' domains.
    #[must_use]
    pub fn accepts(&self, point: DataPoint) -> bool {
        match self {
            Self::Cartesian { x, y } => x.space().accepts(point.x) && y.space().accepts(point.y),
            Self::Polar(polar) => {
                point.x.is_finite() && polar.magnitude().space().accepts(point.y)
            }
        }
    }
}
