use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Relative width used when a transform has to widen a zero-width range.
pub const DEGENERATE_SPAN_EPSILON: f64 = 1e-9;

/// Closed, finite, non-degenerate value interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    /// Builds a range, swapping bounds when given in descending order.
    pub fn new(a: f64, b: f64) -> PlotResult<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(PlotError::InvalidData(
                "range bounds must be finite".to_owned(),
            ));
        }
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        if min == max {
            return Err(PlotError::DegenerateRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Like [`ValueRange::new`] but widens a zero-width interval around its centre.
    ///
    /// Returns the range plus `true` when widening happened.
    pub fn new_recovering(a: f64, b: f64) -> PlotResult<(Self, bool)> {
        match Self::new(a, b) {
            Ok(range) => Ok((range, false)),
            Err(PlotError::DegenerateRange { min, .. }) => {
                let half = degenerate_half_span(min);
                Ok((
                    Self {
                        min: min - half,
                        max: min + half,
                    },
                    true,
                ))
            }
            Err(err) => Err(err),
        }
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn center(self) -> f64 {
        self.min + self.span() * 0.5
    }

    #[must_use]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether `self` lies inside `outer` (bounds inclusive).
    #[must_use]
    pub fn is_within(self, outer: (f64, f64)) -> bool {
        self.min >= outer.0 && self.max <= outer.1
    }
}

pub(crate) fn degenerate_half_span(value: f64) -> f64 {
    value.abs().max(1.0) * DEGENERATE_SPAN_EPSILON * 0.5
}

/// Shifts `(min, max)` so it fits inside `clamp` while keeping its span.
///
/// When the span is wider than the clamp the clamp itself is returned.
pub(crate) fn shift_into(min: f64, max: f64, clamp: (f64, f64)) -> (f64, f64) {
    let span = max - min;
    if span >= clamp.1 - clamp.0 {
        return clamp;
    }
    if min < clamp.0 {
        return (clamp.0, clamp.0 + span);
    }
    if max > clamp.1 {
        return (clamp.1 - span, clamp.1);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::{ValueRange, shift_into};

    #[test]
    fn descending_bounds_are_sorted() {
        let range = ValueRange::new(10.0, 2.0).expect("valid range");
        assert_eq!(range.as_tuple(), (2.0, 10.0));
    }

    #[test]
    fn zero_width_range_is_widened_around_value() {
        let (range, recovered) = ValueRange::new_recovering(5.0, 5.0).expect("recovered");
        assert!(recovered);
        assert!(range.span() > 0.0);
        assert!((range.center() - 5.0).abs() <= 1e-12);
    }

    #[test]
    fn shift_into_preserves_span() {
        assert_eq!(shift_into(-5.0, 5.0, (0.0, 100.0)), (0.0, 10.0));
        assert_eq!(shift_into(95.0, 105.0, (0.0, 100.0)), (90.0, 100.0));
        assert_eq!(shift_into(-50.0, 150.0, (0.0, 100.0)), (0.0, 100.0));
    }
}
