use chrono::{Datelike, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::core::category::CategoryLookup;
use crate::core::primitives::{datetime_to_unix_seconds, unix_seconds_to_datetime};
use crate::core::tick_labels::{
    AngleUnit, DateTimeUnit, NumberLabelFormat, format_angle, format_date_time, format_log_label,
    format_number,
};

/// Hard upper bound on generated major ticks per axis.
pub const MAX_MAJOR_TICKS: usize = 1_000;
/// Minor ticks beyond this bound are dropped for the pass.
pub const MAX_MINOR_TICKS: usize = 10_000;

pub const MIN_TARGET_TICKS: usize = 2;
pub const MAX_TARGET_TICKS: usize = 20;

const NICE_MANTISSAS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];
const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Per-axis tick generation controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickOptions {
    /// Preferred distance between major ticks, in pixels.
    #[serde(default = "default_target_spacing_px")]
    pub target_spacing_px: f64,
    /// Fixed major step in axis units; `None` picks a nice interval.
    #[serde(default)]
    pub major_step: Option<f64>,
    /// Minor subdivisions per major step; `None` derives it from the step.
    #[serde(default)]
    pub minor_subdivisions: Option<u32>,
    #[serde(default = "default_true")]
    pub show_minor: bool,
    #[serde(default)]
    pub label_format: NumberLabelFormat,
}

fn default_target_spacing_px() -> f64 {
    60.0
}

fn default_true() -> bool {
    true
}

impl Default for TickOptions {
    fn default() -> Self {
        Self {
            target_spacing_px: default_target_spacing_px(),
            major_step: None,
            minor_subdivisions: None,
            show_minor: true,
            label_format: NumberLabelFormat::Auto,
        }
    }
}

/// One labelled major tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Major and minor ticks for one axis.
///
/// `major_step` is expressed in the axis' uniform space: raw units for
/// linear/date/category/angular axes, exponent units for logarithmic axes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickSet {
    pub major: Vec<Tick>,
    pub minor: Vec<f64>,
    pub major_step: f64,
    pub minor_step: f64,
    /// Set when the overflow guard had to widen the requested interval.
    pub coarsened: bool,
}

impl TickSet {
    #[must_use]
    pub fn major_values(&self) -> Vec<f64> {
        self.major.iter().map(|tick| tick.value).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.major.is_empty()
    }

    fn single(value: f64, label: String) -> Self {
        Self {
            major: vec![Tick { value, label }],
            ..Self::default()
        }
    }
}

/// Number of major ticks that fits `axis_span_px` at `target_spacing_px`.
#[must_use]
pub fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Smallest value of {1, 2, 5, 10} × 10^k that is >= `raw`.
#[must_use]
pub fn nice_interval(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let exponent = raw.log10().floor();
    let magnitude = 10f64.powi(exponent as i32);
    let fraction = raw / magnitude;
    let mantissa = NICE_MANTISSAS
        .iter()
        .copied()
        .find(|candidate| *candidate >= fraction * (1.0 - BOUNDARY_TOLERANCE))
        .unwrap_or(10.0);
    mantissa * magnitude
}

fn default_minor_subdivisions(major_step: f64) -> u32 {
    let exponent = major_step.log10().floor();
    let mantissa = (major_step / 10f64.powi(exponent as i32)).round();
    if mantissa == 2.0 { 4 } else { 5 }
}

/// Guarantees `step` is representable relative to the range magnitude and
/// keeps the tick count under `MAX_MAJOR_TICKS`. Returns the step and whether
/// it had to be widened.
fn guard_step(min: f64, max: f64, step: f64) -> (f64, bool) {
    let span = max - min;
    if !span.is_finite() {
        return (f64::INFINITY, true);
    }
    let resolution = min.abs().max(max.abs()) * f64::EPSILON * 4.0;
    let mut guarded = step;
    let mut coarsened = false;
    if !guarded.is_finite() || guarded <= resolution {
        guarded = nice_interval(resolution.max(span / MAX_MAJOR_TICKS as f64));
        coarsened = true;
    }
    if span / guarded > MAX_MAJOR_TICKS as f64 {
        guarded = nice_interval(span / MAX_MAJOR_TICKS as f64);
        coarsened = true;
    }
    (guarded, coarsened)
}

/// Multiples of `step` inside `[min, max]`, boundary ticks included.
/// Empty when the step is unusable or would yield more than
/// `MAX_MINOR_TICKS` positions.
fn stepped_positions(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    let tolerance = step * BOUNDARY_TOLERANCE;
    let first = ((min - tolerance) / step).ceil();
    let last = ((max + tolerance) / step).floor();
    let intervals = last - first;
    if !intervals.is_finite() || intervals < 0.0 || intervals > MAX_MINOR_TICKS as f64 {
        return Vec::new();
    }

    let count = intervals as usize + 1;
    let mut positions: Vec<f64> = Vec::with_capacity(count);
    for index in 0..count {
        let mut value = (first + index as f64) * step;
        if value.abs() < tolerance {
            value = 0.0;
        }
        if value < min - tolerance || value > max + tolerance {
            continue;
        }
        if positions.last().is_some_and(|last| value <= *last) {
            continue;
        }
        positions.push(value);
    }
    positions
}

fn minor_positions(min: f64, max: f64, major_step: f64, minor_step: f64) -> Vec<f64> {
    if !minor_step.is_finite() || minor_step <= 0.0 || minor_step >= major_step {
        return Vec::new();
    }
    if (max - min) / minor_step > MAX_MINOR_TICKS as f64 {
        return Vec::new();
    }
    let coincidence = minor_step * 1e-6;
    stepped_positions(min, max, minor_step)
        .into_iter()
        .filter(|value| {
            let nearest_major = (value / major_step).round() * major_step;
            (nearest_major - value).abs() > coincidence
        })
        .collect()
}

/// Linear ("nice number") tick generation.
#[must_use]
pub fn linear_ticks(range: (f64, f64), desired: usize, options: &TickOptions) -> TickSet {
    stepped_ticks(range, desired, options, |value, step| {
        format_number(value, step, options.label_format)
    })
}

fn stepped_ticks(
    range: (f64, f64),
    desired: usize,
    options: &TickOptions,
    label: impl Fn(f64, f64) -> String,
) -> TickSet {
    let (min, max) = range;
    if !min.is_finite() || !max.is_finite() {
        return TickSet::default();
    }
    if min == max {
        return TickSet::single(min, label(min, min.abs().max(1.0)));
    }
    let (min, max) = if min < max { (min, max) } else { (max, min) };
    if !(max - min).is_finite() {
        return TickSet::default();
    }

    let requested = match options.major_step {
        Some(step) if step.is_finite() && step > 0.0 => step,
        _ => nice_interval((max - min) / desired.max(1) as f64),
    };
    let (major_step, coarsened) = guard_step(min, max, requested);

    let minor_step = match options.minor_subdivisions {
        Some(subdivisions) if subdivisions > 0 => major_step / f64::from(subdivisions),
        _ => major_step / f64::from(default_minor_subdivisions(major_step)),
    };

    let major = stepped_positions(min, max, major_step)
        .into_iter()
        .map(|value| Tick {
            value,
            label: label(value, major_step),
        })
        .collect();
    let minor = if options.show_minor {
        minor_positions(min, max, major_step, minor_step)
    } else {
        Vec::new()
    };

    TickSet {
        major,
        minor,
        major_step,
        minor_step,
        coarsened,
    }
}

/// Logarithmic tick generation: ticks at powers of `base`, minors at
/// multiples inside each decade.
#[must_use]
pub fn log_ticks(range: (f64, f64), base: f64, desired: usize, options: &TickOptions) -> TickSet {
    let (min, max) = range;
    if !(min > 0.0 && max > 0.0 && min.is_finite() && max.is_finite()) || base <= 1.0 {
        return linear_ticks(range, desired, options);
    }
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    if min == max {
        return TickSet::single(min, format_log_label(min, options.label_format));
    }

    let log_min = min.log(base);
    let log_max = max.log(base);
    let decades = log_max - log_min;
    if decades < 1.0 {
        return linear_ticks((min, max), desired, options);
    }

    let requested = nice_interval(decades / desired.max(1) as f64).round().max(1.0);
    let (exponent_step, coarsened) = {
        let (step, coarsened) = guard_step(log_min, log_max, requested);
        (step.round().max(1.0), coarsened)
    };

    let major: Vec<Tick> = stepped_positions(log_min, log_max, exponent_step)
        .into_iter()
        .map(|exponent| base.powf(exponent))
        .filter(|value| *value >= min * (1.0 - BOUNDARY_TOLERANCE))
        .filter(|value| *value <= max * (1.0 + BOUNDARY_TOLERANCE))
        .map(|value| Tick {
            value,
            label: format_log_label(value, options.label_format),
        })
        .collect();

    let minor = if options.show_minor {
        log_minor_positions(min, max, base, exponent_step, log_min, log_max)
    } else {
        Vec::new()
    };

    TickSet {
        major,
        minor,
        major_step: exponent_step,
        minor_step: 1.0,
        coarsened,
    }
}

fn log_minor_positions(
    min: f64,
    max: f64,
    base: f64,
    exponent_step: f64,
    log_min: f64,
    log_max: f64,
) -> Vec<f64> {
    let first_decade = log_min.floor() as i64;
    let last_decade = log_max.ceil() as i64;
    let mut minor = Vec::new();

    if exponent_step > 1.0 {
        for decade in first_decade..=last_decade {
            if decade as f64 % exponent_step == 0.0 {
                continue;
            }
            let value = base.powf(decade as f64);
            if value >= min && value <= max {
                minor.push(value);
            }
        }
        return minor;
    }

    // Multiplicative minors only make sense for integral bases (2..base-1).
    if base.fract() != 0.0 {
        return minor;
    }
    let multipliers = 2..(base as i64);
    for decade in first_decade..=last_decade {
        let decade_value = base.powf(decade as f64);
        for multiplier in multipliers.clone() {
            let value = multiplier as f64 * decade_value;
            if value > min && value < max {
                minor.push(value);
            }
            if minor.len() >= MAX_MINOR_TICKS {
                return Vec::new();
            }
        }
    }
    minor
}

/// One tick per category index inside the visible range.
#[must_use]
pub fn category_ticks(range: (f64, f64), lookup: &CategoryLookup) -> TickSet {
    let (min, max) = if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    };
    if lookup.is_empty() || !min.is_finite() || !max.is_finite() {
        return TickSet::default();
    }

    let last_index = (lookup.len() - 1) as f64;
    let (first, last) = (min.ceil().max(0.0), max.floor().min(last_index));
    if last < first {
        return TickSet::default();
    }

    let (first, last) = (first as usize, last as usize);
    let stride = (last - first + 1).div_ceil(MAX_MAJOR_TICKS).max(1);
    let major = (first..=last)
        .step_by(stride)
        .filter_map(|index| {
            let value = index as f64;
            lookup.label_at(value).map(|label| Tick {
                value,
                label: label.to_owned(),
            })
        })
        .collect();

    TickSet {
        major,
        minor: Vec::new(),
        major_step: stride as f64,
        minor_step: 0.0,
        coarsened: stride > 1,
    }
}

const TURN_DIVISORS: [u32; 12] = [1, 2, 3, 4, 6, 8, 12, 16, 24, 36, 72, 360];

/// Angular ticks: intervals are whole fractions of a full turn.
#[must_use]
pub fn angular_ticks(
    range: (f64, f64),
    unit: AngleUnit,
    desired: usize,
    options: &TickOptions,
) -> TickSet {
    let (min, max) = range;
    if !min.is_finite() || !max.is_finite() {
        return TickSet::default();
    }
    let full_turn = unit.full_turn();
    let raw = (max - min).abs() / desired.max(1) as f64;

    let mut fixed = *options;
    if fixed.major_step.is_none() {
        let step = TURN_DIVISORS
            .iter()
            .rev()
            .map(|divisor| full_turn / f64::from(*divisor))
            .find(|candidate| *candidate >= raw * (1.0 - BOUNDARY_TOLERANCE))
            .unwrap_or_else(|| nice_interval(raw));
        let step = if raw < full_turn / 360.0 {
            nice_interval(raw)
        } else {
            step
        };
        fixed.major_step = Some(step);
        if fixed.minor_subdivisions.is_none() {
            fixed.minor_subdivisions = Some(if unit == AngleUnit::Radians { 2 } else { 3 });
        }
    }

    let mut ticks = stepped_ticks(range, desired, &fixed, |value, step| {
        format_angle(value, step, unit)
    });

    // A full sweep draws `max` on top of `min`.
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    if high - low >= full_turn * (1.0 - BOUNDARY_TOLERANCE) && ticks.major.len() > 1 {
        let last = ticks.major.len() - 1;
        if (ticks.major[last].value - high).abs() <= full_turn * BOUNDARY_TOLERANCE {
            ticks.major.truncate(last);
        }
    }
    ticks
}

#[derive(Debug, Clone, Copy)]
enum DateStep {
    Fixed { seconds: f64, unit: DateTimeUnit },
    Months(u32),
    Years(f64),
}

const FIXED_DATE_STEPS: [(f64, DateTimeUnit); 20] = [
    (1.0, DateTimeUnit::Second),
    (2.0, DateTimeUnit::Second),
    (5.0, DateTimeUnit::Second),
    (10.0, DateTimeUnit::Second),
    (15.0, DateTimeUnit::Second),
    (30.0, DateTimeUnit::Second),
    (60.0, DateTimeUnit::Minute),
    (120.0, DateTimeUnit::Minute),
    (300.0, DateTimeUnit::Minute),
    (600.0, DateTimeUnit::Minute),
    (900.0, DateTimeUnit::Minute),
    (1_800.0, DateTimeUnit::Minute),
    (3_600.0, DateTimeUnit::Hour),
    (7_200.0, DateTimeUnit::Hour),
    (10_800.0, DateTimeUnit::Hour),
    (21_600.0, DateTimeUnit::Hour),
    (43_200.0, DateTimeUnit::Hour),
    (86_400.0, DateTimeUnit::Day),
    (172_800.0, DateTimeUnit::Day),
    (604_800.0, DateTimeUnit::Week),
];

const SECONDS_PER_MONTH: f64 = 2_629_746.0;
const SECONDS_PER_YEAR: f64 = 31_556_952.0;

fn select_date_step(raw_seconds: f64) -> DateStep {
    if raw_seconds < 1.0 {
        return DateStep::Fixed {
            seconds: nice_interval(raw_seconds),
            unit: DateTimeUnit::Second,
        };
    }
    if let Some((seconds, unit)) = FIXED_DATE_STEPS
        .iter()
        .copied()
        .find(|(seconds, _)| *seconds >= raw_seconds)
    {
        return DateStep::Fixed { seconds, unit };
    }
    if let Some(months) = [1_u32, 3, 6]
        .into_iter()
        .find(|months| f64::from(*months) * SECONDS_PER_MONTH >= raw_seconds)
    {
        return DateStep::Months(months);
    }
    DateStep::Years(nice_interval(raw_seconds / SECONDS_PER_YEAR).max(1.0))
}

/// Date-time ticks over seconds since the Unix epoch (UTC).
///
/// Sub-week intervals are uniform in seconds; month and year intervals follow
/// the calendar.
#[must_use]
pub fn date_time_ticks(range: (f64, f64), desired: usize, options: &TickOptions) -> TickSet {
    let (min, max) = if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    };
    let span = max - min;
    let in_calendar =
        unix_seconds_to_datetime(min).is_some() && unix_seconds_to_datetime(max).is_some();
    if !in_calendar {
        return linear_ticks(range, desired, options);
    }
    if span == 0.0 {
        return TickSet::single(min, format_date_time(min, DateTimeUnit::Second, 0.0));
    }

    match select_date_step(span / desired.max(1) as f64) {
        DateStep::Fixed { seconds, unit } => {
            let fixed = TickOptions {
                major_step: Some(seconds),
                ..*options
            };
            stepped_ticks((min, max), desired, &fixed, |value, _| {
                format_date_time(value, unit, span)
            })
        }
        DateStep::Months(months) => calendar_ticks(min, max, span, CalendarStep::Months(months)),
        DateStep::Years(years) => calendar_ticks(min, max, span, CalendarStep::Years(years)),
    }
}

#[derive(Debug, Clone, Copy)]
enum CalendarStep {
    Months(u32),
    Years(f64),
}

fn calendar_ticks(min: f64, max: f64, span: f64, step: CalendarStep) -> TickSet {
    let Some(start) = unix_seconds_to_datetime(min) else {
        return TickSet::default();
    };
    let (unit, months_per_step, approximate_seconds) = match step {
        CalendarStep::Months(months) => (
            DateTimeUnit::Month,
            months,
            f64::from(months) * SECONDS_PER_MONTH,
        ),
        CalendarStep::Years(years) => {
            let years = years.round().clamp(1.0, 1_000_000.0);
            (DateTimeUnit::Year, (years * 12.0) as u32, years * SECONDS_PER_YEAR)
        }
    };
    if span / approximate_seconds > MAX_MAJOR_TICKS as f64 {
        return TickSet::default();
    }

    // First boundary aligned on the step, at or after `min`.
    let total_months = i64::from(start.year()) * 12 + i64::from(start.month0());
    let step = i64::from(months_per_step.max(1));
    let mut aligned = total_months.div_euclid(step) * step;
    let mut major = Vec::new();
    loop {
        let year = aligned.div_euclid(12) as i32;
        let month = aligned.rem_euclid(12) as u32 + 1;
        let Some(date) = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
        else {
            break;
        };
        let value = datetime_to_unix_seconds(date);
        if value > max {
            break;
        }
        if value >= min {
            major.push(Tick {
                value,
                label: format_date_time(value, unit, span),
            });
        }
        if major.len() > MAX_MAJOR_TICKS {
            break;
        }
        // Guard chrono overflow before stepping.
        if date.checked_add_months(Months::new(months_per_step)).is_none() {
            break;
        }
        aligned += step;
    }

    TickSet {
        major,
        minor: Vec::new(),
        major_step: approximate_seconds,
        minor_step: 0.0,
        coarsened: false,
    }
}
