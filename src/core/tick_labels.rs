use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::unix_seconds_to_datetime;

/// Numeric tick label policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberLabelFormat {
    /// Decimals follow the tick step; scientific notation for extreme magnitudes.
    #[default]
    Auto,
    Fixed {
        decimals: u8,
    },
    Scientific {
        decimals: u8,
    },
}

const MAX_LABEL_DECIMALS: usize = 12;
const SCIENTIFIC_UPPER: f64 = 1e9;
const SCIENTIFIC_LOWER: f64 = 1e-6;

/// Smallest number of decimals that represents `step` exactly enough.
#[must_use]
pub fn decimals_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let mut scaled = step;
    for decimals in 0..=MAX_LABEL_DECIMALS {
        if (scaled - scaled.round()).abs() <= scaled.abs() * 1e-6 {
            return decimals;
        }
        scaled *= 10.0;
    }
    MAX_LABEL_DECIMALS
}

pub fn format_number(value: f64, step: f64, format: NumberLabelFormat) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    // Values a hair away from zero come from stepping and must not print as "-0.0".
    let value = if step.is_finite() && step > 0.0 && value.abs() < step * 1e-9 {
        0.0
    } else {
        value
    };

    match format {
        NumberLabelFormat::Fixed { decimals } => format!("{value:.prec$}", prec = decimals as usize),
        NumberLabelFormat::Scientific { decimals } => {
            format_scientific(value, decimals as usize)
        }
        NumberLabelFormat::Auto => {
            if value == 0.0 {
                return "0".to_owned();
            }
            let magnitude = value.abs();
            if magnitude >= SCIENTIFIC_UPPER || magnitude < SCIENTIFIC_LOWER {
                let scale = 10f64.powi(magnitude.log10().floor() as i32);
                return format_scientific(value, decimals_for_step(step / scale));
            }
            let decimals = decimals_for_step(step);
            format!("{value:.decimals$}")
        }
    }
}

/// Label for one tick of a logarithmic axis; each tick carries its own magnitude.
pub fn format_log_label(value: f64, format: NumberLabelFormat) -> String {
    match format {
        NumberLabelFormat::Auto => {
            let magnitude = value.abs();
            if magnitude >= 1e6 || (magnitude < 1e-4 && magnitude > 0.0) {
                format_scientific(value, 0)
            } else {
                format_number(value, magnitude.max(f64::MIN_POSITIVE), format)
            }
        }
        _ => format_number(value, value.abs(), format),
    }
}

fn format_scientific(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$e}");
    // `1.50e3` → `1.5e3`
    match text.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
            format!("{mantissa}e{exponent}")
        }
        _ => text,
    }
}

/// Unit used by angular axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    #[must_use]
    pub fn full_turn(self) -> f64 {
        match self {
            Self::Degrees => 360.0,
            Self::Radians => 2.0 * PI,
        }
    }
}

pub fn format_angle(value: f64, step: f64, unit: AngleUnit) -> String {
    match unit {
        AngleUnit::Degrees => {
            format!("{}°", format_number(value, step, NumberLabelFormat::Auto))
        }
        AngleUnit::Radians => format_pi_fraction(value)
            .unwrap_or_else(|| format_number(value, step, NumberLabelFormat::Auto)),
    }
}

/// Writes `value` as a multiple of π ("π/4", "3π/2", "-π") when it is one.
#[must_use]
pub fn format_pi_fraction(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let ratio = value / PI;
    if ratio.abs() < 1e-9 {
        return Some("0".to_owned());
    }
    for denominator in 1..=72_i64 {
        let numerator = ratio * denominator as f64;
        let rounded = numerator.round();
        if (numerator - rounded).abs() > 1e-6 {
            continue;
        }
        let numerator = rounded as i64;
        let divisor = gcd(numerator.abs(), denominator);
        let (numerator, denominator) = (numerator / divisor, denominator / divisor);
        let head = match numerator {
            1 => "π".to_owned(),
            -1 => "-π".to_owned(),
            other => format!("{other}π"),
        };
        return Some(if denominator == 1 {
            head
        } else {
            format!("{head}/{denominator}")
        });
    }
    None
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a.max(1)
}

/// Calendar unit selected for a date-time tick interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateTimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// Formats a date-time tick (seconds since the Unix epoch, UTC).
///
/// `visible_span_seconds` adds the date to intraday labels when the visible
/// range crosses day boundaries.
#[must_use]
pub fn format_date_time(seconds: f64, unit: DateTimeUnit, visible_span_seconds: f64) -> String {
    let Some(time) = unix_seconds_to_datetime(seconds) else {
        return format_number(seconds, 1.0, NumberLabelFormat::Auto);
    };
    let multi_day = visible_span_seconds > 86_400.0;
    let pattern = match unit {
        DateTimeUnit::Second if multi_day => "%m-%d %H:%M:%S",
        DateTimeUnit::Second => "%H:%M:%S",
        DateTimeUnit::Minute | DateTimeUnit::Hour if multi_day => "%m-%d %H:%M",
        DateTimeUnit::Minute | DateTimeUnit::Hour => "%H:%M",
        DateTimeUnit::Day | DateTimeUnit::Week => "%Y-%m-%d",
        DateTimeUnit::Month => "%Y-%m",
        DateTimeUnit::Year => "%Y",
    };
    format_with_pattern(time, pattern)
}

fn format_with_pattern(time: DateTime<Utc>, pattern: &str) -> String {
    time.format(pattern).to_string()
}
