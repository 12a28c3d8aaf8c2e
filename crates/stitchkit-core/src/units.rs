//! Unit conversion utilities
//!
//! All internal lengths are millimeters. Conversion and formatting to
//! Metric (cm) or Imperial (fractional inch) strings is only needed when a
//! length becomes visible text, e.g. on a dimension callout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl Default for MeasurementSystem {
    fn default() -> Self {
        Self::Metric
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" | "cm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Format a length for display on a pattern annotation.
///
/// * `value_mm` - Value in millimeters
///
/// Metric lengths are shown in centimeters with one decimal; imperial
/// lengths are shown as inches rounded to the nearest 1/16, with the
/// fractional part reduced.
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.1}cm", value_mm / 10.0),
        MeasurementSystem::Imperial => {
            let inches = value_mm / MM_PER_INCH;
            let sign = if inches < 0.0 { "-" } else { "" };
            let sixteenths = (inches.abs() * 16.0).round() as u64;
            let whole = sixteenths / 16;
            let mut num = sixteenths % 16;
            if num == 0 {
                return format!("{}{}\"", sign, whole);
            }
            let mut den = 16;
            while num % 2 == 0 {
                num /= 2;
                den /= 2;
            }
            if whole == 0 {
                format!("{}{}/{}\"", sign, num, den)
            } else {
                format!("{}{} {}/{}\"", sign, whole, num, den)
            }
        }
    }
}
