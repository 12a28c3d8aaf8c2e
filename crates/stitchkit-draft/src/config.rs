//! Design configuration: the measurements a design requires and the typed
//! options it exposes, with validation that runs before any part drafts.
//!
//! Measurements and option overrides arrive pre-validated from an intake
//! layer; the checks here are the engine's own sanity gate (presence,
//! finiteness, declared ranges), and they fail fast naming the offending
//! key so a misconfigured design never reaches the geometry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How an option is typed and bounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptionKind {
    /// A ratio, usually of a measurement (e.g. 0.2 of the neck).
    Fraction { default: f64, min: f64, max: f64 },
    /// An absolute length in millimeters.
    Length { default: f64, min: f64, max: f64 },
    /// An angle in degrees.
    Degrees { default: f64, min: f64, max: f64 },
    /// An on/off switch.
    Flag { default: bool },
    /// One of a fixed set of named choices.
    Choice {
        default: String,
        choices: Vec<String>,
    },
}

/// One declared option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDef {
    pub name: String,
    #[serde(flatten)]
    pub kind: OptionKind,
}

impl OptionDef {
    pub fn fraction(name: &str, default: f64, min: f64, max: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: OptionKind::Fraction { default, min, max },
        }
    }

    pub fn length(name: &str, default: f64, min: f64, max: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: OptionKind::Length { default, min, max },
        }
    }

    pub fn degrees(name: &str, default: f64, min: f64, max: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: OptionKind::Degrees { default, min, max },
        }
    }

    pub fn flag(name: &str, default: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: OptionKind::Flag { default },
        }
    }

    pub fn choice(name: &str, default: &str, choices: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: OptionKind::Choice {
                default: default.to_string(),
                choices: choices.iter().map(|c| c.to_string()).collect(),
            },
        }
    }
}

/// A resolved option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

/// What a design needs and accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignConfig {
    pub name: String,
    pub measurements: Vec<String>,
    pub options: Vec<OptionDef>,
}

impl DesignConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            measurements: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn with_measurement(mut self, name: &str) -> Self {
        self.measurements.push(name.to_string());
        self
    }

    pub fn with_option(mut self, option: OptionDef) -> Self {
        self.options.push(option);
        self
    }

    /// Validate measurements and merge option overrides over defaults.
    ///
    /// Fails on the first missing or non-finite measurement, unknown
    /// override, out-of-range number, or kind mismatch - naming the key.
    pub fn resolve(
        &self,
        measurements: &Measurements,
        overrides: &BTreeMap<String, OptionValue>,
    ) -> Result<Options, ConfigError> {
        for name in &self.measurements {
            match measurements.try_get(name) {
                None => {
                    return Err(ConfigError::MissingMeasurement { name: name.clone() });
                }
                Some(value) if !value.is_finite() || value <= 0.0 => {
                    return Err(ConfigError::InvalidMeasurement {
                        name: name.clone(),
                        value,
                    });
                }
                Some(_) => {}
            }
        }
        for name in overrides.keys() {
            if !self.options.iter().any(|o| &o.name == name) {
                return Err(ConfigError::UnknownOption { name: name.clone() });
            }
        }
        let mut resolved = BTreeMap::new();
        for option in &self.options {
            let value = resolve_option(option, overrides.get(&option.name))?;
            resolved.insert(option.name.clone(), value);
        }
        Ok(Options { values: resolved })
    }
}

fn resolve_option(
    option: &OptionDef,
    supplied: Option<&OptionValue>,
) -> Result<OptionValue, ConfigError> {
    let check_range = |value: f64, min: f64, max: f64| {
        if !value.is_finite() || value < min || value > max {
            Err(ConfigError::OutOfRange {
                name: option.name.clone(),
                value,
                min,
                max,
            })
        } else {
            Ok(OptionValue::Number(value))
        }
    };
    match (&option.kind, supplied) {
        (
            OptionKind::Fraction { default, min, max }
            | OptionKind::Length { default, min, max }
            | OptionKind::Degrees { default, min, max },
            None,
        ) => check_range(*default, *min, *max),
        (
            OptionKind::Fraction { min, max, .. }
            | OptionKind::Length { min, max, .. }
            | OptionKind::Degrees { min, max, .. },
            Some(OptionValue::Number(value)),
        ) => check_range(*value, *min, *max),
        (OptionKind::Flag { default }, None) => Ok(OptionValue::Flag(*default)),
        (OptionKind::Flag { .. }, Some(OptionValue::Flag(value))) => {
            Ok(OptionValue::Flag(*value))
        }
        (OptionKind::Choice { default, .. }, None) => Ok(OptionValue::Text(default.clone())),
        (OptionKind::Choice { choices, .. }, Some(OptionValue::Text(value))) => {
            if choices.contains(value) {
                Ok(OptionValue::Text(value.clone()))
            } else {
                Err(ConfigError::InvalidValue {
                    name: option.name.clone(),
                    reason: format!("'{}' is not one of {:?}", value, choices),
                })
            }
        }
        (_, Some(other)) => Err(ConfigError::InvalidValue {
            name: option.name.clone(),
            reason: format!("unexpected value kind {:?}", other),
        }),
    }
}

/// Validated measurements, name to millimeters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Measurements {
    values: BTreeMap<String, f64>,
}

impl Measurements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value_mm: f64) {
        self.values.insert(name.to_string(), value_mm);
    }

    /// The measurement in millimeters. Resolution has already guaranteed
    /// presence of everything a design declares, so an absent name is a
    /// drafting-code typo; the 0.0 sentinel keeps the build running and
    /// shows up unmistakably in the geometry.
    pub fn get(&self, name: &str) -> f64 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    pub fn try_get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

impl<const N: usize> From<[(&str, f64); N]> for Measurements {
    fn from(entries: [(&str, f64); N]) -> Self {
        let mut m = Measurements::new();
        for (name, value) in entries {
            m.set(name, value);
        }
        m
    }
}

/// Resolved options for one draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
}

impl Options {
    /// Numeric option value; 0.0 sentinel for an undeclared name, same
    /// rationale as [`Measurements::get`].
    pub fn number(&self, name: &str) -> f64 {
        match self.values.get(name) {
            Some(OptionValue::Number(n)) => *n,
            _ => 0.0,
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(OptionValue::Flag(true)))
    }

    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(OptionValue::Text(s)) => s,
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DesignConfig {
        DesignConfig::new("tee")
            .with_measurement("neck")
            .with_option(OptionDef::fraction("backNeckCutout", 0.2, 0.05, 0.4))
            .with_option(OptionDef::flag("ribbing", false))
            .with_option(OptionDef::choice("fit", "regular", &["slim", "regular", "loose"]))
    }

    #[test]
    fn test_defaults_fill_in() {
        let m = Measurements::from([("neck", 380.0)]);
        let options = config().resolve(&m, &BTreeMap::new()).unwrap();
        assert_eq!(options.number("backNeckCutout"), 0.2);
        assert!(!options.flag("ribbing"));
        assert_eq!(options.text("fit"), "regular");
    }

    #[test]
    fn test_missing_measurement_names_the_key() {
        let err = config()
            .resolve(&Measurements::new(), &BTreeMap::new())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingMeasurement {
                name: "neck".to_string()
            }
        );
    }

    #[test]
    fn test_out_of_range_override_rejected() {
        let m = Measurements::from([("neck", 380.0)]);
        let mut overrides = BTreeMap::new();
        overrides.insert("backNeckCutout".to_string(), OptionValue::Number(0.9));
        let err = config().resolve(&m, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn test_unknown_override_rejected() {
        let m = Measurements::from([("neck", 380.0)]);
        let mut overrides = BTreeMap::new();
        overrides.insert("mystery".to_string(), OptionValue::Number(1.0));
        let err = config().resolve(&m, &overrides).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownOption {
                name: "mystery".to_string()
            }
        );
    }

    #[test]
    fn test_undeclared_choice_rejected() {
        let m = Measurements::from([("neck", 380.0)]);
        let mut overrides = BTreeMap::new();
        overrides.insert("fit".to_string(), OptionValue::Text("baggy".to_string()));
        let err = config().resolve(&m, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
