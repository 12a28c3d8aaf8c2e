//! Error handling for the drafting engine.
//!
//! A draft either completes or fails atomically; there is no partial
//! pattern output, because a silently wrong pattern becomes a manufacturing
//! defect. Every failure names the part, key, or parameter a human needs in
//! order to fix the design configuration.

use stitchkit_core::GeometryError;
use thiserror::Error;

/// Configuration error type
///
/// A required measurement or option is missing or outside its declared
/// range. Raised before any part executes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A measurement the design requires was not supplied.
    #[error("Missing required measurement '{name}'")]
    MissingMeasurement {
        /// The measurement name.
        name: String,
    },

    /// A supplied measurement is not a usable length.
    #[error("Invalid measurement '{name}': {value} is not a positive finite length")]
    InvalidMeasurement {
        /// The measurement name.
        name: String,
        /// The offending value.
        value: f64,
    },

    /// An option override names no declared option.
    #[error("Unknown option '{name}'")]
    UnknownOption {
        /// The option name.
        name: String,
    },

    /// An option value falls outside its declared range.
    #[error("Option '{name}' out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        /// The option name.
        name: String,
        /// The offending value.
        value: f64,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },

    /// An option value has the wrong kind (e.g. a flag where a number is
    /// declared) or an undeclared choice.
    #[error("Option '{name}': {reason}")]
    InvalidValue {
        /// The option name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Macro error type
///
/// A macro was invoked with missing or invalid required parameters, or an
/// undeclared macro name was used. Macros never silently no-op on
/// malformed input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MacroError {
    /// No macro with this name exists in the registry.
    #[error("Unknown macro '{name}'")]
    Unknown {
        /// The requested macro name.
        name: String,
    },

    /// Registration refused: the name is not part of the recognized set.
    #[error("Macro '{name}' is not a recognized macro name")]
    NotRecognized {
        /// The rejected name.
        name: String,
    },

    /// Registration refused: the name is already taken.
    #[error("Macro '{name}' is already registered")]
    AlreadyRegistered {
        /// The duplicated name.
        name: String,
    },

    /// A required parameter was not supplied.
    #[error("Macro '{name}' requires parameter '{param}'")]
    MissingParam {
        /// The macro name.
        name: &'static str,
        /// The missing parameter key.
        param: &'static str,
    },

    /// The macro's own geometry failed to assemble.
    #[error("Macro '{name}' geometry: {source}")]
    Geometry {
        /// The macro name.
        name: &'static str,
        /// The underlying kernel error.
        #[source]
        source: GeometryError,
    },
}

/// Main error type for a draft
///
/// A unified error covering everything that can stop a draft; the primary
/// error type of public drafting APIs.
#[derive(Error, Debug)]
pub enum DraftError {
    /// Configuration error, raised before any part runs.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A structurally invalid path operation inside a part.
    #[error("Geometry error in part '{part}': {source}")]
    Geometry {
        /// The part being drafted.
        part: String,
        /// The underlying kernel error.
        #[source]
        source: GeometryError,
    },

    /// A macro failed inside a part.
    #[error("Macro failure in part '{part}': {source}")]
    Macro {
        /// The part being drafted.
        part: String,
        /// The underlying macro error.
        #[source]
        source: MacroError,
    },

    /// Strict store mode: a part read a key no earlier part wrote.
    #[error("Part '{part}' read store key '{key}' that no earlier part wrote")]
    DependencyOrder {
        /// The reading part.
        part: String,
        /// The key that was never written.
        key: String,
    },
}

/// Result type using [`DraftError`].
pub type Result<T> = std::result::Result<T, DraftError>;
