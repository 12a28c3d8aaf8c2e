//! # Stitchkit
//!
//! A Rust-based parametric sewing pattern drafting engine: body
//! measurements and numeric options in, labeled 2D cutting and seam paths
//! out.
//!
//! ## Architecture
//!
//! Stitchkit is organized as a workspace with multiple crates:
//!
//! 1. **stitchkit-core** - geometry kernel: points, Bezier paths, units
//! 2. **stitchkit-draft** - drafting engine: parts, shared store, macros,
//!    draft orchestration
//! 3. **stitchkit** - main binary and the bundled tee design
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use stitchkit::tee;
//! use stitchkit::DraftSettings;
//!
//! let draft = tee::design();
//! let measurements = tee::sample_measurements();
//! let doc = draft
//!     .run(&measurements, &BTreeMap::new(), &DraftSettings::default())
//!     .unwrap();
//! assert!(doc.parts["back"].paths["seam"].is_closed());
//! ```

pub mod tee;

pub use stitchkit_core::geometry::{BoundingBox, Path, PathBuilder, Point, Segment};
pub use stitchkit_core::units::{format_length, MeasurementSystem};
pub use stitchkit_core::GeometryError;

pub use stitchkit_draft::{
    ConfigError, DesignConfig, Draft, DraftError, DraftSettings, MacroError, MacroParams,
    MacroRegistry, Measurements, OptionDef, OptionValue, Options, Part, PartContext, PartScope,
    PatternDocument, Store, Text, Value,
};

/// Initialize tracing for the CLI: env-filter on top of an INFO default.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer().with_target(true).with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
