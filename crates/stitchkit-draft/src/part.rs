//! The part contract: one garment piece's drafting logic.

use std::collections::BTreeMap;

use serde::Serialize;
use stitchkit_core::geometry::{Path, PathBuilder, Point};
use stitchkit_core::units::MeasurementSystem;

use crate::config::{Measurements, Options};
use crate::error::{DraftError, Result};
use crate::macros::{MacroEnv, MacroParams, MacroRegistry};
use crate::store::{Store, Value};

/// A text annotation anchored to a point (titles, dimension labels).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub at: Point,
    pub content: String,
    /// Rotation in degrees, same convention as point angles.
    pub rotation: f64,
}

impl Text {
    pub fn new(at: Point, content: impl Into<String>) -> Self {
        Self {
            at,
            content: content.into(),
            rotation: 0.0,
        }
    }

    pub fn rotated(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }
}

/// The named points, paths and texts one part produces. Scoped to that
/// part's execution; exported into the pattern document afterwards and
/// never visible to other parts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PartScope {
    pub points: BTreeMap<String, Point>,
    pub paths: BTreeMap<String, Path>,
    pub texts: BTreeMap<String, Text>,
}

impl PartScope {
    /// Look up a named point. Drafting code references points it created
    /// in the point-derivation phase, so absence is a typo; the sentinel
    /// origin keeps the build running and is obvious in output.
    pub fn point(&self, name: &str) -> Point {
        self.points.get(name).copied().unwrap_or_default()
    }

    pub fn set_point(&mut self, name: &str, point: Point) {
        self.points.insert(name.to_string(), point);
    }

    pub fn set_path(&mut self, name: &str, path: Path) {
        self.paths.insert(name.to_string(), path);
    }

    pub fn set_text(&mut self, name: &str, text: Text) {
        self.texts.insert(name.to_string(), text);
    }

    /// First free key of the form `prefix`, `prefix2`, `prefix3`, ... so
    /// repeated macro invocations never clobber each other's output.
    pub fn unique_path_key(&self, prefix: &str) -> String {
        if !self.paths.contains_key(prefix) {
            return prefix.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}{}", prefix, n);
            if !self.paths.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// One garment piece's drafting logic.
///
/// `draft` runs in three phases, each finished before the next begins:
///
/// 1. **point derivation** - compute every named point, including
///    adjustments that read points computed moments earlier;
/// 2. **path construction** - assemble named paths strictly from phase-1
///    points;
/// 3. **finishing** - under `complete`, annotation macros (title,
///    fold/grainline, scale box), store writes other parts depend on, and
///    seam allowances; under `paperless`, dimension macros.
pub trait Part {
    /// Stable name, used as the part's key in the pattern document.
    fn name(&self) -> &'static str;

    fn draft(&self, ctx: &mut PartContext<'_>) -> Result<()>;
}

/// Everything a part sees while drafting.
pub struct PartContext<'a> {
    part: &'static str,
    pub measurements: &'a Measurements,
    pub options: &'a Options,
    pub complete: bool,
    pub paperless: bool,
    /// Seam allowance in millimeters; 0 means none requested.
    pub sa: f64,
    pub units: MeasurementSystem,
    pub scope: PartScope,
    store: &'a mut Store,
    registry: &'a MacroRegistry,
}

impl<'a> PartContext<'a> {
    pub(crate) fn new(
        part: &'static str,
        measurements: &'a Measurements,
        options: &'a Options,
        complete: bool,
        paperless: bool,
        sa: f64,
        units: MeasurementSystem,
        store: &'a mut Store,
        registry: &'a MacroRegistry,
    ) -> Self {
        Self {
            part,
            measurements,
            options,
            complete,
            paperless,
            sa,
            units,
            scope: PartScope::default(),
            store,
            registry,
        }
    }

    pub fn part_name(&self) -> &'static str {
        self.part
    }

    /// Consume a path builder, attributing any structural error to this
    /// part.
    pub fn build_path(&self, builder: PathBuilder) -> Result<Path> {
        builder.build().map_err(|source| DraftError::Geometry {
            part: self.part.to_string(),
            source,
        })
    }

    /// Attribute a kernel error to this part.
    pub fn geometry<T>(&self, result: stitchkit_core::Result<T>) -> Result<T> {
        result.map_err(|source| DraftError::Geometry {
            part: self.part.to_string(),
            source,
        })
    }

    pub fn store_set(&mut self, key: &str, value: impl Into<Value>) {
        self.store.set(key, value);
    }

    pub fn store_push(&mut self, key: &str, value: impl Into<Value>) {
        self.store.push(key, value);
    }

    pub fn store_get(&mut self, key: &str) -> Option<&Value> {
        self.store.get(key)
    }

    pub fn store_number(&mut self, key: &str) -> Option<f64> {
        self.store.number(key)
    }

    /// Invoke a registered macro against this part's scope. Macros see
    /// points, paths, texts and options - never the store.
    pub fn apply_macro(&mut self, name: &str, params: MacroParams) -> Result<()> {
        let env = MacroEnv {
            options: self.options,
            units: self.units,
            sa: self.sa,
        };
        self.registry
            .apply(name, &params, &mut self.scope, &env)
            .map_err(|source| DraftError::Macro {
                part: self.part.to_string(),
                source,
            })
    }
}
