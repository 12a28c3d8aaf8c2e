//! The macro registry: reusable drafting conventions.
//!
//! A macro injects a convention - "this edge is cut on a fold", "put the
//! title block here", "dimension this width" - into a part's scope without
//! the part spelling out the geometry. The set of macros is closed and
//! registered at startup; an unrecognized name is refused at registration,
//! not discovered at call time in the middle of a draft.
//!
//! Macros are part-local helpers: they receive the invoking part's live
//! scope and options and they never see the store, which keeps the data
//! dependency direction one-way (part writes store, later part reads).

mod annotations;
mod dimensions;

use std::collections::BTreeMap;

use stitchkit_core::geometry::Point;
use stitchkit_core::units::MeasurementSystem;

use crate::config::Options;
use crate::error::MacroError;
use crate::part::PartScope;

pub use annotations::{CutOnFold, Grainline, Scalebox, Title};
pub use dimensions::{HorizontalDim, LinearDim, VerticalDim};

/// Every name the registry will accept. Registration of anything else is
/// refused up front.
pub const RECOGNIZED_MACROS: &[&str] =
    &["cutonfold", "grainline", "title", "scalebox", "hd", "vd", "ld"];

/// The shared parameter object macros are invoked with. Each macro
/// documents which keys it requires; a missing required key is a fatal
/// [`MacroError`], never a silent no-op.
#[derive(Debug, Clone, Default)]
pub struct MacroParams {
    pub from: Option<Point>,
    pub to: Option<Point>,
    pub at: Option<Point>,
    pub nr: Option<u32>,
    pub label: Option<String>,
    pub grainline: bool,
    pub offset: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl MacroParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, p: Point) -> Self {
        self.from = Some(p);
        self
    }

    pub fn to(mut self, p: Point) -> Self {
        self.to = Some(p);
        self
    }

    pub fn at(mut self, p: Point) -> Self {
        self.at = Some(p);
        self
    }

    pub fn nr(mut self, nr: u32) -> Self {
        self.nr = Some(nr);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn grainline(mut self, grainline: bool) -> Self {
        self.grainline = grainline;
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    fn require_point(
        value: Option<Point>,
        name: &'static str,
        param: &'static str,
    ) -> Result<Point, MacroError> {
        value.ok_or(MacroError::MissingParam { name, param })
    }

    pub(crate) fn require_from(&self, name: &'static str) -> Result<Point, MacroError> {
        Self::require_point(self.from, name, "from")
    }

    pub(crate) fn require_to(&self, name: &'static str) -> Result<Point, MacroError> {
        Self::require_point(self.to, name, "to")
    }

    pub(crate) fn require_at(&self, name: &'static str) -> Result<Point, MacroError> {
        Self::require_point(self.at, name, "at")
    }
}

/// What a macro sees besides its parameters and the part scope.
pub struct MacroEnv<'a> {
    pub options: &'a Options,
    pub units: MeasurementSystem,
    /// Seam allowance in millimeters, 0 when none requested.
    pub sa: f64,
}

/// One drafting convention, dispatched by name.
pub trait Macro: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        params: &MacroParams,
        scope: &mut PartScope,
        env: &MacroEnv<'_>,
    ) -> Result<(), MacroError>;
}

/// Name-to-implementation table, fixed after startup.
pub struct MacroRegistry {
    entries: BTreeMap<&'static str, Box<dyn Macro>>,
}

impl MacroRegistry {
    /// An empty registry; most callers want [`MacroRegistry::with_builtins`].
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The full built-in set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for entry in builtin_macros() {
            // built-in names are recognized by construction
            let _ = registry.register(entry);
        }
        registry
    }

    /// Install a macro. Refused when the name is not in
    /// [`RECOGNIZED_MACROS`] or already taken.
    pub fn register(&mut self, entry: Box<dyn Macro>) -> Result<(), MacroError> {
        let name = entry.name();
        if !RECOGNIZED_MACROS.contains(&name) {
            return Err(MacroError::NotRecognized {
                name: name.to_string(),
            });
        }
        if self.entries.contains_key(name) {
            return Err(MacroError::AlreadyRegistered {
                name: name.to_string(),
            });
        }
        self.entries.insert(name, entry);
        Ok(())
    }

    /// Dispatch by name.
    pub fn apply(
        &self,
        name: &str,
        params: &MacroParams,
        scope: &mut PartScope,
        env: &MacroEnv<'_>,
    ) -> Result<(), MacroError> {
        let entry = self.entries.get(name).ok_or_else(|| MacroError::Unknown {
            name: name.to_string(),
        })?;
        tracing::trace!(macro_name = name, "applying macro");
        entry.apply(params, scope, env)
    }
}

impl Default for MacroRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn builtin_macros() -> Vec<Box<dyn Macro>> {
    vec![
        Box::new(CutOnFold),
        Box::new(Grainline),
        Box::new(Title),
        Box::new(Scalebox),
        Box::new(HorizontalDim),
        Box::new(VerticalDim),
        Box::new(LinearDim),
    ]
}
