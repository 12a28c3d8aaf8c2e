//! Draft orchestration: sequence the parts of one design, feed them the
//! shared store, and aggregate their output into a pattern document.
//!
//! The orchestrator computes no geometry itself. Parts run strictly
//! one-at-a-time in the design's declared order - a part that reads a
//! store key must be listed after the part that writes it - so store
//! writes from part *i* are visible to every part *j > i* without any
//! locking. One draft is one deterministic computation from
//! (measurements, options) to a document; it completes or fails as a
//! whole.

use std::collections::BTreeMap;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use stitchkit_core::units::MeasurementSystem;

use crate::config::{DesignConfig, Measurements, OptionValue, Options};
use crate::error::{DraftError, Result};
use crate::macros::MacroRegistry;
use crate::part::{Part, PartContext, PartScope};
use crate::store::{Store, Value};

/// Per-draft switches, independent of the design.
#[derive(Debug, Clone, Serialize)]
pub struct DraftSettings {
    /// Add finishing annotations (titles, fold markers, scale box).
    pub complete: bool,
    /// Add measured dimension callouts.
    pub paperless: bool,
    /// Seam allowance in millimeters; 0 requests none.
    pub sa: f64,
    /// Unit system used wherever a length becomes text.
    pub units: MeasurementSystem,
    /// Escalate reads of never-written store keys to a hard error.
    pub strict_store: bool,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            complete: true,
            paperless: false,
            sa: 0.0,
            units: MeasurementSystem::Metric,
            strict_store: false,
        }
    }
}

/// The finished output of one draft.
#[derive(Debug, Serialize)]
pub struct PatternDocument {
    pub design: String,
    pub draft_id: Uuid,
    pub drafted_at: DateTime<Utc>,
    pub settings: DraftSettings,
    /// Every part's exported scope, keyed by part name.
    pub parts: BTreeMap<String, PartScope>,
    /// Store entries, exported for downstream consumers.
    pub store: BTreeMap<String, Value>,
}

impl PatternDocument {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize pattern document")
    }

    /// Write the JSON form to a file.
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write pattern document to {}", path.display()))
    }
}

/// A design wired up and ready to draft: its config, its parts in
/// dependency order, and the macro registry parts may call into.
pub struct Draft {
    config: DesignConfig,
    parts: Vec<Box<dyn Part>>,
    registry: MacroRegistry,
}

impl Draft {
    pub fn new(config: DesignConfig) -> Self {
        Self {
            config,
            parts: Vec::new(),
            registry: MacroRegistry::with_builtins(),
        }
    }

    /// Append a part. Order matters: store readers come after writers.
    pub fn with_part(mut self, part: Box<dyn Part>) -> Self {
        self.parts.push(part);
        self
    }

    pub fn config(&self) -> &DesignConfig {
        &self.config
    }

    /// Run the full draft.
    ///
    /// Validation runs first and fails fast naming the offending key; then
    /// each part drafts against a fresh scope and the shared store; the
    /// collected scopes and store become the pattern document.
    pub fn run(
        &self,
        measurements: &Measurements,
        overrides: &BTreeMap<String, OptionValue>,
        settings: &DraftSettings,
    ) -> Result<PatternDocument> {
        let options: Options = self.config.resolve(measurements, overrides)?;
        tracing::info!(
            design = %self.config.name,
            parts = self.parts.len(),
            complete = settings.complete,
            paperless = settings.paperless,
            "drafting"
        );
        let mut store = Store::new();
        let mut parts = BTreeMap::new();
        for part in &self.parts {
            let name = part.name();
            tracing::debug!(part = name, "drafting part");
            store.set_reader(name);
            let mut ctx = PartContext::new(
                name,
                measurements,
                &options,
                settings.complete,
                settings.paperless,
                settings.sa,
                settings.units,
                &mut store,
                &self.registry,
            );
            part.draft(&mut ctx)?;
            let scope = ctx.scope;
            tracing::debug!(
                part = name,
                points = scope.points.len(),
                paths = scope.paths.len(),
                "part drafted"
            );
            parts.insert(name.to_string(), scope);
            for (part_name, key) in store.take_misses() {
                if settings.strict_store {
                    return Err(DraftError::DependencyOrder {
                        part: part_name,
                        key,
                    });
                }
                tracing::warn!(part = %part_name, key = %key, "store read before write");
            }
        }
        Ok(PatternDocument {
            design: self.config.name.clone(),
            draft_id: Uuid::new_v4(),
            drafted_at: Utc::now(),
            settings: settings.clone(),
            parts,
            store: store.values().clone(),
        })
    }
}
