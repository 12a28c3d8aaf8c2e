//! Integration tests for part sequencing and the cross-part store.

use std::collections::BTreeMap;

use stitchkit_core::geometry::{Path, Point};
use stitchkit_draft::{
    DesignConfig, Draft, DraftError, DraftSettings, Measurements, Part, PartContext, Result,
};

/// Writes a derived quantity other parts depend on.
struct Writer;

impl Part for Writer {
    fn name(&self) -> &'static str {
        "writer"
    }

    fn draft(&self, ctx: &mut PartContext<'_>) -> Result<()> {
        ctx.scope.set_point("origin", Point::new(0.0, 0.0));
        ctx.store_set("collarWidth", 42.0);
        Ok(())
    }
}

/// Reads the writer's quantity, branching defensively on absence.
struct Reader;

impl Part for Reader {
    fn name(&self) -> &'static str {
        "reader"
    }

    fn draft(&self, ctx: &mut PartContext<'_>) -> Result<()> {
        let width = ctx.store_number("collarWidth").unwrap_or(10.0);
        let strip = ctx.build_path(
            Path::builder()
                .move_to(Point::new(0.0, 0.0))
                .line(Point::new(width, 0.0)),
        )?;
        ctx.scope.set_path("strip", strip);
        Ok(())
    }
}

fn design() -> DesignConfig {
    DesignConfig::new("test-design")
}

fn settings() -> DraftSettings {
    DraftSettings {
        complete: false,
        ..DraftSettings::default()
    }
}

#[test]
fn test_earlier_writes_are_visible_to_later_parts() {
    let draft = Draft::new(design())
        .with_part(Box::new(Writer))
        .with_part(Box::new(Reader));
    let doc = draft
        .run(&Measurements::new(), &BTreeMap::new(), &settings())
        .unwrap();
    let strip = &doc.parts["reader"].paths["strip"];
    assert!((strip.len() - 42.0).abs() < 1e-9);
    // the writer's scope is exported too
    assert!(doc.parts["writer"].points.contains_key("origin"));
    // and the store entry rides along in the document
    assert!(doc.store.contains_key("collarWidth"));
}

#[test]
fn test_misordered_parts_fall_back_in_lenient_mode() {
    let draft = Draft::new(design())
        .with_part(Box::new(Reader))
        .with_part(Box::new(Writer));
    let doc = draft
        .run(&Measurements::new(), &BTreeMap::new(), &settings())
        .unwrap();
    // the reader never saw the write and used its fallback
    let strip = &doc.parts["reader"].paths["strip"];
    assert!((strip.len() - 10.0).abs() < 1e-9);
}

#[test]
fn test_misordered_parts_fail_in_strict_mode() {
    let draft = Draft::new(design())
        .with_part(Box::new(Reader))
        .with_part(Box::new(Writer));
    let strict = DraftSettings {
        strict_store: true,
        ..settings()
    };
    let err = draft
        .run(&Measurements::new(), &BTreeMap::new(), &strict)
        .unwrap_err();
    match err {
        DraftError::DependencyOrder { part, key } => {
            assert_eq!(part, "reader");
            assert_eq!(key, "collarWidth");
        }
        other => panic!("expected DependencyOrder, got {:?}", other),
    }
}

#[test]
fn test_document_serializes_and_saves() {
    let draft = Draft::new(design())
        .with_part(Box::new(Writer))
        .with_part(Box::new(Reader));
    let doc = draft
        .run(&Measurements::new(), &BTreeMap::new(), &settings())
        .unwrap();
    let json = doc.to_json().unwrap();
    assert!(json.contains("collarWidth"));
    assert!(json.contains("test-design"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.json");
    doc.save(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, json);
}
