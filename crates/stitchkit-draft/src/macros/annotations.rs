//! Finishing annotations: fold markers, grainlines, title blocks, scale
//! boxes.

use stitchkit_core::geometry::{Path, Point};
use stitchkit_core::units::{format_length, MeasurementSystem};

use crate::error::MacroError;
use crate::part::{PartScope, Text};

use super::{Macro, MacroEnv, MacroParams};

/// Arrowhead leg length in millimeters.
const ARROW_HEAD: f64 = 8.0;

/// Rotate annotation text so it never reads upside down.
pub(crate) fn readable(angle: f64) -> f64 {
    if angle > 90.0 && angle <= 270.0 {
        angle - 180.0
    } else {
        angle
    }
}

fn build(name: &'static str, builder: stitchkit_core::geometry::PathBuilder) -> Result<Path, MacroError> {
    builder
        .build()
        .map_err(|source| MacroError::Geometry { name, source })
}

/// A V-shaped arrowhead whose tip sits at `tip`, opening back along
/// `shaft_angle` (the direction travel came from).
fn arrow_head(name: &'static str, tip: Point, shaft_angle: f64) -> Result<Path, MacroError> {
    let barb1 = tip.shift(shaft_angle + 155.0, ARROW_HEAD);
    let barb2 = tip.shift(shaft_angle - 155.0, ARROW_HEAD);
    build(
        name,
        Path::builder().move_to(barb1).line(tip).line(barb2),
    )
}

/// Draw a double-headed grainline arrow with its label; shared between the
/// grainline macro and the cut-on-fold macro's grainline mode.
fn draw_grainline(
    name: &'static str,
    scope: &mut PartScope,
    from: Point,
    to: Point,
) -> Result<(), MacroError> {
    let angle = from.angle(&to);
    // pull the arrow in so the heads stay inside the piece edge
    let a = from.shift_towards(&to, ARROW_HEAD);
    let b = to.shift_towards(&from, ARROW_HEAD);
    let key = scope.unique_path_key("grainline");
    let shaft = build(name, Path::builder().move_to(a).line(b))?;
    scope.set_path(&key, shaft);
    scope.set_path(&format!("{}Head1", key), arrow_head(name, a, angle)?);
    scope.set_path(&format!("{}Head2", key), arrow_head(name, b, angle + 180.0)?);
    let mid = a.shift_fraction_towards(&b, 0.5).shift(angle + 90.0, 3.0);
    scope.set_text(
        &format!("{}Text", key),
        Text::new(mid, "Grainline").rotated(readable(angle)),
    );
    Ok(())
}

/// `cutonfold` - marks the edge between `from` and `to` as cut on a folded
/// edge instead of as a mirrored pair.
///
/// Requires `from` and `to`. Accepts `offset` (bracket depth in mm,
/// default 15; positive falls to the left of the from-to direction of
/// travel) and `grainline` to run the grainline along the fold.
pub struct CutOnFold;

impl Macro for CutOnFold {
    fn name(&self) -> &'static str {
        "cutonfold"
    }

    fn apply(
        &self,
        params: &MacroParams,
        scope: &mut PartScope,
        _env: &MacroEnv<'_>,
    ) -> Result<(), MacroError> {
        let from = params.require_from(self.name())?;
        let to = params.require_to(self.name())?;
        let offset = params.offset.unwrap_or(15.0);
        let angle = from.angle(&to);
        let a = from.shift_fraction_towards(&to, 0.05);
        let b = from.shift_fraction_towards(&to, 0.95);
        let a2 = a.shift(angle + 90.0, offset);
        let b2 = b.shift(angle + 90.0, offset);
        let key = scope.unique_path_key("cutOnFold");
        let bracket = build(
            self.name(),
            Path::builder().move_to(a).line(a2).line(b2).line(b),
        )?;
        scope.set_path(&key, bracket);
        let mid = a2.shift_fraction_towards(&b2, 0.5).shift(angle + 90.0, 3.0);
        scope.set_text(
            &format!("{}Text", key),
            Text::new(mid, "Cut on fold").rotated(readable(angle)),
        );
        if params.grainline {
            let g_from = a.shift(angle + 90.0, offset * 2.0);
            let g_to = b.shift(angle + 90.0, offset * 2.0);
            draw_grainline(self.name(), scope, g_from, g_to)?;
        }
        Ok(())
    }
}

/// `grainline` - a double-headed arrow between `from` and `to` showing the
/// fabric grain direction. Requires `from` and `to`.
pub struct Grainline;

impl Macro for Grainline {
    fn name(&self) -> &'static str {
        "grainline"
    }

    fn apply(
        &self,
        params: &MacroParams,
        scope: &mut PartScope,
        _env: &MacroEnv<'_>,
    ) -> Result<(), MacroError> {
        let from = params.require_from(self.name())?;
        let to = params.require_to(self.name())?;
        draw_grainline(self.name(), scope, from, to)
    }
}

/// `title` - piece number and name at an anchor. Requires `at`; `nr` and
/// `label` are each rendered when present.
pub struct Title;

impl Macro for Title {
    fn name(&self) -> &'static str {
        "title"
    }

    fn apply(
        &self,
        params: &MacroParams,
        scope: &mut PartScope,
        _env: &MacroEnv<'_>,
    ) -> Result<(), MacroError> {
        let at = params.require_at(self.name())?;
        if let Some(nr) = params.nr {
            scope.set_text("titleNr", Text::new(at, nr.to_string()));
        }
        if let Some(label) = &params.label {
            scope.set_text("titleLabel", Text::new(at.shift(270.0, 10.0), label.clone()));
        }
        Ok(())
    }
}

/// Scale box dimensions in millimeters.
const SCALEBOX_WIDTH: f64 = 100.0;
const SCALEBOX_HEIGHT: f64 = 50.0;

/// `scalebox` - a fixed-size reference rectangle so printed output can be
/// checked against scaling. Requires `at` (the box center).
pub struct Scalebox;

impl Macro for Scalebox {
    fn name(&self) -> &'static str {
        "scalebox"
    }

    fn apply(
        &self,
        params: &MacroParams,
        scope: &mut PartScope,
        _env: &MacroEnv<'_>,
    ) -> Result<(), MacroError> {
        let at = params.require_at(self.name())?;
        let hw = SCALEBOX_WIDTH / 2.0;
        let hh = SCALEBOX_HEIGHT / 2.0;
        let box_path = build(
            self.name(),
            Path::builder()
                .move_to(at.translate(-hw, -hh))
                .line(at.translate(hw, -hh))
                .line(at.translate(hw, hh))
                .line(at.translate(-hw, hh))
                .close(),
        )?;
        scope.set_path("scalebox", box_path);
        scope.set_text(
            "scaleboxTitle",
            Text::new(at.shift(90.0, 8.0), "Scale check"),
        );
        let metric = format!(
            "{} x {}",
            format_length(SCALEBOX_WIDTH, MeasurementSystem::Metric),
            format_length(SCALEBOX_HEIGHT, MeasurementSystem::Metric),
        );
        let imperial = format!(
            "{} x {}",
            format_length(SCALEBOX_WIDTH, MeasurementSystem::Imperial),
            format_length(SCALEBOX_HEIGHT, MeasurementSystem::Imperial),
        );
        scope.set_text("scaleboxMetric", Text::new(at, metric));
        scope.set_text("scaleboxImperial", Text::new(at.shift(270.0, 8.0), imperial));
        Ok(())
    }
}
