//! Paperless dimensioning: measured callouts drawn onto the pattern so it
//! can be traced full-size without relying on printed-to-scale paper.

use stitchkit_core::geometry::{Path, Point};
use stitchkit_core::units::format_length;

use crate::error::MacroError;
use crate::part::{PartScope, Text};

use super::annotations::readable;
use super::{Macro, MacroEnv, MacroParams};

/// Leader-shaft-leader dimension between two anchors, with the measured
/// value as text at the shaft midpoint.
fn draw_dimension(
    name: &'static str,
    prefix: &str,
    scope: &mut PartScope,
    env: &MacroEnv<'_>,
    from: Point,
    to: Point,
    shaft_from: Point,
    shaft_to: Point,
    length_mm: f64,
) -> Result<(), MacroError> {
    let key = scope.unique_path_key(prefix);
    let path = Path::builder()
        .move_to(from)
        .line(shaft_from)
        .line(shaft_to)
        .line(to)
        .build()
        .map_err(|source| MacroError::Geometry { name, source })?;
    scope.set_path(&key, path);
    let angle = shaft_from.angle(&shaft_to);
    let mid = shaft_from
        .shift_fraction_towards(&shaft_to, 0.5)
        .shift(angle + 90.0, 3.0);
    scope.set_text(
        &format!("{}Text", key),
        Text::new(mid, format_length(length_mm, env.units)).rotated(readable(angle)),
    );
    Ok(())
}

/// `hd` - horizontal dimension between `from` and `to`.
///
/// Requires `from` and `to`; `y` places the shaft (default 15mm below the
/// lower anchor).
pub struct HorizontalDim;

impl Macro for HorizontalDim {
    fn name(&self) -> &'static str {
        "hd"
    }

    fn apply(
        &self,
        params: &MacroParams,
        scope: &mut PartScope,
        env: &MacroEnv<'_>,
    ) -> Result<(), MacroError> {
        let from = params.require_from(self.name())?;
        let to = params.require_to(self.name())?;
        let y = params.y.unwrap_or_else(|| from.y.max(to.y) + 15.0);
        draw_dimension(
            self.name(),
            "hd",
            scope,
            env,
            from,
            to,
            Point::new(from.x, y),
            Point::new(to.x, y),
            (to.x - from.x).abs(),
        )
    }
}

/// `vd` - vertical dimension between `from` and `to`.
///
/// Requires `from` and `to`; `x` places the shaft (default 15mm left of
/// the leftmost anchor).
pub struct VerticalDim;

impl Macro for VerticalDim {
    fn name(&self) -> &'static str {
        "vd"
    }

    fn apply(
        &self,
        params: &MacroParams,
        scope: &mut PartScope,
        env: &MacroEnv<'_>,
    ) -> Result<(), MacroError> {
        let from = params.require_from(self.name())?;
        let to = params.require_to(self.name())?;
        let x = params.x.unwrap_or_else(|| from.x.min(to.x) - 15.0);
        draw_dimension(
            self.name(),
            "vd",
            scope,
            env,
            from,
            to,
            Point::new(x, from.y),
            Point::new(x, to.y),
            (to.y - from.y).abs(),
        )
    }
}

/// `ld` - linear dimension along the `from`-`to` line itself.
///
/// Requires `from` and `to`; `offset` moves the shaft off the measured
/// line along its right-hand normal (default 15mm).
pub struct LinearDim;

impl Macro for LinearDim {
    fn name(&self) -> &'static str {
        "ld"
    }

    fn apply(
        &self,
        params: &MacroParams,
        scope: &mut PartScope,
        env: &MacroEnv<'_>,
    ) -> Result<(), MacroError> {
        let from = params.require_from(self.name())?;
        let to = params.require_to(self.name())?;
        let offset = params.offset.unwrap_or(15.0);
        let normal = from.angle(&to) - 90.0;
        draw_dimension(
            self.name(),
            "ld",
            scope,
            env,
            from,
            to,
            from.shift(normal, offset),
            to.shift(normal, offset),
            from.dist(&to),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::macros::MacroRegistry;
    use stitchkit_core::units::MeasurementSystem;

    fn apply(name: &str, params: MacroParams, scope: &mut PartScope) {
        let options = Options::default();
        let env = MacroEnv {
            options: &options,
            units: MeasurementSystem::Metric,
            sa: 0.0,
        };
        MacroRegistry::with_builtins()
            .apply(name, &params, scope, &env)
            .unwrap();
    }

    #[test]
    fn test_hd_measures_horizontal_distance_only() {
        let mut scope = PartScope::default();
        apply(
            "hd",
            MacroParams::new()
                .from(Point::new(0.0, 0.0))
                .to(Point::new(120.0, 80.0))
                .y(100.0),
            &mut scope,
        );
        assert_eq!(scope.texts["hdText"].content, "12.0cm");
        let bbox = scope.paths["hd"].bounding_box().unwrap();
        assert!((bbox.bottom_right.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_vd_measures_vertical_distance_only() {
        let mut scope = PartScope::default();
        apply(
            "vd",
            MacroParams::new()
                .from(Point::new(40.0, 10.0))
                .to(Point::new(80.0, 250.0))
                .x(0.0),
            &mut scope,
        );
        assert_eq!(scope.texts["vdText"].content, "24.0cm");
    }

    #[test]
    fn test_ld_measures_true_distance() {
        let mut scope = PartScope::default();
        apply(
            "ld",
            MacroParams::new()
                .from(Point::new(0.0, 0.0))
                .to(Point::new(30.0, 40.0)),
            &mut scope,
        );
        assert_eq!(scope.texts["ldText"].content, "5.0cm");
    }

    #[test]
    fn test_repeated_dimensions_get_unique_keys() {
        let mut scope = PartScope::default();
        for _ in 0..2 {
            apply(
                "hd",
                MacroParams::new()
                    .from(Point::new(0.0, 0.0))
                    .to(Point::new(50.0, 0.0)),
                &mut scope,
            );
        }
        assert!(scope.paths.contains_key("hd"));
        assert!(scope.paths.contains_key("hd2"));
        assert!(scope.texts.contains_key("hd2Text"));
    }
}
