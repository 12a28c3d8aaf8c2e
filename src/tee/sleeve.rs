//! The tee sleeve: a short sleeve whose cap is sized from the armhole
//! lengths the torso parts left in the store.

use stitchkit_core::geometry::{Path, Point};
use stitchkit_draft::{MacroParams, Part, PartContext, Result};

pub struct Sleeve;

impl Part for Sleeve {
    fn name(&self) -> &'static str {
        "sleeve"
    }

    fn draft(&self, ctx: &mut PartContext<'_>) -> Result<()> {
        let biceps = ctx.measurements.get("biceps")
            * (1.0 + ctx.options.number("bicepsEase"));

        // The torso parts normally ran first; drafting the sleeve on its
        // own still works off the biceps width alone.
        let fallback = biceps * 0.7;
        let back_len = ctx.store_number("backArmholeLength").unwrap_or(fallback);
        let front_len = ctx.store_number("frontArmholeLength").unwrap_or(fallback);
        let ease = ctx.store_number("sleevecapEase").unwrap_or(0.0);
        let armhole_len = back_len + front_len + ease;

        let cap_height = armhole_len * ctx.options.number("sleevecapHeight") / 2.0;
        let half_width = biceps / 2.0;
        let hem_y = cap_height + ctx.options.number("sleeveLengthBonus");

        let cap_top = Point::new(0.0, 0.0);
        let bicep_right = Point::new(half_width, cap_height);
        let bicep_left = Point::new(-half_width, cap_height);
        // the hem tapers slightly towards the cuff
        let hem_right = Point::new(half_width * 0.95, hem_y);
        let hem_left = Point::new(-half_width * 0.95, hem_y);

        let p = &mut ctx.scope;
        p.set_point("capTop", cap_top);
        p.set_point("bicepRight", bicep_right);
        p.set_point("bicepLeft", bicep_left);
        p.set_point("hemRight", hem_right);
        p.set_point("hemLeft", hem_left);
        p.set_point("capRightCp1", bicep_right.shift(90.0, cap_height * 0.6));
        p.set_point("capRightCp2", cap_top.shift(0.0, half_width * 0.6));
        p.set_point("capLeftCp1", cap_top.shift(180.0, half_width * 0.6));
        p.set_point("capLeftCp2", bicep_left.shift(90.0, cap_height * 0.6));
        p.set_point("title", Point::new(0.0, cap_height + 30.0));

        // Draw seamline
        let seam = ctx.build_path(
            Path::builder()
                .move_to(bicep_right)
                .curve(
                    ctx.scope.point("capRightCp1"),
                    ctx.scope.point("capRightCp2"),
                    cap_top,
                )
                .curve(
                    ctx.scope.point("capLeftCp1"),
                    ctx.scope.point("capLeftCp2"),
                    bicep_left,
                )
                .line(hem_left)
                .line(hem_right)
                .close(),
        )?;

        let cap_len = ctx.build_path(
            Path::builder()
                .move_to(bicep_right)
                .curve(
                    ctx.scope.point("capRightCp1"),
                    ctx.scope.point("capRightCp2"),
                    cap_top,
                )
                .curve(
                    ctx.scope.point("capLeftCp1"),
                    ctx.scope.point("capLeftCp2"),
                    bicep_left,
                ),
        )?
        .len();
        tracing::debug!(
            cap_len,
            armhole_len,
            "sleevecap drafted against armhole"
        );
        ctx.store_set("sleevecapLength", cap_len);

        if ctx.complete {
            ctx.apply_macro(
                "grainline",
                MacroParams::new()
                    .from(Point::new(0.0, 20.0))
                    .to(Point::new(0.0, hem_y - 10.0)),
            )?;
            ctx.apply_macro(
                "title",
                MacroParams::new()
                    .at(ctx.scope.point("title"))
                    .nr(3)
                    .label("sleeve"),
            )?;

            if ctx.sa > 0.0 {
                ctx.scope.set_path("sa", seam.offset(ctx.sa));
            }
        }

        if ctx.paperless {
            ctx.apply_macro(
                "hd",
                MacroParams::new()
                    .from(hem_left)
                    .to(hem_right)
                    .y(hem_y + 15.0),
            )?;
            ctx.apply_macro(
                "vd",
                MacroParams::new()
                    .from(Point::new(-half_width, 0.0))
                    .to(bicep_left)
                    .x(-half_width - 15.0),
            )?;
        }

        ctx.scope.set_path("seam", seam);
        Ok(())
    }
}
