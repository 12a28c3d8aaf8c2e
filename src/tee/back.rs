//! The tee back: cut on the center-back fold.

use stitchkit_core::geometry::{beam_intersects_y, Path, Point};
use stitchkit_draft::{MacroParams, Part, PartContext, Result};

use super::block;

pub struct Back;

impl Part for Back {
    fn name(&self) -> &'static str {
        "back"
    }

    fn draft(&self, ctx: &mut PartContext<'_>) -> Result<()> {
        block::torso_points(ctx, 0.55);

        // Adjust neckline
        let neck = ctx.scope.point("neck");
        let shoulder = ctx.scope.point("shoulder");
        let cb_neck = Point::new(
            0.0,
            ctx.options.number("backNeckCutout") * ctx.measurements.get("neck"),
        );
        ctx.scope.set_point("cbNeck", cb_neck);
        ctx.scope
            .set_point("cbNeckCp1", cb_neck.shift(0.0, neck.x / 2.0));
        let neck_cp2_seed = neck.shift(neck.angle(&shoulder) - 90.0, 10.0);
        let neck_cp2 =
            beam_intersects_y(&neck, &neck_cp2_seed, cb_neck.y).unwrap_or(neck_cp2_seed);
        ctx.scope.set_point("neckCp2", neck_cp2);

        // Adjust armhole
        let shoulder_cp1 = ctx
            .scope
            .point("shoulderCp1")
            .shift_fraction_towards(&shoulder, 0.25);
        ctx.scope.set_point("shoulderCp1", shoulder_cp1);

        let hem = ctx.scope.point("hem");
        let cb_hem = Point::new(0.0, hem.y);
        ctx.scope.set_point("cbHem", cb_hem);
        let armhole = ctx.scope.point("armhole");
        let waist = ctx.scope.point("waist");
        ctx.scope.set_point(
            "title",
            Point::new(armhole.x / 2.0, (armhole.y + waist.y) / 2.0),
        );

        // Draw seamline
        let seam = ctx.build_path(
            Path::builder()
                .move_to(cb_hem)
                .line(hem)
                .line(waist)
                .curve_single(ctx.scope.point("waistCp2"), armhole)
                .curve(
                    ctx.scope.point("armholeCp2"),
                    ctx.scope.point("armholeHollowCp1"),
                    ctx.scope.point("armholeHollow"),
                )
                .curve(
                    ctx.scope.point("armholeHollowCp2"),
                    shoulder_cp1,
                    shoulder,
                )
                .line(neck)
                .curve(neck_cp2, ctx.scope.point("cbNeckCp1"), cb_neck)
                .line(cb_hem)
                .close(),
        )?;

        // Set store values required to draft the sleevecap
        ctx.store_set("sleevecapEase", 0.0);
        let armhole_only = ctx.build_path(
            Path::builder()
                .move_to(armhole)
                .curve(
                    ctx.scope.point("armholeCp2"),
                    ctx.scope.point("armholeHollowCp1"),
                    ctx.scope.point("armholeHollow"),
                )
                .curve(
                    ctx.scope.point("armholeHollowCp2"),
                    shoulder_cp1,
                    shoulder,
                ),
        )?;
        ctx.store_set("backArmholeLength", armhole_only.len());

        if ctx.complete {
            ctx.apply_macro(
                "cutonfold",
                MacroParams::new().from(cb_neck).to(cb_hem).grainline(true),
            )?;
            let title = ctx.scope.point("title");
            ctx.apply_macro("title", MacroParams::new().at(title).nr(2).label("back"))?;
            let scalebox = title.shift(90.0, 100.0);
            ctx.scope.set_point("scaleboxAnchor", scalebox);
            ctx.apply_macro("scalebox", MacroParams::new().at(scalebox))?;

            if ctx.sa > 0.0 {
                ctx.scope.set_path("sa", seam.offset(ctx.sa));
            }
        }

        if ctx.paperless {
            ctx.apply_macro(
                "hd",
                MacroParams::new().from(cb_hem).to(hem).y(hem.y + 15.0),
            )?;
            ctx.apply_macro(
                "vd",
                MacroParams::new()
                    .from(cb_hem)
                    .to(cb_neck)
                    .x(cb_hem.x - ctx.sa - 15.0),
            )?;
        }

        ctx.scope.set_path("seam", seam);
        Ok(())
    }
}
