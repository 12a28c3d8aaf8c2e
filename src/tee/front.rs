//! The tee front: same torso frame as the back with a deeper neckline and
//! a deeper armhole scoop.

use stitchkit_core::geometry::{beam_intersects_y, Path, Point};
use stitchkit_draft::{MacroParams, Part, PartContext, Result};

use super::block;

pub struct Front;

impl Part for Front {
    fn name(&self) -> &'static str {
        "front"
    }

    fn draft(&self, ctx: &mut PartContext<'_>) -> Result<()> {
        block::torso_points(ctx, 0.62);

        // Adjust neckline
        let neck = ctx.scope.point("neck");
        let shoulder = ctx.scope.point("shoulder");
        let cf_neck = Point::new(
            0.0,
            ctx.options.number("frontNeckCutout") * ctx.measurements.get("neck"),
        );
        ctx.scope.set_point("cfNeck", cf_neck);
        ctx.scope
            .set_point("cfNeckCp1", cf_neck.shift(0.0, neck.x / 2.0));
        let neck_cp2_seed = neck.shift(neck.angle(&shoulder) - 90.0, 10.0);
        let neck_cp2 =
            beam_intersects_y(&neck, &neck_cp2_seed, cf_neck.y).unwrap_or(neck_cp2_seed);
        ctx.scope.set_point("neckCp2", neck_cp2);

        let hem = ctx.scope.point("hem");
        let cf_hem = Point::new(0.0, hem.y);
        ctx.scope.set_point("cfHem", cf_hem);
        let armhole = ctx.scope.point("armhole");
        let waist = ctx.scope.point("waist");
        ctx.scope.set_point(
            "title",
            Point::new(armhole.x / 2.0, (armhole.y + waist.y) / 2.0),
        );

        // Draw seamline
        let seam = ctx.build_path(
            Path::builder()
                .move_to(cf_hem)
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
                    ctx.scope.point("shoulderCp1"),
                    shoulder,
                )
                .line(neck)
                .curve(neck_cp2, ctx.scope.point("cfNeckCp1"), cf_neck)
                .line(cf_hem)
                .close(),
        )?;

        // The sleeve needs both armhole lengths to size its cap
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
                    ctx.scope.point("shoulderCp1"),
                    shoulder,
                ),
        )?;
        ctx.store_set("frontArmholeLength", armhole_only.len());

        if ctx.complete {
            ctx.apply_macro(
                "cutonfold",
                MacroParams::new().from(cf_neck).to(cf_hem).grainline(true),
            )?;
            ctx.apply_macro(
                "title",
                MacroParams::new()
                    .at(ctx.scope.point("title"))
                    .nr(1)
                    .label("front"),
            )?;

            if ctx.sa > 0.0 {
                ctx.scope.set_path("sa", seam.offset(ctx.sa));
            }
        }

        if ctx.paperless {
            ctx.apply_macro(
                "hd",
                MacroParams::new().from(cf_hem).to(hem).y(hem.y + 15.0),
            )?;
            ctx.apply_macro(
                "vd",
                MacroParams::new()
                    .from(cf_hem)
                    .to(cf_neck)
                    .x(cf_hem.x - ctx.sa - 15.0),
            )?;
        }

        ctx.scope.set_path("seam", seam);
        Ok(())
    }
}
