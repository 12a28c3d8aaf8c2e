//! The shared torso block: the frame of points the back and front parts
//! both start from before adjusting their necklines.

use stitchkit_core::geometry::Point;
use stitchkit_draft::{Options, PartContext};

/// Extra chest ease contributed by the fit choice, on top of the
/// `chestEase` option.
pub(crate) fn fit_ease(options: &Options) -> f64 {
    match options.text("fit") {
        "slim" => -0.02,
        "loose" => 0.05,
        _ => 0.0,
    }
}

/// Derive the torso frame: neckline corner, shoulder line, armhole frame,
/// side seam and hem. The center line is x = 0 (the piece is cut on the
/// fold) and the high point shoulder sits at y = 0.
///
/// `hollow_depth` tunes how far down the armhole hollow sits between the
/// shoulder and the armhole base; the front scoops deeper than the back.
pub(crate) fn torso_points(ctx: &mut PartContext<'_>, hollow_depth: f64) {
    let m = ctx.measurements;
    let o = ctx.options;

    let chest = m.get("chest") * (1.0 + o.number("chestEase") + fit_ease(o));
    let half_width = chest / 4.0;
    let neck_width = m.get("neck") / 5.0;
    let shoulder_half = m.get("shoulderToShoulder") / 2.0;
    let slope = o.number("shoulderSlope").to_radians();
    let shoulder_drop = (shoulder_half - neck_width) * slope.tan();
    let armhole_depth =
        shoulder_drop + m.get("biceps") * (1.0 + o.number("bicepsEase")) * 0.55;
    let waist_y = m.get("hpsToWaistBack");
    let hem_y = waist_y + m.get("waistToHips") + o.number("lengthBonus") * waist_y;

    let neck = Point::new(neck_width, 0.0);
    let shoulder = Point::new(shoulder_half, shoulder_drop);
    let armhole = Point::new(half_width, armhole_depth);
    let waist = Point::new(half_width, waist_y);

    // armhole curve frame: the hollow sits between shoulder and armhole
    // base, with its tangent running from base towards shoulder
    let hollow = Point::new(
        shoulder.x + (half_width - shoulder.x) * 0.55,
        shoulder.y + (armhole_depth - shoulder.y) * hollow_depth,
    );
    let tangent = armhole.angle(&shoulder);

    let p = &mut ctx.scope;
    p.set_point("neck", neck);
    p.set_point("shoulder", shoulder);
    p.set_point("armhole", armhole);
    p.set_point("waist", waist);
    p.set_point("hem", Point::new(half_width, hem_y));
    p.set_point("armholeHollow", hollow);
    p.set_point(
        "armholeCp2",
        armhole.shift(90.0, (armhole_depth - hollow.y) * 0.5),
    );
    p.set_point(
        "armholeHollowCp1",
        hollow.shift(tangent + 180.0, hollow.dist(&armhole) / 3.0),
    );
    p.set_point(
        "armholeHollowCp2",
        hollow.shift(tangent, hollow.dist(&shoulder) / 3.0),
    );
    // the armhole meets the shoulder seam square-on
    p.set_point(
        "shoulderCp1",
        shoulder.shift(neck.angle(&shoulder) - 90.0, hollow.dist(&shoulder) / 3.0),
    );
    p.set_point("waistCp2", waist.shift(90.0, (waist_y - armhole_depth) / 3.0));
}
