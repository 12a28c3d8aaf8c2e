//! Cubic Bezier segment math.
//!
//! Everything path-level (length, bounding boxes, offsetting, walking to a
//! point at a given arc length) funnels through this one segment
//! representation; the single-control-point builder form is promoted to a
//! full cubic before it gets here.

use super::point::Point;

/// Relative error target for adaptive arc-length subdivision. 0.1% is far
/// below cutting accuracy at garment scale.
pub(crate) const LENGTH_TOLERANCE: f64 = 0.001;

/// Subdivision ceiling. A cubic split 16 times is 65536 pieces; reaching
/// this means degenerate input, not insufficient precision.
const MAX_DEPTH: u32 = 16;

/// A cubic Bezier segment with explicit start point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CubicBezier {
    pub start: Point,
    pub cp1: Point,
    pub cp2: Point,
    pub end: Point,
}

impl CubicBezier {
    pub fn new(start: Point, cp1: Point, cp2: Point, end: Point) -> Self {
        Self {
            start,
            cp1,
            cp2,
            end,
        }
    }

    /// Evaluate the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.start.x + b * self.cp1.x + c * self.cp2.x + d * self.end.x,
            a * self.start.y + b * self.cp1.y + c * self.cp2.y + d * self.end.y,
        )
    }

    /// De Casteljau split at `t`, returning the two halves.
    pub fn split_at(&self, t: f64) -> (CubicBezier, CubicBezier) {
        let lerp = |a: &Point, b: &Point| a.shift_fraction_towards(b, t);
        let ab = lerp(&self.start, &self.cp1);
        let bc = lerp(&self.cp1, &self.cp2);
        let cd = lerp(&self.cp2, &self.end);
        let abc = lerp(&ab, &bc);
        let bcd = lerp(&bc, &cd);
        let mid = lerp(&abc, &bcd);
        (
            CubicBezier::new(self.start, ab, abc, mid),
            CubicBezier::new(mid, bcd, cd, self.end),
        )
    }

    /// Arc length by adaptive subdivision.
    ///
    /// The control polygon is an upper bound on length and the chord a
    /// lower bound; subdivide until they agree, then blend the bounds
    /// (Gravesen's estimate).
    pub fn length(&self) -> f64 {
        fn recurse(c: &CubicBezier, depth: u32) -> f64 {
            let chord = c.start.dist(&c.end);
            let polygon =
                c.start.dist(&c.cp1) + c.cp1.dist(&c.cp2) + c.cp2.dist(&c.end);
            if polygon < f64::EPSILON
                || depth >= MAX_DEPTH
                || polygon - chord <= LENGTH_TOLERANCE * polygon
            {
                return (2.0 * chord + polygon) / 3.0;
            }
            let (a, b) = c.split_at(0.5);
            recurse(&a, depth + 1) + recurse(&b, depth + 1)
        }
        recurse(self, 0)
    }

    /// Parameters in `(0, 1)` where the curve turns in x or y, i.e. the
    /// roots of the derivative per axis. Endpoints are not included.
    pub fn extrema(&self) -> Vec<f64> {
        let mut ts = Vec::new();
        let mut axis = |p0: f64, p1: f64, p2: f64, p3: f64| {
            // derivative of the cubic: at^2 + bt + c
            let a = 3.0 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3);
            let b = 6.0 * (p0 - 2.0 * p1 + p2);
            let c = 3.0 * (p1 - p0);
            if a.abs() < f64::EPSILON {
                if b.abs() > f64::EPSILON {
                    ts.push(-c / b);
                }
                return;
            }
            let disc = b * b - 4.0 * a * c;
            if disc < 0.0 {
                return;
            }
            let sq = disc.sqrt();
            ts.push((-b + sq) / (2.0 * a));
            ts.push((-b - sq) / (2.0 * a));
        };
        axis(self.start.x, self.cp1.x, self.cp2.x, self.end.x);
        axis(self.start.y, self.cp1.y, self.cp2.y, self.end.y);
        ts.retain(|t| *t > 0.0 && *t < 1.0);
        ts
    }

    /// The same geometry traced in the opposite direction.
    pub fn reversed(&self) -> CubicBezier {
        CubicBezier::new(self.end, self.cp2, self.cp1, self.start)
    }

    /// Offset this curve by `distance` along its right-hand normal,
    /// producing a run of cubics.
    ///
    /// The curve is first subdivided until each piece is shallow, then each
    /// piece's control points are pushed out along the normals of the
    /// control polygon's first and last legs. Concave curvature tighter
    /// than the offset distance will self-intersect; that is tolerated
    /// here and left to a later cleanup pass.
    pub fn offset(&self, distance: f64) -> Vec<CubicBezier> {
        let mut pieces = Vec::new();
        subdivide_for_offset(self, 0, &mut pieces);
        pieces.iter().map(|c| c.offset_shallow(distance)).collect()
    }

    /// Offset a piece already known to be shallow. Control points that
    /// coincide with their endpoint carry no direction; fall back along the
    /// control polygon, then to the chord.
    fn offset_shallow(&self, distance: f64) -> CubicBezier {
        let start_dir = first_direction(&[self.start, self.cp1, self.cp2, self.end]);
        let end_dir = last_direction(&[self.start, self.cp1, self.cp2, self.end]).or(start_dir);
        // right of travel is 90 degrees clockwise on paper
        let start_normal = start_dir.unwrap_or(0.0) - 90.0;
        let end_normal = end_dir.unwrap_or(0.0) - 90.0;
        CubicBezier::new(
            self.start.shift(start_normal, distance),
            self.cp1.shift(start_normal, distance),
            self.cp2.shift(end_normal, distance),
            self.end.shift(end_normal, distance),
        )
    }

    /// Shallow enough that control-polygon leg normals approximate true
    /// normals: the polygon's excess over the chord must be small both
    /// absolutely (0.2mm is well inside cutting tolerance) and relative to
    /// the chord (keeps quality scale-independent).
    fn is_shallow(&self) -> bool {
        let chord = self.start.dist(&self.end);
        let polygon =
            self.start.dist(&self.cp1) + self.cp1.dist(&self.cp2) + self.cp2.dist(&self.end);
        let excess = polygon - chord;
        excess < 0.2 && excess < chord * 0.02
    }
}

/// Angle of the first leg of a point run that has nonzero length.
fn first_direction(run: &[Point]) -> Option<f64> {
    let from = run.first()?;
    run.iter()
        .skip(1)
        .find(|p| !from.sits_on(p, 1e-9))
        .map(|p| from.angle(p))
}

/// Angle of the final leg, taken from the last predecessor that does not
/// coincide with the end point.
fn last_direction(run: &[Point]) -> Option<f64> {
    let to = run.last()?;
    run.iter()
        .rev()
        .skip(1)
        .find(|p| !to.sits_on(p, 1e-9))
        .map(|p| p.angle(to))
}

/// Split until each piece is shallow (or the depth cap is hit on
/// degenerate input).
fn subdivide_for_offset(curve: &CubicBezier, depth: u32, out: &mut Vec<CubicBezier>) {
    if depth >= 8 || curve.is_shallow() {
        out.push(*curve);
        return;
    }
    let (a, b) = curve.split_at(0.5);
    subdivide_for_offset(&a, depth + 1, out);
    subdivide_for_offset(&b, depth + 1, out);
}

/// Promote a quadratic control point to cubic form.
pub(crate) fn promote_quadratic(start: Point, cp: Point, end: Point) -> (Point, Point) {
    (
        start.shift_fraction_towards(&cp, 2.0 / 3.0),
        end.shift_fraction_towards(&cp, 2.0 / 3.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter_arc() -> CubicBezier {
        // well-known cubic approximation of a unit quarter circle
        const K: f64 = 0.5522847498;
        CubicBezier::new(
            Point::new(1.0, 0.0),
            Point::new(1.0, K),
            Point::new(K, 1.0),
            Point::new(0.0, 1.0),
        )
    }

    #[test]
    fn test_point_at_endpoints() {
        let c = quarter_arc();
        assert_eq!(c.point_at(0.0), c.start);
        assert_eq!(c.point_at(1.0), c.end);
    }

    #[test]
    fn test_length_of_quarter_circle() {
        let c = quarter_arc();
        let expected = std::f64::consts::PI / 2.0;
        assert!((c.length() - expected).abs() / expected < 0.001);
    }

    #[test]
    fn test_length_of_degenerate_line_curve() {
        // control points on the chord: length is the chord
        let c = CubicBezier::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        );
        assert!((c.length() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_split_preserves_geometry() {
        let c = quarter_arc();
        let (a, b) = c.split_at(0.5);
        assert_eq!(a.start, c.start);
        assert_eq!(b.end, c.end);
        assert!(a.end.sits_on(&c.point_at(0.5), 1e-9));
        assert!(a.point_at(0.5).sits_on(&c.point_at(0.25), 1e-9));
    }

    #[test]
    fn test_extrema_of_quarter_arc() {
        // the quarter arc turns in neither axis strictly inside (0,1)
        // except where a control polygon leg flattens; a symmetric S-curve
        // has a y-extremum at t=0.5
        let s = CubicBezier::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        );
        let ts = s.extrema();
        assert!(ts.iter().any(|t| (t - 0.5).abs() < 1e-9));
    }

    #[test]
    fn test_reversed_traces_same_points() {
        let c = quarter_arc();
        let r = c.reversed();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!(c.point_at(t).sits_on(&r.point_at(1.0 - t), 1e-9));
        }
    }

    #[test]
    fn test_offset_distance_stays_near_target() {
        // travelling east-to-south along the arc, the right-hand side
        // faces the center, so a positive offset shrinks the radius
        let c = quarter_arc();
        for piece in c.offset(0.25) {
            for i in 0..=4 {
                let p = piece.point_at(i as f64 / 4.0);
                let r = p.x.hypot(p.y);
                assert!((r - 0.75).abs() < 0.02, "radius {} off target", r);
            }
        }
        for piece in c.offset(-0.25) {
            for i in 0..=4 {
                let p = piece.point_at(i as f64 / 4.0);
                let r = p.x.hypot(p.y);
                assert!((r - 1.25).abs() < 0.02, "radius {} off target", r);
            }
        }
    }
}
