//! Paths: ordered drawing operations over [`Point`]s.
//!
//! A path is built fluently and consumed into an immutable value:
//!
//! ```
//! use stitchkit_core::geometry::{Path, Point};
//!
//! let seam = Path::builder()
//!     .move_to(Point::new(0.0, 0.0))
//!     .line(Point::new(100.0, 0.0))
//!     .curve(
//!         Point::new(120.0, 30.0),
//!         Point::new(120.0, 70.0),
//!         Point::new(100.0, 100.0),
//!     )
//!     .line(Point::new(0.0, 100.0))
//!     .close()
//!     .build()
//!     .unwrap();
//! assert!(seam.is_closed());
//! ```
//!
//! A path with zero segments is valid and means "nothing drawn yet"; parts
//! routinely build a throwaway path just to measure a length.

use serde::{Deserialize, Serialize};

use super::bezier::{promote_quadratic, CubicBezier};
use super::point::Point;
use crate::error::GeometryError;

/// Tolerance for deciding two endpoints coincide (join contiguity, closure).
const CONTACT_TOLERANCE: f64 = 0.005;

/// A single drawing operation. The first segment of a non-empty path is
/// always `Move`; every later segment starts at the previous segment's
/// endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Segment {
    /// Establish the current point. Exactly one per path, always first.
    Move { to: Point },
    /// Straight segment from the current point.
    Line { to: Point },
    /// Cubic Bezier from the current point, both control points explicit.
    Curve { cp1: Point, cp2: Point, to: Point },
    /// Straight segment back to the path's starting point. Last if present.
    Close,
}

/// An ordered sequence of segments, immutable once built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    segments: Vec<Segment>,
}

/// Axis-aligned bounding box in paper coordinates (y grows downward, so
/// `top_left` holds the minima).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl BoundingBox {
    fn around(first: Point) -> Self {
        Self {
            top_left: first,
            bottom_right: first,
        }
    }

    fn include(&mut self, p: Point) {
        self.top_left.x = self.top_left.x.min(p.x);
        self.top_left.y = self.top_left.y.min(p.y);
        self.bottom_right.x = self.bottom_right.x.max(p.x);
        self.bottom_right.y = self.bottom_right.y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }
}

/// Fluent accumulator for [`Path`]. Each call appends a segment and hands
/// the builder back; the first structural violation is remembered and
/// surfaced by [`PathBuilder::build`], naming the offending operation.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    segments: Vec<Segment>,
    current: Option<Point>,
    closed: bool,
    error: Option<GeometryError>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, error: GeometryError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn check_open(&mut self, op: &'static str) -> bool {
        if self.closed {
            self.fail(GeometryError::SegmentAfterClose { op });
            return false;
        }
        if self.current.is_none() {
            self.fail(GeometryError::MissingMove { op });
            return false;
        }
        true
    }

    /// Establish the path's starting point.
    pub fn move_to(mut self, to: Point) -> Self {
        if self.closed {
            self.fail(GeometryError::SegmentAfterClose { op: "move" });
        } else if self.current.is_some() {
            self.fail(GeometryError::DuplicateMove);
        } else {
            self.segments.push(Segment::Move { to });
            self.current = Some(to);
        }
        self
    }

    /// Straight segment to `to`.
    pub fn line(mut self, to: Point) -> Self {
        if self.check_open("line") {
            self.segments.push(Segment::Line { to });
            self.current = Some(to);
        }
        self
    }

    /// Cubic Bezier to `to` with both control points explicit.
    pub fn curve(mut self, cp1: Point, cp2: Point, to: Point) -> Self {
        if self.check_open("curve") {
            self.segments.push(Segment::Curve { cp1, cp2, to });
            self.current = Some(to);
        }
        self
    }

    /// Cubic Bezier with a single control point governing the starting
    /// tangent; normalized immediately into full cubic form (quadratic
    /// promotion) so downstream math sees one segment representation.
    pub fn curve_single(mut self, cp: Point, to: Point) -> Self {
        if self.check_open("curve") {
            // check_open guarantees a current point
            let start = self.current.unwrap_or_default();
            let (cp1, cp2) = promote_quadratic(start, cp, to);
            self.segments.push(Segment::Curve { cp1, cp2, to });
            self.current = Some(to);
        }
        self
    }

    /// Straight segment back to the starting point; no segment may follow.
    pub fn close(mut self) -> Self {
        if self.closed {
            self.fail(GeometryError::SegmentAfterClose { op: "close" });
        } else if self.segments.is_empty() {
            self.fail(GeometryError::CloseOnEmpty);
        } else {
            self.segments.push(Segment::Close);
            self.closed = true;
        }
        self
    }

    /// Consume the builder into an immutable [`Path`].
    pub fn build(self) -> Result<Path, GeometryError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(Path {
                segments: self.segments,
            }),
        }
    }
}

/// A drawable piece of a path with its start point made explicit.
enum Piece {
    Line { from: Point, to: Point },
    Curve(CubicBezier),
}

impl Piece {
    fn length(&self) -> f64 {
        match self {
            Piece::Line { from, to } => from.dist(to),
            Piece::Curve(c) => c.length(),
        }
    }
}

impl Path {
    /// An empty path: valid, draws nothing, measures zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The point established by the opening move.
    pub fn start(&self) -> Option<Point> {
        match self.segments.first() {
            Some(Segment::Move { to }) => Some(*to),
            _ => None,
        }
    }

    /// The endpoint of the final segment; for a closed path this is the
    /// starting point again.
    pub fn end(&self) -> Option<Point> {
        match self.segments.last()? {
            Segment::Move { to } | Segment::Line { to } | Segment::Curve { to, .. } => Some(*to),
            Segment::Close => self.start(),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Close))
    }

    /// Drawable pieces with explicit start points; `Close` becomes the
    /// closing line.
    fn pieces(&self) -> Vec<Piece> {
        let mut out = Vec::new();
        let mut current = None;
        for segment in &self.segments {
            match segment {
                Segment::Move { to } => current = Some(*to),
                Segment::Line { to } => {
                    if let Some(from) = current {
                        out.push(Piece::Line { from, to: *to });
                    }
                    current = Some(*to);
                }
                Segment::Curve { cp1, cp2, to } => {
                    if let Some(from) = current {
                        out.push(Piece::Curve(CubicBezier::new(from, *cp1, *cp2, *to)));
                    }
                    current = Some(*to);
                }
                Segment::Close => {
                    if let (Some(from), Some(to)) = (current, self.start()) {
                        out.push(Piece::Line { from, to });
                        current = Some(to);
                    }
                }
            }
        }
        out
    }

    /// Total arc length. Straight segments are exact; cubics are measured
    /// by adaptive subdivision well past cutting accuracy.
    pub fn len(&self) -> f64 {
        self.pieces().iter().map(Piece::length).sum()
    }

    /// The smallest axis-aligned box containing the path, `None` when
    /// nothing has been drawn. Curve extrema are solved exactly.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        fn include(bbox: &mut Option<BoundingBox>, p: Point) {
            match bbox {
                Some(b) => b.include(p),
                None => *bbox = Some(BoundingBox::around(p)),
            }
        }
        let mut bbox: Option<BoundingBox> = None;
        for piece in self.pieces() {
            match piece {
                Piece::Line { from, to } => {
                    include(&mut bbox, from);
                    include(&mut bbox, to);
                }
                Piece::Curve(c) => {
                    include(&mut bbox, c.start);
                    include(&mut bbox, c.end);
                    for t in c.extrema() {
                        include(&mut bbox, c.point_at(t));
                    }
                }
            }
        }
        if bbox.is_none() {
            // a move-only path still has a location
            if let Some(p) = self.start() {
                include(&mut bbox, p);
            }
        }
        bbox
    }

    /// The same geometry traced in the opposite direction, control points
    /// recomputed. A closing segment becomes an explicit line, so the
    /// result is an open path over identical geometry.
    pub fn reverse(&self) -> Path {
        let pieces = self.pieces();
        let mut segments = Vec::with_capacity(self.segments.len());
        match pieces.last() {
            Some(Piece::Line { to, .. }) => segments.push(Segment::Move { to: *to }),
            Some(Piece::Curve(c)) => segments.push(Segment::Move { to: c.end }),
            None => {
                if let Some(p) = self.start() {
                    segments.push(Segment::Move { to: p });
                }
            }
        }
        for piece in pieces.iter().rev() {
            match piece {
                Piece::Line { from, .. } => segments.push(Segment::Line { to: *from }),
                Piece::Curve(c) => {
                    let r = c.reversed();
                    segments.push(Segment::Curve {
                        cp1: r.cp1,
                        cp2: r.cp2,
                        to: r.end,
                    });
                }
            }
        }
        Path { segments }
    }

    /// Concatenate `other` onto this path. The first path's end must
    /// coincide with the second's start; anything else is a caller error.
    pub fn join(&self, other: &Path) -> Result<Path, GeometryError> {
        if self.is_closed() {
            return Err(GeometryError::JoinClosed);
        }
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        let end = self.end().ok_or(GeometryError::EmptyPath { op: "join" })?;
        let start = other.start().ok_or(GeometryError::EmptyPath { op: "join" })?;
        let gap = end.dist(&start);
        if gap > CONTACT_TOLERANCE {
            return Err(GeometryError::DiscontiguousJoin { gap });
        }
        let mut segments = self.segments.clone();
        // other's geometry is kept verbatim apart from its move; a closing
        // segment in other is re-anchored to the joined start, so expand it
        for piece in other.pieces() {
            match piece {
                Piece::Line { to, .. } => segments.push(Segment::Line { to }),
                Piece::Curve(c) => segments.push(Segment::Curve {
                    cp1: c.cp1,
                    cp2: c.cp2,
                    to: c.end,
                }),
            }
        }
        Ok(Path { segments })
    }

    /// A parallel path at constant normal `distance` (the seam-allowance
    /// operation). Positive distances fall to the right of the direction
    /// of travel, which is outward for a counter-clockwise outline in
    /// paper coordinates.
    ///
    /// Corners are bridged with straight segments. Concave curvature
    /// tighter than the distance self-intersects; the result is still
    /// produced and cleanup is deferred to rendering.
    pub fn offset(&self, distance: f64) -> Path {
        if distance == 0.0 || self.is_empty() {
            return self.clone();
        }
        let mut segments: Vec<Segment> = Vec::new();
        let mut cursor: Option<Point> = None;
        let mut extend = |from: Point, body: &[Segment], to: Point| {
            match cursor {
                None => segments.push(Segment::Move { to: from }),
                Some(prev) => {
                    if !prev.sits_on(&from, CONTACT_TOLERANCE) {
                        segments.push(Segment::Line { to: from });
                    }
                }
            }
            segments.extend_from_slice(body);
            cursor = Some(to);
        };
        for piece in self.pieces() {
            match piece {
                Piece::Line { from, to } => {
                    if from.sits_on(&to, 1e-9) {
                        continue;
                    }
                    let normal = from.angle(&to) - 90.0;
                    let a = from.shift(normal, distance);
                    let b = to.shift(normal, distance);
                    extend(a, &[Segment::Line { to: b }], b);
                }
                Piece::Curve(c) => {
                    for shifted in c.offset(distance) {
                        extend(
                            shifted.start,
                            &[Segment::Curve {
                                cp1: shifted.cp1,
                                cp2: shifted.cp2,
                                to: shifted.end,
                            }],
                            shifted.end,
                        );
                    }
                }
            }
        }
        if self.is_closed() {
            if let Some(Segment::Move { to: start }) = segments.first().copied() {
                if let Some(prev) = cursor {
                    if !prev.sits_on(&start, CONTACT_TOLERANCE) {
                        segments.push(Segment::Line { to: start });
                    }
                }
                segments.push(Segment::Close);
            }
        }
        tracing::trace!(
            distance,
            segments = segments.len(),
            "offset path built"
        );
        Path { segments }
    }

    /// The point at arc length `distance` from the start, clamped to the
    /// path's endpoints. `None` when nothing has been drawn.
    pub fn shift_along(&self, distance: f64) -> Option<Point> {
        let pieces = self.pieces();
        if pieces.is_empty() {
            return self.start();
        }
        if distance <= 0.0 {
            return self.start();
        }
        let mut remaining = distance;
        for piece in &pieces {
            let len = piece.length();
            if remaining <= len && len > f64::EPSILON {
                // arc length within a piece is close enough to uniform in t
                // after the sampling below
                return Some(sample_at_length(piece, remaining, len));
            }
            remaining -= len;
        }
        self.end()
    }

    /// The point at `fraction` of the total length (0 = start, 1 = end).
    pub fn shift_fraction_along(&self, fraction: f64) -> Option<Point> {
        self.shift_along(self.len() * fraction)
    }
}

/// Walk a piece to the point at the given arc length, refining on curve
/// pieces by uniform sampling. 50 samples keeps the positional error of a
/// garment-scale curve under the kernel's length tolerance.
fn sample_at_length(piece: &Piece, target: f64, total: f64) -> Point {
    match piece {
        Piece::Line { from, to } => from.shift_fraction_towards(to, target / total),
        Piece::Curve(c) => {
            const STEPS: usize = 50;
            let mut walked = 0.0;
            let mut prev = c.start;
            for i in 1..=STEPS {
                let next = c.point_at(i as f64 / STEPS as f64);
                let step = prev.dist(&next);
                if walked + step >= target && step > f64::EPSILON {
                    return prev.shift_towards(&next, target - walked);
                }
                walked += step;
                prev = next;
            }
            c.end
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Path {
        Path::builder()
            .move_to(Point::new(0.0, 0.0))
            .line(Point::new(100.0, 0.0))
            .line(Point::new(100.0, 100.0))
            .line(Point::new(0.0, 100.0))
            .close()
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_path_is_valid() {
        let p = Path::new();
        assert!(p.is_empty());
        assert_eq!(p.len(), 0.0);
        assert_eq!(p.bounding_box(), None);
        assert_eq!(p.start(), None);
    }

    #[test]
    fn test_builder_rejects_line_before_move() {
        let err = Path::builder().line(Point::new(1.0, 1.0)).build().unwrap_err();
        assert_eq!(err, GeometryError::MissingMove { op: "line" });
    }

    #[test]
    fn test_builder_rejects_close_on_empty() {
        let err = Path::builder().close().build().unwrap_err();
        assert_eq!(err, GeometryError::CloseOnEmpty);
    }

    #[test]
    fn test_builder_rejects_segment_after_close() {
        let err = square_builder_then_line().unwrap_err();
        assert_eq!(err, GeometryError::SegmentAfterClose { op: "line" });
    }

    fn square_builder_then_line() -> Result<Path, GeometryError> {
        Path::builder()
            .move_to(Point::new(0.0, 0.0))
            .line(Point::new(10.0, 0.0))
            .close()
            .line(Point::new(20.0, 0.0))
            .build()
    }

    #[test]
    fn test_builder_rejects_duplicate_move() {
        let err = Path::builder()
            .move_to(Point::new(0.0, 0.0))
            .move_to(Point::new(1.0, 0.0))
            .build()
            .unwrap_err();
        assert_eq!(err, GeometryError::DuplicateMove);
    }

    #[test]
    fn test_square_length_and_closure() {
        let p = square();
        assert!(p.is_closed());
        assert!((p.len() - 400.0).abs() < 1e-9);
        assert_eq!(p.end(), p.start());
    }

    #[test]
    fn test_bounding_box_includes_curve_extrema() {
        // a bump curving above its endpoints
        let p = Path::builder()
            .move_to(Point::new(0.0, 0.0))
            .curve(
                Point::new(25.0, -40.0),
                Point::new(75.0, -40.0),
                Point::new(100.0, 0.0),
            )
            .build()
            .unwrap();
        let bbox = p.bounding_box().unwrap();
        assert!(bbox.top_left.y < -25.0);
        assert!((bbox.width() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_reverse_preserves_length_and_geometry() {
        let p = Path::builder()
            .move_to(Point::new(0.0, 0.0))
            .line(Point::new(50.0, 0.0))
            .curve(
                Point::new(75.0, 10.0),
                Point::new(90.0, 40.0),
                Point::new(90.0, 80.0),
            )
            .build()
            .unwrap();
        let r = p.reverse();
        assert!((p.len() - r.len()).abs() < 1e-6);
        assert_eq!(r.start(), p.end());
        assert_eq!(r.end(), p.start());
        let double = r.reverse();
        for i in 0..=10 {
            let f = i as f64 / 10.0;
            let a = p.shift_fraction_along(f).unwrap();
            let b = double.shift_fraction_along(f).unwrap();
            assert!(a.sits_on(&b, 0.05), "diverged at fraction {}", f);
        }
    }

    #[test]
    fn test_join_contiguous() {
        let a = Path::builder()
            .move_to(Point::new(0.0, 0.0))
            .line(Point::new(10.0, 0.0))
            .build()
            .unwrap();
        let b = Path::builder()
            .move_to(Point::new(10.0, 0.0))
            .line(Point::new(10.0, 10.0))
            .build()
            .unwrap();
        let joined = a.join(&b).unwrap();
        assert!((joined.len() - 20.0).abs() < 1e-9);
        assert_eq!(joined.end(), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_join_rejects_gap() {
        let a = Path::builder()
            .move_to(Point::new(0.0, 0.0))
            .line(Point::new(10.0, 0.0))
            .build()
            .unwrap();
        let b = Path::builder()
            .move_to(Point::new(12.0, 0.0))
            .line(Point::new(20.0, 0.0))
            .build()
            .unwrap();
        match a.join(&b) {
            Err(GeometryError::DiscontiguousJoin { gap }) => {
                assert!((gap - 2.0).abs() < 1e-9)
            }
            other => panic!("expected DiscontiguousJoin, got {:?}", other),
        }
    }

    #[test]
    fn test_offset_zero_is_identity() {
        let p = square();
        assert_eq!(p.offset(0.0), p);
    }

    #[test]
    fn test_offset_square_stays_closed_and_reaches_outward() {
        // square() travels east first with the interior on its right, so
        // a negative distance offsets outward
        let p = square();
        let outer = p.offset(-10.0);
        assert!(outer.is_closed());
        let b = outer.bounding_box().unwrap();
        assert!((b.width() - 120.0).abs() < 0.5);
        assert!((b.height() - 120.0).abs() < 0.5);
        // corners are bridged, not mitered, so the outline sits between
        // the original perimeter and the full mitered perimeter
        assert!(outer.len() > p.len());
        assert!(outer.len() < 480.0);
    }

    fn ring(radius: f64) -> Path {
        // four-arc cubic approximation, traveling east point first with
        // the interior on the right
        const K: f64 = 0.5522847498;
        let k = radius * K;
        Path::builder()
            .move_to(Point::new(radius, 0.0))
            .curve(
                Point::new(radius, k),
                Point::new(k, radius),
                Point::new(0.0, radius),
            )
            .curve(
                Point::new(-k, radius),
                Point::new(-radius, k),
                Point::new(-radius, 0.0),
            )
            .curve(
                Point::new(-radius, -k),
                Point::new(-k, -radius),
                Point::new(0.0, -radius),
            )
            .curve(
                Point::new(k, -radius),
                Point::new(radius, -k),
                Point::new(radius, 0.0),
            )
            .close()
            .build()
            .unwrap()
    }

    #[test]
    fn test_offset_ring_length_tracks_radius() {
        use std::f64::consts::TAU;
        let p = ring(100.0);
        assert!((p.len() - TAU * 100.0).abs() < 0.2);
        let inner = p.offset(10.0);
        let outer = p.offset(-10.0);
        assert!(inner.is_closed() && outer.is_closed());
        assert!((inner.len() - TAU * 90.0).abs() / (TAU * 90.0) < 0.01);
        assert!((outer.len() - TAU * 110.0).abs() / (TAU * 110.0) < 0.01);
        // monotone in distance
        assert!(inner.len() < p.len() && p.len() < outer.len());
    }

    #[test]
    fn test_shift_along_walks_the_path() {
        let p = square();
        let quarter = p.shift_along(100.0).unwrap();
        assert!(quarter.sits_on(&Point::new(100.0, 0.0), 1e-6));
        let past_end = p.shift_along(1e6).unwrap();
        assert!(past_end.sits_on(&p.start().unwrap(), 1e-6));
        assert_eq!(p.shift_along(-5.0), p.start());
    }
}
