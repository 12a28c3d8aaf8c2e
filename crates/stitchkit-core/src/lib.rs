//! # Stitchkit Core
//!
//! The geometry kernel for the Stitchkit pattern drafting engine. Pattern
//! parts express their construction in terms of these primitives:
//!
//! - **[`geometry::Point`]** - immutable 2D coordinates with the polar and
//!   affine transforms drafting formulas are written in
//! - **[`geometry::Path`]** - ordered drawing operations (move, line, cubic
//!   curve, close) with derived queries: arc length, bounding box,
//!   reversal, joining, parallel offsets for seam allowances
//! - **beam intersections** - infinite-line helpers for pinning points to
//!   construction axes
//! - **[`units`]** - millimeter-based length formatting for annotations
//!
//! All lengths are millimeters. The coordinate and angle conventions are
//! documented on [`geometry::Point`] and apply uniformly: y grows downward
//! on the paper, 0 degrees points along +x, positive angles turn
//! counter-clockwise on paper.
//!
//! Everything here is a pure, synchronous computation. Structural misuse of
//! a path surfaces as [`GeometryError`]; numeric degeneracies never abort a
//! draft (see [`error`]).

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{GeometryError, Result};
pub use geometry::{
    beam_intersects_x, beam_intersects_y, beams_intersect, BoundingBox, Path, PathBuilder, Point,
    Segment,
};
pub use units::{format_length, MeasurementSystem};
