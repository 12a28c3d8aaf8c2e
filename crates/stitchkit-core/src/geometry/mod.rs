//! The 2D geometry kernel: points, Bezier paths, and intersections.

mod bezier;
mod intersect;
mod point;
mod path;

pub use intersect::{beam_intersects_x, beam_intersects_y, beams_intersect};
pub use path::{BoundingBox, Path, PathBuilder, Segment};
pub use point::Point;
