//! Planar geometry used to measure detectors against links.
//!
//! All coordinates are assumed to be in a projected, metric reference system.

use cgmath::{Point2, Vector2};
pub use polyline::Polyline2d;
pub use segment::LineSegment2d;
pub use util::*;

mod polyline;
mod segment;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;
