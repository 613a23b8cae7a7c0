use super::{Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;

/// Projects a point onto a line.
///
/// # Parameters
/// * `point` - The point to project
/// * `origin` - A point on the line
/// * `dir` - The direction of the line, which must be non-zero
///
/// # Returns
/// The value `t` such that `origin + t * dir` is the point on the line closest to `point`.
pub fn project_onto_line(point: Point2d, origin: Point2d, dir: Vector2d) -> f64 {
    (point - origin).dot(dir) / dir.magnitude2()
}

/// Computes the shortest distance between a point and the line segment `start`-`end`.
pub fn distance_to_segment(point: Point2d, start: Point2d, end: Point2d) -> f64 {
    let dir = end - start;
    if dir.magnitude2() == 0.0 {
        return point.distance(start);
    }
    let t = Interval::new(0.0, 1.0).clamp(project_onto_line(point, start, dir));
    point.distance(start + dir * t)
}
