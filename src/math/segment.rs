use super::{distance_to_segment, Point2d};
use cgmath::prelude::*;

/// A straight line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment2d {
    pub start: Point2d,
    pub end: Point2d,
}

impl LineSegment2d {
    /// Creates a line segment from its two end points.
    pub const fn from_ends(start: Point2d, end: Point2d) -> Self {
        Self { start, end }
    }

    /// The length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// The shortest distance between the segment and the given point.
    pub fn distance_to_point(&self, point: Point2d) -> f64 {
        distance_to_segment(point, self.start, self.end)
    }
}
