use super::{LineSegment2d, Point2d};

/// An open chain of line segments, which describes the geometry of a link.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline2d {
    points: Vec<Point2d>,
}

impl Polyline2d {
    /// Creates a polyline through the given vertices.
    /// Returns `None` if fewer than two vertices are given.
    pub fn new(points: Vec<Point2d>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self { points })
    }

    /// Creates a polyline consisting of a single straight segment.
    pub fn from_ends(start: Point2d, end: Point2d) -> Self {
        Self {
            points: vec![start, end],
        }
    }

    /// The first vertex.
    pub fn start(&self) -> Point2d {
        self.points[0]
    }

    /// The last vertex.
    pub fn end(&self) -> Point2d {
        self.points[self.points.len() - 1]
    }

    /// Iterates over the segments of the polyline, in order.
    pub fn segments(&self) -> impl Iterator<Item = LineSegment2d> + '_ {
        self.points
            .windows(2)
            .map(|pair| LineSegment2d::from_ends(pair[0], pair[1]))
    }

    /// The total length of the polyline.
    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// The shortest distance between any part of the polyline and the given point.
    pub fn distance_to_point(&self, point: Point2d) -> f64 {
        self.segments()
            .map(|s| s.distance_to_point(point))
            .fold(f64::INFINITY, f64::min)
    }
}
