use crate::math::Point2d;
use crate::DetectorId;

/// A traffic counter located at a point beside a street.
#[derive(Clone, Debug)]
pub struct Detector {
    /// The detector's ID.
    id: DetectorId,
    /// The identifier of the detector in the source data set.
    source_id: String,
    /// The physical location of the detector.
    position: Point2d,
    /// The name of the street the detector is on.
    axis: String,
    /// A point towards which the counted traffic is travelling.
    direction: Option<Point2d>,
}

/// The attributes of a detector.
pub struct DetectorAttributes<'a> {
    /// The identifier of the detector in the source data set.
    pub source_id: &'a str,
    /// The physical location of the detector.
    pub position: Point2d,
    /// The name of the street the detector is on.
    pub axis: &'a str,
    /// A point towards which the counted traffic is travelling,
    /// or `None` if it could not be determined.
    pub direction: Option<Point2d>,
}

impl Detector {
    pub(crate) fn new(id: DetectorId, attribs: &DetectorAttributes) -> Self {
        Self {
            id,
            source_id: attribs.source_id.to_owned(),
            position: attribs.position,
            axis: attribs.axis.to_owned(),
            direction: attribs.direction,
        }
    }

    /// Gets the detector's ID.
    pub fn id(&self) -> DetectorId {
        self.id
    }

    /// Gets the identifier of the detector in the source data set.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Gets the physical location of the detector.
    pub fn position(&self) -> Point2d {
        self.position
    }

    /// Gets the name of the street the detector is on.
    pub fn axis(&self) -> &str {
        &self.axis
    }

    /// Gets the direction reference point, if there is one.
    pub fn direction(&self) -> Option<Point2d> {
        self.direction
    }
}
