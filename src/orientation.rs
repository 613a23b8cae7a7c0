use crate::math::Point2d;
use cgmath::MetricSpace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// The direction of traffic a detector counts, relative to the stored
/// tail-to-head direction of a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum FlowOrientation {
    /// Traffic flows from the tail node towards the head node.
    Along,
    /// Traffic flows from the head node towards the tail node.
    Counter,
}

impl FlowOrientation {
    /// Both orientations, in slot order.
    pub const ALL: [FlowOrientation; 2] = [FlowOrientation::Along, FlowOrientation::Counter];

    /// The index of the link slot holding assignments of this orientation.
    pub(crate) const fn index(self) -> usize {
        match self {
            FlowOrientation::Along => 0,
            FlowOrientation::Counter => 1,
        }
    }

    /// The opposite orientation.
    pub const fn opposite(self) -> Self {
        match self {
            FlowOrientation::Along => FlowOrientation::Counter,
            FlowOrientation::Counter => FlowOrientation::Along,
        }
    }
}

impl fmt::Display for FlowOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowOrientation::Along => f.write_str("ALONG"),
            FlowOrientation::Counter => f.write_str("COUNTER"),
        }
    }
}

/// Determines which way along a link a detector counts traffic.
///
/// The direction reference point lies somewhere "downstream" of the detector,
/// so the end of the link nearest to it is the end traffic flows towards.
///
/// # Parameters
/// * `tail` - The position of the link's tail node
/// * `head` - The position of the link's head node
/// * `reference` - The detector's direction reference point
///
/// # Returns
/// `None` if both nodes are exactly as far from the reference point.
pub fn resolve_orientation(
    tail: Point2d,
    head: Point2d,
    reference: Point2d,
) -> Option<FlowOrientation> {
    let to_tail = tail.distance(reference);
    let to_head = head.distance(reference);
    if to_tail < to_head {
        Some(FlowOrientation::Counter)
    } else if to_head < to_tail {
        Some(FlowOrientation::Along)
    } else {
        None
    }
}
