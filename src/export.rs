use crate::network::Network;
use crate::orientation::FlowOrientation;
use crate::{DetectorSet, LinkId};
#[cfg(feature = "serde")]
use serde::Serialize;

/// One row of the link-to-detector lookup table.
///
/// `from` and `to` give the direction of the counted traffic, so a detector
/// in a link's counter slot is reported with the link's ends swapped.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AssignmentRow {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub link_id: LinkId,
    /// The street name of the link.
    pub link_name: String,
    /// The source ID of the node the counted traffic leaves.
    pub from: String,
    /// The source ID of the node the counted traffic heads towards.
    pub to: String,
    pub orientation: FlowOrientation,
    /// The source ID of the detector.
    pub detector: String,
    pub distance: f64,
    pub degree: usize,
}

/// Builds the lookup table from the occupied slots of the network,
/// in link order with the along slot before the counter slot.
pub fn export(network: &Network, detectors: &DetectorSet) -> Vec<AssignmentRow> {
    network
        .assignments()
        .filter_map(|(link, orientation, assignment)| {
            let detector = detectors.get(assignment.detector)?;
            let tail = network.get_node(link.tail())?.source_id();
            let head = network.get_node(link.head())?.source_id();
            let (from, to) = match orientation {
                FlowOrientation::Along => (tail, head),
                FlowOrientation::Counter => (head, tail),
            };
            Some(AssignmentRow {
                link_id: link.id(),
                link_name: link.name().to_owned(),
                from: from.to_owned(),
                to: to.to_owned(),
                orientation,
                detector: detector.source_id().to_owned(),
                distance: assignment.distance,
                degree: assignment.degree,
            })
        })
        .collect()
}
