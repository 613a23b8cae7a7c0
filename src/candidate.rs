use crate::detector::Detector;
use crate::network::Network;
use crate::{DetectorId, DetectorSet, LinkId};
use itertools::Itertools;
use smallvec::SmallVec;

/// A link which a detector could be assigned to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// The candidate link.
    pub link_id: LinkId,
    /// The distance from the detector to the link.
    pub distance: f64,
}

/// A detector's candidate links, nearest first.
pub type Candidates = SmallVec<[Candidate; 8]>;

/// Finds the links whose street name matches the detector's axis,
/// sorted by ascending distance from the detector.
///
/// Links which are exactly as far from the detector are ordered by ID,
/// so the ordering only depends on the network, never on hashing or
/// incidental iteration order. The slot contents of the network are
/// not considered.
pub fn find_candidates(detector: &Detector, network: &Network) -> Candidates {
    network
        .links_named(detector.axis())
        .iter()
        .filter_map(|id| network.get_link(*id))
        .map(|link| Candidate {
            link_id: link.id(),
            distance: link.distance_to(detector.position()),
        })
        .sorted_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.link_id.cmp(&b.link_id))
        })
        .collect()
}

/// Finds the single nearest same-named link of every detector.
///
/// This ignores direction and collisions, and is used to narrow a large
/// network down to the links that are plausibly of interest.
pub fn nearest_links(
    network: &Network,
    detectors: &DetectorSet,
) -> Vec<(DetectorId, Option<LinkId>)> {
    detectors
        .values()
        .map(|detector| {
            let nearest = find_candidates(detector, network)
                .first()
                .map(|c| c.link_id);
            (detector.id(), nearest)
        })
        .collect()
}
