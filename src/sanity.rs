//! Post-hoc checks of the invariants a finished matching run must satisfy.
//!
//! None of these checks mutate the network, and none attempt to repair it.

use crate::candidate::find_candidates;
use crate::network::Network;
use crate::orientation::FlowOrientation;
use crate::DetectorSet;
use std::collections::HashSet;

/// The tolerance used when comparing a stored distance against a recomputed one.
const DISTANCE_TOLERANCE: f64 = 1e-9;

/// The results of every sanity check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SanityReport {
    /// No one-way link has a detector in its counter slot.
    pub oneway_integrity: bool,
    /// Every occupied slot holds a well-formed assignment.
    pub slot_typing: bool,
    /// No detector is assigned to more than one slot.
    pub unique_detectors: bool,
    /// Every stored distance matches the actual distance from detector to link.
    pub distances: bool,
}

impl SanityReport {
    /// Runs every check against the network.
    pub fn run(network: &Network, detectors: &DetectorSet) -> Self {
        Self {
            oneway_integrity: check_oneway_integrity(network),
            slot_typing: check_slot_typing(network, detectors),
            unique_detectors: check_unique_detectors(network),
            distances: check_distances(network, detectors),
        }
    }

    /// Whether every check passed.
    pub fn passed(&self) -> bool {
        self.oneway_integrity && self.slot_typing && self.unique_detectors && self.distances
    }
}

/// Checks one-way integrity and slot typing, the two checks every run must pass.
pub fn check(network: &Network, detectors: &DetectorSet) -> bool {
    check_oneway_integrity(network) && check_slot_typing(network, detectors)
}

/// Checks that the counter slot of every one-way link is empty.
pub fn check_oneway_integrity(network: &Network) -> bool {
    network
        .iter_links()
        .filter(|link| link.is_oneway())
        .all(|link| link.slot(FlowOrientation::Counter).is_none())
}

/// Checks that every occupied slot holds a well-formed assignment:
/// a known detector, a finite non-negative distance, and a degree which is
/// the rank of this very link among the detector's candidates.
pub fn check_slot_typing(network: &Network, detectors: &DetectorSet) -> bool {
    network.assignments().all(|(link, _, assignment)| {
        let Some(detector) = detectors.get(assignment.detector) else {
            return false;
        };
        assignment.distance.is_finite()
            && assignment.distance >= 0.0
            && find_candidates(detector, network)
                .get(assignment.degree)
                .is_some_and(|c| c.link_id == link.id())
    })
}

/// Checks that no detector occupies more than one slot.
pub fn check_unique_detectors(network: &Network) -> bool {
    let mut seen = HashSet::new();
    network
        .assignments()
        .all(|(_, _, assignment)| seen.insert(assignment.detector))
}

/// Checks that each stored distance equals the distance between the detector and its link.
pub fn check_distances(network: &Network, detectors: &DetectorSet) -> bool {
    network.assignments().all(|(link, _, assignment)| {
        detectors.get(assignment.detector).is_some_and(|detector| {
            let actual = link.distance_to(detector.position());
            (actual - assignment.distance).abs() <= DISTANCE_TOLERANCE
        })
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assign::Assignment;
    use crate::detector::{Detector, DetectorAttributes};
    use crate::link::LinkAttributes;
    use crate::math::Point2d;
    use crate::network::NodeAttributes;
    use crate::{DetectorId, LinkId};
    use slotmap::SlotMap;

    fn one_link(oneway: bool) -> (Network, LinkId, DetectorSet, DetectorId) {
        let mut network = Network::new();
        let tail = network.add_node(&NodeAttributes {
            source_id: "1",
            position: Point2d::new(0.0, 0.0),
        });
        let head = network.add_node(&NodeAttributes {
            source_id: "2",
            position: Point2d::new(100.0, 0.0),
        });
        let link = network
            .add_link(&LinkAttributes {
                name: "Main",
                oneway,
                tail,
                head,
                geometry: None,
            })
            .unwrap();
        let mut detectors: DetectorSet = SlotMap::with_key();
        let detector = detectors.insert_with_key(|id| {
            Detector::new(
                id,
                &DetectorAttributes {
                    source_id: "7",
                    position: Point2d::new(40.0, 3.0),
                    axis: "Main",
                    direction: Some(Point2d::new(-50.0, 0.0)),
                },
            )
        });
        (network, link, detectors, detector)
    }

    fn claim(detector: DetectorId, distance: f64) -> Assignment {
        Assignment {
            detector,
            distance,
            degree: 0,
        }
    }

    #[test]
    fn empty_network_passes() {
        let (network, _, detectors, _) = one_link(true);
        let report = SanityReport::run(&network, &detectors);
        assert!(report.passed());
        assert!(check(&network, &detectors));
    }

    #[test]
    fn counter_slot_on_oneway_link_fails() {
        let (mut network, link, detectors, detector) = one_link(true);
        network
            .link_mut(link)
            .fill_slot(FlowOrientation::Counter, claim(detector, 3.0));

        let report = SanityReport::run(&network, &detectors);
        assert!(!report.oneway_integrity);
        assert!(report.slot_typing);
        assert!(!check(&network, &detectors));
    }

    #[test]
    fn duplicate_detector_fails() {
        let (mut network, link, detectors, detector) = one_link(false);
        for orientation in FlowOrientation::ALL {
            network
                .link_mut(link)
                .fill_slot(orientation, claim(detector, 3.0));
        }

        let report = SanityReport::run(&network, &detectors);
        assert!(report.oneway_integrity);
        assert!(!report.unique_detectors);
        assert!(!report.passed());
    }

    #[test]
    fn malformed_records_fail() {
        let (mut network, link, detectors, detector) = one_link(false);
        network
            .link_mut(link)
            .fill_slot(FlowOrientation::Counter, claim(detector, 4.5));

        let report = SanityReport::run(&network, &detectors);
        assert!(report.slot_typing);
        assert!(!report.distances);

        let mut wrong_degree = claim(detector, 3.0);
        wrong_degree.degree = 1;
        network.link_mut(link).take_slot(FlowOrientation::Counter);
        network
            .link_mut(link)
            .fill_slot(FlowOrientation::Counter, wrong_degree);
        assert!(!check_slot_typing(&network, &detectors));
    }

    #[test]
    fn checks_do_not_mutate() {
        let (mut network, link, detectors, detector) = one_link(false);
        network
            .link_mut(link)
            .fill_slot(FlowOrientation::Counter, claim(detector, 3.0));

        let first = SanityReport::run(&network, &detectors);
        let second = SanityReport::run(&network, &detectors);
        assert!(first.passed());
        assert_eq!(first, second);
        assert_eq!(
            network.slot(link, FlowOrientation::Counter),
            Some(&claim(detector, 3.0))
        );
    }
}
