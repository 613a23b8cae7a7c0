//! The assignment engine, which matches detectors to link slots and
//! resolves collisions between detectors competing for the same slot.

use crate::candidate::find_candidates;
use crate::config::MatchConfig;
use crate::detector::Detector;
use crate::error::{MatchError, Result};
use crate::network::Network;
use crate::orientation::{resolve_orientation, FlowOrientation};
use crate::report::{MatchReport, UnassignableReason, Unassigned};
use crate::{DetectorId, DetectorSet, LinkId};
use log::{debug, error, info, warn};
use slotmap::SecondaryMap;

/// A detector's claim on one slot of a link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assignment {
    /// The assigned detector.
    pub detector: DetectorId,
    /// The distance from the detector to the link.
    pub distance: f64,
    /// The rank of the link among the detector's candidates, nearest first.
    pub degree: usize,
}

/// The result of assigning a single detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// The detector now occupies a slot.
    Assigned {
        link_id: LinkId,
        orientation: FlowOrientation,
        degree: usize,
    },
    /// The detector could not be placed anywhere.
    Unassignable(UnassignableReason),
}

/// The location of each assigned detector.
pub(crate) type Locations = SecondaryMap<DetectorId, (LinkId, FlowOrientation)>;

/// Assigns detectors to the slots of a network.
///
/// This is the only code which writes to link slots. When a detector claims a
/// slot that is already held by a detector further from the link, the incumbent
/// is evicted and reassigned recursively, starting from its next candidate.
pub(crate) struct Assigner<'a> {
    network: &'a mut Network,
    detectors: &'a DetectorSet,
    config: &'a MatchConfig,
    locations: &'a mut Locations,
    report: &'a mut MatchReport,
}

impl<'a> Assigner<'a> {
    pub fn new(
        network: &'a mut Network,
        detectors: &'a DetectorSet,
        config: &'a MatchConfig,
        locations: &'a mut Locations,
        report: &'a mut MatchReport,
    ) -> Self {
        Self {
            network,
            detectors,
            config,
            locations,
            report,
        }
    }

    /// Assigns a detector, starting from its nearest candidate link.
    ///
    /// A detector which already holds a slot is left where it is.
    pub fn assign(&mut self, detector_id: DetectorId) -> Result<Outcome> {
        self.report.processed += 1;
        if let Some(&(link_id, orientation)) = self.locations.get(detector_id) {
            if let Some(assignment) = self.network.slot(link_id, orientation) {
                return Ok(Outcome::Assigned {
                    link_id,
                    orientation,
                    degree: assignment.degree,
                });
            }
        }
        self.assign_from(detector_id, 0, 0)
    }

    /// Assigns a detector to the first suitable candidate at or after `degree`.
    ///
    /// # Parameters
    /// * `detector_id` - The detector to assign
    /// * `degree` - The rank of the first candidate to try
    /// * `depth` - The number of evictions this call is nested within
    fn assign_from(
        &mut self,
        detector_id: DetectorId,
        mut degree: usize,
        depth: usize,
    ) -> Result<Outcome> {
        let detectors = self.detectors;
        let detector = detectors
            .get(detector_id)
            .ok_or(MatchError::UnknownDetector(detector_id))?;
        let Some(reference) = detector.direction() else {
            return Ok(self.give_up(detector, UnassignableReason::MissingDirection));
        };

        let candidates = find_candidates(detector, self.network);
        if candidates.is_empty() {
            return Ok(self.give_up(detector, UnassignableReason::NoCandidates));
        }

        while let Some(candidate) = candidates.get(degree) {
            let link_id = candidate.link_id;
            let link = self.network.link(link_id);
            let (tail, head) = self.network.endpoints(link);

            let Some(orientation) = resolve_orientation(tail, head, reference) else {
                error!(
                    "Detector {} is equidistant from both ends of link {:?} ({})",
                    detector.source_id(),
                    link_id,
                    link.name()
                );
                return Err(MatchError::AmbiguousOrientation {
                    detector: detector_id,
                    link: link_id,
                });
            };

            if !link.permits(orientation) {
                debug!(
                    "Detector {} rejects one-way link {:?} at degree {}",
                    detector.source_id(),
                    link_id,
                    degree
                );
                degree += 1;
                continue;
            }

            let claim = Assignment {
                detector: detector_id,
                distance: candidate.distance,
                degree,
            };

            match link.slot(orientation).copied() {
                None => {
                    self.occupy(link_id, orientation, claim);
                    debug!(
                        "Detector {} assigned to link {:?} ({}) at degree {}",
                        detector.source_id(),
                        link_id,
                        orientation,
                        degree
                    );
                    return Ok(Outcome::Assigned {
                        link_id,
                        orientation,
                        degree,
                    });
                }
                Some(incumbent) if claim.distance < incumbent.distance => {
                    self.evict(link_id, orientation);
                    self.occupy(link_id, orientation, claim);
                    self.report.evictions += 1;
                    info!(
                        "Detector {} displaced {} from link {:?} ({})",
                        detector.source_id(),
                        detectors[incumbent.detector].source_id(),
                        link_id,
                        orientation
                    );
                    self.reassign(incumbent, depth)?;
                    return Ok(Outcome::Assigned {
                        link_id,
                        orientation,
                        degree,
                    });
                }
                Some(_) => {
                    debug!(
                        "Detector {} loses link {:?} ({}) to a nearer detector",
                        detector.source_id(),
                        link_id,
                        orientation
                    );
                    degree += 1;
                }
            }
        }

        Ok(self.give_up(detector, UnassignableReason::Exhausted))
    }

    /// Finds a new slot for an evicted detector, past the link it was evicted from.
    fn reassign(&mut self, evicted: Assignment, depth: usize) -> Result<()> {
        if depth >= self.config.max_depth {
            let detectors = self.detectors;
            self.give_up(&detectors[evicted.detector], UnassignableReason::EvictionDepthExceeded);
            return Ok(());
        }
        self.assign_from(evicted.detector, evicted.degree + 1, depth + 1)?;
        Ok(())
    }

    fn occupy(&mut self, link_id: LinkId, orientation: FlowOrientation, claim: Assignment) {
        self.network.link_mut(link_id).fill_slot(orientation, claim);
        self.locations.insert(claim.detector, (link_id, orientation));
        self.report.unassigned.retain(|u| u.detector != claim.detector);
    }

    fn evict(&mut self, link_id: LinkId, orientation: FlowOrientation) {
        if let Some(evicted) = self.network.link_mut(link_id).take_slot(orientation) {
            self.locations.remove(evicted.detector);
        }
    }

    fn give_up(&mut self, detector: &Detector, reason: UnassignableReason) -> Outcome {
        warn!(
            "Detector {} on {:?} could not be assigned: {}",
            detector.source_id(),
            detector.axis(),
            reason
        );
        self.report.unassigned.retain(|u| u.detector != detector.id());
        self.report.unassigned.push(Unassigned {
            detector: detector.id(),
            reason,
        });
        Outcome::Unassignable(reason)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::detector::DetectorAttributes;
    use crate::link::LinkAttributes;
    use crate::math::Point2d;
    use crate::network::NodeAttributes;
    use slotmap::SlotMap;

    struct Fixture {
        network: Network,
        detectors: DetectorSet,
        config: MatchConfig,
        locations: Locations,
        report: MatchReport,
    }

    impl Fixture {
        fn new(network: Network) -> Self {
            Self {
                network,
                detectors: SlotMap::with_key(),
                config: MatchConfig::default(),
                locations: Locations::new(),
                report: MatchReport::default(),
            }
        }

        fn detector(&mut self, source_id: &str, x: f64, y: f64, direction: Point2d) -> DetectorId {
            self.detectors.insert_with_key(|id| {
                Detector::new(
                    id,
                    &DetectorAttributes {
                        source_id,
                        position: Point2d::new(x, y),
                        axis: "Main",
                        direction: Some(direction),
                    },
                )
            })
        }

        fn assign(&mut self, id: DetectorId) -> Result<Outcome> {
            Assigner::new(
                &mut self.network,
                &self.detectors,
                &self.config,
                &mut self.locations,
                &mut self.report,
            )
            .assign(id)
        }
    }

    /// A chain of two-way links along the x axis, each 100 m long.
    fn chain(len: usize) -> (Network, Vec<LinkId>) {
        let mut network = Network::new();
        let nodes = (0..=len)
            .map(|i| {
                network.add_node(&NodeAttributes {
                    source_id: "",
                    position: Point2d::new(100.0 * i as f64, 0.0),
                })
            })
            .collect::<Vec<_>>();
        let links = nodes
            .windows(2)
            .map(|pair| {
                network
                    .add_link(&LinkAttributes {
                        name: "Main",
                        oneway: false,
                        tail: pair[0],
                        head: pair[1],
                        geometry: None,
                    })
                    .unwrap()
            })
            .collect();
        (network, links)
    }

    fn east() -> Point2d {
        Point2d::new(10_000.0, 0.0)
    }

    #[test]
    fn eviction_chain_shifts_detectors_along() {
        let (network, links) = chain(3);
        let mut fx = Fixture::new(network);

        // Both detectors are nearest to the first link, `b` more so
        let a = fx.detector("a", 50.0, 6.0, east());
        let b = fx.detector("b", 60.0, 2.0, east());

        assert!(matches!(fx.assign(a), Ok(Outcome::Assigned { degree: 0, .. })));
        assert!(matches!(fx.assign(b), Ok(Outcome::Assigned { degree: 0, .. })));

        let first = fx.network.slot(links[0], FlowOrientation::Along).unwrap();
        assert_eq!(first.detector, b);
        let second = fx.network.slot(links[1], FlowOrientation::Along).unwrap();
        assert_eq!(second.detector, a);
        assert_eq!(second.degree, 1);
        assert_eq!(fx.report.evictions, 1);
        assert_eq!(fx.locations[a], (links[1], FlowOrientation::Along));
    }

    #[test]
    fn reassigning_a_placed_detector_is_a_no_op() {
        let (network, links) = chain(2);
        let mut fx = Fixture::new(network);
        let a = fx.detector("a", 50.0, 1.0, east());

        let first = fx.assign(a).unwrap();
        let second = fx.assign(a).unwrap();
        assert_eq!(first, second);
        assert!(fx.network.slot(links[1], FlowOrientation::Along).is_none());
        assert_eq!(fx.report.processed, 2);
    }

    #[test]
    fn depth_limit_leaves_evicted_detector_unassigned() {
        let (network, links) = chain(2);
        let mut fx = Fixture::new(network);
        fx.config.max_depth = 0;
        let a = fx.detector("a", 50.0, 6.0, east());
        let b = fx.detector("b", 50.0, 2.0, east());

        fx.assign(a).unwrap();
        fx.assign(b).unwrap();

        assert_eq!(
            fx.report.reason(a),
            Some(UnassignableReason::EvictionDepthExceeded)
        );
        assert!(fx.network.slot(links[1], FlowOrientation::Along).is_none());
        assert!(!fx.locations.contains_key(a));

        // A later attempt with room to spare places it and clears the report
        fx.config.max_depth = 64;
        assert!(matches!(fx.assign(a), Ok(Outcome::Assigned { degree: 1, .. })));
        assert_eq!(fx.report.reason(a), None);
        assert!(fx.report.unassigned.is_empty());
    }

    #[test]
    fn missing_direction_is_unassignable() {
        let (network, _) = chain(1);
        let mut fx = Fixture::new(network);
        let id = fx.detectors.insert_with_key(|id| {
            Detector::new(
                id,
                &DetectorAttributes {
                    source_id: "x",
                    position: Point2d::new(10.0, 1.0),
                    axis: "Main",
                    direction: None,
                },
            )
        });
        assert_eq!(
            fx.assign(id).unwrap(),
            Outcome::Unassignable(UnassignableReason::MissingDirection)
        );
    }

    #[test]
    fn unknown_detector() {
        let (network, _) = chain(1);
        let mut fx = Fixture::new(network);
        let mut other: DetectorSet = SlotMap::with_key();
        let stray = other.insert_with_key(|id| {
            Detector::new(
                id,
                &DetectorAttributes {
                    source_id: "x",
                    position: Point2d::new(0.0, 0.0),
                    axis: "Main",
                    direction: None,
                },
            )
        });
        assert!(matches!(
            fx.assign(stray),
            Err(MatchError::UnknownDetector(_))
        ));
    }
}
