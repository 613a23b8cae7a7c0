use crate::assign::{Assigner, Locations, Outcome};
use crate::candidate::nearest_links;
use crate::config::{MatchConfig, ProcessingOrder};
use crate::detector::{Detector, DetectorAttributes};
use crate::error::Result;
use crate::export::{export, AssignmentRow};
use crate::network::Network;
use crate::orientation::FlowOrientation;
use crate::report::MatchReport;
use crate::sanity::SanityReport;
use crate::{DetectorId, DetectorSet, LinkId};
use itertools::Itertools;
use std::cmp::Ordering;

/// Matches a set of detectors to the links of a road network.
pub struct Matcher {
    /// The network whose slots are being filled.
    network: Network,
    /// The detectors to match.
    detectors: DetectorSet,
    /// The detectors in the order they were added.
    added: Vec<DetectorId>,
    /// The slot currently held by each assigned detector.
    locations: Locations,
    /// The outcomes of the assignments made so far.
    report: MatchReport,
    config: MatchConfig,
}

impl Matcher {
    /// Creates a matcher for the given network, with default settings.
    pub fn new(network: Network) -> Self {
        Self::with_config(network, MatchConfig::default())
    }

    /// Creates a matcher for the given network.
    pub fn with_config(network: Network, config: MatchConfig) -> Self {
        Self {
            network,
            detectors: DetectorSet::with_key(),
            added: vec![],
            locations: Locations::new(),
            report: MatchReport::default(),
            config,
        }
    }

    /// Adds a detector to be matched.
    pub fn add_detector(&mut self, attributes: &DetectorAttributes) -> DetectorId {
        let id = self
            .detectors
            .insert_with_key(|id| Detector::new(id, attributes));
        self.added.push(id);
        id
    }

    /// Assigns a single detector to a link.
    ///
    /// Detectors already holding a slot may be displaced and moved elsewhere.
    /// Running out of candidates is reported through the [Outcome], while an
    /// ambiguous orientation is an error and leaves the network part-way
    /// through resolving the collision chain.
    pub fn assign(&mut self, detector_id: DetectorId) -> Result<Outcome> {
        Assigner::new(
            &mut self.network,
            &self.detectors,
            &self.config,
            &mut self.locations,
            &mut self.report,
        )
        .assign(detector_id)
    }

    /// Assigns the given detectors, one after another.
    pub fn assign_in_order(&mut self, order: &[DetectorId]) -> Result<&MatchReport> {
        for detector_id in order {
            self.assign(*detector_id)?;
        }
        Ok(&self.report)
    }

    /// Assigns every detector, in the configured [ProcessingOrder].
    pub fn assign_all(&mut self) -> Result<&MatchReport> {
        let order = self.processing_order();
        log::info!(
            "Matching {} detectors to {} links",
            order.len(),
            self.network.link_count()
        );
        self.assign_in_order(&order)?;
        log::info!(
            "Matched {} detectors with {} evictions, {} unassigned",
            self.locations.len(),
            self.report.evictions,
            self.report.unassigned.len()
        );
        Ok(&self.report)
    }

    /// The order in which [Self::assign_all] processes the detectors.
    pub fn processing_order(&self) -> Vec<DetectorId> {
        match self.config.order {
            ProcessingOrder::Insertion => self.added.clone(),
            ProcessingOrder::SourceId => self
                .added
                .iter()
                .copied()
                .sorted_by(|a, b| {
                    compare_source_ids(
                        self.detectors[*a].source_id(),
                        self.detectors[*b].source_id(),
                    )
                })
                .collect(),
        }
    }

    /// Gets the link and orientation the detector is assigned to, if any.
    pub fn assignment_of(&self, detector_id: DetectorId) -> Option<(LinkId, FlowOrientation)> {
        self.locations.get(detector_id).copied()
    }

    /// The links which are the nearest same-named link of at least one detector,
    /// sorted and without duplicates.
    pub fn relevant_links(&self) -> Vec<LinkId> {
        nearest_links(&self.network, &self.detectors)
            .into_iter()
            .filter_map(|(_, link_id)| link_id)
            .sorted()
            .dedup()
            .collect()
    }

    /// Checks the invariants of the assignments made so far.
    pub fn sanity_check(&self) -> SanityReport {
        SanityReport::run(&self.network, &self.detectors)
    }

    /// Builds the link-to-detector lookup table.
    pub fn export(&self) -> Vec<AssignmentRow> {
        export(&self.network, &self.detectors)
    }

    /// The outcomes of the assignments made so far.
    pub fn report(&self) -> &MatchReport {
        &self.report
    }

    /// The network being matched.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The detectors being matched.
    pub fn detectors(&self) -> &DetectorSet {
        &self.detectors
    }

    /// Gets a reference to the detector with the given ID.
    pub fn get_detector(&self, detector_id: DetectorId) -> Option<&Detector> {
        self.detectors.get(detector_id)
    }

    /// Returns an iterator over the detectors, in the order they were added.
    pub fn iter_detectors(&self) -> impl Iterator<Item = &Detector> {
        self.added.iter().map(|id| &self.detectors[*id])
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Consumes the matcher, returning the network with its filled slots.
    pub fn into_network(self) -> Network {
        self.network
    }
}

/// Orders source IDs with integer IDs first, in numeric order,
/// followed by all other IDs in lexical order.
fn compare_source_ids(a: &str, b: &str) -> Ordering {
    source_id_key(a).cmp(&source_id_key(b))
}

fn source_id_key(source_id: &str) -> (bool, i64, &str) {
    match source_id.parse::<i64>() {
        Ok(n) => (false, n, source_id),
        Err(_) => (true, 0, source_id),
    }
}
