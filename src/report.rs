use crate::DetectorId;
use std::fmt;

/// Why a detector could not be assigned to any link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnassignableReason {
    /// No link has the detector's street name.
    NoCandidates,
    /// Every candidate link was one-way in the wrong direction, or held by a nearer detector.
    Exhausted,
    /// The detector has no direction reference point.
    MissingDirection,
    /// The detector was evicted too deep inside a chain of evictions.
    EvictionDepthExceeded,
}

impl fmt::Display for UnassignableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            UnassignableReason::NoCandidates => "no link with a matching street name",
            UnassignableReason::Exhausted => "ran out of candidate links",
            UnassignableReason::MissingDirection => "no direction reference point",
            UnassignableReason::EvictionDepthExceeded => "eviction chain too deep",
        };
        f.write_str(msg)
    }
}

/// A detector which was left without an assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unassigned {
    pub detector: DetectorId,
    pub reason: UnassignableReason,
}

/// A summary of the detectors processed by a [crate::Matcher].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchReport {
    /// The number of top-level assignment calls made.
    pub processed: usize,
    /// The number of times a detector was displaced by a nearer one.
    pub evictions: usize,
    /// The detectors which are currently unassigned, in the order they gave up.
    /// A detector placed by a later attempt is removed from this list.
    pub unassigned: Vec<Unassigned>,
}

impl MatchReport {
    /// Gets the reason the detector could not be assigned,
    /// or `None` if it never gave up.
    pub fn reason(&self, detector: DetectorId) -> Option<UnassignableReason> {
        self.unassigned
            .iter()
            .rev()
            .find(|u| u.detector == detector)
            .map(|u| u.reason)
    }

    /// Whether the detector gave up without an assignment.
    pub fn is_unassigned(&self, detector: DetectorId) -> bool {
        self.reason(detector).is_some()
    }
}
