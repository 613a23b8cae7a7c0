//! Error types for detector matching.

use crate::{DetectorId, LinkId, NodeId};
use thiserror::Error;

/// Result type for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors that can occur while building a network or matching detectors.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Both ends of a candidate link are exactly as far from the detector's
    /// direction reference point, so the counted direction cannot be decided.
    #[error("ambiguous orientation of detector {detector:?} on link {link:?}: both nodes are equidistant from the direction reference")]
    AmbiguousOrientation { detector: DetectorId, link: LinkId },

    /// The detector is not known to the matcher.
    #[error("unknown detector: {0:?}")]
    UnknownDetector(DetectorId),

    /// A link referenced a node which is not in the network.
    #[error("unknown node: {0:?}")]
    UnknownNode(NodeId),

    /// A link geometry had fewer than two points.
    #[error("degenerate geometry for link {0:?}")]
    DegenerateGeometry(String),

    /// A scenario file was malformed.
    #[error("invalid scenario: {0}")]
    Scenario(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Json(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for MatchError {
    fn from(e: serde_json::Error) -> Self {
        MatchError::Json(e.to_string())
    }
}
