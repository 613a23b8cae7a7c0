pub use assign::{Assignment, Outcome};
pub use candidate::{find_candidates, nearest_links, Candidate, Candidates};
pub use cgmath;
pub use config::{MatchConfig, ProcessingOrder};
pub use detector::{Detector, DetectorAttributes};
pub use error::{MatchError, Result};
pub use export::{export, AssignmentRow};
pub use link::{Link, LinkAttributes};
pub use matcher::Matcher;
pub use network::{Network, Node, NodeAttributes};
pub use orientation::{resolve_orientation, FlowOrientation};
pub use report::{MatchReport, UnassignableReason, Unassigned};
pub use sanity::SanityReport;
#[cfg(feature = "serde")]
pub use scenario::Scenario;
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use util::Interval;

mod assign;
mod candidate;
pub mod config;
mod detector;
mod error;
mod export;
mod link;
mod matcher;
pub mod math;
mod network;
mod orientation;
mod report;
pub mod sanity;
#[cfg(feature = "serde")]
pub mod scenario;
mod util;

new_key_type! {
    /// Unique ID of a [Node].
    pub struct NodeId;
    /// Unique ID of a [Link].
    pub struct LinkId;
    /// Unique ID of a [Detector].
    pub struct DetectorId;
}

type NodeSet = SlotMap<NodeId, Node>;
type LinkSet = SlotMap<LinkId, Link>;

/// The detectors being matched.
pub type DetectorSet = SlotMap<DetectorId, Detector>;
