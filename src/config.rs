//! Settings that control a matching run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default limit on nested evictions.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// The order in which a batch processes its detectors.
///
/// The order matters: the detector being processed always challenges the
/// detectors assigned before it, so it decides who wins ties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProcessingOrder {
    /// The order in which detectors were added.
    #[default]
    Insertion,
    /// Ascending source ID: integer IDs first in numeric order, then the rest lexically.
    SourceId,
}

/// The settings of a matching run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    /// How many evictions may be nested inside a single top-level assignment.
    /// An evicted detector which would exceed this is left unassigned.
    pub max_depth: usize,
    /// The order in which [crate::Matcher::assign_all] processes detectors.
    pub order: ProcessingOrder,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            order: ProcessingOrder::default(),
        }
    }
}
