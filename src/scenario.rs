//! Loading networks and detectors from JSON.
//!
//! A scenario file looks like:
//! ```json
//! {
//!   "nodes": [{ "id": 1, "x": 0.0, "y": 0.0 }, { "id": 2, "x": 100.0, "y": 0.0 }],
//!   "links": [{ "name": "Main", "oneway": true, "from": 1, "to": 2 }],
//!   "detectors": [{ "id": 7, "x": 50.0, "y": 3.0, "axis": "Main", "direction": [500.0, 0.0] }],
//!   "config": { "max_depth": 64, "order": "source_id" }
//! }
//! ```

use crate::config::MatchConfig;
use crate::detector::DetectorAttributes;
use crate::error::{MatchError, Result};
use crate::link::LinkAttributes;
use crate::math::Point2d;
use crate::matcher::Matcher;
use crate::network::{Network, NodeAttributes};
use crate::NodeId;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// An identifier from the source data, which may be a number or a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum SourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Number(n) => write!(f, "{}", n),
            SourceId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NodeRecord {
    pub id: SourceId,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LinkRecord {
    /// Missing names are treated as empty, so the link is never a candidate.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub oneway: bool,
    pub from: SourceId,
    pub to: SourceId,
    /// The shape of the link; a straight line between its nodes if omitted.
    #[serde(default)]
    pub geometry: Option<Vec<[f64; 2]>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DetectorRecord {
    pub id: SourceId,
    pub x: f64,
    pub y: f64,
    pub axis: String,
    #[serde(default)]
    pub direction: Option<[f64; 2]>,
}

/// A network and a set of detectors to match against it.
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
    pub detectors: Vec<DetectorRecord>,
    #[serde(default)]
    pub config: MatchConfig,
}

impl Scenario {
    /// Parses a scenario from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a scenario from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Builds the network and a matcher holding the scenario's detectors,
    /// in the order they appear in the file.
    pub fn build(&self) -> Result<Matcher> {
        let mut network = Network::new();
        // Keyed by the printed ID, so `1` and `"1"` name the same node
        let mut nodes = HashMap::<String, NodeId>::new();
        for record in &self.nodes {
            let source_id = record.id.to_string();
            if nodes.contains_key(&source_id) {
                return Err(MatchError::Scenario(format!("duplicate node {}", record.id)));
            }
            let id = network.add_node(&NodeAttributes {
                source_id: &source_id,
                position: Point2d::new(record.x, record.y),
            });
            nodes.insert(source_id, id);
        }

        for record in &self.links {
            let node = |id: &SourceId| {
                nodes.get(&id.to_string()).copied().ok_or_else(|| {
                    MatchError::Scenario(format!("link references unknown node {}", id))
                })
            };
            let geometry = record
                .geometry
                .as_ref()
                .map(|points| points.iter().map(|[x, y]| Point2d::new(*x, *y)).collect::<Vec<_>>());
            network.add_link(&LinkAttributes {
                name: record.name.as_deref().unwrap_or(""),
                oneway: record.oneway,
                tail: node(&record.from)?,
                head: node(&record.to)?,
                geometry: geometry.as_deref(),
            })?;
        }

        let mut matcher = Matcher::with_config(network, self.config.clone());
        for record in &self.detectors {
            let source_id = record.id.to_string();
            matcher.add_detector(&DetectorAttributes {
                source_id: &source_id,
                position: Point2d::new(record.x, record.y),
                axis: &record.axis,
                direction: record.direction.map(|[x, y]| Point2d::new(x, y)),
            });
        }
        Ok(matcher)
    }
}
