use crate::assign::Assignment;
use crate::error::{MatchError, Result};
use crate::link::{Link, LinkAttributes};
use crate::math::{Point2d, Polyline2d};
use crate::orientation::FlowOrientation;
use crate::{LinkId, LinkSet, NodeId, NodeSet};
use std::collections::HashMap;

/// An endpoint of one or more links.
#[derive(Clone, Debug)]
pub struct Node {
    /// The node ID.
    id: NodeId,
    /// The identifier of the node in the source data set.
    source_id: String,
    /// The location of the node.
    position: Point2d,
}

/// The attributes of a node.
pub struct NodeAttributes<'a> {
    /// The identifier of the node in the source data set.
    pub source_id: &'a str,
    /// The location of the node.
    pub position: Point2d,
}

impl Node {
    /// Gets the node's ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Gets the identifier of the node in the source data set.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Gets the location of the node.
    pub fn position(&self) -> Point2d {
        self.position
    }
}

/// A road network of directed links.
///
/// Nodes and links are added once, up front, and never removed.
/// Matching only changes the contents of the links' assignment slots.
#[derive(Clone, Debug, Default)]
pub struct Network {
    /// The nodes in the network.
    nodes: NodeSet,
    /// The links in the network.
    links: LinkSet,
    /// The links with each street name, in insertion order.
    by_name: HashMap<String, Vec<LinkId>>,
}

impl Network {
    /// Creates an empty network.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a node to the network.
    pub fn add_node(&mut self, attributes: &NodeAttributes) -> NodeId {
        self.nodes.insert_with_key(|id| Node {
            id,
            source_id: attributes.source_id.to_owned(),
            position: attributes.position,
        })
    }

    /// Adds a link to the network.
    ///
    /// Links with an empty name are kept, but are never candidates for a detector.
    pub fn add_link(&mut self, attributes: &LinkAttributes) -> Result<LinkId> {
        let tail = self.node_position(attributes.tail)?;
        let head = self.node_position(attributes.head)?;
        let geometry = match attributes.geometry {
            Some(points) => Polyline2d::new(points.to_vec())
                .ok_or_else(|| MatchError::DegenerateGeometry(attributes.name.to_owned()))?,
            None => Polyline2d::from_ends(tail, head),
        };

        let id = self
            .links
            .insert_with_key(|id| Link::new(id, attributes, geometry));
        if !attributes.name.is_empty() {
            self.by_name
                .entry(attributes.name.to_owned())
                .or_default()
                .push(id);
        }
        Ok(id)
    }

    /// Gets a reference to the node with the given ID.
    pub fn get_node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// Gets a reference to the link with the given ID.
    pub fn get_link(&self, link_id: LinkId) -> Option<&Link> {
        self.links.get(link_id)
    }

    /// Returns an iterator over all the nodes in the network.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Returns an iterator over all the links in the network, in insertion order.
    pub fn iter_links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// The number of links in the network.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Gets the IDs of the links with the given street name.
    pub fn links_named(&self, name: &str) -> &[LinkId] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Gets the positions of a link's tail and head nodes.
    pub fn endpoints(&self, link: &Link) -> (Point2d, Point2d) {
        (
            self.nodes[link.tail()].position,
            self.nodes[link.head()].position,
        )
    }

    /// Gets the assignment in the given slot of a link.
    pub fn slot(&self, link_id: LinkId, orientation: FlowOrientation) -> Option<&Assignment> {
        self.links.get(link_id)?.slot(orientation)
    }

    /// Iterates over every occupied slot in the network.
    pub fn assignments(&self) -> impl Iterator<Item = (&Link, FlowOrientation, &Assignment)> {
        self.links.values().flat_map(|link| {
            link.assignments()
                .map(move |(orientation, assignment)| (link, orientation, assignment))
        })
    }

    pub(crate) fn link(&self, link_id: LinkId) -> &Link {
        &self.links[link_id]
    }

    pub(crate) fn link_mut(&mut self, link_id: LinkId) -> &mut Link {
        &mut self.links[link_id]
    }

    fn node_position(&self, node_id: NodeId) -> Result<Point2d> {
        self.nodes
            .get(node_id)
            .map(|node| node.position)
            .ok_or(MatchError::UnknownNode(node_id))
    }
}
