use crate::assign::Assignment;
use crate::math::{Point2d, Polyline2d};
use crate::orientation::FlowOrientation;
use crate::{LinkId, NodeId};

/// A directed segment of the road network between two nodes.
///
/// Each link has two assignment slots, one per [FlowOrientation].
/// The slots are only ever written by the assignment engine.
#[derive(Clone, Debug)]
pub struct Link {
    /// The link ID.
    id: LinkId,
    /// The street name, which detectors are matched against.
    name: String,
    /// Whether traffic may only travel from the tail to the head.
    oneway: bool,
    /// The node at the start of the link.
    tail: NodeId,
    /// The node at the end of the link.
    head: NodeId,
    /// The geometry of the link.
    geometry: Polyline2d,
    /// The assigned detectors, indexed by [FlowOrientation::index].
    slots: [Option<Assignment>; 2],
}

/// The attributes of a link.
pub struct LinkAttributes<'a> {
    /// The street name.
    pub name: &'a str,
    /// Whether the link is one-way.
    pub oneway: bool,
    /// The node at the start of the link.
    pub tail: NodeId,
    /// The node at the end of the link.
    pub head: NodeId,
    /// The shape of the link, or `None` for a straight line from tail to head.
    pub geometry: Option<&'a [Point2d]>,
}

impl Link {
    /// Creates a new link with empty slots.
    pub(crate) fn new(id: LinkId, attribs: &LinkAttributes, geometry: Polyline2d) -> Self {
        Self {
            id,
            name: attribs.name.to_owned(),
            oneway: attribs.oneway,
            tail: attribs.tail,
            head: attribs.head,
            geometry,
            slots: [None, None],
        }
    }

    /// Gets the link's ID.
    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Gets the street name of the link.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the link is one-way.
    pub fn is_oneway(&self) -> bool {
        self.oneway
    }

    /// The node at the start of the link.
    pub fn tail(&self) -> NodeId {
        self.tail
    }

    /// The node at the end of the link.
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// The geometry of the link.
    pub fn geometry(&self) -> &Polyline2d {
        &self.geometry
    }

    /// The shortest distance between the link and a point.
    pub fn distance_to(&self, point: Point2d) -> f64 {
        self.geometry.distance_to_point(point)
    }

    /// Whether the link can carry traffic in the given orientation.
    pub fn permits(&self, orientation: FlowOrientation) -> bool {
        match orientation {
            FlowOrientation::Along => true,
            FlowOrientation::Counter => !self.oneway,
        }
    }

    /// Gets the assignment in the slot of the given orientation.
    pub fn slot(&self, orientation: FlowOrientation) -> Option<&Assignment> {
        self.slots[orientation.index()].as_ref()
    }

    /// Iterates over the occupied slots of the link.
    pub fn assignments(&self) -> impl Iterator<Item = (FlowOrientation, &Assignment)> {
        FlowOrientation::ALL
            .into_iter()
            .zip(&self.slots)
            .filter_map(|(orientation, slot)| slot.as_ref().map(|a| (orientation, a)))
    }

    /// Removes and returns the assignment in the given slot.
    pub(crate) fn take_slot(&mut self, orientation: FlowOrientation) -> Option<Assignment> {
        self.slots[orientation.index()].take()
    }

    /// Writes an assignment into the given slot, which must be empty.
    pub(crate) fn fill_slot(&mut self, orientation: FlowOrientation, assignment: Assignment) {
        let slot = &mut self.slots[orientation.index()];
        debug_assert!(slot.is_none(), "slot {} of {:?} is occupied", orientation, self.id);
        *slot = Some(assignment);
    }
}
