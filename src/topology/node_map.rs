//! Nodes, looked up by coordinate.

use log::trace;

use super::label::Label;
use super::types::{Node, NodeId};
use crate::coord_set::{CoordCompare, TreeMap, XyCompare};
use crate::geo::Coord;

/// Makes the payload for each new Node.
pub trait NodeFactory {
    type Data;

    fn create_node(&self, coord: &Coord) -> Self::Data;
}

/// Nodes that carry nothing extra.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlainNodes;

impl NodeFactory for PlainNodes {
    type Data = ();

    fn create_node(&self, _coord: &Coord) {}
}

impl<D, F> NodeFactory for F
where
    F: Fn(&Coord) -> D,
{
    type Data = D;

    fn create_node(&self, coord: &Coord) -> D {
        self(coord)
    }
}

/// The node arena plus an index from coordinate to NodeId.
///
/// A coordinate that compares equal to an existing node's maps to that node;
/// the node keeps the coordinate it was created with.
pub struct NodeMap<F: NodeFactory = PlainNodes, C = XyCompare> {
    nodes: Vec<Node<F::Data>>,
    index: TreeMap<NodeId, C>,
    factory: F,
}

impl<F: NodeFactory, C: CoordCompare> NodeMap<F, C> {
    pub fn new(factory: F, compare: C) -> NodeMap<F, C> {
        NodeMap {
            nodes: vec![],
            index: TreeMap::new(compare),
            factory: factory,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node at `coord`, creating it if there isn't one.
    pub fn add_coord(&mut self, coord: &Coord) -> NodeId {
        if let Some(&id) = self.index.get(coord) {
            return id;
        }
        let id = NodeId::from_index(self.nodes.len());
        trace!("new node {:?} at {}", id, coord);
        self.nodes.push(Node {
            coord: coord.clone(),
            label: Label::new(),
            star: vec![],
            data: self.factory.create_node(coord),
        });
        self.index.insert(coord.clone(), id);
        id
    }

    /// None when there is no node at `coord`, or `coord` has no x and y.
    pub fn find(&self, coord: &Coord) -> Option<NodeId> {
        if !coord.has_xy() {
            return None;
        }
        self.index.get(coord).copied()
    }

    pub fn get(&self, id: NodeId) -> &Node<F::Data> {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<F::Data> {
        &mut self.nodes[id.index()]
    }

    /// Node ids in ascending coordinate order.
    pub fn ids_in_order(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.iter().map(|(_, &id)| id)
    }

    /// The arena itself, in creation order.
    pub fn as_slice(&self) -> &[Node<F::Data>] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_coord_reuses_nodes() {
        let mut map = NodeMap::new(PlainNodes, XyCompare);
        let a = map.add_coord(&Coord::xy(1.0, 1.0));
        let b = map.add_coord(&Coord::xy(0.0, 0.0));
        assert_eq!(a, map.add_coord(&Coord::xy(1.0, 1.0)));
        assert_ne!(a, b);
        assert_eq!(2, map.len());
        assert_eq!(Some(b), map.find(&Coord::xy(0.0, 0.0)));
        assert_eq!(None, map.find(&Coord::xy(2.0, 0.0)));
    }

    #[test]
    fn ids_in_coordinate_order() {
        let mut map = NodeMap::new(PlainNodes, XyCompare);
        let a = map.add_coord(&Coord::xy(5.0, 0.0));
        let b = map.add_coord(&Coord::xy(1.0, 9.0));
        let c = map.add_coord(&Coord::xy(1.0, 2.0));
        assert_eq!(vec![c, b, a], map.ids_in_order().collect::<Vec<NodeId>>());
    }

    #[test]
    fn factory_closure_builds_payload() {
        let mut map = NodeMap::new(|c: &Coord| format!("{}", c), XyCompare);
        let id = map.add_coord(&Coord::xy(1.0, 2.5));
        assert_eq!("(1,2.5)", map.get(id).data);
    }

    #[test]
    fn first_coordinate_wins() {
        let mut map = NodeMap::new(PlainNodes, XyCompare);
        let id = map.add_coord(&Coord::xyz(1.0, 1.0, 3.0));
        assert_eq!(id, map.add_coord(&Coord::xyz(1.0, 1.0, 4.0)));
        assert_eq!(Coord::xyz(1.0, 1.0, 3.0), map.get(id).coord);
    }
}
