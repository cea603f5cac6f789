//! A planar graph of labelled nodes and edges.
//!
//! Every Edge added through `add_edges` gets two DirectedEdges, one per
//! direction, and each DirectedEdge belongs to the star of the node it leaves.
//! Linking sorts each star by angle and chains its members into a ring, so
//! walking `next` goes counter-clockwise around the node.
//!
//! Geometry doesn't check itself here: edges are assumed to be noded already,
//! meaning they only meet at their endpoints. Use an EdgeSetIntersector to
//! find where that isn't true.

use log::{debug, warn};
use serde::Serialize;

use crate::coord_set::{CoordCompare, CoordSet, XyCompare};
use crate::error::Result;
use crate::geo::{orientation_index, Coord, Layout, Location, Orientation, Position, Quadrant};
use crate::intersection::{EdgeSetIntersector, SegmentIntersector};

mod build;
pub mod label;
pub mod node_map;
pub mod star;
pub mod types;

pub use self::label::Label;
pub use self::node_map::{NodeFactory, NodeMap, PlainNodes};
pub use self::star::compare_direction;
pub use self::types::{DirectedEdge, DirectedEdgeId, Direction, Edge, EdgeId, GraphPhase, Node, NodeId};

pub struct PlanarGraph<F: NodeFactory = PlainNodes, C = XyCompare> {
    layout: Layout,
    nodes: NodeMap<F, C>,
    edges: Vec<Edge>,
    edge_ends: Vec<DirectedEdge>,
    phase: GraphPhase,
}

/// A borrowed, serializable view of a graph's arenas.
#[derive(Debug, Serialize)]
pub struct GraphSnapshot<'a, D> {
    pub layout: Layout,
    pub phase: GraphPhase,
    pub nodes: &'a [Node<D>],
    pub edges: &'a [Edge],
    pub edge_ends: &'a [DirectedEdge],
}

impl AsRef<[Coord]> for Edge {
    fn as_ref(&self) -> &[Coord] {
        &self.coords
    }
}

impl PlanarGraph<PlainNodes, XyCompare> {
    pub fn new(layout: Layout) -> PlanarGraph<PlainNodes, XyCompare> {
        PlanarGraph::with_strategies(layout, PlainNodes, XyCompare)
    }
}

impl<F: NodeFactory> PlanarGraph<F, XyCompare> {
    pub fn with_factory(layout: Layout, factory: F) -> PlanarGraph<F, XyCompare> {
        PlanarGraph::with_strategies(layout, factory, XyCompare)
    }
}

impl<F: NodeFactory, C: CoordCompare> PlanarGraph<F, C> {
    /// `compare` decides which coordinates share a node.
    pub fn with_strategies(layout: Layout, factory: F, compare: C) -> PlanarGraph<F, C> {
        PlanarGraph {
            layout: layout,
            nodes: NodeMap::new(factory, compare),
            edges: vec![],
            edge_ends: vec![],
            phase: GraphPhase::Empty,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn phase(&self) -> GraphPhase {
        self.phase
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_end_count(&self) -> usize {
        self.edge_ends.len()
    }

    /// Sorts every star and links all its DirectedEdges.
    pub fn link_all_directed_edges(&mut self) {
        let n = self.link(false);
        debug!("linked all: {} edge-ends at {} nodes", n, self.nodes.len());
    }

    /// Sorts every star and links only the DirectedEdges marked in_result.
    /// The others are left with no `next` or `prev`.
    pub fn link_result_directed_edges(&mut self) {
        let n = self.link(true);
        debug!("linked result: {} of {} edge-ends", n, self.edge_ends.len());
    }

    fn link(&mut self, result_only: bool) -> usize {
        let mut n_linked = 0;
        let ids: Vec<NodeId> = self.nodes.ids_in_order().collect();
        for id in ids {
            let node = self.nodes.get_mut(id);
            star::sort_star(&mut node.star, &node.coord, &self.edge_ends);
            n_linked += star::link_star(id, &node.star, &mut self.edge_ends, result_only);
        }
        self.phase = GraphPhase::Linked;
        n_linked
    }

    pub fn find_node(&self, coord: &Coord) -> Option<NodeId> {
        self.nodes.find(coord)
    }

    /// Is there a node at `coord` whose label puts it on the Boundary of
    /// geometry `geom`?
    pub fn is_boundary_node(&self, geom: usize, coord: &Coord) -> bool {
        match self.nodes.find(coord) {
            Some(id) => self.nodes.get(id).label.location(geom, Position::On) == Location::Boundary,
            None => false,
        }
    }

    /// The first edge, in insertion order, whose first two coordinates are
    /// `p0` and `p1` (by x and y).
    pub fn find_edge(&self, p0: &Coord, p1: &Coord) -> Option<EdgeId> {
        if !p0.has_xy() || !p1.has_xy() {
            return None;
        }
        self.first_edge_where("find_edge", |e| {
            e.coords[0].equals_xy(p0) && e.coords[1].equals_xy(p1)
        })
    }

    /// The first edge starting (or ending) at `p0` whose first (or last)
    /// segment heads the same way as `p0`->`p1`.
    pub fn find_edge_in_same_direction(&self, p0: &Coord, p1: &Coord) -> Option<EdgeId> {
        if !p0.has_xy() || !p1.has_xy() {
            return None;
        }
        self.first_edge_where("find_edge_in_same_direction", |e| {
            let n = e.coords.len();
            match_in_same_direction(p0, p1, &e.coords[0], &e.coords[1])
                || match_in_same_direction(p0, p1, &e.coords[n - 1], &e.coords[n - 2])
        })
    }

    fn first_edge_where<P: Fn(&Edge) -> bool>(&self, what: &str, pred: P) -> Option<EdgeId> {
        let mut matches = self.edges.iter().enumerate().filter(|&(_, e)| pred(e)).map(|(i, _)| i);
        let first = matches.next()?;
        let n_more = matches.count();
        if n_more > 0 {
            warn!("{}: {} edges match; returning the first", what, n_more + 1);
        }
        Some(EdgeId::from_index(first))
    }

    /// The first DirectedEdge on `edge`, which is its Forward one. None for
    /// edges added with `insert_edge`.
    pub fn find_edge_end(&self, edge: EdgeId) -> Option<DirectedEdgeId> {
        self.edge_ends
            .iter()
            .position(|de| de.edge == edge)
            .map(DirectedEdgeId::from_index)
    }

    /// Every DirectedEdge on `edge`, in creation order.
    pub fn find_edge_ends(&self, edge: EdgeId) -> Vec<DirectedEdgeId> {
        self.edge_ends
            .iter()
            .enumerate()
            .filter(|&(_, de)| de.edge == edge)
            .map(|(i, _)| DirectedEdgeId::from_index(i))
            .collect()
    }

    /// The DirectedEdges leaving `node`; counter-clockwise once linked.
    pub fn star_iter(&self, node: NodeId) -> impl Iterator<Item = DirectedEdgeId> + '_ {
        self.nodes.get(node).star.iter().copied()
    }

    pub fn next_in_star(&self, edge_end: DirectedEdgeId) -> Option<DirectedEdgeId> {
        self.edge_ends[edge_end.index()].next
    }

    pub fn prev_in_star(&self, edge_end: DirectedEdgeId) -> Option<DirectedEdgeId> {
        self.edge_ends[edge_end.index()].prev
    }

    pub fn node(&self, id: NodeId) -> &Node<F::Data> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn edge_end(&self, id: DirectedEdgeId) -> &DirectedEdge {
        &self.edge_ends[id.index()]
    }

    /// The edge's label as seen walking this way: flipped for Backward.
    pub fn edge_end_label(&self, id: DirectedEdgeId) -> Label {
        let de = &self.edge_ends[id.index()];
        let label = self.edges[de.edge.index()].label;
        if de.is_forward() {
            label
        } else {
            label.flip()
        }
    }

    /// Nodes in ascending coordinate order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<F::Data>)> + '_ {
        self.nodes.ids_in_order().map(move |id| (id, self.nodes.get(id)))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId::from_index(i), e))
    }

    pub fn edge_ends(&self) -> impl Iterator<Item = (DirectedEdgeId, &DirectedEdge)> + '_ {
        self.edge_ends
            .iter()
            .enumerate()
            .map(|(i, de)| (DirectedEdgeId::from_index(i), de))
    }

    /// Points where this graph's edges meet, other than the joints between
    /// consecutive segments of one edge. A correctly noded graph reports only
    /// its nodes.
    pub fn self_intersections<I: EdgeSetIntersector>(&self, intersector: &I) -> Result<CoordSet> {
        let mut si = SegmentIntersector::new(self.layout, XyCompare);
        intersector.compute_self_intersections(&self.edges, &mut si)?;
        Ok(si.into_nodes())
    }

    pub fn snapshot(&self) -> GraphSnapshot<'_, F::Data> {
        GraphSnapshot {
            layout: self.layout,
            phase: self.phase,
            nodes: self.nodes.as_slice(),
            edges: &self.edges,
            edge_ends: &self.edge_ends,
        }
    }
}

/// Do `p0`->`p1` and `ep0`->`ep1` leave the same point heading the same way?
fn match_in_same_direction(p0: &Coord, p1: &Coord, ep0: &Coord, ep1: &Coord) -> bool {
    if !p0.equals_xy(ep0) {
        return false;
    }
    orientation_index(p0, p1, ep1) == Orientation::Collinear
        && Quadrant::of_segment(p0, p1) == Quadrant::of_segment(ep0, ep1)
}
