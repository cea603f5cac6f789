//! Populating a PlanarGraph: nodes, edges and their DirectedEdges.

use log::debug;

use super::label::Label;
use super::node_map::NodeFactory;
use super::types::{DirectedEdge, DirectedEdgeId, Direction, Edge, EdgeId, GraphPhase, NodeId};
use super::PlanarGraph;
use crate::coord_set::CoordCompare;
use crate::error::{Result, TopoError};
use crate::geo::{Coord, Quadrant};

/// Where one DirectedEdge leaves its node.
struct Outgoing {
    p0: Coord,
    p1: Coord,
    quadrant: Quadrant,
}

/// First coordinate of `coords` and the first later one that differs from it
/// in x or y.
///
/// Returns None when there is no such coordinate: the edge has zero length.
fn outgoing<'a, I>(mut coords: I) -> Option<Outgoing>
where
    I: Iterator<Item = &'a Coord>,
{
    let p0 = coords.next()?;
    let p1 = coords.find(|c| !c.equals_xy(p0))?;
    let quadrant = Quadrant::of_segment(p0, p1)?;
    Some(Outgoing {
        p0: p0.clone(),
        p1: p1.clone(),
        quadrant: quadrant,
    })
}

impl<F: NodeFactory, C: CoordCompare> PlanarGraph<F, C> {
    fn check_mutable(&self) -> Result<()> {
        if self.phase == GraphPhase::Linked {
            return Err(TopoError::GraphLinked);
        }
        Ok(())
    }

    fn mark_populated(&mut self) {
        if self.phase == GraphPhase::Empty {
            self.phase = GraphPhase::Populated;
        }
    }

    /// Fails unless `edge` has two or more coordinates, each long enough for
    /// the layout. `index` is only for the error.
    fn check_edge(&self, index: usize, edge: &Edge) -> Result<()> {
        if edge.coords.len() < 2 {
            return Err(TopoError::MalformedEdge {
                index: index,
                len: edge.coords.len(),
            });
        }
        for c in edge.coords.iter() {
            self.layout.check(c)?;
        }
        Ok(())
    }

    /// Adds edges, creating a Forward and a Backward DirectedEdge for each
    /// and nodes at both ends.
    ///
    /// All edges are validated before any is added, so on error the graph is
    /// unchanged. DirectedEdges aren't linked: call one of the link methods
    /// once all edges are in.
    pub fn add_edges(&mut self, edges: Vec<Edge>) -> Result<Vec<EdgeId>> {
        self.check_mutable()?;

        let mut prepared = Vec::with_capacity(edges.len());
        for (i, edge) in edges.iter().enumerate() {
            self.check_edge(i, edge)?;
            let forward = outgoing(edge.coords.iter());
            let backward = outgoing(edge.coords.iter().rev());
            match (forward, backward) {
                (Some(f), Some(b)) => prepared.push((f, b)),
                _ => return Err(TopoError::DegenerateEdge { index: i }),
            }
        }

        let mut ret = Vec::with_capacity(edges.len());
        for (mut edge, (forward, backward)) in edges.into_iter().zip(prepared) {
            let edge_id = EdgeId::from_index(self.edges.len());
            let forward_id = DirectedEdgeId::from_index(self.edge_ends.len());
            let backward_id = DirectedEdgeId::from_index(self.edge_ends.len() + 1);

            self.add_edge_end(edge_id, Direction::Forward, forward_id, backward_id, forward);
            self.add_edge_end(edge_id, Direction::Backward, backward_id, forward_id, backward);

            edge.ends = Some([forward_id, backward_id]);
            self.edges.push(edge);
            ret.push(edge_id);
        }

        if !ret.is_empty() {
            self.mark_populated();
        }
        debug!(
            "added {} edges; graph has {} nodes, {} edges, {} edge-ends",
            ret.len(),
            self.nodes.len(),
            self.edges.len(),
            self.edge_ends.len()
        );
        Ok(ret)
    }

    fn add_edge_end(
        &mut self,
        edge: EdgeId,
        direction: Direction,
        id: DirectedEdgeId,
        sym: DirectedEdgeId,
        out: Outgoing,
    ) {
        let node = self.nodes.add_coord(&out.p0);
        self.nodes.get_mut(node).star.push(id);
        self.edge_ends.push(DirectedEdge {
            edge: edge,
            direction: direction,
            sym: sym,
            node: node,
            p0: out.p0,
            p1: out.p1,
            quadrant: out.quadrant,
            in_result: false,
            next: None,
            prev: None,
        });
    }

    /// Adds an edge without DirectedEdges or nodes. It can be found with the
    /// `find_edge*` lookups but takes no part in any star.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<EdgeId> {
        self.check_mutable()?;
        self.check_edge(self.edges.len(), &edge)?;
        let id = EdgeId::from_index(self.edges.len());
        self.edges.push(edge);
        self.mark_populated();
        Ok(id)
    }

    /// Returns the node at `coord`, creating an isolated one if needed.
    pub fn add_coord(&mut self, coord: &Coord) -> Result<NodeId> {
        self.check_mutable()?;
        self.layout.check(coord)?;
        let id = self.nodes.add_coord(coord);
        self.mark_populated();
        Ok(id)
    }

    /// Replaces a node's label.
    pub fn label_node(&mut self, node: NodeId, label: Label) -> Result<()> {
        self.check_mutable()?;
        self.nodes.get_mut(node).label = label;
        Ok(())
    }

    /// Marks a DirectedEdge as part of (or not part of) a result. Allowed in
    /// any phase; relink with `link_result_directed_edges` to see the change.
    pub fn set_in_result(&mut self, edge_end: DirectedEdgeId, in_result: bool) {
        self.edge_ends[edge_end.index()].in_result = in_result;
    }

    /// The payload the NodeFactory made for `node`.
    pub fn node_data_mut(&mut self, node: NodeId) -> &mut F::Data {
        &mut self.nodes.get_mut(node).data
    }
}
