use serde::{Deserialize, Serialize};

use super::label::Label;
use crate::geo::{Coord, Quadrant};

// There are a few ways to represent a graph where every edge-end points at
// its twin, its node and its neighbours in the star:
//
// * Rc/RefCell: cycles everywhere, so leaks unless we add Weak in the right
//               places, and every read is a borrow check at runtime.
// * Pointers: needs unsafe{}; moving the graph invalidates everything.
// * Array indexes: easy to reason about, small, trivially serializable. The
//                  graph owns three Vecs and hands out ids into them.
//
// We use array indexes. Ids are only created by the graph that owns the
// arena. Indexing a graph with another graph's id is a caller bug and panics
// like slice indexing does.

macro_rules! arena_id {
    ($name:ident, $what:literal) => {
        #[doc = concat!("Index of ", $what, " in its graph's arena.")]
        #[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }

            pub(crate) fn from_index(i: usize) -> $name {
                $name(i as u32)
            }
        }
    };
}

arena_id!(NodeId, "a Node");
arena_id!(EdgeId, "an Edge");
arena_id!(DirectedEdgeId, "a DirectedEdge");

/// Which way a DirectedEdge walks its Edge's coordinates.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// A point where edges meet.
///
/// `star` lists the DirectedEdges leaving this node. Until the graph is
/// linked it's in insertion order; after, it's in angular order
/// counter-clockwise from the positive x axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node<D> {
    pub coord: Coord,
    pub label: Label,
    pub star: Vec<DirectedEdgeId>,
    pub data: D,
}

impl<D> Node<D> {
    pub fn degree(&self) -> usize {
        self.star.len()
    }
}

/// A polyline between two nodes, with its topological label.
///
/// The label's Left and Right are as seen walking from the first coordinate
/// to the last.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub coords: Vec<Coord>,
    pub label: Label,
    pub(crate) ends: Option<[DirectedEdgeId; 2]>,
}

impl Edge {
    pub fn new(coords: Vec<Coord>) -> Edge {
        Edge::with_label(coords, Label::new())
    }

    pub fn with_label(coords: Vec<Coord>, label: Label) -> Edge {
        Edge {
            coords: coords,
            label: label,
            ends: None,
        }
    }

    /// The Forward and Backward DirectedEdges, once the edge is in a graph
    /// through `add_edges`.
    pub fn ends(&self) -> Option<[DirectedEdgeId; 2]> {
        self.ends
    }

    pub fn start(&self) -> Option<&Coord> {
        self.coords.first()
    }

    pub fn end(&self) -> Option<&Coord> {
        self.coords.last()
    }

    pub fn is_closed(&self) -> bool {
        match (self.start(), self.end()) {
            (Some(a), Some(b)) => self.coords.len() > 1 && a.equals_xy(b),
            _ => false,
        }
    }
}

/// One of the two ways along an Edge.
///
/// `p0` is where it leaves `node`; `p1` is the first coordinate after that
/// which differs from `p0`, so the direction is well defined even when an
/// edge repeats its first vertex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectedEdge {
    pub edge: EdgeId,
    pub direction: Direction,
    /// The same edge walked the other way.
    pub sym: DirectedEdgeId,
    pub node: NodeId,
    pub p0: Coord,
    pub p1: Coord,
    pub quadrant: Quadrant,
    pub in_result: bool,
    /// Neighbours in the origin node's star. None until linked, and None for
    /// edge-ends a result-only link left out.
    pub next: Option<DirectedEdgeId>,
    pub prev: Option<DirectedEdgeId>,
}

impl DirectedEdge {
    pub fn is_forward(&self) -> bool {
        self.direction == Direction::Forward
    }

    pub fn dx(&self) -> f64 {
        self.p1.x() - self.p0.x()
    }

    pub fn dy(&self) -> f64 {
        self.p1.y() - self.p0.y()
    }
}

/// How far construction has got.
///
/// Empty -> Populated when the first edge or node goes in; -> Linked on the
/// first link call. Once Linked, nodes, edges and labels are frozen.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphPhase {
    Empty,
    Populated,
    Linked,
}
