//! Finding every intersection among sets of edges.
//!
//! An edge here is a polyline: a slice of at least two coordinates. The
//! intersector walks candidate segment pairs and hands each one to a
//! SegmentIntersector, which classifies it and collects the points where new
//! nodes will be needed.

use itertools::Itertools;
use log::debug;

use super::{line_intersects_line, LineIntersection};
use crate::coord_set::{CoordCompare, CoordSet, XyCompare};
use crate::error::Result;
use crate::geo::{Coord, Envelope, Layout};

/// Strategy for enumerating segment pairs.
pub trait EdgeSetIntersector {
    /// Every pair of segments within `edges`, each edge against itself too.
    fn compute_self_intersections<E, C>(&self, edges: &[E], si: &mut SegmentIntersector<C>) -> Result<()>
    where
        E: AsRef<[Coord]>,
        C: CoordCompare;

    /// Every segment of `a` against every segment of `b`.
    fn compute_intersections<E, C>(&self, a: &[E], b: &[E], si: &mut SegmentIntersector<C>) -> Result<()>
    where
        E: AsRef<[Coord]>,
        C: CoordCompare;
}

/// Checks every pair, with an envelope test in front. Quadratic, and fine
/// for the edge counts a test or a small overlay produces.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleEdgeSetIntersector;

impl SimpleEdgeSetIntersector {
    fn edge_pair<C: CoordCompare>(
        &self,
        i0: usize,
        e0: &[Coord],
        i1: usize,
        e1: &[Coord],
        same_set: bool,
        si: &mut SegmentIntersector<C>,
    ) -> Result<()> {
        for (s0, (a0, a1)) in e0.iter().tuple_windows().enumerate() {
            let env0 = Envelope::of_segment(a0, a1);
            for (s1, (b0, b1)) in e1.iter().tuple_windows().enumerate() {
                if same_set && i0 == i1 && s1 <= s0 {
                    continue;
                }
                if !env0.intersects(&Envelope::of_segment(b0, b1)) {
                    continue;
                }
                si.add_intersections(
                    SegmentRef { edge: i0, segment: s0, coords: e0 },
                    SegmentRef { edge: i1, segment: s1, coords: e1 },
                    same_set,
                )?;
            }
        }
        Ok(())
    }
}

impl EdgeSetIntersector for SimpleEdgeSetIntersector {
    fn compute_self_intersections<E, C>(&self, edges: &[E], si: &mut SegmentIntersector<C>) -> Result<()>
    where
        E: AsRef<[Coord]>,
        C: CoordCompare,
    {
        for (i0, e0) in edges.iter().enumerate() {
            for (i1, e1) in edges.iter().enumerate().skip(i0) {
                self.edge_pair(i0, e0.as_ref(), i1, e1.as_ref(), true, si)?;
            }
        }
        debug!(
            "self intersections: {} edges, {} segment tests, {} proper",
            edges.len(),
            si.n_tests(),
            si.n_proper()
        );
        Ok(())
    }

    fn compute_intersections<E, C>(&self, a: &[E], b: &[E], si: &mut SegmentIntersector<C>) -> Result<()>
    where
        E: AsRef<[Coord]>,
        C: CoordCompare,
    {
        for (i0, e0) in a.iter().enumerate() {
            for (i1, e1) in b.iter().enumerate() {
                self.edge_pair(i0, e0.as_ref(), i1, e1.as_ref(), false, si)?;
            }
        }
        debug!(
            "intersections: {}x{} edges, {} segment tests, {} proper",
            a.len(),
            b.len(),
            si.n_tests(),
            si.n_proper()
        );
        Ok(())
    }
}

/// One segment: `coords[segment]` to `coords[segment + 1]` of edge `edge`.
#[derive(Clone, Copy, Debug)]
pub struct SegmentRef<'a> {
    pub edge: usize,
    pub segment: usize,
    pub coords: &'a [Coord],
}

impl<'a> SegmentRef<'a> {
    fn start(&self) -> &'a Coord {
        &self.coords[self.segment]
    }

    fn end(&self) -> &'a Coord {
        &self.coords[self.segment + 1]
    }
}

/// Classifies segment pairs and gathers the intersection points.
pub struct SegmentIntersector<C = XyCompare> {
    layout: Layout,
    n_tests: usize,
    n_proper: usize,
    n_intersections: usize,
    nodes: CoordSet<C>,
}

impl SegmentIntersector<XyCompare> {
    pub fn xy() -> SegmentIntersector<XyCompare> {
        SegmentIntersector::new(Layout::XY, XyCompare)
    }
}

impl<C: CoordCompare> SegmentIntersector<C> {
    pub fn new(layout: Layout, compare: C) -> SegmentIntersector<C> {
        SegmentIntersector {
            layout: layout,
            n_tests: 0,
            n_proper: 0,
            n_intersections: 0,
            nodes: CoordSet::new(layout, compare),
        }
    }

    pub fn n_tests(&self) -> usize {
        self.n_tests
    }

    pub fn n_proper(&self) -> usize {
        self.n_proper
    }

    /// Intersections found, not counting where consecutive segments of one
    /// edge meet.
    pub fn n_intersections(&self) -> usize {
        self.n_intersections
    }

    pub fn has_proper_intersection(&self) -> bool {
        self.n_proper > 0
    }

    /// Distinct intersection points found so far, in ascending order.
    pub fn nodes(&self) -> &CoordSet<C> {
        &self.nodes
    }

    pub fn into_nodes(self) -> CoordSet<C> {
        self.nodes
    }

    /// Classifies one segment pair and records what it finds.
    ///
    /// `same_set` says both segments come from the same edge list, so a
    /// segment meeting its neighbour in the same edge isn't news.
    pub fn add_intersections(&mut self, a: SegmentRef, b: SegmentRef, same_set: bool) -> Result<LineIntersection> {
        self.n_tests += 1;
        let li = line_intersects_line(self.layout, a.start(), a.end(), b.start(), b.end())?;
        if !li.has_intersection() {
            return Ok(li);
        }
        if same_set && is_trivial(&a, &b, &li) {
            return Ok(li);
        }

        self.n_intersections += 1;
        if li.is_proper() {
            self.n_proper += 1;
        }
        for p in li.points() {
            self.nodes.insert(p.clone())?;
        }
        Ok(li)
    }
}

/// Two segments of the same edge that only touch where they join.
fn is_trivial(a: &SegmentRef, b: &SegmentRef, li: &LineIntersection) -> bool {
    if a.edge != b.edge || li.points().len() != 1 || li.is_proper() {
        return false;
    }
    let diff = if a.segment > b.segment {
        a.segment - b.segment
    } else {
        b.segment - a.segment
    };
    if diff == 1 {
        return true;
    }
    // First and last segment of a closed ring also join.
    let n_segments = a.coords.len() - 1;
    let closed = a.coords[0].equals_xy(&a.coords[n_segments]);
    closed && diff == n_segments - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord_set::ToleranceCompare;

    fn line(points: &[(f64, f64)]) -> Vec<Coord> {
        points.iter().map(|&p| Coord::from(p)).collect()
    }

    #[test]
    fn crossing_edges() {
        let a = vec![line(&[(0.0, 0.0), (10.0, 10.0)])];
        let b = vec![line(&[(0.0, 10.0), (10.0, 0.0)]), line(&[(20.0, 0.0), (30.0, 0.0)])];
        let mut si = SegmentIntersector::xy();
        SimpleEdgeSetIntersector.compute_intersections(&a, &b, &mut si).unwrap();
        assert_eq!(1, si.n_tests());
        assert_eq!(1, si.n_proper());
        assert_eq!(vec![5.0, 5.0], si.nodes().to_flat_vec());
    }

    #[test]
    fn self_intersections_skip_adjacent_segments() {
        // A zigzag that never crosses itself.
        let edges = vec![line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)])];
        let mut si = SegmentIntersector::xy();
        SimpleEdgeSetIntersector.compute_self_intersections(&edges, &mut si).unwrap();
        assert_eq!(0, si.n_intersections());
        assert!(si.nodes().is_empty());
    }

    #[test]
    fn self_intersections_skip_ring_closure() {
        let ring = vec![line(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)])];
        let mut si = SegmentIntersector::xy();
        SimpleEdgeSetIntersector.compute_self_intersections(&ring, &mut si).unwrap();
        assert_eq!(0, si.n_intersections());
    }

    #[test]
    fn self_intersections_find_bowtie() {
        let bowtie = vec![line(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0), (0.0, 0.0)])];
        let mut si = SegmentIntersector::xy();
        SimpleEdgeSetIntersector.compute_self_intersections(&bowtie, &mut si).unwrap();
        assert!(si.has_proper_intersection());
        assert_eq!(vec![2.0, 2.0], si.nodes().to_flat_vec());
    }

    #[test]
    fn self_intersections_between_edges_include_shared_endpoints() {
        let edges = vec![
            line(&[(0.0, 0.0), (5.0, 0.0)]),
            line(&[(5.0, 0.0), (5.0, 5.0)]),
            line(&[(2.0, -1.0), (2.0, 1.0)]),
        ];
        let mut si = SegmentIntersector::xy();
        SimpleEdgeSetIntersector.compute_self_intersections(&edges, &mut si).unwrap();
        assert_eq!(1, si.n_proper());
        assert_eq!(vec![2.0, 0.0, 5.0, 0.0], si.into_nodes().to_flat_vec());
    }

    #[test]
    fn nodes_merge_under_tolerance() {
        let a = vec![line(&[(0.0, 0.0), (10.0, 0.0)])];
        let b = vec![line(&[(5.0, -1.0), (5.0, 1.0)]), line(&[(5.001, -1.0), (5.001, 1.0)])];
        let mut si = SegmentIntersector::new(Layout::XY, ToleranceCompare::new(0.01));
        SimpleEdgeSetIntersector.compute_intersections(&a, &b, &mut si).unwrap();
        assert_eq!(2, si.n_proper());
        assert_eq!(1, si.nodes().len());
    }
}
