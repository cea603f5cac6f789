//! Angular ordering of the DirectedEdges around a node.

use std::cmp::Ordering;

use log::trace;

use super::types::{DirectedEdge, DirectedEdgeId, NodeId};
use crate::geo::{orientation_index, Coord, Orientation, Quadrant};

/// Orders two edge-ends leaving the node at `origin` by angle,
/// counter-clockwise from the positive x axis.
///
/// Directions are measured from `origin`, not from each edge-end's own `p0`:
/// with a tolerant comparator those can differ slightly. Quadrant first, then
/// the robust orientation test. Two edge-ends heading exactly the same way
/// compare Equal.
pub fn compare_direction(origin: &Coord, a: &DirectedEdge, b: &DirectedEdge) -> Ordering {
    quadrant_from(origin, a).cmp(&quadrant_from(origin, b)).then_with(|| {
        match orientation_index(origin, &a.p1, &b.p1) {
            Orientation::CounterClockwise => Ordering::Less,
            Orientation::Clockwise => Ordering::Greater,
            Orientation::Collinear => Ordering::Equal,
        }
    })
}

// p1 can only coincide with origin under a tolerant comparator.
fn quadrant_from(origin: &Coord, de: &DirectedEdge) -> Quadrant {
    Quadrant::of_segment(origin, &de.p1).unwrap_or(de.quadrant)
}

/// Sorts `star` around `origin` by angle. Ties go to the lower id, so the
/// order doesn't depend on how the star was built.
pub(crate) fn sort_star(star: &mut [DirectedEdgeId], origin: &Coord, ends: &[DirectedEdge]) {
    star.sort_by(|&a, &b| {
        compare_direction(origin, &ends[a.index()], &ends[b.index()]).then(a.cmp(&b))
    });
}

/// Points each member of the (sorted) star at its neighbours, cyclically.
///
/// With `result_only`, members are the edge-ends marked `in_result`; the rest
/// get no neighbours. Returns how many were linked.
pub(crate) fn link_star(
    node: NodeId,
    star: &[DirectedEdgeId],
    ends: &mut [DirectedEdge],
    result_only: bool,
) -> usize {
    let members: Vec<DirectedEdgeId> = star
        .iter()
        .copied()
        .filter(|&id| !result_only || ends[id.index()].in_result)
        .collect();

    for &id in star {
        let de = &mut ends[id.index()];
        de.next = None;
        de.prev = None;
    }

    let n = members.len();
    for (i, &id) in members.iter().enumerate() {
        let de = &mut ends[id.index()];
        de.next = Some(members[(i + 1) % n]);
        de.prev = Some(members[(i + n - 1) % n]);
    }

    trace!("linked {} of {} edge-ends at {:?}", n, star.len(), node);
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::types::{Direction, EdgeId};

    fn origin() -> Coord {
        Coord::xy(0.0, 0.0)
    }

    fn end(id: u32, dx: f64, dy: f64, in_result: bool) -> DirectedEdge {
        end_from(id, (0.0, 0.0), (dx, dy), in_result)
    }

    fn end_from(id: u32, p0: (f64, f64), p1: (f64, f64), in_result: bool) -> DirectedEdge {
        let p0 = Coord::from(p0);
        let p1 = Coord::from(p1);
        DirectedEdge {
            edge: EdgeId(id),
            direction: Direction::Forward,
            sym: DirectedEdgeId(id),
            node: NodeId(0),
            quadrant: Quadrant::of_segment(&p0, &p1).unwrap(),
            p0: p0,
            p1: p1,
            in_result: in_result,
            next: None,
            prev: None,
        }
    }

    #[test]
    fn compare_within_quadrant() {
        let shallow = end(0, 2.0, 1.0, false);
        let steep = end(1, 1.0, 2.0, false);
        assert_eq!(Ordering::Less, compare_direction(&origin(), &shallow, &steep));
        assert_eq!(Ordering::Greater, compare_direction(&origin(), &steep, &shallow));
        assert_eq!(
            Ordering::Equal,
            compare_direction(&origin(), &shallow, &end(2, 4.0, 2.0, false))
        );
    }

    #[test]
    fn compare_measures_from_the_node() {
        // b leaves from (0,0.9), which a tolerant node map put at (0,0).
        let a = end_from(0, (0.0, 0.0), (1.0, 1.0), false);
        let b = end_from(1, (0.0, 0.9), (2.0, 1.9), false);
        assert_eq!(Ordering::Greater, compare_direction(&origin(), &a, &b));
        assert_eq!(Ordering::Less, compare_direction(&origin(), &b, &a));

        let ends = vec![a, b];
        let mut star = vec![DirectedEdgeId(0), DirectedEdgeId(1)];
        sort_star(&mut star, &origin(), &ends);
        assert_eq!(vec![DirectedEdgeId(1), DirectedEdgeId(0)], star);
    }

    #[test]
    fn sort_and_link() {
        // South, east, north-west, north.
        let mut ends = vec![
            end(0, 0.0, -1.0, true),
            end(1, 1.0, 0.0, false),
            end(2, -1.0, 1.0, true),
            end(3, 0.0, 1.0, true),
        ];
        let mut star: Vec<DirectedEdgeId> = (0..4).map(DirectedEdgeId).collect();
        sort_star(&mut star, &origin(), &ends);
        assert_eq!(
            vec![DirectedEdgeId(1), DirectedEdgeId(3), DirectedEdgeId(2), DirectedEdgeId(0)],
            star
        );

        assert_eq!(4, link_star(NodeId(0), &star, &mut ends, false));
        assert_eq!(Some(DirectedEdgeId(3)), ends[1].next);
        assert_eq!(Some(DirectedEdgeId(1)), ends[0].next);
        assert_eq!(Some(DirectedEdgeId(0)), ends[1].prev);

        assert_eq!(3, link_star(NodeId(0), &star, &mut ends, true));
        assert_eq!(None, ends[1].next);
        assert_eq!(None, ends[1].prev);
        assert_eq!(Some(DirectedEdgeId(3)), ends[0].next);
        assert_eq!(Some(DirectedEdgeId(0)), ends[3].prev);
    }

    #[test]
    fn lone_edge_end_links_to_itself() {
        let mut ends = vec![end(0, 1.0, 1.0, false)];
        let star = vec![DirectedEdgeId(0)];
        link_star(NodeId(0), &star, &mut ends, false);
        assert_eq!(Some(DirectedEdgeId(0)), ends[0].next);
        assert_eq!(Some(DirectedEdgeId(0)), ends[0].prev);
    }

    #[test]
    fn ties_broken_by_id() {
        let ends = vec![end(0, 2.0, 0.0, false), end(1, 1.0, 0.0, false)];
        let mut star = vec![DirectedEdgeId(1), DirectedEdgeId(0)];
        sort_star(&mut star, &origin(), &ends);
        assert_eq!(vec![DirectedEdgeId(0), DirectedEdgeId(1)], star);
    }
}
