//! Classifies how two line segments meet.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::coord_set::{CoordCompare, OrdinateCompare};
use crate::error::Result;
use crate::geo::{orientation_index, Coord, Envelope, Layout, Orientation};

pub mod edge_set;

pub use self::edge_set::{EdgeSetIntersector, SegmentIntersector, SimpleEdgeSetIntersector};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntersectionKind {
    /// The segments don't meet.
    None,
    /// They meet in exactly one point.
    Point,
    /// They overlap along a sub-segment.
    Collinear,
}

/// What `line_intersects_line` found.
///
/// `points` holds nothing for None, one coordinate for Point and the two
/// ends of the shared sub-segment for Collinear.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineIntersection {
    kind: IntersectionKind,
    proper: bool,
    points: Vec<Coord>,
}

impl LineIntersection {
    fn none() -> LineIntersection {
        LineIntersection {
            kind: IntersectionKind::None,
            proper: false,
            points: vec![],
        }
    }

    fn point(p: Coord, proper: bool) -> LineIntersection {
        LineIntersection {
            kind: IntersectionKind::Point,
            proper: proper,
            points: vec![p],
        }
    }

    fn collinear(from: Coord, to: Coord) -> LineIntersection {
        LineIntersection {
            kind: IntersectionKind::Collinear,
            proper: false,
            points: vec![from, to],
        }
    }

    pub fn kind(&self) -> IntersectionKind {
        self.kind
    }

    pub fn has_intersection(&self) -> bool {
        self.kind != IntersectionKind::None
    }

    /// True when the segments cross at a single point that is not an
    /// endpoint of either.
    pub fn is_proper(&self) -> bool {
        self.proper
    }

    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    /// Is `p` (by x and y) one of the reported points? False when `p` has no
    /// x and y.
    pub fn is_intersection_point(&self, p: &Coord) -> bool {
        p.has_xy() && self.points.iter().any(|q| q.equals_xy(p))
    }
}

/// Computes the intersection of segments `p1`-`p2` and `q1`-`q2`.
///
/// Every input must have at least `layout.stride()` ordinates; reported
/// points have exactly that many. Ordinates past x and y are carried from
/// whichever endpoint is reported, or interpolated along `p1`-`p2` for a
/// crossing. When both segments have an endpoint at the reported point, the
/// one lower under OrdinateCompare is used.
pub fn line_intersects_line(
    layout: Layout,
    p1: &Coord,
    p2: &Coord,
    q1: &Coord,
    q2: &Coord,
) -> Result<LineIntersection> {
    for c in [p1, p2, q1, q2].iter() {
        layout.check(c)?;
    }
    let stride = layout.stride();

    let env_p = Envelope::of_segment(p1, p2);
    let env_q = Envelope::of_segment(q1, q2);
    if !env_p.intersects(&env_q) {
        return Ok(LineIntersection::none());
    }

    let pq1 = orientation_index(p1, p2, q1);
    let pq2 = orientation_index(p1, p2, q2);
    if same_side(pq1, pq2) {
        return Ok(LineIntersection::none());
    }

    let qp1 = orientation_index(q1, q2, p1);
    let qp2 = orientation_index(q1, q2, p2);
    if same_side(qp1, qp2) {
        return Ok(LineIntersection::none());
    }

    use self::Orientation::Collinear as On;

    if pq1 == On && pq2 == On && qp1 == On && qp2 == On {
        return Ok(collinear_intersection(stride, p1, p2, q1, q2, &env_p, &env_q));
    }

    if pq1 == On || pq2 == On || qp1 == On || qp2 == On {
        // An endpoint of one segment lies on the other. Prefer a point that is
        // an endpoint of both, so the answer is exact and symmetric.
        let touch = if p1.equals_xy(q1) {
            lower(p1, q1)
        } else if p1.equals_xy(q2) {
            lower(p1, q2)
        } else if p2.equals_xy(q1) {
            lower(p2, q1)
        } else if p2.equals_xy(q2) {
            lower(p2, q2)
        } else if pq1 == On {
            q1
        } else if pq2 == On {
            q2
        } else if qp1 == On {
            p1
        } else {
            p2
        };
        return Ok(LineIntersection::point(touch.truncated(stride), false));
    }

    let p = proper_intersection(stride, p1, p2, q1, q2, &env_p, &env_q);
    // Rounding can put the crossing exactly on an endpoint.
    if let Some(end) = [p1, p2, q1, q2].iter().find(|e| e.equals_xy(&p)) {
        return Ok(LineIntersection::point(end.truncated(stride), false));
    }
    Ok(LineIntersection::point(p, true))
}

fn same_side(a: Orientation, b: Orientation) -> bool {
    a.sign() * b.sign() > 0
}

/// Of two coordinates at the same x and y, the one to report.
fn lower<'a>(a: &'a Coord, b: &'a Coord) -> &'a Coord {
    if OrdinateCompare.is_less(b, a) {
        b
    } else {
        a
    }
}

fn collinear_intersection(
    stride: usize,
    p1: &Coord,
    p2: &Coord,
    q1: &Coord,
    q2: &Coord,
    env_p: &Envelope,
    env_q: &Envelope,
) -> LineIntersection {
    let mut env = *env_p;
    env.expand_to_include(env_q);
    let along_x = env.width() >= env.height();
    let key = |c: &Coord| if along_x { c.x() } else { c.y() };

    let (p_lo, p_hi) = if key(p1) <= key(p2) { (p1, p2) } else { (p2, p1) };
    let (q_lo, q_hi) = if key(q1) <= key(q2) { (q1, q2) } else { (q2, q1) };

    let lo = match key(q_lo).partial_cmp(&key(p_lo)) {
        Some(Ordering::Greater) => q_lo,
        Some(Ordering::Equal) => lower(p_lo, q_lo),
        _ => p_lo,
    };
    let hi = match key(q_hi).partial_cmp(&key(p_hi)) {
        Some(Ordering::Less) => q_hi,
        Some(Ordering::Equal) => lower(p_hi, q_hi),
        _ => p_hi,
    };

    if key(lo) > key(hi) {
        LineIntersection::none()
    } else if key(lo) == key(hi) {
        LineIntersection::point(lo.truncated(stride), false)
    } else {
        LineIntersection::collinear(lo.truncated(stride), hi.truncated(stride))
    }
}

/// The crossing point of two segments known to cross at interior points.
///
/// Works on coordinates moved close to the origin to keep precision, then
/// clamps the answer into the overlap of the two envelopes so rounding can't
/// push it off either segment's bounding box.
fn proper_intersection(
    stride: usize,
    p1: &Coord,
    p2: &Coord,
    q1: &Coord,
    q2: &Coord,
    env_p: &Envelope,
    env_q: &Envelope,
) -> Coord {
    let overlap = Envelope {
        min_x: env_p.min_x.max(env_q.min_x),
        min_y: env_p.min_y.max(env_q.min_y),
        max_x: env_p.max_x.min(env_q.max_x),
        max_y: env_p.max_y.min(env_q.max_y),
    };
    let mid_x = (overlap.min_x + overlap.max_x) / 2.0;
    let mid_y = (overlap.min_y + overlap.max_y) / 2.0;

    let (p1x, p1y) = (p1.x() - mid_x, p1.y() - mid_y);
    let (p2x, p2y) = (p2.x() - mid_x, p2.y() - mid_y);
    let (q1x, q1y) = (q1.x() - mid_x, q1.y() - mid_y);
    let (q2x, q2y) = (q2.x() - mid_x, q2.y() - mid_y);

    let (rx, ry) = (p2x - p1x, p2y - p1y);
    let (sx, sy) = (q2x - q1x, q2y - q1y);
    let denom = rx * sy - ry * sx;
    // A proper crossing means the segments aren't parallel, so denom != 0.
    let t = ((q1x - p1x) * sy - (q1y - p1y) * sx) / denom;

    let x = clamp(p1x + t * rx + mid_x, overlap.min_x, overlap.max_x);
    let y = clamp(p1y + t * ry + mid_y, overlap.min_y, overlap.max_y);

    let mut ordinates = Vec::with_capacity(stride);
    ordinates.push(x);
    ordinates.push(y);
    for i in 2..stride {
        ordinates.push(p1[i] + t * (p2[i] - p1[i]));
    }
    Coord(ordinates)
}

fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TopoError;

    fn c(x: f64, y: f64) -> Coord {
        Coord::xy(x, y)
    }

    fn xy(p1: (f64, f64), p2: (f64, f64), q1: (f64, f64), q2: (f64, f64)) -> LineIntersection {
        line_intersects_line(Layout::XY, &p1.into(), &p2.into(), &q1.into(), &q2.into()).unwrap()
    }

    #[test]
    fn collinear_overlap() {
        let li = xy((0.0, 0.0), (10.0, 0.0), (5.0, 0.0), (15.0, 0.0));
        assert_eq!(IntersectionKind::Collinear, li.kind());
        assert!(!li.is_proper());
        assert_eq!(&[c(5.0, 0.0), c(10.0, 0.0)], li.points());
    }

    #[test]
    fn collinear_overlap_reported_ascending_regardless_of_direction() {
        let li = xy((10.0, 0.0), (0.0, 0.0), (15.0, 0.0), (5.0, 0.0));
        assert_eq!(&[c(5.0, 0.0), c(10.0, 0.0)], li.points());
    }

    #[test]
    fn collinear_vertical_uses_y() {
        let li = xy((3.0, 0.0), (3.0, 10.0), (3.0, 20.0), (3.0, 4.0));
        assert_eq!(IntersectionKind::Collinear, li.kind());
        assert_eq!(&[c(3.0, 4.0), c(3.0, 10.0)], li.points());
    }

    #[test]
    fn collinear_disjoint() {
        let li = xy((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0));
        assert_eq!(IntersectionKind::None, li.kind());
        assert!(li.points().is_empty());
    }

    #[test]
    fn collinear_sharing_one_endpoint_is_a_point() {
        let li = xy((0.0, 0.0), (5.0, 0.0), (5.0, 0.0), (9.0, 0.0));
        assert_eq!(IntersectionKind::Point, li.kind());
        assert!(!li.is_proper());
        assert_eq!(&[c(5.0, 0.0)], li.points());
    }

    #[test]
    fn proper_crossing() {
        let li = xy((0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0));
        assert_eq!(IntersectionKind::Point, li.kind());
        assert!(li.is_proper());
        assert_eq!(&[c(5.0, 5.0)], li.points());
        assert!(li.is_intersection_point(&c(5.0, 5.0)));
        assert!(!li.is_intersection_point(&c(0.0, 0.0)));
    }

    #[test]
    fn touching_at_endpoint() {
        let li = xy((0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (10.0, 10.0));
        assert_eq!(IntersectionKind::Point, li.kind());
        assert!(!li.is_proper());
        assert_eq!(&[c(10.0, 0.0)], li.points());
    }

    #[test]
    fn t_junction() {
        // q1 lies inside p.
        let li = xy((0.0, 0.0), (10.0, 0.0), (4.0, 0.0), (4.0, 5.0));
        assert_eq!(IntersectionKind::Point, li.kind());
        assert!(!li.is_proper());
        assert_eq!(&[c(4.0, 0.0)], li.points());
    }

    #[test]
    fn shared_endpoint_z_is_the_same_either_way_round() {
        let (p1, p2) = (Coord::xyz(0.0, 0.0, 5.0), Coord::xyz(10.0, 0.0, 0.0));
        let (q1, q2) = (Coord::xyz(0.0, 0.0, 3.0), Coord::xyz(0.0, 10.0, 0.0));
        let a = line_intersects_line(Layout::XYZ, &p1, &p2, &q1, &q2).unwrap();
        let b = line_intersects_line(Layout::XYZ, &q1, &q2, &p1, &p2).unwrap();
        assert_eq!(&[Coord::xyz(0.0, 0.0, 3.0)], a.points());
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn collinear_shared_end_z_is_the_same_either_way_round() {
        let (p1, p2) = (Coord::xyz(0.0, 0.0, 1.0), Coord::xyz(10.0, 0.0, 1.0));
        let (q1, q2) = (Coord::xyz(5.0, 0.0, 2.0), Coord::xyz(10.0, 0.0, 9.0));
        let a = line_intersects_line(Layout::XYZ, &p1, &p2, &q1, &q2).unwrap();
        let b = line_intersects_line(Layout::XYZ, &q1, &q2, &p1, &p2).unwrap();
        assert_eq!(&[Coord::xyz(5.0, 0.0, 2.0), Coord::xyz(10.0, 0.0, 1.0)], a.points());
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn crossing_rounded_onto_an_endpoint_is_not_proper() {
        // q1 sits on p's line up to rounding; the computed crossing can come
        // out exactly equal to it.
        let (p1, p2) = (c(0.0, 0.0), c(3.0, 1.0));
        for k in 1..22 {
            let x = k as f64 / 7.0;
            let (q1, q2) = (c(x, x / 3.0), c(x, -1.0));
            let li = line_intersects_line(Layout::XY, &p1, &p2, &q1, &q2).unwrap();
            if !li.has_intersection() {
                continue;
            }
            assert_eq!(IntersectionKind::Point, li.kind());
            let at_endpoint = [&p1, &p2, &q1, &q2].iter().any(|e| li.is_intersection_point(e));
            assert_eq!(!at_endpoint, li.is_proper(), "x = {}", x);
        }
    }

    #[test]
    fn short_point_is_never_an_intersection_point() {
        let li = xy((0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0));
        assert!(!li.is_intersection_point(&Coord(vec![5.0])));
        assert!(!li.is_intersection_point(&Coord(vec![])));
    }

    #[test]
    fn disjoint() {
        assert!(!xy((0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)).has_intersection());
        // Envelopes overlap but the segments don't.
        assert!(!xy((0.0, 0.0), (10.0, 10.0), (6.0, 0.0), (10.0, 4.0)).has_intersection());
    }

    #[test]
    fn symmetric_for_examples() {
        let cases = [
            ((0.0, 0.0), (10.0, 0.0), (5.0, 0.0), (15.0, 0.0)),
            ((0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)),
            ((0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (10.0, 10.0)),
            ((0.0, 0.0), (10.0, 0.0), (4.0, 0.0), (4.0, 5.0)),
        ];
        for &(p1, p2, q1, q2) in cases.iter() {
            let a = xy(p1, p2, q1, q2);
            let b = xy(q1, q2, p1, p2);
            assert_eq!(a.kind(), b.kind());
            assert_eq!(a.is_proper(), b.is_proper());
            assert_eq!(a.points(), b.points());
        }
    }

    #[test]
    fn interpolates_z_along_first_segment() {
        let li = line_intersects_line(
            Layout::XYZ,
            &Coord::xyz(0.0, 0.0, 0.0),
            &Coord::xyz(10.0, 10.0, 100.0),
            &Coord::xyz(0.0, 10.0, 7.0),
            &Coord::xyz(10.0, 0.0, 7.0),
        )
        .unwrap();
        assert_eq!(&[Coord::xyz(5.0, 5.0, 50.0)], li.points());
    }

    #[test]
    fn crossing_an_axis_parallel_segment_stays_on_it() {
        let li = xy((-5.0, -1.0), (4.0, 2.0), (1.0, -3.0), (1.0, 5.0));
        assert!(li.is_proper());
        assert_eq!(1.0, li.points()[0].x());
    }

    #[test]
    fn far_from_origin() {
        let o = 1e9;
        let li = xy((o, o), (o + 10.0, o + 10.0), (o, o + 10.0), (o + 10.0, o));
        assert!(li.is_proper());
        assert_eq!(&[c(o + 5.0, o + 5.0)], li.points());
    }

    #[test]
    fn rejects_short_coordinates() {
        assert_eq!(
            Err(TopoError::MalformedCoordinate { len: 2, stride: 3 }),
            line_intersects_line(Layout::XYZ, &c(0.0, 0.0), &c(1.0, 1.0), &c(0.0, 1.0), &c(1.0, 0.0))
        );
    }
}
