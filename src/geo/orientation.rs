//! Robust orientation predicate.
//!
//! Near-collinear triples are where a naive cross product silently flips sign,
//! and a flipped sign is enough to link a star in the wrong order. So we do
//! what the well-known robust predicates do: evaluate in f64, keep the result
//! if it clears an error bound, and otherwise redo the arithmetic in
//! double-double (~106 bits of mantissa).

use serde::{Deserialize, Serialize};

use super::Coord;

/// Which side of the directed line p1->p2 a point lies on.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    fn from_sign(sign: i32) -> Orientation {
        match sign {
            s if s > 0 => Orientation::CounterClockwise,
            s if s < 0 => Orientation::Clockwise,
            _ => Orientation::Collinear,
        }
    }

    /// -1, 0 or 1.
    pub fn sign(self) -> i32 {
        match self {
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
            Orientation::CounterClockwise => 1,
        }
    }
}

/// Relative error bound of the f64 filter.
const DP_SAFE_EPSILON: f64 = 1e-15;

/// Returns the orientation of `q` relative to the directed line `p1`->`p2`:
/// CounterClockwise when `q` is to the left.
///
/// Only x and y are read.
pub fn orientation_index(p1: &Coord, p2: &Coord, q: &Coord) -> Orientation {
    if let Some(o) = orientation_filter(p1, p2, q) {
        return o;
    }

    let dx1 = Dd::diff(p2.x(), p1.x());
    let dy1 = Dd::diff(p2.y(), p1.y());
    let dx2 = Dd::diff(q.x(), p2.x());
    let dy2 = Dd::diff(q.y(), p2.y());

    let det = dx1.mul(dy2).sub(dy1.mul(dx2));
    Orientation::from_sign(det.signum())
}

/// The cheap f64 evaluation. `None` means "too close to call".
fn orientation_filter(pa: &Coord, pb: &Coord, pc: &Coord) -> Option<Orientation> {
    let detleft = (pa.x() - pc.x()) * (pb.y() - pc.y());
    let detright = (pa.y() - pc.y()) * (pb.x() - pc.x());
    let det = detleft - detright;

    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return Some(Orientation::from_sign(sign_of(det)));
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return Some(Orientation::from_sign(sign_of(det)));
        }
        -detleft - detright
    } else {
        return Some(Orientation::from_sign(sign_of(det)));
    };

    let errbound = DP_SAFE_EPSILON * detsum;
    if det >= errbound || -det >= errbound {
        return Some(Orientation::from_sign(sign_of(det)));
    }

    None
}

// NaN is neither side.
fn sign_of(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Unevaluated sum hi + lo with |lo| <= ulp(hi)/2.
#[derive(Clone, Copy, Debug)]
struct Dd {
    hi: f64,
    lo: f64,
}

fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let err = b - (s - a);
    (s, err)
}

fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    (p, a.mul_add(b, -p))
}

impl Dd {
    /// a - b, exactly.
    fn diff(a: f64, b: f64) -> Dd {
        let (hi, lo) = two_sum(a, -b);
        Dd { hi, lo }
    }

    fn add(self, other: Dd) -> Dd {
        let (s, e) = two_sum(self.hi, other.hi);
        let e = e + self.lo + other.lo;
        let (hi, lo) = quick_two_sum(s, e);
        Dd { hi, lo }
    }

    fn neg(self) -> Dd {
        Dd { hi: -self.hi, lo: -self.lo }
    }

    fn sub(self, other: Dd) -> Dd {
        self.add(other.neg())
    }

    fn mul(self, other: Dd) -> Dd {
        let (p, e) = two_prod(self.hi, other.hi);
        let e = e + (self.hi * other.lo + self.lo * other.hi);
        let (hi, lo) = quick_two_sum(p, e);
        Dd { hi, lo }
    }

    fn signum(self) -> i32 {
        match sign_of(self.hi) {
            0 => sign_of(self.lo),
            s => s,
        }
    }
}
