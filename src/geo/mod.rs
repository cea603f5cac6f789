use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopoError};

pub mod location;
pub mod orientation;
pub mod quadrant;

pub use self::location::{Location, Position};
pub use self::orientation::{orientation_index, Orientation};
pub use self::quadrant::Quadrant;

/// Which ordinates each coordinate carries, in order.
///
/// One Layout applies to a whole operation: every Coord handed to a CoordSet,
/// a classifier call or a PlanarGraph must have at least `stride()` ordinates.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    XY,
    XYZ,
    XYM,
    XYZM,
}

impl Layout {
    /// Number of ordinates per coordinate.
    pub fn stride(self) -> usize {
        match self {
            Layout::XY => 2,
            Layout::XYZ | Layout::XYM => 3,
            Layout::XYZM => 4,
        }
    }

    pub fn z_index(self) -> Option<usize> {
        match self {
            Layout::XYZ | Layout::XYZM => Some(2),
            Layout::XY | Layout::XYM => None,
        }
    }

    pub fn m_index(self) -> Option<usize> {
        match self {
            Layout::XYM => Some(2),
            Layout::XYZM => Some(3),
            Layout::XY | Layout::XYZ => None,
        }
    }

    /// Fails with MalformedCoordinate when `coord` is too short for this
    /// layout.
    pub fn check(self, coord: &Coord) -> Result<()> {
        if coord.len() < self.stride() {
            return Err(TopoError::MalformedCoordinate {
                len: coord.len(),
                stride: self.stride(),
            });
        }
        Ok(())
    }
}

impl Default for Layout {
    fn default() -> Layout {
        Layout::XY
    }
}

/// A position in the plane: x, y, then whatever else the Layout says.
///
/// Coord is a value. Whether two Coords are "the same" is up to whoever is
/// asking: see `CoordCompare`. The derived PartialEq compares every ordinate
/// with f64 `==` and is meant for tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coord(pub Vec<f64>);

impl Coord {
    pub fn xy(x: f64, y: f64) -> Coord {
        Coord(vec![x, y])
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Coord {
        Coord(vec![x, y, z])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    /// Whether there are enough ordinates for `x()` and `y()`.
    pub fn has_xy(&self) -> bool {
        self.0.len() >= 2
    }

    /// True when x and y match exactly; other ordinates are ignored.
    pub fn equals_xy(&self, other: &Coord) -> bool {
        self.x() == other.x() && self.y() == other.y()
    }

    /// Copies the first `stride` ordinates; the caller has checked the length.
    pub fn truncated(&self, stride: usize) -> Coord {
        Coord(self.0[..stride].to_vec())
    }
}

impl Deref for Coord {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Coord {
    fn from(ordinates: Vec<f64>) -> Coord {
        Coord(ordinates)
    }
}

impl From<[f64; 2]> for Coord {
    fn from([x, y]: [f64; 2]) -> Coord {
        Coord::xy(x, y)
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Coord {
        Coord::xy(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

/// Axis-aligned bounding box of some points, in x and y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Envelope {
    pub fn of_segment(p1: &Coord, p2: &Coord) -> Envelope {
        Envelope {
            min_x: p1.x().min(p2.x()),
            min_y: p1.y().min(p2.y()),
            max_x: p1.x().max(p2.x()),
            max_y: p1.y().max(p2.y()),
        }
    }

    pub fn intersects(&self, other: &Envelope) -> bool {
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    pub fn expand_to_include(&mut self, other: &Envelope) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_per_layout() {
        assert_eq!(2, Layout::XY.stride());
        assert_eq!(3, Layout::XYZ.stride());
        assert_eq!(3, Layout::XYM.stride());
        assert_eq!(4, Layout::XYZM.stride());
        assert_eq!(Some(2), Layout::XYM.m_index());
        assert_eq!(None, Layout::XYM.z_index());
    }

    #[test]
    fn check_rejects_short_coord() {
        assert_eq!(
            Err(TopoError::MalformedCoordinate { len: 2, stride: 3 }),
            Layout::XYZ.check(&Coord::xy(1.0, 2.0))
        );
        assert_eq!(Ok(()), Layout::XY.check(&Coord::xyz(1.0, 2.0, 3.0)));
    }

    #[test]
    fn equals_xy_ignores_z() {
        assert!(Coord::xyz(1.0, 2.0, 3.0).equals_xy(&Coord::xyz(1.0, 2.0, 4.0)));
        assert!(!Coord::xy(1.0, 2.0).equals_xy(&Coord::xy(1.0, 2.5)));
    }

    #[test]
    fn has_xy() {
        assert!(Coord::xy(1.0, 2.0).has_xy());
        assert!(!Coord(vec![1.0]).has_xy());
        assert!(!Coord(vec![]).has_xy());
    }

    #[test]
    fn display() {
        assert_eq!("(1,2.5)", format!("{}", Coord::xy(1.0, 2.5)));
    }

    #[test]
    fn envelope_touching_counts_as_intersecting() {
        let a = Envelope::of_segment(&Coord::xy(0.0, 0.0), &Coord::xy(10.0, 0.0));
        let b = Envelope::of_segment(&Coord::xy(10.0, 0.0), &Coord::xy(10.0, 10.0));
        let c = Envelope::of_segment(&Coord::xy(11.0, 0.0), &Coord::xy(12.0, 10.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
