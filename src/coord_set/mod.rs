//! Sets of coordinates, ordered and deduplicated by a pluggable comparator.
//!
//! The comparator decides identity: `XyCompare` treats two coordinates with
//! the same x and y as the same point even when their z differs, which is
//! what node lookup in a planar graph wants.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TopoError};
use crate::geo::{Coord, Layout};

pub mod tree;

pub use self::tree::TreeMap;

/// A total order over coordinates.
///
/// Implementations must agree with themselves: exactly one of `is_equals(a, b)`,
/// `is_less(a, b)` and `is_less(b, a)` holds for any pair the set will see.
pub trait CoordCompare {
    fn is_equals(&self, a: &Coord, b: &Coord) -> bool;
    fn is_less(&self, a: &Coord, b: &Coord) -> bool;
}

/// Exact comparison on x, then y. Other ordinates are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct XyCompare;

impl CoordCompare for XyCompare {
    fn is_equals(&self, a: &Coord, b: &Coord) -> bool {
        a.x() == b.x() && a.y() == b.y()
    }

    fn is_less(&self, a: &Coord, b: &Coord) -> bool {
        a.x() < b.x() || (a.x() == b.x() && a.y() < b.y())
    }
}

/// Exact lexicographic comparison over every ordinate both coordinates have.
/// A shorter coordinate sorts first when it's a prefix of the longer one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdinateCompare;

impl CoordCompare for OrdinateCompare {
    fn is_equals(&self, a: &Coord, b: &Coord) -> bool {
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(u, v)| u == v)
    }

    fn is_less(&self, a: &Coord, b: &Coord) -> bool {
        for (u, v) in a.iter().zip(b.iter()) {
            if u < v {
                return true;
            }
            if u > v {
                return false;
            }
        }
        a.len() < b.len()
    }
}

/// x/y comparison where ordinates within `tolerance` count as equal.
///
/// This is only a total order while the points in a set are farther apart than
/// `tolerance` (or exactly within it). Snap first if that doesn't hold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToleranceCompare {
    pub tolerance: f64,
}

impl ToleranceCompare {
    pub fn new(tolerance: f64) -> ToleranceCompare {
        ToleranceCompare { tolerance: tolerance.abs() }
    }
}

impl CoordCompare for ToleranceCompare {
    fn is_equals(&self, a: &Coord, b: &Coord) -> bool {
        (a.x() - b.x()).abs() <= self.tolerance && (a.y() - b.y()).abs() <= self.tolerance
    }

    fn is_less(&self, a: &Coord, b: &Coord) -> bool {
        if (a.x() - b.x()).abs() > self.tolerance {
            a.x() < b.x()
        } else {
            a.y() < b.y() && (a.y() - b.y()).abs() > self.tolerance
        }
    }
}

/// An ordered set of coordinates with no two equal under `C`.
///
/// The first coordinate inserted wins: inserting an equal one later changes
/// nothing, including the stored z/m.
#[derive(Clone, Debug)]
pub struct CoordSet<C = XyCompare> {
    layout: Layout,
    tree: TreeMap<(), C>,
}

impl CoordSet<XyCompare> {
    pub fn xy() -> CoordSet<XyCompare> {
        CoordSet::new(Layout::XY, XyCompare)
    }
}

impl<C: CoordCompare> CoordSet<C> {
    pub fn new(layout: Layout, compare: C) -> CoordSet<C> {
        CoordSet {
            layout: layout,
            tree: TreeMap::new(compare),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Adds `coord`, keeping only the ordinates the layout names.
    ///
    /// Returns Ok(true) when it was new, Ok(false) when an equal coordinate was
    /// already present.
    pub fn insert(&mut self, coord: Coord) -> Result<bool> {
        self.layout.check(&coord)?;
        let coord = if coord.len() > self.layout.stride() {
            coord.truncated(self.layout.stride())
        } else {
            coord
        };
        let inserted = self.tree.insert(coord, ());
        trace!("coord set insert: new={} size={}", inserted, self.tree.len());
        Ok(inserted)
    }

    /// Reads `flat` as stride-interleaved ordinates and inserts each
    /// coordinate. Returns how many were new.
    ///
    /// The whole buffer is checked before anything is inserted.
    pub fn extend_flat(&mut self, flat: &[f64]) -> Result<usize> {
        check_flat(self.layout, flat)?;
        let mut n_new = 0;
        for chunk in flat.chunks(self.layout.stride()) {
            if self.tree.insert(Coord(chunk.to_vec()), ()) {
                n_new += 1;
            }
        }
        trace!("coord set extend: {} new of {}", n_new, flat.len() / self.layout.stride());
        Ok(n_new)
    }

    pub fn contains(&self, coord: &Coord) -> bool {
        coord.has_xy() && self.tree.contains_key(coord)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Calls `visit` on each coordinate in ascending order.
    pub fn walk<F: FnMut(&Coord)>(&self, mut visit: F) {
        self.tree.walk(|c, _| visit(c));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coord> + '_ {
        self.tree.iter().map(|(c, _)| c)
    }

    /// All coordinates in ascending order, `stride` ordinates each.
    pub fn to_flat_vec(&self) -> Vec<f64> {
        let mut ret = Vec::with_capacity(self.len() * self.layout.stride());
        for c in self.iter() {
            ret.extend_from_slice(c);
        }
        ret
    }
}

fn check_flat(layout: Layout, flat: &[f64]) -> Result<()> {
    let stride = layout.stride();
    let rem = flat.len() % stride;
    if rem != 0 {
        return Err(TopoError::MalformedCoordinate { len: rem, stride: stride });
    }
    Ok(())
}

/// Removes repeated coordinates from a stride-interleaved buffer, keeping the
/// first occurrence of each in its original position.
pub fn unique_coords<C: CoordCompare>(layout: Layout, compare: C, flat: &[f64]) -> Result<Vec<f64>> {
    check_flat(layout, flat)?;
    let mut seen = TreeMap::new(compare);
    let mut ret = Vec::with_capacity(flat.len());
    for chunk in flat.chunks(layout.stride()) {
        if seen.insert(Coord(chunk.to_vec()), ()) {
            ret.extend_from_slice(chunk);
        }
    }
    Ok(ret)
}
