//! Planar topology: the pieces an overlay or relate operation is built on.
//!
//! * `dimension`: DE-9IM dimensions, their matrix symbols, and the matrix.
//! * `coord_set`: coordinates ordered and deduplicated by a comparator.
//! * `intersection`: how two segments meet, and every meeting in an edge set.
//! * `topology`: a planar graph of labelled nodes, edges and edge-ends.
//!
//! Everything that links to something else does it by index into an arena
//! owned by the enclosing structure. See `topology::types`.

pub mod coord_set;
pub mod dimension;
pub mod error;
pub mod geo;
pub mod intersection;
pub mod topology;

pub use crate::coord_set::{CoordCompare, CoordSet, OrdinateCompare, ToleranceCompare, XyCompare};
pub use crate::dimension::{Dimension, IntersectionMatrix};
pub use crate::error::{Result, TopoError};
pub use crate::geo::{Coord, Layout, Location, Position};
pub use crate::intersection::{line_intersects_line, IntersectionKind, LineIntersection};
pub use crate::topology::{Edge, Label, PlanarGraph};
