use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopoError};
use crate::geo::{Location, Position};

/// Number of source geometries a Label tracks.
pub const N_GEOMETRIES: usize = 2;

const POSITIONS: [Position; 3] = [Position::On, Position::Left, Position::Right];

/// The Location of a graph element relative to each of two source
/// geometries, at each Position.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    locations: [[Location; 3]; N_GEOMETRIES],
}

fn check_geometry(geom: usize) -> Result<()> {
    if geom < N_GEOMETRIES {
        Ok(())
    } else {
        Err(TopoError::InvalidGeometryIndex { index: geom })
    }
}

impl Label {
    /// Every location unknown.
    pub fn new() -> Label {
        Label::default()
    }

    /// A label for a point or line: only On is known, for one geometry.
    pub fn on(geom: usize, on: Location) -> Result<Label> {
        let mut ret = Label::new();
        ret.set_location(geom, Position::On, on)?;
        Ok(ret)
    }

    /// A label for an area edge of one geometry.
    pub fn area(geom: usize, on: Location, left: Location, right: Location) -> Result<Label> {
        check_geometry(geom)?;
        let mut ret = Label::new();
        ret.locations[geom] = [on, left, right];
        Ok(ret)
    }

    /// Location::None for geometries this label doesn't track.
    pub fn location(&self, geom: usize, pos: Position) -> Location {
        match self.locations.get(geom) {
            Some(row) => row[pos as usize],
            None => Location::None,
        }
    }

    pub fn set_location(&mut self, geom: usize, pos: Position, location: Location) -> Result<()> {
        check_geometry(geom)?;
        self.locations[geom][pos as usize] = location;
        Ok(())
    }

    /// True when either side is known for `geom`.
    pub fn is_area(&self, geom: usize) -> bool {
        self.location(geom, Position::Left) != Location::None
            || self.location(geom, Position::Right) != Location::None
    }

    pub fn is_null(&self, geom: usize) -> bool {
        POSITIONS.iter().all(|&p| self.location(geom, p) == Location::None)
    }

    /// The label seen walking the other way: Left and Right swap.
    pub fn flip(&self) -> Label {
        let mut ret = *self;
        for (row, orig) in ret.locations.iter_mut().zip(self.locations.iter()) {
            for &pos in POSITIONS.iter() {
                row[pos.opposite() as usize] = orig[pos as usize];
            }
        }
        ret
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.locations.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{}{}{}", i, row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
