use std::fmt;

use serde::{Deserialize, Serialize};

/// Where something sits relative to one source geometry.
///
/// Also used to index the rows and columns of an IntersectionMatrix, which is
/// why Interior, Boundary and Exterior are 0, 1 and 2.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Interior = 0,
    Boundary = 1,
    Exterior = 2,
    /// Not (yet) known.
    None = 3,
}

impl Location {
    /// Matrix index for Interior/Boundary/Exterior; None has no row.
    pub fn index(self) -> Option<usize> {
        match self {
            Location::None => None,
            l => Some(l as usize),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Location::Interior => 'i',
            Location::Boundary => 'b',
            Location::Exterior => 'e',
            Location::None => '-',
        }
    }
}

impl Default for Location {
    fn default() -> Location {
        Location::None
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Which part of an element a Location describes.
///
/// Nodes only use On. Edges also record what lies to their Left and Right,
/// looking from the first coordinate towards the last.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    On = 0,
    Left = 1,
    Right = 2,
}

impl Position {
    pub fn opposite(self) -> Position {
        match self {
            Position::On => Position::On,
            Position::Left => Position::Right,
            Position::Right => Position::Left,
        }
    }
}
