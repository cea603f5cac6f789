//! DE-9IM intersection matrices.
//!
//! Rows are the Interior, Boundary and Exterior of geometry A; columns the
//! same for geometry B. Each cell holds the Dimension of the intersection of
//! that pair, `Empty` when they don't meet.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Dimension;
use crate::error::{Result, TopoError};
use crate::geo::Location;

lazy_static! {
    static ref MATRIX_PATTERN: Regex =
        Regex::new(r"^[*TF012]{9}$").expect("intersection matrix pattern regex");
}

const LOCATIONS: [Location; 3] = [Location::Interior, Location::Boundary, Location::Exterior];

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionMatrix {
    cells: [[Dimension; 3]; 3],
}

/// Fails unless `pattern` is nine characters from `*TF012`.
fn check_pattern(pattern: &str) -> Result<()> {
    if MATRIX_PATTERN.is_match(pattern) {
        Ok(())
    } else {
        Err(TopoError::InvalidMatrixPattern { pattern: pattern.to_string() })
    }
}

/// Does an actual cell value satisfy one pattern character?
fn cell_matches(actual: Dimension, required: Dimension) -> bool {
    match required {
        Dimension::Any => true,
        Dimension::NonEmpty => actual.is_geometric() || actual == Dimension::NonEmpty,
        Dimension::Empty => actual == Dimension::Empty,
        geometric => actual == geometric,
    }
}

impl IntersectionMatrix {
    /// Every cell Empty.
    pub fn new() -> IntersectionMatrix {
        IntersectionMatrix { cells: [[Dimension::Empty; 3]; 3] }
    }

    /// Reads a nine-symbol string, row by row.
    pub fn from_pattern(pattern: &str) -> Result<IntersectionMatrix> {
        check_pattern(pattern)?;
        let mut ret = IntersectionMatrix::new();
        for (i, symbol) in pattern.chars().enumerate() {
            ret.cells[i / 3][i % 3] = Dimension::from_symbol(symbol)?;
        }
        Ok(ret)
    }

    /// `Location::None` lies outside every geometry's I/B/E partition, so it
    /// reads as Empty.
    pub fn get(&self, row: Location, col: Location) -> Dimension {
        match (row.index(), col.index()) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => Dimension::Empty,
        }
    }

    /// Writes one cell. Writing to a `Location::None` row or column does
    /// nothing.
    pub fn set(&mut self, row: Location, col: Location, dimension: Dimension) {
        if let (Some(r), Some(c)) = (row.index(), col.index()) {
            self.cells[r][c] = dimension;
        }
    }

    /// Raises a cell to `minimum` if it is currently lower.
    pub fn set_at_least(&mut self, row: Location, col: Location, minimum: Dimension) {
        if self.get(row, col) < minimum {
            self.set(row, col, minimum);
        }
    }

    /// The matrix of B against A.
    pub fn transpose(&self) -> IntersectionMatrix {
        let mut ret = *self;
        for r in 0..3 {
            for c in 0..3 {
                ret.cells[c][r] = self.cells[r][c];
            }
        }
        ret
    }

    /// Tests this matrix against a pattern such as `"T*F**FFF*"`.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        check_pattern(pattern)?;
        for (i, symbol) in pattern.chars().enumerate() {
            let required = Dimension::from_symbol(symbol)?;
            if !cell_matches(self.cells[i / 3][i % 3], required) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Interiors and boundaries don't meet at all.
    pub fn is_disjoint(&self) -> bool {
        LOCATIONS[..2].iter().all(|&row| {
            LOCATIONS[..2]
                .iter()
                .all(|&col| self.get(row, col) == Dimension::Empty)
        })
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }
}

impl Default for IntersectionMatrix {
    fn default() -> IntersectionMatrix {
        IntersectionMatrix::new()
    }
}

impl FromStr for IntersectionMatrix {
    type Err = TopoError;

    fn from_str(s: &str) -> Result<IntersectionMatrix> {
        IntersectionMatrix::from_pattern(s)
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.iter() {
            for cell in row.iter() {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Location::{Boundary, Exterior, Interior};

    #[test]
    fn new_is_all_empty() {
        assert_eq!("FFFFFFFFF", IntersectionMatrix::new().to_string());
    }

    #[test]
    fn string_round_trip() {
        let m: IntersectionMatrix = "212101212".parse().unwrap();
        assert_eq!("212101212", m.to_string());
        assert_eq!(Dimension::Line, m.get(Interior, Boundary));
        assert_eq!(Dimension::Point, m.get(Boundary, Exterior));
    }

    #[test]
    fn rejects_bad_patterns() {
        assert_eq!(
            Err(TopoError::InvalidMatrixPattern { pattern: "T*F**FFF".to_string() }),
            IntersectionMatrix::from_pattern("T*F**FFF")
        );
        assert!(IntersectionMatrix::new().matches("T*F**FFFX").is_err());
    }

    #[test]
    fn pattern_matching() {
        // Two equal polygons.
        let m = IntersectionMatrix::from_pattern("2FFF1FFF2").unwrap();
        assert_eq!(Ok(true), m.matches("T*F**FFF*"));
        assert_eq!(Ok(true), m.matches("2********"));
        assert_eq!(Ok(false), m.matches("1********"));
        assert_eq!(Ok(false), m.matches("*T*******"));
    }

    #[test]
    fn set_at_least_only_raises() {
        let mut m = IntersectionMatrix::new();
        m.set_at_least(Interior, Interior, Dimension::Line);
        m.set_at_least(Interior, Interior, Dimension::Point);
        assert_eq!(Dimension::Line, m.get(Interior, Interior));
        m.set(Location::None, Interior, Dimension::Area);
        assert_eq!("1FFFFFFFF", m.to_string());
    }

    #[test]
    fn transpose() {
        let m = IntersectionMatrix::from_pattern("012FFF1F2").unwrap();
        assert_eq!("0F11FF2F2", m.transpose().to_string());
    }

    #[test]
    fn disjoint() {
        assert!(IntersectionMatrix::from_pattern("FF2FF1212").unwrap().is_disjoint());
        assert!(IntersectionMatrix::from_pattern("0FFFFFFF2").unwrap().is_intersects());
    }
}
