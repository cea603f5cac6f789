//! Topological dimensions and their one-character matrix symbols.
//!
//! These are the entries of a DE-9IM `IntersectionMatrix`, and the symbols are
//! what matrix strings are compared against, so the mapping below must stay
//! exactly as it is:
//!
//! | Dimension  | code | symbol |
//! |------------|------|--------|
//! | `Any`      | -3   | `*`    |
//! | `NonEmpty` | -2   | `T`    |
//! | `Empty`    | -1   | `F`    |
//! | `Point`    | 0    | `0`    |
//! | `Line`     | 1    | `1`    |
//! | `Area`     | 2    | `2`    |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopoError};

pub mod matrix;

pub use self::matrix::IntersectionMatrix;

/// The dimension of a point (0), a curve (1) or a surface (2), plus the
/// pseudo-dimensions a matrix pattern needs.
///
/// Ordered `Any < NonEmpty < Empty < Point < Line < Area`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    /// Wildcard: {FALSE, TRUE}.
    Any = -3,
    /// Some non-empty dimension: {P, L, A}.
    NonEmpty = -2,
    /// The empty geometry.
    Empty = -1,
    Point = 0,
    Line = 1,
    Area = 2,
}

pub const ANY_SYMBOL: char = '*';
pub const NON_EMPTY_SYMBOL: char = 'T';
pub const EMPTY_SYMBOL: char = 'F';
pub const POINT_SYMBOL: char = '0';
pub const LINE_SYMBOL: char = '1';
pub const AREA_SYMBOL: char = '2';

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Any,
        Dimension::NonEmpty,
        Dimension::Empty,
        Dimension::Point,
        Dimension::Line,
        Dimension::Area,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Result<Dimension> {
        match code {
            -3 => Ok(Dimension::Any),
            -2 => Ok(Dimension::NonEmpty),
            -1 => Ok(Dimension::Empty),
            0 => Ok(Dimension::Point),
            1 => Ok(Dimension::Line),
            2 => Ok(Dimension::Area),
            value => Err(TopoError::InvalidDimension { value }),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Dimension::Any => ANY_SYMBOL,
            Dimension::NonEmpty => NON_EMPTY_SYMBOL,
            Dimension::Empty => EMPTY_SYMBOL,
            Dimension::Point => POINT_SYMBOL,
            Dimension::Line => LINE_SYMBOL,
            Dimension::Area => AREA_SYMBOL,
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Dimension> {
        match symbol {
            ANY_SYMBOL => Ok(Dimension::Any),
            NON_EMPTY_SYMBOL => Ok(Dimension::NonEmpty),
            EMPTY_SYMBOL => Ok(Dimension::Empty),
            POINT_SYMBOL => Ok(Dimension::Point),
            LINE_SYMBOL => Ok(Dimension::Line),
            AREA_SYMBOL => Ok(Dimension::Area),
            symbol => Err(TopoError::InvalidDimensionSymbol { symbol }),
        }
    }

    /// True for Point, Line and Area.
    pub fn is_geometric(self) -> bool {
        self >= Dimension::Point
    }
}

impl TryFrom<i32> for Dimension {
    type Error = TopoError;

    fn try_from(code: i32) -> Result<Dimension> {
        Dimension::from_code(code)
    }
}

impl TryFrom<char> for Dimension {
    type Error = TopoError;

    fn try_from(symbol: char) -> Result<Dimension> {
        Dimension::from_symbol(symbol)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Maps a dimension code to its matrix symbol.
pub fn code_to_symbol(code: i32) -> Result<char> {
    Dimension::from_code(code).map(Dimension::symbol)
}

/// Maps a matrix symbol to its dimension code.
pub fn symbol_to_code(symbol: char) -> Result<i32> {
    Dimension::from_symbol(symbol).map(Dimension::code)
}
