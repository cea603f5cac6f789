//! TopoError: the one error type for planar-topo public APIs.
//!
//! Lookups that find nothing return `None`; everything here is a caller bug or
//! malformed input, reported before any state is touched.

use thiserror::Error;

/// Errors raised while building or querying topology.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopoError {
    /// An integer that is not one of the six dimension codes.
    #[error("The dimension {value} is not a valid dimension")]
    InvalidDimension { value: i32 },
    /// A character that is not one of `*TF012`.
    #[error("The dimension symbol `{symbol}` is not a valid dimension symbol")]
    InvalidDimensionSymbol { symbol: char },
    /// A coordinate with fewer ordinates than the layout's stride.
    #[error("Coordinate has {len} ordinates but the layout requires {stride}")]
    MalformedCoordinate { len: usize, stride: usize },
    /// An edge with fewer than two coordinates.
    #[error("Edge {index} has {len} coordinates; at least 2 are required")]
    MalformedEdge { index: usize, len: usize },
    /// An edge whose coordinates all coincide.
    #[error("Edge {index} has zero length")]
    DegenerateEdge { index: usize },
    /// Labels hold locations for source geometries 0 and 1 only.
    #[error("Geometry index {index} is out of range (expected 0 or 1)")]
    InvalidGeometryIndex { index: usize },
    /// A DE-9IM string that isn't nine dimension symbols.
    #[error("`{pattern}` is not a valid intersection matrix pattern")]
    InvalidMatrixPattern { pattern: String },
    /// Construction-time mutation after the stars were linked.
    #[error("Graph is already linked; nodes, edges and labels are frozen")]
    GraphLinked,
}

pub type Result<T> = std::result::Result<T, TopoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_bad_value() {
        assert_eq!(
            "The dimension 7 is not a valid dimension",
            TopoError::InvalidDimension { value: 7 }.to_string()
        );
        assert_eq!(
            "Coordinate has 1 ordinates but the layout requires 2",
            TopoError::MalformedCoordinate { len: 1, stride: 2 }.to_string()
        );
    }
}
