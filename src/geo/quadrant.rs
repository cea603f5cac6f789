use serde::{Deserialize, Serialize};

use super::Coord;

/// The quadrant a direction vector points into.
///
/// Variants are declared counter-clockwise starting from the positive x axis,
/// so the derived Ord sorts directions by angle, coarsely.
///
/// Axis directions: NE is [0°, 90°], NW (90°, 180°], SW (180°, 270°) and SE
/// [270°, 360°).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quadrant {
    NE,
    NW,
    SW,
    SE,
}

impl Quadrant {
    /// Returns None for the zero vector, which has no direction.
    pub fn of(dx: f64, dy: f64) -> Option<Quadrant> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(if dx >= 0.0 {
            if dy >= 0.0 {
                Quadrant::NE
            } else {
                Quadrant::SE
            }
        } else if dy >= 0.0 {
            Quadrant::NW
        } else {
            Quadrant::SW
        })
    }

    /// Quadrant of the direction from `p0` to `p1`.
    pub fn of_segment(p0: &Coord, p1: &Coord) -> Option<Quadrant> {
        Quadrant::of(p1.x() - p0.x(), p1.y() - p0.y())
    }
}
