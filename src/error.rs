use thiserror::Error;

use crate::grid::Coord;

/// Errors raised by the planning engines for out-of-protocol calls.
/// Domain outcomes ("no path exists") are values, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanningError {
    #[error("wall reported at {wall}, which is not adjacent to the agent at {agent}")]
    NonAdjacentWall { wall: Coord, agent: Coord },

    #[error("coordinate {coord} lies outside the {width}x{height} grid")]
    OutOfBounds {
        coord: Coord,
        width: usize,
        height: usize,
    },
}
