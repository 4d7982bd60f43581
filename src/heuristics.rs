use crate::grid::Coord;

/// Distance estimate between two cells. Must be admissible and consistent
/// on the unit grid; both provided metrics are.
pub type Heuristic = fn(Coord, Coord) -> f64;

/// Manhattan distance. The default for both engines.
pub fn l1(a: Coord, b: Coord) -> f64 {
    let dx = (a.x as i64 - b.x as i64).abs();
    let dy = (a.y as i64 - b.y as i64).abs();
    (dx + dy) as f64
}

/// Euclidean distance.
pub fn l2(a: Coord, b: Coord) -> f64 {
    let dx = (a.x as f64) - (b.x as f64);
    let dy = (a.y as f64) - (b.y as f64);
    (dx * dx + dy * dy).sqrt()
}
