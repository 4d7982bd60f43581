use std::fmt;

/// Cost of moving between two adjacent traversable cells.
pub const EDGE_WEIGHT: f64 = 1.0;

/// Neighbour scan order. Fixed so that every tie-break downstream
/// (path reconstruction, step selection) is deterministic.
const NEIGHBOUR_OFFSETS: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Coord { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord { x, y }
    }
}

/// Enumerates the in-bounds 4-neighbours of `c` in the fixed scan order.
/// Walls are not filtered here; wall semantics live in the cost field.
pub fn neighbours(c: Coord, width: usize, height: usize) -> Vec<Coord> {
    let (x, y) = (c.x as i64, c.y as i64);
    let mut result = Vec::with_capacity(4);
    for (dx, dy) in NEIGHBOUR_OFFSETS {
        let (nx, ny) = (x + dx, y + dy);
        if nx >= 0 && ny >= 0 && (nx as usize) < width && (ny as usize) < height {
            result.push(Coord::new(nx as usize, ny as usize));
        }
    }
    result
}

/// Per-cell `(g, rhs)` estimates plus the engine's wall knowledge.
///
/// `g` is the engine's current cost-from-source estimate, `rhs` the one-step
/// lookahead. Both start at infinity; the search source is lowered to
/// `rhs = 0` by the owning engine.
pub struct CostField {
    width: usize,
    height: usize,
    costs: Vec<(f64, f64)>,
    walls: Vec<bool>,
}

impl CostField {
    pub fn new(width: usize, height: usize) -> Self {
        CostField {
            width,
            height,
            costs: vec![(f64::INFINITY, f64::INFINITY); width * height],
            walls: vec![false; width * height],
        }
    }

    /// Builds the field with an initial wall belief, indexed `[x][y]`.
    pub fn with_walls(width: usize, height: usize, walls: &[Vec<bool>]) -> Self {
        let mut field = Self::new(width, height);
        for (x, column) in walls.iter().enumerate().take(width) {
            for (y, &wall) in column.iter().enumerate().take(height) {
                if wall {
                    field.walls[y * width + x] = true;
                }
            }
        }
        field
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn node_count(&self) -> usize {
        self.width * self.height
    }

    pub fn in_map(&self, c: Coord) -> bool {
        c.x < self.width && c.y < self.height
    }

    pub fn neighbours(&self, c: Coord) -> Vec<Coord> {
        neighbours(c, self.width, self.height)
    }

    fn index(&self, c: Coord) -> usize {
        c.y * self.width + c.x
    }

    pub fn g(&self, c: Coord) -> f64 {
        self.costs[self.index(c)].0
    }

    pub fn rhs(&self, c: Coord) -> f64 {
        self.costs[self.index(c)].1
    }

    pub fn pair(&self, c: Coord) -> (f64, f64) {
        self.costs[self.index(c)]
    }

    /// Partial update: `None` leaves the corresponding estimate untouched.
    /// The engines frequently write only one of the two.
    pub fn set(&mut self, c: Coord, g: Option<f64>, rhs: Option<f64>) {
        let slot = self.index(c);
        if let Some(g) = g {
            self.costs[slot].0 = g;
        }
        if let Some(rhs) = rhs {
            self.costs[slot].1 = rhs;
        }
    }

    pub fn is_wall(&self, c: Coord) -> bool {
        self.walls[self.index(c)]
    }

    /// Monotonic: walls are never cleared within a planning session.
    pub fn set_wall(&mut self, c: Coord) {
        let slot = self.index(c);
        self.walls[slot] = true;
    }
}
