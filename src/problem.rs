use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PlanningError;
use crate::grid::Coord;

/// The host that owns the ground truth about the world. Engines read the
/// static facts (dimensions, endpoints, initial belief) once at
/// construction; the driver probes `is_wall` to sense the real maze.
pub trait Problem {
    fn dims(&self) -> (usize, usize);
    fn start_state(&self) -> Coord;
    fn goal_state(&self) -> Coord;

    /// Ground truth, used only for sensing. Out-of-bounds is not a wall;
    /// bounds handling belongs to neighbour enumeration.
    fn is_wall(&self, c: Coord) -> bool;

    /// The agent's initial wall belief, indexed `[x][y]`. The agent starts
    /// out assuming every cell is traversable.
    fn naive_walls(&self) -> Vec<Vec<bool>>;

    /// Moves the nominal start, for re-entrant path-cost evaluation once
    /// the agent has advanced.
    fn set_start(&mut self, c: Coord);
}

/// A rectangular maze with hidden walls.
#[derive(Debug)]
pub struct MazeProblem {
    width: usize,
    height: usize,
    walls: Vec<Vec<bool>>,
    start: Coord,
    goal: Coord,
}

impl MazeProblem {
    /// An open maze with no interior walls.
    pub fn open(
        width: usize,
        height: usize,
        start: Coord,
        goal: Coord,
    ) -> Result<Self, PlanningError> {
        Self::with_walls(width, height, start, goal, &[])
    }

    pub fn with_walls(
        width: usize,
        height: usize,
        start: Coord,
        goal: Coord,
        walls: &[Coord],
    ) -> Result<Self, PlanningError> {
        let check = |coord: Coord| {
            if coord.x < width && coord.y < height {
                Ok(())
            } else {
                Err(PlanningError::OutOfBounds {
                    coord,
                    width,
                    height,
                })
            }
        };
        check(start)?;
        check(goal)?;

        let mut wall_grid = vec![vec![false; height]; width];
        for &wall in walls {
            check(wall)?;
            wall_grid[wall.x][wall.y] = true;
        }

        Ok(MazeProblem {
            width,
            height,
            walls: wall_grid,
            start,
            goal,
        })
    }

    /// Generates a random maze. The start lands in the lower-left quadrant
    /// and the goal in the upper-right so the two are never trivially close;
    /// walls avoid both endpoints. A seed makes the maze reproducible.
    pub fn generate(width: usize, height: usize, num_walls: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let start = Coord::new(rng.gen_range(0..width / 2), rng.gen_range(0..height / 2));
        let goal = Coord::new(
            rng.gen_range(width / 2..width),
            rng.gen_range(height / 2..height),
        );

        let mut walls = vec![vec![false; height]; width];
        let mut placed = 0;
        let mut attempts = 0;
        while placed < num_walls && attempts < num_walls * 3 {
            let pos = Coord::new(rng.gen_range(0..width), rng.gen_range(0..height));
            if pos != start && pos != goal && !walls[pos.x][pos.y] {
                walls[pos.x][pos.y] = true;
                placed += 1;
            }
            attempts += 1;
        }

        MazeProblem {
            width,
            height,
            walls,
            start,
            goal,
        }
    }

    pub fn wall_count(&self) -> usize {
        self.walls.iter().flatten().filter(|&&w| w).count()
    }

    /// Renders the maze with start, goal, and optionally the agent.
    pub fn render(&self, agent: Option<Coord>) -> String {
        let mut out = String::from("Legend: S=start, G=goal, A=agent, #=wall, .=open\n");
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Coord::new(x, y);
                let glyph = if Some(pos) == agent {
                    'A'
                } else if pos == self.start {
                    'S'
                } else if pos == self.goal {
                    'G'
                } else if self.walls[x][y] {
                    '#'
                } else {
                    '.'
                };
                out.push(glyph);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

impl Problem for MazeProblem {
    fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn start_state(&self) -> Coord {
        self.start
    }

    fn goal_state(&self) -> Coord {
        self.goal
    }

    fn is_wall(&self, c: Coord) -> bool {
        c.x < self.width && c.y < self.height && self.walls[c.x][c.y]
    }

    fn naive_walls(&self) -> Vec<Vec<bool>> {
        vec![vec![false; self.height]; self.width]
    }

    fn set_start(&mut self, c: Coord) {
        self.start = c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_walls_rejects_out_of_bounds() {
        let err = MazeProblem::with_walls(
            3,
            3,
            Coord::new(0, 0),
            Coord::new(2, 2),
            &[Coord::new(3, 0)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            PlanningError::OutOfBounds {
                coord: Coord::new(3, 0),
                width: 3,
                height: 3,
            }
        );
    }

    #[test]
    fn generated_maze_keeps_endpoints_clear() {
        let maze = MazeProblem::generate(20, 20, 50, Some(7));
        assert!(!maze.is_wall(maze.start_state()));
        assert!(!maze.is_wall(maze.goal_state()));
        assert!(maze.wall_count() <= 50);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = MazeProblem::generate(15, 15, 30, Some(42));
        let b = MazeProblem::generate(15, 15, 30, Some(42));
        assert_eq!(a.start_state(), b.start_state());
        assert_eq!(a.goal_state(), b.goal_state());
        assert_eq!(a.walls, b.walls);
    }

    #[test]
    fn naive_belief_is_all_open() {
        let maze = MazeProblem::with_walls(
            4,
            3,
            Coord::new(0, 0),
            Coord::new(3, 2),
            &[Coord::new(1, 1)],
        )
        .unwrap();
        let belief = maze.naive_walls();
        assert!(belief.iter().flatten().all(|&w| !w));
        assert!(maze.is_wall(Coord::new(1, 1)));
    }
}
