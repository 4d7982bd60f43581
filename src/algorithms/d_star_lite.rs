use log::{debug, trace};
use ordered_float::OrderedFloat;

use crate::error::PlanningError;
use crate::grid::{Coord, CostField, EDGE_WEIGHT};
use crate::heuristics::{l1, Heuristic};
use crate::problem::Problem;
use crate::queue::{DualPriorityQueue, Key};

/// D* Lite: incremental replanning for an agent that moves toward a fixed
/// goal while discovering walls along the way.
///
/// The search runs backward from the goal, so `g` holds distance-to-goal
/// and stays valid as the start advances. The `k_m` offset keeps keys that
/// were queued before a move comparable with freshly computed ones; stale
/// entries are re-keyed lazily when popped.
///
/// Based on "Improved fast replanning for robot navigation in unknown
/// terrain" (Koenig & Likhachev, 2002).
pub struct DStarLite {
    heuristic: Heuristic,
    queue: DualPriorityQueue<Coord>,
    field: CostField,
    start: Coord,
    goal: Coord,
    last: Coord,
    k_m: f64,
    route: Vec<Coord>,
    has_path: bool,
    best_path: Option<Vec<Coord>>,
    pop_count: usize,
}

impl DStarLite {
    pub fn new(problem: &dyn Problem) -> Self {
        Self::with_heuristic(problem, l1)
    }

    pub fn with_heuristic(problem: &dyn Problem, heuristic: Heuristic) -> Self {
        let (width, height) = problem.dims();
        let field = CostField::with_walls(width, height, &problem.naive_walls());
        let start = problem.start_state();
        let mut engine = DStarLite {
            heuristic,
            queue: DualPriorityQueue::new(),
            field,
            start,
            goal: problem.goal_state(),
            last: start,
            k_m: 0.0,
            route: Vec::new(),
            has_path: false,
            best_path: None,
            pop_count: 0,
        };

        // The search works backward, so the goal is the source.
        engine.field.set(engine.goal, None, Some(0.0));
        let key = engine.compute_keys(engine.goal);
        engine.queue.push(engine.goal, key);

        // Solve once up front so the agent can step immediately.
        engine.compute_shortest_path();
        engine
    }

    fn compute_keys(&self, c: Coord) -> Key {
        let (g, rhs) = self.field.pair(c);
        let secondary = g.min(rhs);
        Key::new(
            secondary + (self.heuristic)(self.start, c) + self.k_m,
            secondary,
        )
    }

    /// Mirror of the LPA* rule with the goal as source. Directionality is
    /// inverted, but the mobility graph is undirected, so neighbour
    /// enumeration serves for predecessors and successors alike.
    fn update_vertex(&mut self, u: Coord) {
        if u != self.goal {
            let new_rhs = if self.field.is_wall(u) {
                f64::INFINITY
            } else {
                self.field
                    .neighbours(u)
                    .into_iter()
                    .map(|n| self.field.g(n) + EDGE_WEIGHT)
                    .fold(f64::INFINITY, f64::min)
            };
            self.field.set(u, None, Some(new_rhs));
        }

        self.queue.delete_key(&u);
        let (g, rhs) = self.field.pair(u);
        if g != rhs {
            let key = self.compute_keys(u);
            self.queue.push(u, key);
        }
    }

    /// Repairs the cost field until the start is locally consistent and no
    /// queued key precedes it.
    pub fn compute_shortest_path(&mut self) {
        if self.has_path {
            return;
        }

        loop {
            let (u, k_old) = match self.queue.peek() {
                Some((&u, key)) => (u, key),
                None => break,
            };
            let (g_start, rhs_start) = self.field.pair(self.start);
            if g_start == rhs_start && k_old >= self.compute_keys(self.start) {
                break;
            }

            self.queue.pop();
            self.pop_count += 1;

            let k_new = self.compute_keys(u);
            if k_old < k_new {
                // key went stale as k_m drifted; re-queue and move on
                self.queue.push(u, k_new);
                continue;
            }

            let (g_u, rhs_u) = self.field.pair(u);
            if g_u > rhs_u {
                self.field.set(u, Some(rhs_u), None);
                for n in self.field.neighbours(u) {
                    self.update_vertex(n);
                }
            } else {
                self.field.set(u, Some(f64::INFINITY), None);
                for n in self.field.neighbours(u) {
                    self.update_vertex(n);
                }
                self.update_vertex(u);
            }
        }

        self.has_path = true;
    }

    /// Records a wall discovered next to the agent and replans.
    ///
    /// The wall must be 4-adjacent to the current position: the `k_m`
    /// accounting assumes discoveries happen where the agent stands, and a
    /// violation is a driver bug. Re-reporting a known wall is a no-op.
    pub fn make_wall_at(&mut self, coord: Coord) -> Result<(), PlanningError> {
        if !self.field.in_map(coord) {
            return Err(PlanningError::OutOfBounds {
                coord,
                width: self.field.width(),
                height: self.field.height(),
            });
        }
        if !self.field.neighbours(self.start).contains(&coord) {
            return Err(PlanningError::NonAdjacentWall {
                wall: coord,
                agent: self.start,
            });
        }
        if self.field.is_wall(coord) {
            return Ok(());
        }

        debug!("wall discovered at {coord}, replanning from {}", self.start);

        // Batch the affected cells before touching the queue.
        let mut changed = vec![coord];
        changed.extend(self.field.neighbours(coord));

        self.field.set_wall(coord);
        self.k_m += (self.heuristic)(self.last, self.start);
        self.last = self.start;
        self.has_path = false;
        self.best_path = None;

        for u in changed {
            self.update_vertex(u);
        }
        self.compute_shortest_path();
        Ok(())
    }

    /// Advances the agent one cell along the best known route and returns
    /// the new position. Stays put when already at the goal or when no
    /// path exists.
    pub fn take_step(&mut self) -> Coord {
        if self.start == self.goal {
            return self.start;
        }
        if self.field.g(self.start).is_infinite() {
            return self.start;
        }

        let mut argmin: Option<(Coord, f64)> = None;
        for n in self.field.neighbours(self.start) {
            let weight = EDGE_WEIGHT + self.field.g(n);
            if weight.is_finite() && argmin.map_or(true, |(_, best)| weight < best) {
                argmin = Some((n, weight));
            }
        }
        let Some((next, _)) = argmin else {
            return self.start;
        };

        trace!("step {} -> {next}", self.start);
        self.route.push(self.start);
        self.start = next;
        self.best_path = None;
        next
    }

    /// The remaining path from the current position to the goal, or `None`
    /// when the goal is unreachable. Cached until the next wall or step.
    pub fn extract_path(&mut self) -> Option<Vec<Coord>> {
        if self.start == self.goal {
            return Some(vec![self.start]);
        }

        self.compute_shortest_path();
        if let Some(path) = &self.best_path {
            return Some(path.clone());
        }

        let path = self.trace_path()?;
        self.best_path = Some(path.clone());
        Some(path)
    }

    /// Gradient descent on `g` from the current position to the goal.
    fn trace_path(&self) -> Option<Vec<Coord>> {
        if self.field.g(self.start).is_infinite() {
            return None;
        }

        let limit = self.field.node_count();
        let mut path = vec![self.start];
        let mut current = self.start;
        while current != self.goal {
            let next = self
                .field
                .neighbours(current)
                .into_iter()
                .filter(|&n| self.field.g(n).is_finite())
                .min_by_key(|&n| OrderedFloat(self.field.g(n)))?;
            path.push(next);
            current = next;
            if path.len() > limit {
                return None;
            }
        }
        Some(path)
    }

    /// Every cell the agent has occupied, ending at the current position.
    pub fn get_route(&self) -> Vec<Coord> {
        let mut route = self.route.clone();
        route.push(self.start);
        route
    }

    pub fn knows_wall(&self, c: Coord) -> bool {
        self.field.in_map(c) && self.field.is_wall(c)
    }

    /// The agent's current position.
    pub fn position(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn g(&self, c: Coord) -> f64 {
        self.field.g(c)
    }

    pub fn rhs(&self, c: Coord) -> f64 {
        self.field.rhs(c)
    }

    /// Number of queue expansions performed so far.
    pub fn pop_count(&self) -> usize {
        self.pop_count
    }

    pub fn queue_size(&self) -> usize {
        self.queue.size()
    }
}
