use log::debug;
use ordered_float::OrderedFloat;

use crate::error::PlanningError;
use crate::grid::{Coord, CostField, EDGE_WEIGHT};
use crate::heuristics::{l1, Heuristic};
use crate::problem::Problem;
use crate::queue::{DualPriorityQueue, Key};

/// Lifelong Planning A*: an incremental A* between a fixed start and goal.
///
/// The engine keeps a `(g, rhs)` pair per cell and a queue of locally
/// inconsistent cells. After a wall is discovered, only the affected region
/// of the cost field is repaired, instead of searching from scratch.
///
/// Based on "Improved fast replanning for robot navigation in unknown
/// terrain" (Koenig & Likhachev, 2002).
pub struct LPAStar {
    heuristic: Heuristic,
    queue: DualPriorityQueue<Coord>,
    field: CostField,
    start: Coord,
    goal: Coord,
    has_path: bool,
    best_path: Option<Vec<Coord>>,
    last_path: Option<Vec<Coord>>,
    pop_count: usize,
}

impl LPAStar {
    pub fn new(problem: &dyn Problem) -> Self {
        Self::with_heuristic(problem, l1)
    }

    pub fn with_heuristic(problem: &dyn Problem, heuristic: Heuristic) -> Self {
        let (width, height) = problem.dims();
        let field = CostField::with_walls(width, height, &problem.naive_walls());
        let mut engine = LPAStar {
            heuristic,
            queue: DualPriorityQueue::new(),
            field,
            start: problem.start_state(),
            goal: problem.goal_state(),
            has_path: false,
            best_path: None,
            last_path: None,
            pop_count: 0,
        };

        engine.field.set(engine.start, None, Some(0.0));
        let key = engine.compute_keys(engine.start);
        engine.queue.push(engine.start, key);
        engine
    }

    fn compute_keys(&self, c: Coord) -> Key {
        let (g, rhs) = self.field.pair(c);
        let secondary = g.min(rhs);
        Key::new(secondary + (self.heuristic)(c, self.goal), secondary)
    }

    /// Re-evaluates `rhs(u)` and re-queues `u` iff it is locally
    /// inconsistent. The only place `rhs` changes after construction.
    fn update_vertex(&mut self, u: Coord) {
        if u != self.start {
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

    /// Repairs the cost field until the goal is locally consistent and no
    /// queued key precedes it. Idempotent while the cached path is valid.
    pub fn compute_shortest_path(&mut self) {
        if self.has_path {
            return;
        }

        loop {
            let top = match self.queue.peek() {
                Some((_, key)) => key,
                None => break,
            };
            let (g_goal, rhs_goal) = self.field.pair(self.goal);
            if g_goal == rhs_goal && top >= self.compute_keys(self.goal) {
                break;
            }

            let Some((u, _)) = self.queue.pop() else { break };
            self.pop_count += 1;

            let (g_u, rhs_u) = self.field.pair(u);
            if g_u > rhs_u {
                // locally overconsistent: commit the improvement
                self.field.set(u, Some(rhs_u), None);
            } else {
                // locally underconsistent: give up the estimate and rebuild
                self.field.set(u, Some(f64::INFINITY), None);
                self.update_vertex(u);
            }
            for n in self.field.neighbours(u) {
                self.update_vertex(n);
            }
        }

        self.has_path = true;
    }

    /// Records a newly discovered wall and invalidates the cached path.
    /// Re-reporting a known wall is a no-op.
    pub fn make_wall_at(&mut self, coord: Coord) -> Result<(), PlanningError> {
        if !self.field.in_map(coord) {
            return Err(PlanningError::OutOfBounds {
                coord,
                width: self.field.width(),
                height: self.field.height(),
            });
        }
        if self.field.is_wall(coord) {
            return Ok(());
        }

        debug!("wall discovered at {coord}, plan invalidated");
        self.has_path = false;
        self.last_path = self.best_path.take();

        self.field.set_wall(coord);
        self.update_vertex(coord);
        Ok(())
    }

    /// The current shortest path from start to goal, or `None` when the
    /// goal is unreachable. Cached until the next wall insertion.
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

    /// Gradient descent on `g` from the goal back to the start. Infinite
    /// neighbours are never candidates; ties break in scan order.
    fn trace_path(&self) -> Option<Vec<Coord>> {
        if self.field.g(self.goal).is_infinite() {
            return None;
        }

        let limit = self.field.node_count();
        let mut path = vec![self.goal];
        let mut current = self.goal;
        while current != self.start {
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
        path.reverse();
        Some(path)
    }

    /// Last cell of the common prefix of the previous and current best
    /// paths; `None` when they diverge immediately or either is unknown.
    fn intersection_point(&self) -> Option<Coord> {
        let best = self.best_path.as_ref()?;
        let last = self.last_path.as_ref()?;
        let mut shared = None;
        for (a, b) in best.iter().zip(last.iter()) {
            if a == b {
                shared = Some(*a);
            } else {
                break;
            }
        }
        shared
    }

    /// The cells to walk back through, from the end of the superseded path
    /// to the intersection with the current one. Empty when there is
    /// nothing to backtrack to.
    pub fn get_backtrack_path(&self) -> Vec<Coord> {
        let Some(intersect) = self.intersection_point() else {
            return Vec::new();
        };
        let Some(last) = self.last_path.as_ref() else {
            return Vec::new();
        };

        let mut backpath = Vec::new();
        for &point in last.iter().rev() {
            if point == intersect {
                break;
            }
            backpath.push(point);
        }
        backpath.push(intersect);
        backpath
    }

    /// The full walkable route: backtrack segment spliced with the current
    /// path past the intersection point. With `index_coord`, only the
    /// portion after that cell is returned; an agent already standing on
    /// the current path just follows it, no backtracking required.
    pub fn get_route(&mut self, index_coord: Option<Coord>) -> Option<Vec<Coord>> {
        let path = self.extract_path()?;

        if let Some(marker) = index_coord {
            if let Some(at) = path.iter().position(|&c| c == marker) {
                return Some(path[at + 1..].to_vec());
            }
        }

        let backpath = self.get_backtrack_path();
        let mut route = match backpath.last() {
            None => path,
            Some(&intersect) => {
                let mut spliced = backpath.clone();
                if let Some(at) = path.iter().position(|&c| c == intersect) {
                    spliced.extend_from_slice(&path[at + 1..]);
                }
                spliced
            }
        };

        if let Some(marker) = index_coord {
            if let Some(at) = route.iter().position(|&c| c == marker) {
                route.drain(..=at);
            }
        }
        Some(route)
    }

    pub fn knows_wall(&self, c: Coord) -> bool {
        self.field.in_map(c) && self.field.is_wall(c)
    }

    pub fn start(&self) -> Coord {
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
