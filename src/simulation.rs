use std::time::{Duration, Instant};

use pathfinding::prelude::astar;

use crate::agent::{d_star_lite_search, lpa_star_search};
use crate::config::Config;
use crate::grid::{neighbours, Coord};
use crate::problem::{MazeProblem, Problem};
use crate::statistics::Statistics;

#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub name: String,
    pub statistics: Statistics,
    pub success: bool,
    pub duration: Duration,
    pub route: Vec<Coord>,
}

/// Couples a generated maze with a replanning driver and measures the run.
pub struct Simulation {
    problem: MazeProblem,
    optimal_path_length: usize,
}

impl Simulation {
    pub fn new(config: &Config) -> Result<Self, String> {
        let problem =
            MazeProblem::generate(config.width, config.height, config.num_walls, config.seed);
        Self::with_problem(problem)
    }

    /// Wraps an existing maze, e.g. a handcrafted one.
    pub fn with_problem(problem: MazeProblem) -> Result<Self, String> {
        let optimal_path_length = offline_optimal(&problem).ok_or_else(|| {
            format!(
                "no path exists from {} to {} ({} walls placed); try --num-walls lower or a larger grid",
                problem.start_state(),
                problem.goal_state(),
                problem.wall_count()
            )
        })?;

        Ok(Simulation {
            problem,
            optimal_path_length,
        })
    }

    pub fn problem(&self) -> &MazeProblem {
        &self.problem
    }

    pub fn optimal_path_length(&self) -> usize {
        self.optimal_path_length
    }

    /// Runs the named algorithm against this maze, restoring the problem's
    /// start afterward so runs can be compared on identical terms.
    pub fn run(&mut self, algorithm: &str) -> Result<SimulationResult, String> {
        let original_start = self.problem.start_state();

        let begun = Instant::now();
        let outcome = match algorithm {
            "lpa_star" => lpa_star_search(&mut self.problem),
            "d_star_lite" => d_star_lite_search(&mut self.problem),
            other => return Err(format!("unknown algorithm: '{other}'")),
        }
        .map_err(|e| e.to_string())?;
        let duration = begun.elapsed();

        self.problem.set_start(original_start);

        let mut statistics = Statistics::new(self.optimal_path_length);
        statistics.total_moves = outcome.route.len().saturating_sub(1);
        statistics.walls_discovered = outcome.walls_discovered;
        statistics.expansions = outcome.expansions;
        statistics.calculate_efficiency();

        Ok(SimulationResult {
            name: algorithm.to_string(),
            statistics,
            success: outcome.reached_goal,
            duration,
            route: outcome.route,
        })
    }
}

/// Shortest path length against ground truth, for the efficiency yardstick.
/// Returns edge count, `None` when the maze has no solution.
fn offline_optimal(problem: &MazeProblem) -> Option<usize> {
    let (width, height) = problem.dims();
    let goal = problem.goal_state();

    let result = astar(
        &problem.start_state(),
        |&p| {
            neighbours(p, width, height)
                .into_iter()
                .filter(|&n| !problem.is_wall(n))
                .map(|n| (n, 1u32))
                .collect::<Vec<_>>()
        },
        |&p| ((p.x as i64 - goal.x as i64).abs() + (p.y as i64 - goal.y as i64).abs()) as u32,
        |&p| p == goal,
    );
    result.map(|(path, _)| path.len().saturating_sub(1))
}
