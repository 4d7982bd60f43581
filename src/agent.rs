use log::info;

use crate::algorithms::{DStarLite, LPAStar};
use crate::error::PlanningError;
use crate::grid::{neighbours, Coord};
use crate::problem::Problem;

/// What a driver run produced: the cells the agent actually occupied, in
/// order, plus bookkeeping for the statistics report.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub route: Vec<Coord>,
    pub reached_goal: bool,
    pub expansions: usize,
    pub walls_discovered: usize,
}

/// Walks the maze with a D* Lite engine: sense the four adjacent cells,
/// report unknown walls, then take one step. Stops at the goal, when the
/// engine refuses to move, or after the iteration cap.
pub fn d_star_lite_search(problem: &mut dyn Problem) -> Result<SearchOutcome, PlanningError> {
    let (width, height) = problem.dims();
    let goal = problem.goal_state();
    let mut engine = DStarLite::new(&*problem);
    let mut walls_discovered = 0;

    let max_iterations = width * height * 4;
    for _ in 0..max_iterations {
        let pos = engine.position();
        if pos == goal {
            break;
        }

        for n in neighbours(pos, width, height) {
            if problem.is_wall(n) && !engine.knows_wall(n) {
                engine.make_wall_at(n)?;
                walls_discovered += 1;
            }
        }

        if engine.take_step() == pos {
            info!("agent blocked at {pos}, no route to {goal}");
            break;
        }
    }

    Ok(SearchOutcome {
        reached_goal: engine.position() == goal,
        route: engine.get_route(),
        expansions: engine.pop_count(),
        walls_discovered,
    })
}

/// Walks the maze with an LPA* engine. The engine replans between a fixed
/// start and goal; the agent follows `get_route`, which already splices in
/// any backtrack segment when a replanned path diverges from the walked
/// prefix.
pub fn lpa_star_search(problem: &mut dyn Problem) -> Result<SearchOutcome, PlanningError> {
    let (width, height) = problem.dims();
    let goal = problem.goal_state();
    let mut engine = LPAStar::new(&*problem);
    let mut pos = problem.start_state();
    let mut walked = Vec::new();
    let mut walls_discovered = 0;

    let max_iterations = width * height * 4;
    let mut iterations = 0;
    while pos != goal {
        iterations += 1;
        if iterations > max_iterations {
            break;
        }

        for n in neighbours(pos, width, height) {
            if problem.is_wall(n) && !engine.knows_wall(n) {
                engine.make_wall_at(n)?;
                walls_discovered += 1;
            }
        }

        let Some(remaining) = engine.get_route(Some(pos)) else {
            info!("agent blocked at {pos}, no route to {goal}");
            break;
        };
        let Some(&next) = remaining.first() else {
            break;
        };
        if next == pos {
            break;
        }

        walked.push(pos);
        pos = next;
    }
    walked.push(pos);

    Ok(SearchOutcome {
        reached_goal: pos == goal,
        route: walked,
        expansions: engine.pop_count(),
        walls_discovered,
    })
}
