use incremental_pathfinding::agent::d_star_lite_search;
use incremental_pathfinding::algorithms::DStarLite;
use incremental_pathfinding::error::PlanningError;
use incremental_pathfinding::grid::Coord;
use incremental_pathfinding::problem::MazeProblem;
use pretty_assertions::assert_eq;

fn coords(points: &[(usize, usize)]) -> Vec<Coord> {
    points.iter().map(|&(x, y)| Coord::new(x, y)).collect()
}

fn open_maze(width: usize, height: usize, start: (usize, usize), goal: (usize, usize)) -> MazeProblem {
    MazeProblem::open(width, height, start.into(), goal.into()).unwrap()
}

//   ####
//   #S.#
//   # G#
//   ####
#[test]
fn steps_across_open_two_by_two() {
    let maze = open_maze(2, 2, (0, 0), (1, 1));
    let mut engine = DStarLite::new(&maze);

    assert_eq!(engine.extract_path(), Some(coords(&[(0, 0), (1, 0), (1, 1)])));

    assert_eq!(engine.take_step(), Coord::new(1, 0));
    assert_eq!(engine.take_step(), Coord::new(1, 1));
    assert_eq!(engine.position(), engine.goal());

    // stepping at the goal stays at the goal
    assert_eq!(engine.take_step(), Coord::new(1, 1));
    assert_eq!(engine.get_route(), coords(&[(0, 0), (1, 0), (1, 1)]));
}

//   #####
//   #S..#
//   #  .#
//   #  G#
//   #####
#[test]
fn path_across_open_three_by_three() {
    let maze = open_maze(3, 3, (0, 0), (2, 2));
    let mut engine = DStarLite::new(&maze);
    assert_eq!(
        engine.extract_path(),
        Some(coords(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]))
    );
}

//   #####
//   #S.##
//   # ..#
//   #  G#
//   #####
#[test]
fn replans_after_a_wall_appears_mid_walk() {
    let maze = open_maze(3, 3, (0, 0), (2, 2));
    let mut engine = DStarLite::new(&maze);

    assert_eq!(engine.take_step(), Coord::new(1, 0));
    engine.make_wall_at(Coord::new(2, 0)).unwrap();

    assert_eq!(
        engine.extract_path(),
        Some(coords(&[(1, 0), (1, 1), (2, 1), (2, 2)]))
    );

    while engine.position() != engine.goal() {
        engine.take_step();
    }
    assert_eq!(
        engine.get_route(),
        coords(&[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)])
    );
}

//   #####
//   #S ##
//   #.# #
//   #..G#
//   #####
#[test]
fn dead_end_forces_physical_backtrack() {
    let maze = open_maze(3, 3, (0, 0), (2, 2));
    let mut engine = DStarLite::new(&maze);

    assert_eq!(engine.take_step(), Coord::new(1, 0));
    engine.make_wall_at(Coord::new(2, 0)).unwrap();
    engine.make_wall_at(Coord::new(1, 1)).unwrap();

    assert_eq!(
        engine.extract_path(),
        Some(coords(&[(1, 0), (0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]))
    );

    while engine.position() != engine.goal() {
        engine.take_step();
    }
    assert_eq!(
        engine.get_route(),
        coords(&[(0, 0), (1, 0), (0, 0), (0, 1), (0, 2), (1, 2), (2, 2)])
    );
}

#[test]
fn trivial_when_start_is_goal() {
    let maze = open_maze(10, 10, (0, 0), (0, 0));
    let mut engine = DStarLite::new(&maze);
    assert_eq!(engine.extract_path(), Some(coords(&[(0, 0)])));
    assert_eq!(engine.take_step(), Coord::new(0, 0));
    assert_eq!(engine.get_route(), coords(&[(0, 0)]));
}

//   #####
//   #S#G#
//   #####
#[test]
fn unreachable_goal_keeps_the_agent_still() {
    let maze = open_maze(3, 1, (0, 0), (2, 0));
    let mut engine = DStarLite::new(&maze);
    engine.make_wall_at(Coord::new(1, 0)).unwrap();

    assert_eq!(engine.extract_path(), None);
    assert_eq!(engine.take_step(), Coord::new(0, 0));
    assert_eq!(engine.get_route(), coords(&[(0, 0)]));

    // walls may only be discovered next to the agent
    assert_eq!(
        engine.make_wall_at(Coord::new(2, 0)),
        Err(PlanningError::NonAdjacentWall {
            wall: Coord::new(2, 0),
            agent: Coord::new(0, 0),
        })
    );
}

#[test]
fn rejects_walls_outside_the_grid() {
    let maze = open_maze(3, 3, (0, 0), (2, 2));
    let mut engine = DStarLite::new(&maze);
    assert_eq!(
        engine.make_wall_at(Coord::new(0, 7)),
        Err(PlanningError::OutOfBounds {
            coord: Coord::new(0, 7),
            width: 3,
            height: 3,
        })
    );
}

#[test]
fn extraction_is_stable_and_recompute_is_free() {
    let maze = open_maze(3, 3, (0, 0), (2, 2));
    let mut engine = DStarLite::new(&maze);

    let first = engine.extract_path();
    assert_eq!(engine.extract_path(), first);

    let expansions = engine.pop_count();
    engine.compute_shortest_path();
    engine.compute_shortest_path();
    assert_eq!(engine.pop_count(), expansions);
}

#[test]
fn source_stays_consistent_and_walls_stay_infinite() {
    let maze = open_maze(3, 3, (0, 0), (2, 2));
    let mut engine = DStarLite::new(&maze);
    assert_eq!(engine.rhs(Coord::new(2, 2)), 0.0);

    engine.take_step();
    engine.make_wall_at(Coord::new(2, 0)).unwrap();

    assert_eq!(engine.rhs(Coord::new(2, 2)), 0.0);
    assert!(engine.knows_wall(Coord::new(2, 0)));
    assert!(engine.rhs(Coord::new(2, 0)).is_infinite());
    assert!(engine.g(Coord::new(2, 0)).is_infinite());

    engine.make_wall_at(Coord::new(2, 0)).unwrap();
    assert_eq!(engine.take_step(), Coord::new(1, 1));
}

#[test]
fn queue_holds_exactly_the_inconsistent_cells() {
    let maze = open_maze(3, 3, (0, 0), (2, 2));
    let mut engine = DStarLite::new(&maze);
    engine.take_step();
    engine.make_wall_at(Coord::new(2, 0)).unwrap();

    let inconsistent = (0..3)
        .flat_map(|x| (0..3).map(move |y| Coord::new(x, y)))
        .filter(|&c| engine.g(c) != engine.rhs(c))
        .count();
    assert_eq!(engine.queue_size(), inconsistent);
}

#[test]
fn driver_discovers_walls_and_reroutes() {
    let mut maze = MazeProblem::with_walls(
        3,
        3,
        Coord::new(0, 0),
        Coord::new(2, 2),
        &[Coord::new(2, 0)],
    )
    .unwrap();

    let outcome = d_star_lite_search(&mut maze).unwrap();
    assert!(outcome.reached_goal);
    assert_eq!(outcome.walls_discovered, 1);
    assert_eq!(
        outcome.route,
        coords(&[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)])
    );
}

#[test]
fn driver_walks_back_out_of_a_dead_end() {
    let mut maze = MazeProblem::with_walls(
        3,
        3,
        Coord::new(0, 0),
        Coord::new(2, 2),
        &[Coord::new(2, 0), Coord::new(1, 1)],
    )
    .unwrap();

    let outcome = d_star_lite_search(&mut maze).unwrap();
    assert!(outcome.reached_goal);
    assert_eq!(outcome.walls_discovered, 2);
    assert_eq!(
        outcome.route,
        coords(&[(0, 0), (1, 0), (0, 0), (0, 1), (0, 2), (1, 2), (2, 2)])
    );
}

#[test]
fn driver_reports_an_unreachable_goal() {
    let mut maze = MazeProblem::with_walls(
        3,
        1,
        Coord::new(0, 0),
        Coord::new(2, 0),
        &[Coord::new(1, 0)],
    )
    .unwrap();

    let outcome = d_star_lite_search(&mut maze).unwrap();
    assert!(!outcome.reached_goal);
    assert_eq!(outcome.route, coords(&[(0, 0)]));
}
