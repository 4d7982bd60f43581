use clap::Parser;

use incremental_pathfinding::config::Config;
use incremental_pathfinding::simulation::{Simulation, SimulationResult};

fn main() {
    env_logger::init();
    let config = Config::parse();

    println!("Starting incremental replanning simulation...");
    println!("Grid size: {}x{}", config.width, config.height);
    println!("Walls: {}", config.num_walls);
    println!("Algorithm: {}", config.algorithm);
    if let Some(seed) = config.seed {
        println!("Seed: {}", seed);
    }
    println!();

    let mut simulation = match Simulation::new(&config) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("Failed to set up simulation: {}", e);
            std::process::exit(1);
        }
    };

    if !config.quiet {
        println!("{}", simulation.problem().render(None));
    }

    if config.algorithm == "all" {
        let mut results = Vec::new();
        for name in ["lpa_star", "d_star_lite"] {
            match simulation.run(name) {
                Ok(result) => results.push(result),
                Err(e) => {
                    eprintln!("Error running {}: {}", name, e);
                    std::process::exit(1);
                }
            }
        }
        print_comparison(&results);
    } else {
        match simulation.run(&config.algorithm) {
            Ok(result) => print_result(&result),
            Err(e) => {
                eprintln!("Simulation failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn print_result(result: &SimulationResult) {
    println!("=== FINAL RESULTS ({}) ===", result.name);
    if result.success {
        println!("SUCCESS: agent reached the goal");
    } else {
        println!("FAILED: agent did not reach the goal");
    }
    println!("Run time: {:.2?}", result.duration);
    print!("{}", result.statistics);
}

fn print_comparison(results: &[SimulationResult]) {
    println!("=== ALGORITHM COMPARISON ===");
    for result in results {
        println!(
            "{:<12} success: {:<5} moves: {:<4} expansions: {:<6} efficiency: {:.3} time: {:.2?}",
            result.name,
            result.success,
            result.statistics.total_moves,
            result.statistics.expansions,
            result.statistics.route_efficiency,
            result.duration,
        );
    }
}
