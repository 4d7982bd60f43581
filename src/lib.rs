//! Incremental shortest-path replanning on 4-connected grids.
//!
//! An agent knows the grid's dimensions and its goal, but discovers walls
//! only when it stands next to them. Two engines repair their shortest-path
//! tree locally after each discovery instead of searching from scratch:
//! LPA* for a fixed start, D* Lite for a moving one.

pub mod agent;
pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod heuristics;
pub mod problem;
pub mod queue;
pub mod simulation;
pub mod statistics;
