pub mod cache;
pub mod common;
pub mod config;
pub mod graph;
pub mod heuristic;
pub mod map;
pub mod problem;
pub mod scenario;
pub mod solver;
pub mod stat;
