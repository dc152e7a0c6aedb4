//! # Color-Fill Solver Library
//!
//! This library provides the board model for the "flood-it" color-fill puzzle and
//! two solvers that pick the sequence of colors to flood the board from an anchor
//! cell in as few moves as possible.
//!
//! It is used by two binaries:
//! - `colorfill_solver`: Reads a board from a text file and prints the moves found
//!   by either solver.
//! - `depth_evaluator`: Compares lookahead depths and the anytime search on seeded
//!   random boards.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`), palette (`Tile`), anchor regions
//!   (`Region`) and canonical state keys (`StateKey`).
//! - `anytime`: Best-first search collecting several ranked solutions under a time budget.
//! - `lookahead`: Memoized bounded-depth search that plays its best path move by move.
//! - `solver`: Shared result types (`Solution`, `SearchReport`).
//! - `heuristics`: Board evaluation helpers used by the solvers.
//! - `config`: TOML configuration for solver limits.
//! - `utils`: Parsing boards from text.
//! - `error`: Error types.

pub mod anytime;
pub mod config;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod lookahead;
pub mod solver;
pub mod utils;

pub use anytime::{solve_anytime, AnytimeOptions, AnytimeSolver};
pub use engine::{Board, Tile};
pub use lookahead::{solve_lookahead, LookaheadSolver};
pub use solver::{SearchReport, Solution, Termination};
