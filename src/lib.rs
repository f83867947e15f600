//! Ant Colony Optimization engine for low-cost paths in weighted graphs.
//!
//! - **ACO engine** ([`aco`]): weighted graph with per-edge pheromone,
//!   roulette-wheel next-node selection, per-ant path construction, and the
//!   deposit/evaporation loop that converges on cheap routes.
//! - **Analysis** ([`analysis`]): read-only observers and a benchmark harness
//!   that measures convergence and pheromone levels without touching engine
//!   state.
//!
//! # Architecture
//!
//! The engine is single-threaded and deterministic under a fixed seed. All
//! randomness flows through an explicit `rand::Rng` handle, and reporting
//! layers only observe the graph and colony between iterations.

pub mod aco;
pub mod analysis;
pub mod error;

pub use error::{AcoError, Result};
