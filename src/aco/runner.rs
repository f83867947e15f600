//! ACO execution loop.
//!
//! # Algorithm
//!
//! 1. Each ant builds a path from `start` toward `end` (sequentially,
//!    sharing one random source)
//! 2. Every successful path lays `Q / cost` on each edge it traversed, or,
//!    with the global-best strategy, only the global-best path deposits
//! 3. Optionally reinforce the iteration-best path
//! 4. Evaporate every edge by `1 - ρ`, exactly once
//! 5. Repeat for the configured number of iterations
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant System: Optimization
//! by a Colony of Cooperating Agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use rand::Rng;

use super::colony::ColonyState;
use super::config::AcoConfig;
use super::create_rng;
use super::graph::WeightedGraph;
use super::path::{build_path, AntPath};
use crate::error::{AcoError, Result};

/// Outcome of one iteration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationSummary {
    /// 1-based iteration number.
    pub iteration: usize,

    /// One entry per ant, in ant order. `None` for ants that did not reach
    /// the target.
    pub ant_paths: Vec<Option<AntPath>>,

    /// Shortest (by node count) successful path of this iteration.
    pub best: Option<AntPath>,

    /// Number of ants that reached the target.
    pub successful_ants: usize,

    /// Whether this iteration replaced the global best.
    pub improved_global_best: bool,
}

impl IterationSummary {
    /// Node count of the iteration-best path.
    pub fn best_length(&self) -> Option<usize> {
        self.best.as_ref().map(AntPath::len)
    }

    /// Cost of the iteration-best path.
    pub fn best_cost(&self) -> Option<f64> {
        self.best.as_ref().map(|p| p.cost)
    }

    /// Successful paths only.
    pub fn successful_paths(&self) -> impl Iterator<Item = &AntPath> {
        self.ant_paths.iter().flatten()
    }
}

/// Read-only hook called by the loop after every iteration.
///
/// Observers see the colony and the graph but cannot mutate them.
pub trait IterationObserver {
    /// Called after each iteration, once evaporation has been applied.
    fn on_iteration(
        &mut self,
        summary: &IterationSummary,
        colony: &ColonyState,
        graph: &WeightedGraph,
    );

    /// Called once after the final iteration.
    fn on_finish(&mut self, _colony: &ColonyState, _graph: &WeightedGraph) {}
}

impl IterationObserver for () {
    fn on_iteration(&mut self, _: &IterationSummary, _: &ColonyState, _: &WeightedGraph) {}
}

/// Executes the ACO loop.
///
/// # Usage
///
/// ```
/// use u_antcolony::aco::{AcoConfig, AcoRunner, WeightedGraph};
///
/// let mut graph = WeightedGraph::new(4);
/// graph.add_edge(0, 1, 1.0).unwrap();
/// graph.add_edge(1, 2, 1.0).unwrap();
/// graph.add_edge(2, 3, 1.0).unwrap();
/// graph.add_edge(0, 3, 2.0).unwrap();
///
/// let config = AcoConfig::default().with_num_ants(5).with_seed(42);
/// let colony = AcoRunner::run(&mut graph, &config, 0, 3, 20).unwrap();
///
/// // every ant reaches node 3; the best is either the chain or the shortcut
/// assert!(colony.global_best_length().is_some());
/// assert!(colony.global_best_cost() <= 3.0);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs `iterations` iterations from `start` to `end`.
    ///
    /// The random source is seeded from `config.seed`, or randomly when
    /// unset.
    ///
    /// # Errors
    ///
    /// Invalid configuration or endpoints, or best-path allocation failure.
    /// Ants that fail to reach `end` are not errors.
    pub fn run(
        graph: &mut WeightedGraph,
        config: &AcoConfig,
        start: usize,
        end: usize,
        iterations: usize,
    ) -> Result<ColonyState> {
        Self::run_with_observer(graph, config, start, end, iterations, &mut ())
    }

    /// Runs the loop and reports every iteration to `observer`.
    pub fn run_with_observer<O: IterationObserver + ?Sized>(
        graph: &mut WeightedGraph,
        config: &AcoConfig,
        start: usize,
        end: usize,
        iterations: usize,
        observer: &mut O,
    ) -> Result<ColonyState> {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::run_with_rng(graph, config, start, end, iterations, &mut rng, observer)
    }

    /// Runs the loop drawing from a caller-supplied random source.
    pub fn run_with_rng<R: Rng, O: IterationObserver + ?Sized>(
        graph: &mut WeightedGraph,
        config: &AcoConfig,
        start: usize,
        end: usize,
        iterations: usize,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<ColonyState> {
        for node in [start, end] {
            if node >= graph.num_nodes() {
                return Err(AcoError::NodeOutOfRange {
                    node,
                    num_nodes: graph.num_nodes(),
                });
            }
        }
        let mut colony = ColonyState::new(config.clone())?;

        tracing::info!(
            num_ants = config.num_ants,
            iterations,
            start,
            end,
            nodes = graph.num_nodes(),
            "starting ant colony optimization"
        );

        for _ in 0..iterations {
            let summary = Self::run_iteration(graph, &mut colony, start, end, rng);
            observer.on_iteration(&summary, &colony, graph);
        }
        observer.on_finish(&colony, graph);

        tracing::info!(
            iterations = colony.iterations(),
            best_length = ?colony.global_best_length(),
            best_cost = colony.global_best_cost(),
            "ant colony optimization finished"
        );
        Ok(colony)
    }

    /// Runs a single iteration: all ants, deposits, then evaporation.
    pub fn run_iteration<R: Rng>(
        graph: &mut WeightedGraph,
        colony: &mut ColonyState,
        start: usize,
        end: usize,
        rng: &mut R,
    ) -> IterationSummary {
        let config = colony.config().clone();
        let mut ant_paths = Vec::with_capacity(config.num_ants);
        let mut best: Option<AntPath> = None;
        let mut new_global_best: Option<AntPath> = None;

        for ant in 0..config.num_ants {
            let Some(path) = build_path(graph, start, end, &config, rng) else {
                tracing::trace!(ant, "ant failed to reach target");
                ant_paths.push(None);
                continue;
            };
            tracing::trace!(ant, nodes = ?path.nodes, cost = path.cost, "ant reached target");

            if !config.use_global_best_update {
                deposit(graph, &path.nodes, path.cost, config.deposit_amount);
            }
            if best.as_ref().is_none_or(|b| path.len() < b.len()) {
                best = Some(path.clone());
            }
            if colony.offer_global_best(&path) {
                new_global_best = Some(path.clone());
            }
            ant_paths.push(Some(path));
        }

        if config.use_global_best_update {
            // a truncated record only holds a prefix; reinforce from the full
            // path while it is still at hand
            let record = colony.global_best();
            if let Some(path) = &new_global_best {
                deposit(graph, &path.nodes, path.cost, config.deposit_amount);
            } else if !record.is_truncated() {
                deposit(graph, record.nodes(), record.cost(), config.deposit_amount);
            } else {
                tracing::debug!(
                    length = ?record.length(),
                    "global best is stored truncated; skipping its deposit"
                );
            }
        }
        if config.iteration_best_weight > 0.0 {
            if let Some(b) = &best {
                deposit(
                    graph,
                    &b.nodes,
                    b.cost,
                    config.iteration_best_weight * config.deposit_amount,
                );
            }
        }

        graph.evaporate(config.evaporation_rate);
        colony.finish_iteration();

        let successful_ants = ant_paths.iter().flatten().count();
        let summary = IterationSummary {
            iteration: colony.iterations(),
            ant_paths,
            best,
            successful_ants,
            improved_global_best: new_global_best.is_some(),
        };

        tracing::debug!(
            iteration = summary.iteration,
            successful_ants,
            iteration_best = ?summary.best_length(),
            global_best = ?colony.global_best_length(),
            "iteration complete"
        );
        summary
    }
}

/// Lays `q / cost` on every edge of `nodes`, both directions.
fn deposit(graph: &mut WeightedGraph, nodes: &[usize], cost: f64, q: f64) {
    if !(cost.is_finite() && cost > 0.0) {
        return;
    }
    let amount = q / cost;
    for w in nodes.windows(2) {
        graph.add_pheromone(w[0], w[1], amount);
    }
}
