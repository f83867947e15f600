//! Next-node selection rule.
//!
//! An ant standing on `current` considers every adjacent node it has not yet
//! visited (and, when backtracking is prevented, not the node it just came
//! from). Each candidate gets an appeal of
//!
//! ```text
//! pheromone(current, j)^α × (1 / weight(current, j))^β
//! ```
//!
//! and one is drawn by roulette-wheel sampling. With a small probability the
//! ant ignores appeal and picks uniformly, which keeps the colony from
//! locking onto one trail too early.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Goldberg & Deb (1991), fitness-proportionate selection

use rand::Rng;

use super::config::AcoConfig;
use super::graph::WeightedGraph;

/// Combined pheromone/heuristic score of moving along `u-v`.
///
/// Returns 0.0 when the edge does not exist.
pub fn appeal(graph: &WeightedGraph, u: usize, v: usize, config: &AcoConfig) -> f64 {
    match (graph.edge_pheromone(u, v), graph.edge_weight(u, v)) {
        (Some(pheromone), Some(weight)) => {
            pheromone.powf(config.pheromone_exponent)
                * (1.0 / weight).powf(config.heuristic_exponent)
        }
        _ => 0.0,
    }
}

/// Feasible successors of `current`, in index order.
pub fn candidates(
    graph: &WeightedGraph,
    current: usize,
    previous: Option<usize>,
    visited: &[bool],
    config: &AcoConfig,
) -> Vec<usize> {
    graph
        .neighbors(current)
        .filter(|&j| !visited.get(j).copied().unwrap_or(false))
        .filter(|&j| !config.prevent_backtracking || previous != Some(j))
        .collect()
}

/// Chooses the ant's next node, or `None` at a dead end.
///
/// `visited[j]` marks nodes already on the ant's path; those are never
/// offered again.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_antcolony::aco::{choose_next, AcoConfig, WeightedGraph};
///
/// let mut graph = WeightedGraph::new(3);
/// graph.add_edge(0, 1, 1.0).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let visited = [true, false, false];
///
/// let next = choose_next(&graph, 0, None, &visited, &AcoConfig::default(), &mut rng);
/// assert_eq!(next, Some(1));
/// ```
pub fn choose_next<R: Rng>(
    graph: &WeightedGraph,
    current: usize,
    previous: Option<usize>,
    visited: &[bool],
    config: &AcoConfig,
    rng: &mut R,
) -> Option<usize> {
    let candidates = candidates(graph, current, previous, visited, config);
    if candidates.is_empty() {
        return None;
    }

    if config.exploration_rate > 0.0 && rng.random_range(0.0..1.0) < config.exploration_rate {
        return Some(candidates[rng.random_range(0..candidates.len())]);
    }

    let appeals: Vec<f64> = candidates
        .iter()
        .map(|&j| appeal(graph, current, j, config))
        .collect();
    let total: f64 = appeals.iter().sum();

    if total == 0.0 {
        return None;
    }
    if !total.is_finite() {
        return highest_appeal(&candidates, &appeals);
    }

    let threshold = rng.random_range(0.0..=total);
    let mut cumulative = 0.0;
    for (&node, &a) in candidates.iter().zip(&appeals) {
        cumulative += a;
        if cumulative >= threshold {
            return Some(node);
        }
    }

    // floating-point fallback
    highest_appeal(&candidates, &appeals)
}

/// Candidate with strictly highest appeal; the lowest index wins ties.
fn highest_appeal(candidates: &[usize], appeals: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (&node, &a) in candidates.iter().zip(appeals) {
        match best {
            Some((_, best_appeal)) if a <= best_appeal => {}
            _ => best = Some((node, a)),
        }
    }
    best.map(|(node, _)| node)
}
