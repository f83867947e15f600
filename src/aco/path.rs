//! Single-ant path construction.

use rand::Rng;

use super::config::AcoConfig;
use super::graph::WeightedGraph;
use super::selection::choose_next;

/// A complete path from the start node to the target node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntPath {
    /// Visited nodes in order, starting at the start node and ending at the
    /// target.
    pub nodes: Vec<usize>,

    /// Sum of edge weights along `nodes`.
    pub cost: f64,
}

impl AntPath {
    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Traversed edges as consecutive `(u, v)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Walks one ant from `start` toward `end`.
///
/// The ant takes at most `config.max_steps` moves, never revisits a node,
/// and stops as soon as it stands on `end`. Returns `None` when it reaches a
/// dead end or runs out of steps; no partial path is exposed.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_antcolony::aco::{build_path, AcoConfig, WeightedGraph};
///
/// let mut graph = WeightedGraph::new(2);
/// graph.add_edge(0, 1, 3.0).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
///
/// let path = build_path(&graph, 0, 1, &AcoConfig::default(), &mut rng).unwrap();
/// assert_eq!(path.nodes, vec![0, 1]);
/// assert_eq!(path.cost, 3.0);
/// ```
pub fn build_path<R: Rng>(
    graph: &WeightedGraph,
    start: usize,
    end: usize,
    config: &AcoConfig,
    rng: &mut R,
) -> Option<AntPath> {
    let n = graph.num_nodes();
    if start >= n || end >= n {
        return None;
    }

    let mut visited = vec![false; n];
    visited[start] = true;
    let mut nodes = vec![start];
    let mut cost = 0.0;
    let mut previous = None;
    let mut current = start;

    for _ in 0..config.max_steps {
        if current == end {
            break;
        }
        let next = choose_next(graph, current, previous, &visited, config, rng)?;
        cost += graph.edge_weight(current, next)?;
        nodes.push(next);
        visited[next] = true;
        previous = Some(current);
        current = next;
    }

    if current == end {
        Some(AntPath { nodes, cost })
    } else {
        tracing::trace!(start, end, steps = config.max_steps, "ant ran out of steps");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aco::create_rng;

    fn chain(n: usize) -> WeightedGraph {
        let mut g = WeightedGraph::new(n);
        for i in 0..n - 1 {
            g.add_edge(i, i + 1, 1.0).unwrap();
        }
        g
    }

    #[test]
    fn test_chain_path_is_forced() {
        let g = chain(5);
        let mut rng = create_rng(42);
        let path = build_path(&g, 0, 4, &AcoConfig::default(), &mut rng).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 2, 3, 4]);
        assert!((path.cost - 4.0).abs() < 1e-12);
        assert_eq!(path.edges().count(), 4);
    }

    #[test]
    fn test_start_equals_end() {
        let g = chain(3);
        let mut rng = create_rng(42);
        let path = build_path(&g, 1, 1, &AcoConfig::default(), &mut rng).unwrap();
        assert_eq!(path.nodes, vec![1]);
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn test_step_budget_exhausted() {
        let g = chain(5);
        let mut rng = create_rng(42);
        let config = AcoConfig::default().with_max_steps(3);
        assert!(build_path(&g, 0, 4, &config, &mut rng).is_none());

        let config = AcoConfig::default().with_max_steps(4);
        assert!(build_path(&g, 0, 4, &config, &mut rng).is_some());
    }

    #[test]
    fn test_unreachable_target_fails() {
        let mut g = WeightedGraph::new(5);
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        let mut rng = create_rng(42);
        for _ in 0..20 {
            assert!(build_path(&g, 0, 4, &AcoConfig::default(), &mut rng).is_none());
        }
    }

    #[test]
    fn test_dead_end_branch_fails() {
        // 0 -> 2 -> 1 strands the ant: both of 1's neighbors are visited.
        let mut g = chain(4);
        g.add_edge(0, 2, 1.0).unwrap();
        let config = AcoConfig::default().with_exploration_rate(1.0);
        let mut rng = create_rng(5);
        let outcomes: Vec<_> = (0..200)
            .map(|_| build_path(&g, 0, 3, &config, &mut rng))
            .collect();
        assert!(outcomes.iter().any(|p| p.is_none()));
        assert!(outcomes.iter().flatten().all(|p| p.nodes.last() == Some(&3)));
    }

    #[test]
    fn test_out_of_range_endpoints_fail() {
        let g = chain(3);
        let mut rng = create_rng(42);
        assert!(build_path(&g, 0, 9, &AcoConfig::default(), &mut rng).is_none());
        assert!(build_path(&g, 9, 0, &AcoConfig::default(), &mut rng).is_none());
    }

    #[test]
    fn test_paths_never_repeat_nodes() {
        // Complete graph on 6 nodes: plenty of room to wander.
        let mut g = WeightedGraph::new(6);
        for u in 0..6 {
            for v in u + 1..6 {
                g.add_edge(u, v, 1.0 + (u * v) as f64).unwrap();
            }
        }
        let config = AcoConfig::default().with_exploration_rate(0.5);
        let mut rng = create_rng(9);
        for _ in 0..200 {
            let path = build_path(&g, 0, 5, &config, &mut rng).unwrap();
            let mut seen = path.nodes.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), path.len(), "repeated node in {:?}", path.nodes);
            assert_eq!(path.nodes.last(), Some(&5));
            let expected = g.path_cost(&path.nodes).unwrap();
            assert!((path.cost - expected).abs() < 1e-9);
        }
    }
}
