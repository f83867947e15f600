//! Weighted undirected graph with a per-edge pheromone field.
//!
//! [`WeightedGraph`] stores a dense `N×N` table of [`Edge`] slots in a single
//! row-major buffer indexed by `u * N + v`. Every mutation writes both
//! `(u, v)` and `(v, u)`, so the two directions of an edge always agree.

use std::fmt;

use crate::error::{AcoError, Result};

/// Pheromone level of a freshly added edge.
pub const PHEROMONE_BASELINE: f64 = 1.0;

/// Lower clamp for pheromone. Keeps every edge selectable.
pub const PHEROMONE_MIN: f64 = 0.01;

/// Upper clamp for pheromone.
pub const PHEROMONE_MAX: f64 = 10.0;

/// One directed slot of the adjacency table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Traversal cost. Fixed once the edge is added.
    pub weight: f64,
    /// Current pheromone level, always within `[PHEROMONE_MIN, PHEROMONE_MAX]`.
    pub pheromone: f64,
    /// Whether the edge is part of the topology.
    pub exists: bool,
}

impl Default for Edge {
    fn default() -> Self {
        Self {
            weight: 0.0,
            pheromone: PHEROMONE_BASELINE,
            exists: false,
        }
    }
}

/// Symmetric weighted graph carrying pheromone on each edge.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::WeightedGraph;
///
/// let mut graph = WeightedGraph::new(3);
/// graph.add_edge(0, 1, 2.5).unwrap();
///
/// assert!(graph.has_edge(1, 0));
/// assert_eq!(graph.edge_weight(1, 0), Some(2.5));
/// assert!(graph.add_edge(0, 7, 1.0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    num_nodes: usize,
    edges: Vec<Edge>,
}

impl WeightedGraph {
    /// Creates a graph with `n` nodes, no edges, and baseline pheromone on
    /// every slot.
    pub fn new(n: usize) -> Self {
        Self {
            num_nodes: n,
            edges: vec![Edge::default(); n * n],
        }
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    #[inline]
    fn index(&self, u: usize, v: usize) -> usize {
        u * self.num_nodes + v
    }

    #[inline]
    fn slot(&self, u: usize, v: usize) -> Option<&Edge> {
        if u < self.num_nodes && v < self.num_nodes {
            Some(&self.edges[self.index(u, v)])
        } else {
            None
        }
    }

    fn check_node(&self, node: usize) -> Result<()> {
        if node < self.num_nodes {
            Ok(())
        } else {
            Err(AcoError::NodeOutOfRange {
                node,
                num_nodes: self.num_nodes,
            })
        }
    }

    /// Adds the undirected edge `u-v` with the given weight.
    ///
    /// Both directions become existing, take `weight`, and reset their
    /// pheromone to [`PHEROMONE_BASELINE`].
    ///
    /// # Errors
    ///
    /// Returns [`AcoError::NodeOutOfRange`] if either endpoint is outside
    /// the graph, or [`AcoError::InvalidWeight`] for a non-positive or
    /// non-finite weight. The graph is left unchanged in both cases.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: f64) -> Result<()> {
        let checked = self
            .check_node(u)
            .and_then(|_| self.check_node(v))
            .and_then(|_| {
                if weight.is_finite() && weight > 0.0 {
                    Ok(())
                } else {
                    Err(AcoError::InvalidWeight {
                        from: u,
                        to: v,
                        weight,
                    })
                }
            });
        if let Err(err) = checked {
            tracing::warn!(u, v, weight, error = %err, "rejected edge");
            return Err(err);
        }

        let edge = Edge {
            weight,
            pheromone: PHEROMONE_BASELINE,
            exists: true,
        };
        let (uv, vu) = (self.index(u, v), self.index(v, u));
        self.edges[uv] = edge;
        self.edges[vu] = edge;
        Ok(())
    }

    /// Whether `u-v` exists. Out-of-range nodes have no edges.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.slot(u, v).is_some_and(|e| e.exists)
    }

    /// Weight of `u-v`, or `None` when the edge does not exist.
    pub fn edge_weight(&self, u: usize, v: usize) -> Option<f64> {
        self.slot(u, v).filter(|e| e.exists).map(|e| e.weight)
    }

    /// Pheromone on `u-v`, or `None` when the edge does not exist.
    pub fn edge_pheromone(&self, u: usize, v: usize) -> Option<f64> {
        self.slot(u, v).filter(|e| e.exists).map(|e| e.pheromone)
    }

    /// Returns a copy of the `(u, v)` slot.
    pub fn edge(&self, u: usize, v: usize) -> Option<Edge> {
        self.slot(u, v).copied()
    }

    /// Adds `amount` of pheromone to both directions of `u-v`, clamping
    /// the result to `[PHEROMONE_MIN, PHEROMONE_MAX]`.
    ///
    /// Returns `false` (and changes nothing) when the edge does not exist.
    pub fn add_pheromone(&mut self, u: usize, v: usize, amount: f64) -> bool {
        self.update_pheromone(u, v, |p| p + amount)
    }

    /// Multiplies both directions of `u-v` by `factor`, then clamps.
    ///
    /// Returns `false` (and changes nothing) when the edge does not exist.
    pub fn scale_pheromone(&mut self, u: usize, v: usize, factor: f64) -> bool {
        self.update_pheromone(u, v, |p| p * factor)
    }

    fn update_pheromone(&mut self, u: usize, v: usize, f: impl Fn(f64) -> f64) -> bool {
        if !self.has_edge(u, v) {
            return false;
        }
        let (uv, vu) = (self.index(u, v), self.index(v, u));
        let updated = clamp_pheromone(f(self.edges[uv].pheromone));
        self.edges[uv].pheromone = updated;
        self.edges[vu].pheromone = updated;
        true
    }

    /// Evaporates every existing edge by `1 - rate`, flooring at
    /// [`PHEROMONE_MIN`].
    ///
    /// The ceiling is not reapplied; with `rate` in `[0, 1)` decay cannot
    /// push a clamped value above it.
    pub fn evaporate(&mut self, rate: f64) {
        let retain = 1.0 - rate;
        for edge in self.edges.iter_mut().filter(|e| e.exists) {
            edge.pheromone = (edge.pheromone * retain).max(PHEROMONE_MIN);
        }
    }

    /// Nodes adjacent to `u`, in index order.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_nodes).filter(move |&v| self.has_edge(u, v))
    }

    /// Iterates over undirected edges as `(u, v, edge)` with `u <= v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, &Edge)> + '_ {
        let n = self.num_nodes;
        self.edges
            .iter()
            .enumerate()
            .map(move |(i, e)| (i / n, i % n, e))
            .filter(|&(u, v, e)| e.exists && u <= v)
    }

    /// Pheromone level of every undirected edge as `(u, v, pheromone)`.
    pub fn pheromone_snapshot(&self) -> Vec<(usize, usize, f64)> {
        self.edges().map(|(u, v, e)| (u, v, e.pheromone)).collect()
    }

    /// Sum of edge weights along `path`, or `None` if any hop is missing.
    pub fn path_cost(&self, path: &[usize]) -> Option<f64> {
        path.windows(2)
            .map(|w| self.edge_weight(w[0], w[1]))
            .sum()
    }

    /// Display adapter that renders the pheromone matrix.
    pub fn pheromone_table(&self) -> PheromoneTable<'_> {
        PheromoneTable { graph: self }
    }
}

#[inline]
fn clamp_pheromone(value: f64) -> f64 {
    value.clamp(PHEROMONE_MIN, PHEROMONE_MAX)
}

/// Renders the weight adjacency matrix, `0.0` for absent edges.
impl fmt::Display for WeightedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for u in 0..self.num_nodes {
            let row: Vec<String> = (0..self.num_nodes)
                .map(|v| format!("{:.1}", self.edge_weight(u, v).unwrap_or(0.0)))
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

/// Pheromone matrix view returned by [`WeightedGraph::pheromone_table`].
pub struct PheromoneTable<'a> {
    graph: &'a WeightedGraph,
}

impl fmt::Display for PheromoneTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.graph.num_nodes();
        for u in 0..n {
            let row: Vec<String> = (0..n)
                .map(|v| match self.graph.edge_pheromone(u, v) {
                    Some(p) => format!("{p:.2}"),
                    None => "  . ".to_string(),
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
