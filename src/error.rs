//! Error types for the ACO engine.
//!
//! Only configuration and resource failures surface as errors. An ant that
//! fails to reach the target is a normal outcome and is reported through
//! [`IterationSummary`](crate::aco::IterationSummary) instead.

/// Errors reported by graph construction and the optimization loop.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AcoError {
    /// A node index outside `[0, num_nodes)` was supplied.
    ///
    /// The operation that received it made no change.
    #[error("node {node} is out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange {
        /// The offending node index.
        node: usize,
        /// Number of nodes in the graph.
        num_nodes: usize,
    },

    /// An edge weight that is not a positive finite number.
    #[error("edge ({from}, {to}) has invalid weight {weight}; weights must be positive and finite")]
    InvalidWeight {
        /// Source node.
        from: usize,
        /// Destination node.
        to: usize,
        /// The rejected weight.
        weight: f64,
    },

    /// A colony parameter is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Best-path storage could not be allocated. The run cannot proceed.
    #[error("failed to allocate best-path buffer of capacity {capacity}")]
    ResourceExhausted {
        /// Requested buffer capacity in nodes.
        capacity: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AcoError>;
