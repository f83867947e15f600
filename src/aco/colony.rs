//! Colony state: parameters plus the best path found so far.

use super::config::AcoConfig;
use super::path::AntPath;
use crate::error::{AcoError, Result};

/// Capacity-bounded storage for the global-best path.
///
/// Writes never grow the buffer past its capacity. A path longer than the
/// capacity is stored truncated and flagged; its true node count and cost
/// are still recorded.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestPath {
    nodes: Vec<usize>,
    capacity: usize,
    length: Option<usize>,
    cost: f64,
    truncated: bool,
}

impl BestPath {
    /// Allocates an empty buffer for up to `capacity` nodes.
    ///
    /// # Errors
    ///
    /// [`AcoError::ResourceExhausted`] if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(capacity)
            .map_err(|_| AcoError::ResourceExhausted { capacity })?;
        Ok(Self {
            nodes,
            capacity,
            length: None,
            cost: f64::INFINITY,
            truncated: false,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Node count of the recorded path, `None` until one is recorded.
    pub fn length(&self) -> Option<usize> {
        self.length
    }

    /// Cost of the recorded path, infinite until one is recorded.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Stored nodes (a prefix of the recorded path if it was truncated).
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Replaces the stored path if `path` has strictly fewer nodes.
    ///
    /// Returns whether the record changed.
    pub fn offer(&mut self, path: &AntPath) -> bool {
        if self.length.is_some_and(|len| path.len() >= len) {
            return false;
        }

        let kept = path.len().min(self.capacity);
        self.nodes.clear();
        self.nodes.extend_from_slice(&path.nodes[..kept]);
        self.truncated = kept < path.len();
        if self.truncated {
            tracing::warn!(
                length = path.len(),
                capacity = self.capacity,
                "best path exceeds buffer capacity; stored truncated"
            );
        }
        self.length = Some(path.len());
        self.cost = path.cost;
        true
    }
}

/// Mutable colony state for one run.
///
/// Created once per run, updated by every iteration, and read by
/// observers between iterations.
#[derive(Debug, Clone)]
pub struct ColonyState {
    config: AcoConfig,
    global_best: BestPath,
    iterations: usize,
    best_length_history: Vec<Option<usize>>,
}

impl ColonyState {
    /// Validates `config` and allocates the best-path buffer.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidConfig`] for a bad configuration,
    /// [`AcoError::ResourceExhausted`] if the buffer cannot be allocated.
    pub fn new(config: AcoConfig) -> Result<Self> {
        config.validate()?;
        let global_best = BestPath::with_capacity(config.best_path_capacity)?;
        Ok(Self {
            config,
            global_best,
            iterations: 0,
            best_length_history: Vec::new(),
        })
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Iterations completed so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Global-best nodes; empty while no path has been found.
    pub fn global_best_path(&self) -> &[usize] {
        self.global_best.nodes()
    }

    /// Global-best node count; `None` while no path has been found.
    pub fn global_best_length(&self) -> Option<usize> {
        self.global_best.length()
    }

    /// Global-best cost; infinite while no path has been found.
    pub fn global_best_cost(&self) -> f64 {
        self.global_best.cost()
    }

    pub fn global_best(&self) -> &BestPath {
        &self.global_best
    }

    /// Global-best node count after each completed iteration.
    pub fn best_length_history(&self) -> &[Option<usize>] {
        &self.best_length_history
    }

    pub(crate) fn offer_global_best(&mut self, path: &AntPath) -> bool {
        self.global_best.offer(path)
    }

    pub(crate) fn finish_iteration(&mut self) {
        self.iterations += 1;
        self.best_length_history.push(self.global_best.length());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(nodes: &[usize], cost: f64) -> AntPath {
        AntPath {
            nodes: nodes.to_vec(),
            cost,
        }
    }

    #[test]
    fn test_new_state_has_no_best() {
        let state = ColonyState::new(AcoConfig::default()).unwrap();
        assert_eq!(state.global_best_length(), None);
        assert!(state.global_best_path().is_empty());
        assert!(state.global_best_cost().is_infinite());
        assert_eq!(state.iterations(), 0);
    }

    #[test]
    fn test_new_state_rejects_invalid_config() {
        let err = ColonyState::new(AcoConfig::default().with_num_ants(0)).unwrap_err();
        assert!(matches!(err, AcoError::InvalidConfig(_)));
    }

    #[test]
    fn test_offer_requires_strictly_fewer_nodes() {
        let mut best = BestPath::with_capacity(10).unwrap();
        assert!(best.offer(&path(&[0, 1, 2, 3], 3.0)));
        assert_eq!(best.length(), Some(4));

        // same node count, cheaper: not an improvement
        assert!(!best.offer(&path(&[0, 2, 1, 3], 1.0)));
        assert_eq!(best.nodes(), &[0, 1, 2, 3]);

        assert!(best.offer(&path(&[0, 3], 2.0)));
        assert_eq!(best.length(), Some(2));
        assert_eq!(best.cost(), 2.0);
        assert!(!best.offer(&path(&[0, 1, 3], 0.5)));
    }

    #[test]
    fn test_offer_truncates_to_capacity() {
        let mut best = BestPath::with_capacity(3).unwrap();
        assert!(best.offer(&path(&[0, 1, 2, 3, 4], 4.0)));
        assert!(best.is_truncated());
        assert_eq!(best.nodes(), &[0, 1, 2]);
        assert_eq!(best.length(), Some(5));
        assert!(best.nodes().len() <= best.capacity());

        assert!(best.offer(&path(&[0, 4], 1.0)));
        assert!(!best.is_truncated());
        assert_eq!(best.nodes(), &[0, 4]);
    }

    #[test]
    fn test_history_tracks_best_length() {
        let mut state = ColonyState::new(AcoConfig::default()).unwrap();
        state.finish_iteration();
        state.offer_global_best(&path(&[0, 1, 2], 2.0));
        state.finish_iteration();
        assert_eq!(state.iterations(), 2);
        assert_eq!(state.best_length_history(), &[None, Some(3)]);
    }
}
