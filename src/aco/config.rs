//! ACO configuration.
//!
//! [`AcoConfig`] holds the colony parameters that shape selection, deposit
//! and evaporation.

use crate::error::{AcoError, Result};

/// Configuration for an Ant Colony Optimization run.
///
/// # Defaults
///
/// ```
/// use u_antcolony::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.num_ants, 10);
/// assert_eq!(config.max_steps, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_antcolony::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_num_ants(3)
///     .with_pheromone_exponent(1.0)
///     .with_heuristic_exponent(2.0)
///     .with_evaporation_rate(0.1)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of ants that build a path in every iteration.
    pub num_ants: usize,

    /// Pheromone exponent (α). Higher values favor well-trodden edges.
    pub pheromone_exponent: f64,

    /// Heuristic exponent (β). Higher values favor cheap edges.
    pub heuristic_exponent: f64,

    /// Evaporation rate (ρ) in `[0, 1)`.
    ///
    /// Every existing edge keeps `1 - ρ` of its pheromone per iteration.
    pub evaporation_rate: f64,

    /// Deposit amount (Q). A successful path of cost `L` lays `Q / L` on each
    /// traversed edge.
    pub deposit_amount: f64,

    /// Forbid stepping straight back to the node the ant just left.
    pub prevent_backtracking: bool,

    /// Upper bound on moves per ant.
    pub max_steps: usize,

    /// Probability of ignoring appeal and picking a feasible successor
    /// uniformly at random.
    pub exploration_rate: f64,

    /// Capacity of the global-best path buffer, in nodes.
    ///
    /// Defaults to `max_steps + 1`, the longest path an ant can build.
    /// Longer paths are stored truncated.
    pub best_path_capacity: usize,

    /// Deposit only along the global-best path instead of along every
    /// successful ant's path.
    pub use_global_best_update: bool,

    /// Extra deposit along the iteration-best path, as a multiple of
    /// `Q / cost`. 0.0 disables it.
    pub iteration_best_weight: f64,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 10,
            pheromone_exponent: 1.0,
            heuristic_exponent: 2.0,
            evaporation_rate: 0.1,
            deposit_amount: 1.0,
            prevent_backtracking: true,
            max_steps: 100,
            exploration_rate: 0.05,
            best_path_capacity: 101,
            use_global_best_update: false,
            iteration_best_weight: 0.0,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per iteration.
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    /// Sets the pheromone exponent (α).
    pub fn with_pheromone_exponent(mut self, alpha: f64) -> Self {
        self.pheromone_exponent = alpha;
        self
    }

    /// Sets the heuristic exponent (β).
    pub fn with_heuristic_exponent(mut self, beta: f64) -> Self {
        self.heuristic_exponent = beta;
        self
    }

    /// Sets the evaporation rate (ρ).
    pub fn with_evaporation_rate(mut self, rho: f64) -> Self {
        self.evaporation_rate = rho;
        self
    }

    /// Sets the deposit amount (Q).
    pub fn with_deposit_amount(mut self, q: f64) -> Self {
        self.deposit_amount = q;
        self
    }

    pub fn with_prevent_backtracking(mut self, prevent: bool) -> Self {
        self.prevent_backtracking = prevent;
        self
    }

    /// Sets the step budget, widening the best-path buffer to
    /// `steps + 1` nodes if it is smaller.
    pub fn with_max_steps(mut self, steps: usize) -> Self {
        self.max_steps = steps;
        self.best_path_capacity = self.best_path_capacity.max(steps.saturating_add(1));
        self
    }

    /// Sets the uniform exploration probability, clamped to `[0, 1]`.
    pub fn with_exploration_rate(mut self, rate: f64) -> Self {
        self.exploration_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the best-path buffer size. Anything below `max_steps + 1`
    /// allows truncated records.
    pub fn with_best_path_capacity(mut self, capacity: usize) -> Self {
        self.best_path_capacity = capacity;
        self
    }

    pub fn with_global_best_update(mut self, enabled: bool) -> Self {
        self.use_global_best_update = enabled;
        self
    }

    pub fn with_iteration_best_weight(mut self, weight: f64) -> Self {
        self.iteration_best_weight = weight;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.num_ants == 0 {
            return Err(invalid("num_ants must be positive"));
        }
        if self.max_steps == 0 {
            return Err(invalid("max_steps must be positive"));
        }
        if self.best_path_capacity == 0 {
            return Err(invalid("best_path_capacity must be positive"));
        }
        if !self.pheromone_exponent.is_finite() || self.pheromone_exponent < 0.0 {
            return Err(invalid(format!(
                "pheromone_exponent must be finite and non-negative, got {}",
                self.pheromone_exponent
            )));
        }
        if !self.heuristic_exponent.is_finite() || self.heuristic_exponent < 0.0 {
            return Err(invalid(format!(
                "heuristic_exponent must be finite and non-negative, got {}",
                self.heuristic_exponent
            )));
        }
        if !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err(invalid(format!(
                "evaporation_rate must be in [0, 1), got {}",
                self.evaporation_rate
            )));
        }
        if !self.deposit_amount.is_finite() || self.deposit_amount <= 0.0 {
            return Err(invalid(format!(
                "deposit_amount must be positive, got {}",
                self.deposit_amount
            )));
        }
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(invalid(format!(
                "exploration_rate must be in [0, 1], got {}",
                self.exploration_rate
            )));
        }
        if !self.iteration_best_weight.is_finite() || self.iteration_best_weight < 0.0 {
            return Err(invalid(format!(
                "iteration_best_weight must be non-negative, got {}",
                self.iteration_best_weight
            )));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> AcoError {
    AcoError::InvalidConfig(msg.into())
}
