//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::evaluator::BoundPolicy;
use super::operators::Crossover;
use super::selection::Selection;
use crate::error::ConfigError;

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, operators and their rates, termination
/// conditions, and parallelism.
///
/// # Defaults
///
/// ```
/// use u_realga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_realga::ga::{Crossover, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_tournament_size(5)
///     .with_crossover(Crossover::Blend { extension: 0.25 })
///     .with_patience(20)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Selection strategy for building the mating pool.
    pub selection: Selection,

    /// Recombination operator.
    pub crossover: Crossover,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, the children are copies of the parents.
    pub crossover_rate: f64,

    /// Per-gene mutation probability (0.0–1.0).
    ///
    /// `None` uses `1 / dimension`.
    pub mutation_rate: Option<f64>,

    /// Standard deviation of the Gaussian mutation, as a fraction of each
    /// dimension's range.
    pub mutation_scale: f64,

    /// Carry the best-so-far individual into every new population at index 0.
    pub elitism: bool,

    /// Minimum improvement of the best fitness that resets the patience counter.
    pub tolerance: f64,

    /// Generations without an improvement larger than `tolerance` before
    /// stopping as converged.
    ///
    /// Set to 0 to disable convergence-based termination (the default).
    pub patience: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock budget in seconds.
    ///
    /// Checked at each generation boundary, so the run may exceed it by
    /// up to one generation's worth of work.
    pub deadline_seconds: Option<f64>,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// Handling of out-of-bounds genomes at evaluation time.
    pub bound_policy: BoundPolicy,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            selection: Selection::default(),
            crossover: Crossover::default(),
            crossover_rate: 0.8,
            mutation_rate: None,
            mutation_scale: 0.1,
            elitism: true,
            tolerance: 0.0,
            patience: 0,
            seed: None,
            deadline_seconds: None,
            parallel: true,
            bound_policy: BoundPolicy::default(),
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate.clamp(0.0, 1.0));
        self
    }

    /// Sets the mutation noise scale (fraction of each dimension's range).
    pub fn with_mutation_scale(mut self, scale: f64) -> Self {
        self.mutation_scale = scale;
        self
    }

    /// Enables or disables elitism.
    pub fn with_elitism(mut self, elitism: bool) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the improvement tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Sets the patience (0 to disable).
    pub fn with_patience(mut self, generations: usize) -> Self {
        self.patience = generations;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock deadline in seconds.
    pub fn with_deadline_seconds(mut self, seconds: f64) -> Self {
        self.deadline_seconds = Some(seconds);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the bound policy.
    pub fn with_bound_policy(mut self, policy: BoundPolicy) -> Self {
        self.bound_policy = policy;
        self
    }

    /// Per-gene mutation probability for a genome of `dimension` genes.
    pub fn effective_mutation_rate(&self, dimension: usize) -> f64 {
        self.mutation_rate
            .unwrap_or_else(|| 1.0 / dimension.max(1) as f64)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        if let Some(rate) = self.mutation_rate {
            check_rate("mutation_rate", rate)?;
        }
        if self.selection == Selection::Tournament(0) {
            return Err(ConfigError::InvalidTournamentSize);
        }
        if let Crossover::Blend { extension } = self.crossover {
            if !(extension.is_finite() && extension >= 0.0) {
                return Err(ConfigError::InvalidBlendExtension(extension));
            }
        }
        if !(self.mutation_scale.is_finite() && self.mutation_scale > 0.0) {
            return Err(ConfigError::InvalidMutationScale(self.mutation_scale));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if let Some(seconds) = self.deadline_seconds {
            if !(seconds.is_finite() && seconds > 0.0) {
                return Err(ConfigError::InvalidDeadline(seconds));
            }
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}
