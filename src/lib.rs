//! Real-coded genetic algorithm for box-bounded continuous minimization.
//!
//! Minimizes a scalar objective `f: ℝⁿ → ℝ` over per-dimension intervals
//! `[low_i, high_i]` with a seeded, reproducible evolutionary loop:
//!
//! - **Tournament selection** (roulette and rank also available)
//! - **Blend crossover** (uniform, one-point, two-point also available)
//! - **Gaussian mutation** scaled to each dimension's range
//! - **Elitism**, patience-based convergence, wall-clock deadline, and
//!   cooperative cancellation
//!
//! Evaluation within a generation can run on a rayon pool (`parallel`
//! feature, on by default) without affecting results.
//!
//! # Example
//!
//! ```
//! use u_realga::{optimize, GaConfig};
//!
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! let config = GaConfig::default().with_seed(42);
//!
//! let result = optimize(&sphere, 2, &[(-5.0, 5.0), (-5.0, 5.0)], &config).unwrap();
//! assert!(result.best_fitness < 1.0);
//! ```
//!
//! # Architecture
//!
//! Like the other U-Engine algorithm crates this is domain-agnostic:
//! the objective is the only problem-specific input.

mod error;
pub mod ga;
pub mod random;

pub use error::{
    BoxError, ConfigError, NanFitness, ObjectiveError, OptimizeError, OutOfBoundsError,
};
pub use ga::{GaConfig, Objective, OptimizeResult, TerminationReason};

/// Minimizes `objective` over the box `bounds`.
///
/// `bounds` holds one `(low, high)` pair per dimension and must have
/// exactly `dimension` entries. Invalid bounds or configuration fail with
/// [`OptimizeError::Config`] before the objective is ever called. Any
/// objective failure aborts the run; use [`ga::GaRunner`] directly to
/// inspect partial progress after an error.
pub fn optimize<O: Objective + ?Sized>(
    objective: &O,
    dimension: usize,
    bounds: &[(f64, f64)],
    config: &GaConfig,
) -> Result<OptimizeResult, OptimizeError> {
    if bounds.len() != dimension {
        return Err(ConfigError::DimensionMismatch {
            expected: dimension,
            actual: bounds.len(),
        }
        .into());
    }
    let bounds = ga::Bounds::new(bounds.to_vec())?;
    ga::GaRunner::new(objective, bounds, config.clone())?.run()
}
