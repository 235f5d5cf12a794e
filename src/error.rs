//! Error taxonomy.
//!
//! All errors are fatal for the run that produced them. Nothing is
//! retried: re-evaluating a failed genome would shift the RNG stream and
//! break seeded reproducibility.

use thiserror::Error;

/// Boxed error returned by user objectives.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Invalid bounds, dimensions, or parameters. Raised before any evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("bounds must cover at least one dimension")]
    EmptyBounds,

    #[error("invalid bounds for dimension {index}: [{low}, {high}] (low must be finite and below high)")]
    InvalidBounds { index: usize, low: f64, high: f64 },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("max_generations must be at least 1")]
    ZeroGenerations,

    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("tournament size must be at least 1")]
    InvalidTournamentSize,

    #[error("mutation_scale must be finite and positive, got {0}")]
    InvalidMutationScale(f64),

    #[error("blend extension must be finite and non-negative, got {0}")]
    InvalidBlendExtension(f64),

    #[error("tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    #[error("deadline_seconds must be finite and positive, got {0}")]
    InvalidDeadline(f64),
}

/// The objective failed (or returned NaN) for `genome`.
#[derive(Debug, Error)]
#[error("objective failed at {genome:?}: {source}")]
pub struct ObjectiveError {
    pub genome: Vec<f64>,
    #[source]
    pub source: BoxError,
}

/// Source error for an objective that returned NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("objective returned NaN")]
pub struct NanFitness;

/// A gene outside its dimension's interval reached the evaluator.
///
/// Operators clamp every gene they touch, so this indicates a bug.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("gene {index} = {value} outside [{low}, {high}] in {genome:?}")]
pub struct OutOfBoundsError {
    pub genome: Vec<f64>,
    pub index: usize,
    pub value: f64,
    pub low: f64,
    pub high: f64,
}

/// Any error that aborts an optimization run.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Objective(#[from] ObjectiveError),

    #[error(transparent)]
    OutOfBounds(#[from] OutOfBoundsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_objective_error_keeps_source() {
        let err = ObjectiveError {
            genome: vec![1.0, 2.0],
            source: Box::new(NanFitness),
        };
        assert_eq!(err.to_string(), "objective failed at [1.0, 2.0]: objective returned NaN");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_converts() {
        let err: OptimizeError = ConfigError::ZeroGenerations.into();
        assert!(matches!(err, OptimizeError::Config(ConfigError::ZeroGenerations)));
        assert_eq!(err.to_string(), "max_generations must be at least 1");
    }
}
