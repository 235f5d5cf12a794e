//! Objective functions and population evaluation.

use super::bounds::Bounds;
use super::population::Population;
use super::types::Individual;
use crate::error::{BoxError, NanFitness, ObjectiveError, OptimizeError};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A scalar function to minimize over a real-valued genome.
///
/// Any `Fn(&[f64]) -> f64 + Send + Sync` closure is an objective. Wrap
/// closures that can fail in [`Fallible`].
///
/// # Thread Safety
///
/// `Objective` must be `Send + Sync` because evaluation may be spread
/// across a rayon thread pool.
///
/// # Implementing
///
/// ```
/// use u_realga::ga::Objective;
/// use u_realga::BoxError;
///
/// struct Rastrigin { dim: usize }
///
/// impl Objective for Rastrigin {
///     fn evaluate(&self, x: &[f64]) -> Result<f64, BoxError> {
///         let tau = std::f64::consts::TAU;
///         Ok(10.0 * x.len() as f64
///             + x.iter().map(|v| v * v - 10.0 * (tau * v).cos()).sum::<f64>())
///     }
///
///     fn dimension(&self) -> Option<usize> {
///         Some(self.dim)
///     }
/// }
/// ```
pub trait Objective: Send + Sync {
    /// Evaluates a genome. Lower is better.
    fn evaluate(&self, genes: &[f64]) -> Result<f64, BoxError>;

    /// Genome length this objective expects, if it has one.
    ///
    /// Checked against the bounds before the run starts.
    fn dimension(&self) -> Option<usize> {
        None
    }
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, genes: &[f64]) -> Result<f64, BoxError> {
        Ok(self(genes))
    }
}

/// Adapts a closure returning `Result` into an [`Objective`].
///
/// ```
/// use u_realga::ga::{Fallible, Objective};
///
/// let f = Fallible(|x: &[f64]| {
///     if x[0] < 0.0 { Err("negative input") } else { Ok(x[0].sqrt()) }
/// });
/// assert!(f.evaluate(&[4.0]).is_ok());
/// assert!(f.evaluate(&[-1.0]).is_err());
/// ```
pub struct Fallible<F>(pub F);

impl<F, E> Objective for Fallible<F>
where
    F: Fn(&[f64]) -> Result<f64, E> + Send + Sync,
    E: Into<BoxError>,
{
    fn evaluate(&self, genes: &[f64]) -> Result<f64, BoxError> {
        (self.0)(genes).map_err(Into::into)
    }
}

/// What the evaluator does with a genome outside the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundPolicy {
    /// Fail with [`OutOfBoundsError`](crate::OutOfBoundsError).
    #[default]
    Reject,
    /// Clamp into the box and evaluate the clamped genome.
    Clamp,
}

/// Wraps the user objective with the bounds check.
pub struct Evaluator<'a, O: ?Sized> {
    objective: &'a O,
    bounds: Bounds,
    policy: BoundPolicy,
}

impl<'a, O: Objective + ?Sized> Evaluator<'a, O> {
    pub fn new(objective: &'a O, bounds: Bounds, policy: BoundPolicy) -> Self {
        Self {
            objective,
            bounds,
            policy,
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn policy(&self) -> BoundPolicy {
        self.policy
    }

    /// Evaluates one genome.
    ///
    /// Out-of-bounds genes fail with `OutOfBounds` under
    /// [`BoundPolicy::Reject`] and are clamped under [`BoundPolicy::Clamp`].
    /// A failing objective or a NaN result yields `Objective`.
    pub fn evaluate(&self, genes: &[f64]) -> Result<f64, OptimizeError> {
        match self.policy {
            BoundPolicy::Reject => {
                self.bounds.check(genes)?;
                self.call(genes)
            }
            BoundPolicy::Clamp if self.bounds.first_violation(genes).is_some() => {
                let mut clamped = genes.to_vec();
                self.bounds.clamp_in_place(&mut clamped);
                self.call(&clamped)
            }
            BoundPolicy::Clamp => self.call(genes),
        }
    }

    fn call(&self, genes: &[f64]) -> Result<f64, OptimizeError> {
        let fitness = self.objective.evaluate(genes).map_err(|source| ObjectiveError {
            genome: genes.to_vec(),
            source,
        })?;
        if fitness.is_nan() {
            return Err(ObjectiveError {
                genome: genes.to_vec(),
                source: Box::new(NanFitness),
            }
            .into());
        }
        Ok(fitness)
    }

    /// Evaluates every individual lacking a cached fitness.
    ///
    /// Results land in their population slots, so completion order does
    /// not matter. On failure the error of the lowest failing index is
    /// returned and no fitness from this batch is recorded. Returns the
    /// number of evaluations performed.
    pub fn evaluate_population(
        &self,
        population: &mut Population,
        parallel: bool,
    ) -> Result<usize, OptimizeError> {
        let mut pending: Vec<_> = population.iter_mut().filter(|i| !i.is_evaluated()).collect();
        if self.policy == BoundPolicy::Clamp {
            for ind in pending.iter_mut() {
                self.bounds.clamp_in_place(ind.pending_genes_mut());
            }
        }

        let fitnesses: Vec<f64> = if parallel {
            self.evaluate_batch_parallel(&pending)?
        } else {
            pending
                .iter()
                .map(|ind| self.evaluate(ind.genes()))
                .collect::<Result<_, _>>()?
        };

        let count = fitnesses.len();
        for (ind, fitness) in pending.into_iter().zip(fitnesses) {
            ind.record_fitness(fitness);
        }
        Ok(count)
    }

    /// Evaluates the whole batch on the rayon pool, then reports the
    /// first failure in index order.
    #[cfg(feature = "parallel")]
    fn evaluate_batch_parallel(
        &self,
        pending: &[&mut Individual],
    ) -> Result<Vec<f64>, OptimizeError> {
        let results: Vec<Result<f64, OptimizeError>> = pending
            .par_iter()
            .map(|ind| self.evaluate(ind.genes()))
            .collect();
        results.into_iter().collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_batch_parallel(
        &self,
        pending: &[&mut Individual],
    ) -> Result<Vec<f64>, OptimizeError> {
        pending.iter().map(|ind| self.evaluate(ind.genes())).collect()
    }
}
