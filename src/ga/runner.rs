//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives the run as an explicit state machine:
//!
//! ```text
//! Init → Evaluating → Selecting → Varying → ConvergenceCheck ─┬→ Evaluating
//!                                                             └→ Terminated
//! ```
//!
//! All mutable run data lives in the runner itself ([`RunState`], the
//! population, the RNG), so independent runs never share state.

use super::bounds::Bounds;
use super::config::GaConfig;
use super::evaluator::{Evaluator, Objective};
use super::operators::gaussian_mutation;
use super::population::Population;
use super::types::Individual;
use crate::error::{ConfigError, OptimizeError};
use crate::random::create_rng;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// `max_generations` generations completed.
    MaxGenerations,
    /// No improvement larger than `tolerance` for `patience` generations.
    Converged,
    /// The wall-clock deadline passed.
    Deadline,
    /// The cancellation token was set.
    Cancelled,
}

/// Phase of the engine state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Sample the initial population.
    Init,
    /// Evaluate individuals lacking a fitness and update the best-so-far.
    Evaluating,
    /// Build the mating pool by repeated selection.
    Selecting,
    /// Apply crossover and mutation to produce the next population.
    Varying,
    /// Advance the generation counter and test the termination policies.
    ConvergenceCheck,
    /// The run is over.
    Terminated(TerminationReason),
}

/// Progress of one run.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// Completed generations.
    pub generation: usize,

    /// Best individual seen so far. Only replaced by a strictly better one.
    pub best: Option<Individual>,

    /// Consecutive generations without an improvement above `tolerance`.
    pub stagnation: usize,

    /// Whether the run stopped because it converged.
    pub converged: bool,

    /// Objective evaluations performed.
    pub evaluations: usize,

    /// Best-so-far fitness after each evaluated generation.
    pub fitness_history: Vec<f64>,
}

impl RunState {
    /// Best-so-far fitness, `+inf` before the first evaluation.
    pub fn best_fitness(&self) -> f64 {
        self.best
            .as_ref()
            .map_or(f64::INFINITY, Individual::fitness_or_worst)
    }
}

/// Result of a completed optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeResult {
    /// Best genome found during the entire run.
    pub best_genes: Vec<f64>,

    /// Fitness of `best_genes`.
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Why the run stopped.
    pub termination: TerminationReason,

    /// Number of objective evaluations.
    pub evaluations: usize,

    /// Best-so-far fitness after each evaluated generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_realga::ga::{Bounds, GaConfig, GaRunner, TerminationReason};
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// let bounds = Bounds::uniform(-5.0, 5.0, 2).unwrap();
/// let config = GaConfig::default().with_max_generations(20).with_seed(7);
///
/// let mut runner = GaRunner::new(&sphere, bounds, config).unwrap();
/// let result = runner.run().unwrap();
/// assert_eq!(result.termination, TerminationReason::MaxGenerations);
/// assert_eq!(runner.state().generation, 20);
/// ```
pub struct GaRunner<'a, O: ?Sized> {
    evaluator: Evaluator<'a, O>,
    config: GaConfig,
    mutation_rate: f64,
    rng: StdRng,
    population: Option<Population>,
    mating_pool: Vec<usize>,
    state: RunState,
    phase: Phase,
    started: Option<Instant>,
    deadline: Option<Duration>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a, O: Objective + ?Sized> GaRunner<'a, O> {
    /// Creates a runner in the [`Phase::Init`] phase.
    ///
    /// Fails if the configuration is invalid or the objective declares a
    /// dimension different from `bounds.dimension()`.
    pub fn new(objective: &'a O, bounds: Bounds, config: GaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some(expected) = objective.dimension() {
            if expected != bounds.dimension() {
                return Err(ConfigError::DimensionMismatch {
                    expected,
                    actual: bounds.dimension(),
                });
            }
        }

        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        Ok(Self {
            mutation_rate: config.effective_mutation_rate(bounds.dimension()),
            deadline: config
                .deadline_seconds
                .and_then(|s| Duration::try_from_secs_f64(s).ok()),
            evaluator: Evaluator::new(objective, bounds, config.bound_policy),
            config,
            rng,
            population: None,
            mating_pool: Vec::new(),
            state: RunState::default(),
            phase: Phase::Init,
            started: None,
            cancel: None,
        })
    }

    /// Installs a cooperative cancellation token.
    ///
    /// When the flag is set, the run stops at the next generation boundary
    /// with [`TerminationReason::Cancelled`]. An evaluation batch already
    /// in flight is never interrupted.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current run state. Remains readable after a failed run.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Current population, `None` before initialization.
    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    pub fn bounds(&self) -> &Bounds {
        self.evaluator.bounds()
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs to termination.
    pub fn run(&mut self) -> Result<OptimizeResult, OptimizeError> {
        loop {
            if let Phase::Terminated(reason) = self.step()? {
                return Ok(self.result(reason));
            }
        }
    }

    /// Executes the current phase and returns the phase that follows.
    ///
    /// Stepping a terminated runner is a no-op.
    pub fn step(&mut self) -> Result<Phase, OptimizeError> {
        self.phase = match self.phase {
            Phase::Init => self.init(),
            Phase::Evaluating => self.evaluate()?,
            Phase::Selecting => self.select(),
            Phase::Varying => self.vary(),
            Phase::ConvergenceCheck => self.check_convergence(),
            terminated @ Phase::Terminated(_) => terminated,
        };
        Ok(self.phase)
    }

    fn init(&mut self) -> Phase {
        self.started = Some(Instant::now());
        self.population = Some(Population::random(
            self.evaluator.bounds(),
            self.config.population_size,
            &mut self.rng,
        ));
        Phase::Evaluating
    }

    fn evaluate(&mut self) -> Result<Phase, OptimizeError> {
        let Some(population) = self.population.as_mut() else {
            return Ok(Phase::Init);
        };
        self.state.evaluations += self
            .evaluator
            .evaluate_population(population, self.config.parallel)?;

        if let Some(candidate) = population.best() {
            let first = self.state.best.is_none();
            let previous = self.state.best_fitness();
            let fitness = candidate.fitness_or_worst();
            if first || fitness < previous {
                log::trace!(
                    "generation {}: new best {fitness:e} at {:?}",
                    self.state.generation,
                    candidate.genes()
                );
                self.state.best = Some(candidate.clone());
            }
            // An all-inf plateau gives `inf - inf = NaN`, which counts as stagnation.
            let improvement = previous - fitness;
            if first || improvement > self.config.tolerance {
                self.state.stagnation = 0;
            } else {
                self.state.stagnation += 1;
            }
        }
        self.state.fitness_history.push(self.state.best_fitness());

        log::debug!(
            "generation {}: best {:e}, stagnation {}",
            self.state.generation,
            self.state.best_fitness(),
            self.state.stagnation
        );
        Ok(Phase::Selecting)
    }

    fn select(&mut self) -> Phase {
        let Some(population) = self.population.as_ref() else {
            return Phase::Init;
        };
        self.mating_pool = self
            .config
            .selection
            .mating_pool(population, self.config.population_size, &mut self.rng);
        Phase::Varying
    }

    fn vary(&mut self) -> Phase {
        let Some(population) = self.population.as_mut() else {
            return Phase::Init;
        };
        let size = self.config.population_size;
        let bounds = self.evaluator.bounds();
        let mut next: Vec<Individual> = Vec::with_capacity(size);

        if self.config.elitism {
            if let Some(best) = &self.state.best {
                next.push(best.clone());
            }
        }

        let mut i = 0;
        while next.len() < size {
            let p1 = population.get(self.mating_pool[i % size]);
            let p2 = population.get(self.mating_pool[(i + 1) % size]);
            i += 2;

            let children = if self.rng.random_range(0.0..1.0) < self.config.crossover_rate {
                let (c1, c2) = self
                    .config
                    .crossover
                    .apply(p1.genes(), p2.genes(), bounds, &mut self.rng);
                [Individual::new(c1), Individual::new(c2)]
            } else {
                [p1.clone(), p2.clone()]
            };

            for child in children {
                if next.len() >= size {
                    break;
                }
                let mut genes = child.genes().to_vec();
                let mutated = gaussian_mutation(
                    &mut genes,
                    bounds,
                    self.mutation_rate,
                    self.config.mutation_scale,
                    &mut self.rng,
                );
                next.push(if mutated { Individual::new(genes) } else { child });
            }
        }

        population.replace(next);
        Phase::ConvergenceCheck
    }

    fn check_convergence(&mut self) -> Phase {
        self.state.generation += 1;

        let elapsed = self.started.map_or(Duration::ZERO, |t| t.elapsed());
        let reason = if self.state.generation >= self.config.max_generations {
            Some(TerminationReason::MaxGenerations)
        } else if self.config.patience > 0 && self.state.stagnation >= self.config.patience {
            Some(TerminationReason::Converged)
        } else if self.deadline.is_some_and(|limit| elapsed >= limit) {
            Some(TerminationReason::Deadline)
        } else if self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            Some(TerminationReason::Cancelled)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                self.state.converged = reason == TerminationReason::Converged;
                log::info!(
                    "terminated after {} generations ({:?}): best {:e}, {} evaluations, {:.3?}",
                    self.state.generation,
                    reason,
                    self.state.best_fitness(),
                    self.state.evaluations,
                    elapsed
                );
                Phase::Terminated(reason)
            }
            None => Phase::Evaluating,
        }
    }

    fn result(&self, termination: TerminationReason) -> OptimizeResult {
        let (best_genes, best_fitness) = match self.state.best.clone() {
            Some(best) => {
                let fitness = best.fitness_or_worst();
                (best.into_genes(), fitness)
            }
            None => (Vec::new(), f64::INFINITY),
        };
        OptimizeResult {
            best_genes,
            best_fitness,
            generations: self.state.generation,
            termination,
            evaluations: self.state.evaluations,
            fitness_history: self.state.fitness_history.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
