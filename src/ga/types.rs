//! Candidate solutions.

/// A candidate solution: a real-valued genome and its cached fitness.
///
/// Fitness is absent until the evaluator fills it in and is written at
/// most once per genome. Variation never edits a genome in place; a
/// changed genome always becomes a fresh, unevaluated `Individual`.
/// Lower fitness is better (minimization).
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genes: Vec<f64>,
    fitness: Option<f64>,
}

impl Individual {
    /// Creates an unevaluated individual.
    pub fn new(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Consumes the individual, returning its genome.
    pub fn into_genes(self) -> Vec<f64> {
        self.genes
    }

    /// Cached fitness, `None` until evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Fitness for ranking; unevaluated individuals rank last.
    pub fn fitness_or_worst(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }

    /// Mutable genes of an individual that has not been evaluated yet.
    ///
    /// Used by the clamping bound policy before evaluation.
    pub(crate) fn pending_genes_mut(&mut self) -> &mut [f64] {
        debug_assert!(self.fitness.is_none(), "genome is frozen once evaluated");
        &mut self.genes
    }

    pub(crate) fn record_fitness(&mut self, fitness: f64) {
        debug_assert!(self.fitness.is_none(), "fitness is write-once");
        self.fitness = Some(fitness);
    }
}
