//! Real-coded variation operators.
//!
//! Crossover recombines two parent genomes into two children; mutation
//! perturbs single genes. Every operator clamps what it produces into the
//! box, so offspring always satisfy the bounds invariant.
//!
//! # Crossover Operators
//!
//! - [`Crossover::Blend`]: arithmetic blend, `alpha` per gene from `[-d, 1 + d]`
//! - [`Crossover::Uniform`]: each gene swapped between parents with probability 0.5
//! - [`Crossover::OnePoint`], [`Crossover::TwoPoint`]: segment exchange
//!
//! # Mutation Operators
//!
//! - [`gaussian_mutation`]: additive Gaussian noise scaled to each dimension's range
//!
//! # References
//!
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and
//!   Interval-Schemata"
//! - Deb (2001), *Multi-Objective Optimization using Evolutionary Algorithms*, ch. 4

use super::bounds::Bounds;
use rand::Rng;
use rand_distr::StandardNormal;

// ============================================================================
// Crossover operators
// ============================================================================

/// Crossover operator for real-valued genomes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Arithmetic blend: `child[i] = alpha * a[i] + (1 - alpha) * b[i]`.
    ///
    /// `alpha` is drawn per gene from `[-extension, 1 + extension]`; the
    /// second child uses `1 - alpha`. With `extension = 0` children lie on
    /// the segment between the parents.
    Blend { extension: f64 },

    /// Each gene position is exchanged between the children with
    /// probability 0.5.
    Uniform,

    /// Genes after a random cut point are exchanged.
    OnePoint,

    /// Genes inside a random segment `[start, end]` are exchanged.
    TwoPoint,
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::Blend { extension: 0.0 }
    }
}

impl Crossover {
    /// Produces two children from two parents, clamped into `bounds`.
    ///
    /// # Panics
    /// Panics if the parents have different lengths.
    pub fn apply<R: Rng>(
        &self,
        parent1: &[f64],
        parent2: &[f64],
        bounds: &Bounds,
        rng: &mut R,
    ) -> (Vec<f64>, Vec<f64>) {
        assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");

        let (mut c1, mut c2) = match *self {
            Crossover::Blend { extension } => blend(parent1, parent2, extension, rng),
            Crossover::Uniform => uniform(parent1, parent2, rng),
            Crossover::OnePoint => {
                let n = parent1.len();
                let cut = rng.random_range(0..=n);
                exchange_segment(parent1, parent2, cut, n)
            }
            Crossover::TwoPoint => {
                let (start, end) = random_segment(parent1.len(), rng);
                exchange_segment(parent1, parent2, start, end + 1)
            }
        };

        bounds.clamp_in_place(&mut c1);
        bounds.clamp_in_place(&mut c2);
        (c1, c2)
    }
}

fn blend<R: Rng>(a: &[f64], b: &[f64], extension: f64, rng: &mut R) -> (Vec<f64>, Vec<f64>) {
    let mut c1 = Vec::with_capacity(a.len());
    let mut c2 = Vec::with_capacity(a.len());
    for (&x, &y) in a.iter().zip(b) {
        let alpha = rng.random_range(-extension..=1.0 + extension);
        c1.push(alpha * x + (1.0 - alpha) * y);
        c2.push((1.0 - alpha) * x + alpha * y);
    }
    (c1, c2)
}

fn uniform<R: Rng>(a: &[f64], b: &[f64], rng: &mut R) -> (Vec<f64>, Vec<f64>) {
    let mut c1 = a.to_vec();
    let mut c2 = b.to_vec();
    for i in 0..a.len() {
        if rng.random_bool(0.5) {
            std::mem::swap(&mut c1[i], &mut c2[i]);
        }
    }
    (c1, c2)
}

/// Children that exchange genes in `start..end`.
fn exchange_segment(a: &[f64], b: &[f64], start: usize, end: usize) -> (Vec<f64>, Vec<f64>) {
    let mut c1 = a.to_vec();
    let mut c2 = b.to_vec();
    c1[start..end].copy_from_slice(&b[start..end]);
    c2[start..end].copy_from_slice(&a[start..end]);
    (c1, c2)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Gaussian mutation.
///
/// Each gene is perturbed with probability `rate` by `N(0, 1) * scale *
/// span(i)` and clamped back into its interval. Returns `true` if any gene
/// was perturbed.
pub fn gaussian_mutation<R: Rng>(
    genes: &mut [f64],
    bounds: &Bounds,
    rate: f64,
    scale: f64,
    rng: &mut R,
) -> bool {
    let mut mutated = false;
    for (i, x) in genes.iter_mut().enumerate() {
        if rng.random_bool(rate) {
            let z: f64 = rng.sample(StandardNormal);
            *x = bounds.clamp(i, *x + z * scale * bounds.span(i));
            mutated = true;
        }
    }
    mutated
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
