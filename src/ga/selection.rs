//! Parent selection strategies.
//!
//! Selection builds the mating pool from an evaluated population. All
//! strategies assume **minimization** (lower fitness = better) and rank
//! unevaluated individuals last.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::population::Population;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_realga::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
/// assert_eq!(sel, Selection::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Draw `k` members uniformly (with replacement) and keep the best.
    ///
    /// Higher `k` = stronger selection pressure. O(k) per selection.
    Tournament(usize),

    /// Fitness-proportionate selection on inverted fitness.
    ///
    /// **Warning**: Susceptible to super-individual dominance when
    /// fitness variance is high. O(n) per selection.
    Roulette,

    /// Linear ranking: the best member gets weight `n`, the worst `1`.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms". O(n log n) per selection.
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index from the population.
    ///
    /// Deterministic for a given RNG state.
    pub fn select<R: Rng>(&self, population: &Population, rng: &mut R) -> usize {
        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
        }
    }

    /// Fills a mating pool of `size` parent indices.
    pub fn mating_pool<R: Rng>(&self, population: &Population, size: usize, rng: &mut R) -> Vec<usize> {
        (0..size).map(|_| self.select(population, rng)).collect()
    }
}

fn tournament<R: Rng>(population: &Population, k: usize, rng: &mut R) -> usize {
    let k = k.max(1);

    let mut best_idx = population.sample(rng);
    for _ in 1..k {
        let idx = population.sample(rng);
        if population.get(idx).fitness_or_worst() < population.get(best_idx).fitness_or_worst() {
            best_idx = idx;
        }
    }
    best_idx
}

/// weight_i = max_fitness - fitness_i + epsilon, over finite fitness values.
fn roulette<R: Rng>(population: &Population, rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let fitnesses: Vec<f64> = population.iter().map(|ind| ind.fitness_or_worst()).collect();

    let max_fitness = fitnesses
        .iter()
        .cloned()
        .filter(|f| f.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max_fitness.is_finite() {
        return population.sample(rng);
    }

    let epsilon = 1e-10;

    let weights: Vec<f64> = fitnesses
        .iter()
        .map(|&f| {
            let w = max_fitness - f + epsilon;
            if w.is_finite() && w > 0.0 {
                w
            } else {
                epsilon
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return population.sample(rng);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

fn rank<R: Rng>(population: &Population, rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let mut indexed: Vec<(usize, f64)> = population
        .iter()
        .enumerate()
        .map(|(i, ind)| (i, ind.fitness_or_worst()))
        .collect();
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &(original_idx, _)) in indexed.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    indexed[n - 1].0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Individual;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Population {
        Population::new(
            fitnesses
                .iter()
                .map(|&f| {
                    let mut ind = Individual::new(vec![0.0]);
                    ind.record_fitness(f);
                    ind
                })
                .collect(),
        )
    }

    fn counts(sel: Selection, pop: &Population, seed: u64) -> Vec<u32> {
        let mut rng = create_rng(seed);
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..10_000 {
            counts[sel.select(pop, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let counts = counts(Selection::Tournament(4), &pop, 42);
        // P(best drawn at least once in 4 draws) = 1 - (3/4)^4 ≈ 0.68
        assert!(
            counts[2] > 6000,
            "expected best to be selected >60% of the time, got {counts:?}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_uniform() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        for &c in &counts(Selection::Tournament(1), &pop, 42) {
            assert!(c > 2000, "expected roughly uniform counts, got {c}");
        }
    }

    #[test]
    fn test_tournament_size_0_behaves_like_1() {
        let pop = make_population(&[1.0, 2.0]);
        let mut rng = create_rng(1);
        assert!(Selection::Tournament(0).select(&pop, &mut rng) < 2);
    }

    #[test]
    fn test_tournament_is_reproducible() {
        let pop = make_population(&[4.0, 3.0, 2.0, 1.0, 0.0]);
        let mut a = create_rng(9);
        let mut b = create_rng(9);
        let pool_a = Selection::Tournament(3).mating_pool(&pop, 50, &mut a);
        let pool_b = Selection::Tournament(3).mating_pool(&pop, 50, &mut b);
        assert_eq!(pool_a, pool_b);
        assert_eq!(pool_a.len(), 50);
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let counts = counts(Selection::Roulette, &pop, 42);
        assert!(
            counts[2] > counts[0],
            "best should be selected more often: {counts:?}"
        );
    }

    #[test]
    fn test_roulette_with_infinite_fitness() {
        let pop = make_population(&[f64::INFINITY, 2.0, 1.0]);
        let counts = counts(Selection::Roulette, &pop, 42);
        assert!(counts[2] > counts[0], "{counts:?}");
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let counts = counts(Selection::Rank, &pop, 42);
        assert!(
            counts[2] > counts[0],
            "best should be selected more: {counts:?}"
        );
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);

        assert_eq!(Selection::Tournament(3).select(&pop, &mut rng), 0);
        assert_eq!(Selection::Roulette.select(&pop, &mut rng), 0);
        assert_eq!(Selection::Rank.select(&pop, &mut rng), 0);
    }
}
