//! Fixed-size ordered collection of individuals.

use super::bounds::Bounds;
use super::types::Individual;
use rand::Rng;

/// The individuals of one generation.
///
/// Its size is fixed at creation; [`replace`](Population::replace) swaps in
/// the next generation of the same size.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Wraps an existing set of individuals.
    ///
    /// # Panics
    /// Panics if `individuals` is empty.
    pub fn new(individuals: Vec<Individual>) -> Self {
        assert!(!individuals.is_empty(), "population must not be empty");
        Self { individuals }
    }

    /// Samples `size` genomes uniformly inside `bounds`.
    pub fn random<R: Rng>(bounds: &Bounds, size: usize, rng: &mut R) -> Self {
        Self::new(
            (0..size)
                .map(|_| Individual::new(bounds.sample(rng)))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn get(&self, i: usize) -> &Individual {
        &self.individuals[i]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Individual> {
        self.individuals.iter_mut()
    }

    /// Number of individuals still lacking a fitness value.
    pub fn pending(&self) -> usize {
        self.individuals.iter().filter(|i| !i.is_evaluated()).count()
    }

    /// Uniformly random member index.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.individuals.len())
    }

    /// Best evaluated individual (lowest fitness). Ties keep the lowest index.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .filter(|i| i.is_evaluated())
            .min_by(|a, b| {
                a.fitness_or_worst()
                    .partial_cmp(&b.fitness_or_worst())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Sorts ascending by fitness (best first, unevaluated last). Stable.
    pub fn sort_by_fitness(&mut self) {
        self.individuals.sort_by(|a, b| {
            a.fitness_or_worst()
                .partial_cmp(&b.fitness_or_worst())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Replaces every individual with the next generation.
    ///
    /// # Panics
    /// Panics if `next` does not have the same size.
    pub fn replace(&mut self, next: Vec<Individual>) {
        assert_eq!(
            next.len(),
            self.individuals.len(),
            "population size is fixed across generations"
        );
        self.individuals = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn evaluated(fitnesses: &[f64]) -> Population {
        Population::new(
            fitnesses
                .iter()
                .enumerate()
                .map(|(i, &f)| {
                    let mut ind = Individual::new(vec![i as f64]);
                    ind.record_fitness(f);
                    ind
                })
                .collect(),
        )
    }

    #[test]
    fn test_random_population() {
        let bounds = Bounds::new(vec![(-1.0, 1.0), (10.0, 20.0)]).unwrap();
        let mut rng = create_rng(42);
        let pop = Population::random(&bounds, 25, &mut rng);
        assert_eq!(pop.len(), 25);
        assert_eq!(pop.pending(), 25);
        assert!(pop.iter().all(|i| bounds.contains(i.genes())));
    }

    #[test]
    fn test_best() {
        let pop = evaluated(&[3.0, -1.0, 2.0, -1.0]);
        let best = pop.best().unwrap();
        assert_eq!(best.fitness(), Some(-1.0));
        assert_eq!(best.genes(), &[1.0]);
    }

    #[test]
    fn test_best_ignores_unevaluated() {
        let mut pop = evaluated(&[5.0, 4.0]);
        pop.replace(vec![Individual::new(vec![0.0]), pop.get(0).clone()]);
        assert_eq!(pop.best().unwrap().fitness(), Some(5.0));

        let fresh = Population::new(vec![Individual::new(vec![0.0])]);
        assert!(fresh.best().is_none());
    }

    #[test]
    fn test_sort_by_fitness() {
        let mut pop = evaluated(&[3.0, 1.0, 2.0]);
        pop.sort_by_fitness();
        let order: Vec<f64> = pop.iter().map(|i| i.fitness_or_worst()).collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "population size is fixed")]
    fn test_replace_wrong_size_panics() {
        let mut pop = evaluated(&[1.0, 2.0]);
        pop.replace(vec![Individual::new(vec![0.0])]);
    }

    #[test]
    fn test_sample_in_range() {
        let pop = evaluated(&[1.0, 2.0, 3.0]);
        let mut rng = create_rng(3);
        for _ in 0..100 {
            assert!(pop.sample(&mut rng) < 3);
        }
    }
}
