//! Property tests for bounds, determinism, and termination.

use proptest::prelude::*;
use u_realga::ga::{Bounds, Crossover, GaConfig, GaRunner, Phase, Selection};

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

prop_compose! {
    fn arb_bounds()(
        ranges in prop::collection::vec((-100.0..100.0f64, 1e-3..50.0f64), 1..=4)
    ) -> Bounds {
        Bounds::new(ranges.into_iter().map(|(low, width)| (low, low + width)).collect()).unwrap()
    }
}

prop_compose! {
    fn arb_crossover()(idx in 0..4usize, extension in 0.0..1.0f64) -> Crossover {
        match idx {
            0 => Crossover::Blend { extension },
            1 => Crossover::Uniform,
            2 => Crossover::OnePoint,
            _ => Crossover::TwoPoint,
        }
    }
}

prop_compose! {
    fn arb_selection()(idx in 0..3usize, k in 1..6usize) -> Selection {
        match idx {
            0 => Selection::Tournament(k),
            1 => Selection::Roulette,
            _ => Selection::Rank,
        }
    }
}

prop_compose! {
    fn arb_config()(
        population_size in 2..16usize,
        max_generations in 1..12usize,
        selection in arb_selection(),
        crossover in arb_crossover(),
        crossover_rate in 0.0..=1.0f64,
        mutation_rate in 0.0..=1.0f64,
        mutation_scale in 0.01..2.0f64,
        elitism in any::<bool>(),
        patience in 0..5usize,
        seed in any::<u64>(),
    ) -> GaConfig {
        GaConfig::default()
            .with_population_size(population_size)
            .with_max_generations(max_generations)
            .with_selection(selection)
            .with_crossover(crossover)
            .with_crossover_rate(crossover_rate)
            .with_mutation_rate(mutation_rate)
            .with_mutation_scale(mutation_scale)
            .with_elitism(elitism)
            .with_patience(patience)
            .with_seed(seed)
            .with_parallel(false)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_gene_stays_in_bounds(bounds in arb_bounds(), config in arb_config()) {
        let size = config.population_size;
        let mut runner = GaRunner::new(&sphere, bounds.clone(), config).unwrap();
        loop {
            let phase = runner.step().unwrap();
            let population = runner.population().unwrap();
            prop_assert_eq!(population.len(), size);
            for ind in population.iter() {
                prop_assert!(bounds.contains(ind.genes()), "escaped: {:?}", ind.genes());
            }
            if let Some(best) = &runner.state().best {
                prop_assert!(bounds.contains(best.genes()));
            }
            if let Phase::Terminated(_) = phase {
                break;
            }
        }
    }

    #[test]
    fn termination_is_bounded(bounds in arb_bounds(), config in arb_config()) {
        let max_generations = config.max_generations;
        let mut runner = GaRunner::new(&sphere, bounds, config).unwrap();
        let result = runner.run().unwrap();
        prop_assert!(result.generations >= 1);
        prop_assert!(result.generations <= max_generations + 1);
        prop_assert_eq!(result.fitness_history.len(), result.generations);
        for window in result.fitness_history.windows(2) {
            prop_assert!(window[1] <= window[0]);
        }
    }

    #[test]
    fn seeded_runs_repeat(bounds in arb_bounds(), config in arb_config()) {
        let a = GaRunner::new(&sphere, bounds.clone(), config.clone()).unwrap().run().unwrap();
        let b = GaRunner::new(&sphere, bounds, config).unwrap().run().unwrap();
        prop_assert_eq!(a, b);
    }
}
