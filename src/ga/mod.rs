//! Real-coded Genetic Algorithm.
//!
//! A continuous-domain GA over box-bounded search spaces. Users supply an
//! [`Objective`] and per-dimension [`Bounds`]; the engine owns population
//! management, selection, variation, and termination.
//!
//! # Key Types
//!
//! - [`Individual`], [`Population`]: genomes with cached fitness
//! - [`Selection`], [`Crossover`], [`gaussian_mutation`]: variation operators
//! - [`Evaluator`]: wraps the objective with the bounds check
//! - [`GaConfig`]: algorithm parameters
//! - [`GaRunner`]: the engine state machine, with [`RunState`] and [`Phase`]
//! - [`OptimizeResult`]: final result with statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and Interval-Schemata"

mod bounds;
mod config;
mod evaluator;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use bounds::Bounds;
pub use config::GaConfig;
pub use evaluator::{BoundPolicy, Evaluator, Fallible, Objective};
pub use operators::{gaussian_mutation, Crossover};
pub use population::Population;
pub use runner::{GaRunner, OptimizeResult, Phase, RunState, TerminationReason};
pub use selection::Selection;
pub use types::Individual;
