//! Genetic evolution of feed-forward neural network weights.
//!
//! This crate evolves populations of networks: callers evaluate each network,
//! report a score, and ask for the next generation. The engine ranks the scored
//! networks, keeps the best ones, injects random networks and breeds the rest.
//!
//! # How Evolution Works
//!
//! 1. **Initialization** - The first generation consists of random networks
//! 2. **Evaluation** - The caller scores every network (fitness is external)
//! 3. **Ranking** - Scores are inserted into the active [`Generation`] in rank order
//! 4. **Elitism** - The best genomes are copied unchanged into the next population
//! 5. **Noise** - Random networks are mixed in to keep exploring
//! 6. **Breeding** - Ranked pairs are combined by crossover and mutated
//! 7. **Repeat** - Old generations are pruned according to the retention policy
//!
//! # Architecture
//!
//! ```text
//! Neuroevolution (configuration, export/import, pruning)
//!     ↓ owns
//! GenerationHistory (lineage of generations)
//!     ↓ delegates to the latest
//! Generation (ranked genomes, next-population builder)
//!     ↓ holds
//! Genome (score + network snapshot)
//! ```
//!
//! The engine is single-threaded and performs no I/O. Every random decision is
//! drawn from a generator owned by the engine, so runs created with the same
//! [`EvolutionSeed`] are reproducible.
//!
//! # Retention
//!
//! - `historic` bounds the number of generations kept: the active generation
//!   plus `historic` previous ones. Negative values keep everything.
//! - `low_historic` reduces the previous generation to a single genome after
//!   each advance. [`Neuroevolution::export`] still sees the full generation,
//!   because the lineage is snapshotted before pruning.

pub use self::{
    config::{NeuroevolutionConfig, NeuroevolutionConfigPatch, ScoreSort},
    export::ExportedPopulation,
    generation::{Generation, ScoreSummary},
    genome::Genome,
    history::GenerationHistory,
    neuroevolution::Neuroevolution,
    seed::{EvolutionSeed, ParseSeedError},
};

pub mod config;
pub mod crossover;
mod export;
mod generation;
mod genome;
mod history;
mod neuroevolution;
mod seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EvolutionError {
    #[display("cannot breed a generation without genomes")]
    EmptyPopulation,
    #[display("no generation has been started yet")]
    NotStarted,
    #[display("no active generation to receive genomes")]
    NoActiveGeneration,
}
