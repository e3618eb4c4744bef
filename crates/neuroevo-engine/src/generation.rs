//! A single ranked population and the algorithm that breeds its successor.
//!
//! # Next Population
//!
//! [`Generation::build_next_population`] assembles exactly `population` network
//! snapshots in four steps:
//!
//! 1. **Elitism** - the best `round(elitism * population)` genomes are copied unchanged
//! 2. **Noise** - `round(random_behaviour * population)` random networks are appended
//! 3. **Clamp** - if steps 1 and 2 already filled the population, the surplus is dropped
//! 4. **Breeding** - ranked pairs are bred until the population is full
//!
//! Breeding sweeps pairs `(0, k), (1, k), ..., (k - 1, k)` for `k = 1, 2, ...`,
//! wrapping `k` back to `1` once it reaches the number of genomes. Highly ranked
//! genomes therefore take part in more pairs than poorly ranked ones, while every
//! genome is eventually mixed in.
//!
//! Each pair is bred with one of two techniques chosen at random with equal
//! probability: uniform crossover or two-point crossover. Both are followed by a
//! per-weight mutation pass. See the [`crossover`](crate::crossover) module.

use std::cmp::Ordering;

use neuroevo_network::{NetworkData, weights};
use rand::Rng;
use tracing::{debug, trace};

use crate::{
    EvolutionError,
    config::{NeuroevolutionConfig, ScoreSort},
    crossover,
    genome::Genome,
};

/// Genomes of one evolutionary step, kept sorted by score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generation {
    genomes: Vec<Genome>,
}

/// Score range of a generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ScoreSummary {
    /// Summarizes a set of scores, or returns `None` if there are none.
    ///
    /// ```
    /// use neuroevo_engine::ScoreSummary;
    ///
    /// let summary = ScoreSummary::new([2.0, 6.0, 4.0]).unwrap();
    /// assert_eq!((summary.min, summary.max, summary.mean), (2.0, 6.0, 4.0));
    /// assert!(ScoreSummary::new([]).is_none());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(scores: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut scores = scores.into_iter();
        let first = scores.next()?;
        let (min, max, sum, count) = scores.fold(
            (first, first, first, 1_usize),
            |(min, max, sum, count), score| {
                (f64::min(min, score), f64::max(max, score), sum + score, count + 1)
            },
        );
        Some(Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreedingTechnique {
    UniformCrossover,
    TwoPointCrossover,
}

impl Generation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Genomes in rank order, best first.
    #[must_use]
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Returns the best ranked genome, if any.
    #[must_use]
    pub fn best(&self) -> Option<&Genome> {
        self.genomes.first()
    }

    #[must_use]
    pub fn score_summary(&self) -> Option<ScoreSummary> {
        ScoreSummary::new(self.genomes.iter().map(Genome::score))
    }

    /// Inserts a genome at its rank and returns the insertion index.
    ///
    /// The genome is placed before the first genome it strictly outranks, so
    /// genomes with equal scores keep their insertion order.
    pub fn insert(&mut self, genome: Genome, sort: ScoreSort) -> usize {
        self.insert_with(genome, sort, |_, _| Ordering::Greater)
    }

    /// Like [`Self::insert`], with a custom policy for equal scores.
    ///
    /// `tie_break(new, existing)` returning [`Ordering::Less`] places the new
    /// genome before an existing genome of equal score.
    ///
    /// # Example
    ///
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use neuroevo_engine::{Generation, Genome, ScoreSort};
    /// use neuroevo_network::NetworkData;
    ///
    /// let mut generation = Generation::new();
    /// generation.insert(Genome::new(1.0, NetworkData::default()), ScoreSort::Descending);
    ///
    /// // newest first among equal scores
    /// let newest_first = |_: &Genome, _: &Genome| Ordering::Less;
    /// let position = generation.insert_with(
    ///     Genome::new(1.0, NetworkData::default()),
    ///     ScoreSort::Descending,
    ///     newest_first,
    /// );
    /// assert_eq!(position, 0);
    /// ```
    pub fn insert_with<F>(&mut self, genome: Genome, sort: ScoreSort, mut tie_break: F) -> usize
    where
        F: FnMut(&Genome, &Genome) -> Ordering,
    {
        let position = self
            .genomes
            .iter()
            .position(|existing| {
                sort.ranks_before(genome.score, existing.score)
                    || (!sort.ranks_before(existing.score, genome.score)
                        && tie_break(&genome, existing) == Ordering::Less)
            })
            .unwrap_or(self.genomes.len());
        self.genomes.insert(position, genome);
        position
    }

    /// Removes every genome except the last one and returns how many were removed.
    pub(crate) fn retain_last(&mut self) -> usize {
        let removed = self.genomes.len().saturating_sub(1);
        self.genomes.drain(..removed);
        removed
    }

    /// Builds the network snapshots of the next population.
    ///
    /// Always returns exactly `config.population` snapshots, even when
    /// `elitism + random_behaviour` exceeds `1.0`.
    pub fn build_next_population<R>(
        &self,
        config: &NeuroevolutionConfig,
        rng: &mut R,
    ) -> Result<Vec<NetworkData>, EvolutionError>
    where
        R: Rng + ?Sized,
    {
        let Some(best) = self.genomes.first() else {
            return Err(EvolutionError::EmptyPopulation);
        };
        let population = config.population;
        let mut next = Vec::with_capacity(population);

        next.extend(
            self.genomes
                .iter()
                .take(config.elite_count().min(population))
                .map(|genome| genome.network.clone()),
        );
        let elites = next.len();

        let noise = config.noise_count().min(population - next.len());
        if noise > 0 {
            let topology = config.network.layer_sizes();
            let weight_count = best.network.weights.len();
            next.extend((0..noise).map(|_| {
                NetworkData::new(topology.clone(), weights::random(rng, weight_count))
            }));
        }

        if next.len() >= population {
            next.truncate(population);
            debug!(elites, population, "population filled without breeding");
            return Ok(next);
        }

        let bred_from = next.len();
        let mut pair = 1;
        loop {
            // a lone genome is bred with itself
            let partner = self.genomes.get(pair).unwrap_or(best);
            for parent in &self.genomes[..pair.min(self.genomes.len())] {
                for child in breed(parent, partner, config, rng) {
                    next.push(child.network);
                    if next.len() >= population {
                        debug!(
                            elites,
                            noise = bred_from - elites,
                            bred = population - bred_from,
                            "built next population"
                        );
                        return Ok(next);
                    }
                }
            }
            pair += 1;
            if pair >= self.genomes.len() {
                pair = 1;
            }
        }
    }
}

/// Breeds `config.children_per_pair()` children from two parents.
fn breed<R>(
    first: &Genome,
    second: &Genome,
    config: &NeuroevolutionConfig,
    rng: &mut R,
) -> Vec<Genome>
where
    R: Rng + ?Sized,
{
    let technique = if weights::random_clamped(rng) < 0.0 {
        BreedingTechnique::UniformCrossover
    } else {
        BreedingTechnique::TwoPointCrossover
    };
    trace!(?technique, first = first.score, second = second.score, "breeding pair");

    (0..config.children_per_pair())
        .map(|_| {
            // the child keeps the first parent's score until it is evaluated
            let mut child = first.clone();
            let child_weights = &mut child.network.weights;
            let parent_weights = &second.network.weights;
            match technique {
                BreedingTechnique::UniformCrossover => {
                    crossover::uniform(child_weights, parent_weights, config.crossover_factor, rng);
                }
                BreedingTechnique::TwoPointCrossover => {
                    crossover::two_point(child_weights, parent_weights, rng);
                }
            }
            crossover::mutate(child_weights, config.mutation_rate, rng);
            child
        })
        .collect()
}
