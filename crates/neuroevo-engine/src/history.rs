use neuroevo_network::{NetworkData, NetworkShape, NeuralNetwork};
use rand::Rng;
use tracing::debug;

use crate::{
    EvolutionError,
    config::{NeuroevolutionConfig, ScoreSort},
    generation::Generation,
    genome::Genome,
};

/// Ordered lineage of generations, oldest first.
///
/// The last generation is the active one: it receives scored genomes until the
/// next call to [`GenerationHistory::advance`] breeds from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationHistory {
    generations: Vec<Generation>,
}

impl GenerationHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Returns the generation currently receiving scores.
    #[must_use]
    pub fn latest(&self) -> Option<&Generation> {
        self.generations.last()
    }

    /// Creates `population` random networks and opens an empty generation to
    /// collect their scores.
    pub fn start_first_generation<N, R>(
        &mut self,
        shape: &NetworkShape,
        population: usize,
        rng: &mut R,
    ) -> Vec<NetworkData>
    where
        N: NeuralNetwork,
        R: Rng + ?Sized,
    {
        let networks = (0..population)
            .map(|_| N::random(shape, rng).to_data())
            .collect();
        self.generations.push(Generation::new());
        debug!(population, "started first generation");
        networks
    }

    /// Breeds the next population from the active generation and opens a new
    /// empty generation.
    pub fn advance<R>(
        &mut self,
        config: &NeuroevolutionConfig,
        rng: &mut R,
    ) -> Result<Vec<NetworkData>, EvolutionError>
    where
        R: Rng + ?Sized,
    {
        let latest = self.generations.last().ok_or(EvolutionError::NotStarted)?;
        let networks = latest.build_next_population(config, rng)?;
        self.generations.push(Generation::new());
        debug!(
            generations = self.generations.len(),
            population = networks.len(),
            "advanced generation"
        );
        Ok(networks)
    }

    /// Inserts a scored genome into the active generation and returns its rank.
    pub fn insert_genome(
        &mut self,
        genome: Genome,
        sort: ScoreSort,
    ) -> Result<usize, EvolutionError> {
        let latest = self
            .generations
            .last_mut()
            .ok_or(EvolutionError::NoActiveGeneration)?;
        Ok(latest.insert(genome, sort))
    }

    pub(crate) fn push(&mut self, generation: Generation) {
        self.generations.push(generation);
    }

    /// Reduces the second most recent generation to its last genome.
    ///
    /// Returns the number of removed genomes.
    pub(crate) fn collapse_previous(&mut self) -> usize {
        match self.generations.len() {
            0 | 1 => 0,
            len => self.generations[len - 2].retain_last(),
        }
    }

    /// Drops the oldest generations until at most `keep` remain.
    ///
    /// Returns the number of removed generations.
    pub(crate) fn truncate_oldest(&mut self, keep: usize) -> usize {
        let removed = self.generations.len().saturating_sub(keep);
        self.generations.drain(..removed);
        removed
    }
}

#[cfg(test)]
mod tests {
    use neuroevo_network::Network;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn scored(score: f64) -> Genome {
        Genome::new(score, NetworkData::new(vec![1, 1], vec![score]))
    }

    #[test]
    fn test_first_generation() {
        let mut rng = Pcg32::seed_from_u64(20);
        let mut history = GenerationHistory::new();
        let shape = NetworkShape::new(3, vec![2], 1);
        let networks = history.start_first_generation::<Network, _>(&shape, 50, &mut rng);
        assert_eq!(networks.len(), 50);
        assert!(networks.iter().all(|n| n.weights.len() == 8));
        assert!(networks.iter().all(|n| n.topology == vec![3, 2, 1]));
        assert_eq!(history.len(), 1);
        assert!(history.latest().is_some_and(Generation::is_empty));
    }

    #[test]
    fn test_operations_before_start_fail() {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut history = GenerationHistory::new();
        assert!(matches!(
            history.advance(&NeuroevolutionConfig::default(), &mut rng),
            Err(EvolutionError::NotStarted)
        ));
        assert!(matches!(
            history.insert_genome(scored(1.0), ScoreSort::Descending),
            Err(EvolutionError::NoActiveGeneration)
        ));
    }

    #[test]
    fn test_advance_without_scores_fails() {
        let mut rng = Pcg32::seed_from_u64(22);
        let mut history = GenerationHistory::new();
        history.start_first_generation::<Network, _>(&NetworkShape::default(), 4, &mut rng);
        assert!(matches!(
            history.advance(&NeuroevolutionConfig::default(), &mut rng),
            Err(EvolutionError::EmptyPopulation)
        ));
        assert_eq!(history.len(), 1, "failed advance must not open a generation");
    }

    #[test]
    fn test_advance_appends_generation() {
        let mut rng = Pcg32::seed_from_u64(23);
        let config = NeuroevolutionConfig {
            population: 6,
            ..NeuroevolutionConfig::default()
        };
        let mut history = GenerationHistory::new();
        history.start_first_generation::<Network, _>(&config.network, 6, &mut rng);
        for score in [3.0, 1.0, 2.0] {
            history.insert_genome(scored(score), config.score_sort).unwrap();
        }
        let networks = history.advance(&config, &mut rng).unwrap();
        assert_eq!(networks.len(), 6);
        assert_eq!(history.len(), 2);
        assert_eq!(history.generations()[0].len(), 3);
        assert!(history.latest().is_some_and(Generation::is_empty));
        assert_eq!(
            history.insert_genome(scored(5.0), config.score_sort).unwrap(),
            0
        );
        assert_eq!(history.latest().map(Generation::len), Some(1));
    }

    #[test]
    fn test_pruning_helpers() {
        let mut history = GenerationHistory::new();
        assert_eq!(history.collapse_previous(), 0);
        for _ in 0..4 {
            let mut generation = Generation::new();
            for score in [1.0, 2.0, 3.0] {
                generation.insert(scored(score), ScoreSort::Descending);
            }
            history.push(generation);
        }
        assert_eq!(history.collapse_previous(), 2);
        assert_eq!(history.generations()[2].len(), 1);
        assert_eq!(history.generations()[2].genomes()[0].score, 1.0);
        assert_eq!(history.generations()[3].len(), 3);

        assert_eq!(history.truncate_oldest(2), 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.generations()[0].len(), 1);
        assert_eq!(history.truncate_oldest(5), 0);
    }
}
