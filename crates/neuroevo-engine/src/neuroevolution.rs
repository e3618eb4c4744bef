use std::marker::PhantomData;

use neuroevo_network::{Network, NeuralNetwork};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use tracing::debug;

use crate::{
    EvolutionError,
    config::{NeuroevolutionConfig, NeuroevolutionConfigPatch},
    export::ExportedPopulation,
    generation::Generation,
    genome::Genome,
    history::GenerationHistory,
    seed::EvolutionSeed,
};

/// Evolution engine: owns the configuration and the lineage, hands out
/// runnable networks and collects their scores.
///
/// # Workflow
///
/// 1. [`advance`](Self::advance) returns the networks of the next generation
///    (random networks on the first call, bred networks afterwards)
/// 2. the caller evaluates each network and reports it with
///    [`record_score`](Self::record_score)
/// 3. repeat
///
/// # Example
///
/// ```
/// use neuroevo_engine::{Neuroevolution, NeuroevolutionConfig, EvolutionSeed};
/// use neuroevo_network::NetworkShape;
///
/// let config = NeuroevolutionConfig {
///     network: NetworkShape::new(2, vec![3], 1),
///     population: 20,
///     ..NeuroevolutionConfig::default()
/// };
/// let mut engine = Neuroevolution::with_seed(config, EvolutionSeed::from(7_u64));
///
/// for _ in 0..5 {
///     let networks = engine.advance()?;
///     assert_eq!(networks.len(), 20);
///     for network in &networks {
///         let output = network.compute(&[1.0, 0.0]);
///         engine.record_score(network, output[0])?;
///     }
/// }
/// # Ok::<(), neuroevo_engine::EvolutionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Neuroevolution<N = Network> {
    config: NeuroevolutionConfig,
    history: GenerationHistory,
    // lineage as it was when `advance` was last called, before pruning
    exportable: Vec<Generation>,
    rng: Pcg32,
    network: PhantomData<fn() -> N>,
}

impl Neuroevolution<Network> {
    /// Creates an engine evolving [`Network`]s, seeded from the thread RNG.
    #[must_use]
    pub fn new(config: NeuroevolutionConfig) -> Self {
        Self::from_entropy(config)
    }

    /// Like [`Self::new`], but with a specific seed for reproducible runs.
    #[must_use]
    pub fn with_seed(config: NeuroevolutionConfig, seed: EvolutionSeed) -> Self {
        Self::from_seed(config, seed)
    }
}

impl<N> Neuroevolution<N>
where
    N: NeuralNetwork,
{
    /// Creates an engine for any network implementation, seeded from the thread RNG.
    #[must_use]
    pub fn from_entropy(config: NeuroevolutionConfig) -> Self {
        Self::from_seed(config, rand::rng().random())
    }

    /// Creates an engine for any network implementation with a specific seed.
    #[must_use]
    pub fn from_seed(config: NeuroevolutionConfig, seed: EvolutionSeed) -> Self {
        Self {
            config,
            history: GenerationHistory::new(),
            exportable: vec![],
            rng: Pcg32::from_seed(seed.to_bytes()),
            network: PhantomData,
        }
    }

    #[must_use]
    pub fn configuration(&self) -> &NeuroevolutionConfig {
        &self.config
    }

    /// Merges `patch` into the configuration; unspecified fields keep their values.
    pub fn set_configuration(&mut self, patch: NeuroevolutionConfigPatch) {
        self.config.apply(patch);
    }

    #[must_use]
    pub fn history(&self) -> &GenerationHistory {
        &self.history
    }

    /// Discards the lineage. The next [`advance`](Self::advance) starts over
    /// from random networks.
    pub fn reset_generations(&mut self) {
        self.history = GenerationHistory::new();
    }

    /// Produces the networks of the next generation.
    ///
    /// The first call creates random networks; later calls breed from the
    /// scores recorded since the previous call. Old generations are pruned
    /// according to `historic` and `low_historic` afterwards.
    pub fn advance(&mut self) -> Result<Vec<N>, EvolutionError> {
        self.exportable = self.history.generations().to_vec();

        let snapshots = if self.history.is_empty() {
            self.history.start_first_generation::<N, _>(
                &self.config.network,
                self.config.population,
                &mut self.rng,
            )
        } else {
            self.history.advance(&self.config, &mut self.rng)?
        };
        let networks = snapshots.iter().map(N::from_data).collect();

        self.prune();
        Ok(networks)
    }

    fn prune(&mut self) {
        if self.config.low_historic {
            let removed = self.history.collapse_previous();
            if removed > 0 {
                debug!(removed, "collapsed previous generation");
            }
        }
        if let Some(keep) = self.config.retained_generations() {
            let removed = self.history.truncate_oldest(keep);
            if removed > 0 {
                debug!(removed, kept = keep, "dropped old generations");
            }
        }
    }

    /// Records the score of a network and returns its rank in the active generation.
    pub fn record_score(&mut self, network: &N, score: f64) -> Result<usize, EvolutionError> {
        let genome = Genome::new(score, network.to_data());
        self.history.insert_genome(genome, self.config.score_sort)
    }

    /// Exports the configuration and the lineage as of the last
    /// [`advance`](Self::advance) call.
    ///
    /// Scores recorded after the last `advance` are not part of the export.
    #[must_use]
    pub fn export(&self) -> ExportedPopulation {
        ExportedPopulation {
            config: self.config.clone().into(),
            data: self
                .exportable
                .iter()
                .map(|generation| generation.genomes().to_vec())
                .collect(),
        }
    }

    /// Imports an exported population.
    ///
    /// The payload's configuration is merged into the current one, and each
    /// exported generation is appended to the lineage with its genomes
    /// re-ranked. Existing generations are kept.
    pub fn import(&mut self, payload: ExportedPopulation) {
        self.set_configuration(payload.config);
        let generations = payload.data.len();
        let mut genomes = 0;
        for exported in payload.data {
            let mut generation = Generation::new();
            for genome in exported {
                generation.insert(genome, self.config.score_sort);
                genomes += 1;
            }
            self.history.push(generation);
        }
        debug!(generations, genomes, "imported population");
    }
}
