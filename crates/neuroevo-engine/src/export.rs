use serde::{Deserialize, Serialize};

use crate::{config::NeuroevolutionConfigPatch, genome::Genome};

/// Serializable snapshot of a trained lineage.
///
/// ```json
/// {
///   "config": { "network": [3, [2], 1], "population": 50, ... },
///   "data": [
///     [ { "score": 87.5, "network": { "topology": [3, 2, 1], "weights": [...] } }, ... ],
///     ...
///   ]
/// }
/// ```
///
/// Exports always carry the complete configuration. On import every
/// configuration key is optional, and a missing `config` leaves the engine's
/// configuration untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportedPopulation {
    #[serde(default)]
    pub config: NeuroevolutionConfigPatch,
    /// Genomes of each generation, oldest generation first, best genome first.
    #[serde(default)]
    pub data: Vec<Vec<Genome>>,
}

impl ExportedPopulation {
    /// Total number of genomes across all generations.
    #[must_use]
    pub fn genome_count(&self) -> usize {
        self.data.iter().map(Vec::len).sum()
    }
}
