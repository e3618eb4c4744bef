//! Engine configuration.
//!
//! [`NeuroevolutionConfig`] is the complete configuration held by the engine.
//! [`NeuroevolutionConfigPatch`] carries an optional value per field and is used
//! for partial updates: fields left as `None` keep their current value.
//!
//! Both serialize with the camel-cased keys used by exported populations:
//!
//! ```json
//! {
//!   "network": [3, [2], 1],
//!   "population": 50,
//!   "elitism": 0.2,
//!   "randomBehaviour": 0.2,
//!   "mutationRate": 0.1,
//!   "historic": 0,
//!   "lowHistoric": false,
//!   "scoreSort": -1,
//!   "nbChild": 1,
//!   "crossoverFactor": 0.5
//! }
//! ```

use neuroevo_network::NetworkShape;
use serde::{Deserialize, Serialize};

/// Direction in which genomes are ranked.
///
/// Serialized as an integer: any negative value means [`ScoreSort::Descending`]
/// (higher scores are better), anything else means [`ScoreSort::Ascending`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ScoreSort {
    #[default]
    Descending,
    Ascending,
}

impl ScoreSort {
    /// Returns `true` if `score` ranks strictly ahead of `other`.
    #[must_use]
    pub fn ranks_before(self, score: f64, other: f64) -> bool {
        match self {
            ScoreSort::Descending => score > other,
            ScoreSort::Ascending => score < other,
        }
    }
}

impl From<i32> for ScoreSort {
    fn from(value: i32) -> Self {
        if value < 0 {
            ScoreSort::Descending
        } else {
            ScoreSort::Ascending
        }
    }
}

impl From<ScoreSort> for i32 {
    fn from(sort: ScoreSort) -> Self {
        match sort {
            ScoreSort::Descending => -1,
            ScoreSort::Ascending => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NeuroevolutionConfig {
    /// Shape of every network in the population.
    pub network: NetworkShape,
    /// Number of networks per generation.
    pub population: usize,
    /// Fraction of the population copied unchanged from the best genomes.
    pub elitism: f64,
    /// Fraction of the population replaced by random networks.
    pub random_behaviour: f64,
    /// Per-weight mutation probability, also used as the mutation magnitude.
    pub mutation_rate: f64,
    /// Number of prior generations to retain. Negative values disable pruning.
    pub historic: i32,
    /// Keep only one genome of the previous generation after each advance.
    pub low_historic: bool,
    pub score_sort: ScoreSort,
    /// Children produced per breeding pair. Zero is treated as one.
    pub nb_child: usize,
    /// Per-weight probability of inheriting from the second parent in uniform crossover.
    pub crossover_factor: f64,
}

impl Default for NeuroevolutionConfig {
    fn default() -> Self {
        Self {
            network: NetworkShape::default(),
            population: 50,
            elitism: 0.2,
            random_behaviour: 0.2,
            mutation_rate: 0.1,
            historic: 0,
            low_historic: false,
            score_sort: ScoreSort::Descending,
            nb_child: 1,
            crossover_factor: 0.5,
        }
    }
}

impl NeuroevolutionConfig {
    /// Number of genomes carried over unchanged: `round(elitism * population)`.
    #[must_use]
    pub fn elite_count(&self) -> usize {
        fraction_of_population(self.elitism, self.population)
    }

    /// Number of random networks injected: `round(random_behaviour * population)`.
    #[must_use]
    pub fn noise_count(&self) -> usize {
        fraction_of_population(self.random_behaviour, self.population)
    }

    #[must_use]
    pub fn children_per_pair(&self) -> usize {
        self.nb_child.max(1)
    }

    /// Maximum lineage length kept after pruning, or `None` when unbounded.
    #[must_use]
    pub fn retained_generations(&self) -> Option<usize> {
        usize::try_from(self.historic).ok().map(|historic| historic + 1)
    }

    /// Merges `patch` into this configuration field by field.
    pub fn apply(&mut self, patch: NeuroevolutionConfigPatch) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = patch.$field {
                        self.$field = value;
                    }
                )*
            };
        }
        merge!(
            network,
            population,
            elitism,
            random_behaviour,
            mutation_rate,
            historic,
            low_historic,
            score_sort,
            nb_child,
            crossover_factor,
        );
    }

    /// Returns a copy of this configuration with `patch` applied.
    #[must_use]
    pub fn with(mut self, patch: NeuroevolutionConfigPatch) -> Self {
        self.apply(patch);
        self
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn fraction_of_population(fraction: f64, population: usize) -> usize {
    // NaN and negative fractions saturate to zero
    (fraction * population as f64).round().max(0.0) as usize
}

/// Partial configuration; `None` fields are left untouched when applied.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NeuroevolutionConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elitism: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_behaviour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutation_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historic: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_historic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_sort: Option<ScoreSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nb_child: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crossover_factor: Option<f64>,
}

impl NeuroevolutionConfigPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<NeuroevolutionConfig> for NeuroevolutionConfigPatch {
    fn from(config: NeuroevolutionConfig) -> Self {
        Self {
            network: Some(config.network),
            population: Some(config.population),
            elitism: Some(config.elitism),
            random_behaviour: Some(config.random_behaviour),
            mutation_rate: Some(config.mutation_rate),
            historic: Some(config.historic),
            low_historic: Some(config.low_historic),
            score_sort: Some(config.score_sort),
            nb_child: Some(config.nb_child),
            crossover_factor: Some(config.crossover_factor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_counts() {
        let config = NeuroevolutionConfig {
            population: 50,
            elitism: 0.2,
            random_behaviour: 0.25,
            nb_child: 0,
            ..NeuroevolutionConfig::default()
        };
        assert_eq!(config.elite_count(), 10);
        // 12.5 rounds away from zero
        assert_eq!(config.noise_count(), 13);
        assert_eq!(config.children_per_pair(), 1);

        let negative = NeuroevolutionConfig {
            elitism: -0.5,
            ..config
        };
        assert_eq!(negative.elite_count(), 0);
    }

    #[test]
    fn test_retained_generations() {
        let mut config = NeuroevolutionConfig::default();
        assert_eq!(config.retained_generations(), Some(1));
        config.historic = 2;
        assert_eq!(config.retained_generations(), Some(3));
        config.historic = -1;
        assert_eq!(config.retained_generations(), None);
        config.historic = -7;
        assert_eq!(config.retained_generations(), None);
    }

    #[test]
    fn test_apply_patch_keeps_unspecified_fields() {
        let mut config = NeuroevolutionConfig::default();
        config.apply(NeuroevolutionConfigPatch {
            elitism: Some(0.5),
            random_behaviour: Some(0.5),
            ..NeuroevolutionConfigPatch::default()
        });
        assert_eq!(config.elitism, 0.5);
        assert_eq!(config.random_behaviour, 0.5);
        assert_eq!(config.population, 50);
        assert_eq!(config.mutation_rate, 0.1);
    }

    #[test]
    fn test_full_patch_reproduces_config() {
        let config = NeuroevolutionConfig {
            network: NetworkShape::new(3, vec![4, 4], 2),
            population: 12,
            historic: 3,
            low_historic: true,
            score_sort: ScoreSort::Ascending,
            ..NeuroevolutionConfig::default()
        };
        let rebuilt = NeuroevolutionConfig::default().with(config.clone().into());
        assert_eq!(rebuilt, config);
        assert!(NeuroevolutionConfigPatch::default().is_empty());
    }

    #[test]
    fn test_json_keys() {
        let json = serde_json::to_value(NeuroevolutionConfig::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "network": [1, [2], 1],
                "population": 50,
                "elitism": 0.2,
                "randomBehaviour": 0.2,
                "mutationRate": 0.1,
                "historic": 0,
                "lowHistoric": false,
                "scoreSort": -1,
                "nbChild": 1,
                "crossoverFactor": 0.5
            })
        );
    }

    #[test]
    fn test_patch_parses_partial_json() {
        let patch: NeuroevolutionConfigPatch =
            serde_json::from_str(r#"{"population": 20, "scoreSort": 3}"#).unwrap();
        assert_eq!(patch.population, Some(20));
        assert_eq!(patch.score_sort, Some(ScoreSort::Ascending));
        assert_eq!(patch.elitism, None);
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"population":20,"scoreSort":1}"#
        );
    }

    #[test]
    fn test_ranks_before() {
        assert!(ScoreSort::Descending.ranks_before(2.0, 1.0));
        assert!(!ScoreSort::Descending.ranks_before(1.0, 1.0));
        assert!(ScoreSort::Ascending.ranks_before(1.0, 2.0));
        assert!(!ScoreSort::Ascending.ranks_before(2.0, 2.0));
    }
}
