use neuroevo_network::NetworkData;
use serde::{Deserialize, Serialize};

/// A network snapshot paired with the score it achieved.
///
/// Genomes are never mutated in place: breeding clones the parent's snapshot
/// into a new genome before touching any weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub score: f64,
    #[serde(default)]
    pub network: NetworkData,
}

impl Genome {
    #[must_use]
    pub fn new(score: f64, network: NetworkData) -> Self {
        Self { score, network }
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn network(&self) -> &NetworkData {
        &self.network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_record_defaults_to_empty() {
        let genome: Genome = serde_json::from_str(r#"{"score": 4.5}"#).unwrap();
        assert_eq!(genome.score(), 4.5);
        assert!(genome.network().topology.is_empty());
        assert!(genome.network().weights.is_empty());

        let genome: Genome =
            serde_json::from_str(r#"{"score": 1, "network": {"weights": [0.25]}}"#).unwrap();
        assert!(genome.network.topology.is_empty());
        assert_eq!(genome.network.weights, vec![0.25]);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Genome::new(1.0, NetworkData::new(vec![1, 1], vec![0.5]));
        let mut copy = original.clone();
        copy.network.weights[0] = 9.0;
        assert_eq!(original.network.weights, vec![0.5]);
    }
}
