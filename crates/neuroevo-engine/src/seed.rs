use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for a reproducible evolution run.
///
/// A 128-bit value used to initialize the engine's random number generator.
/// Two engines created with the same seed and configuration, fed the same
/// scores, produce identical populations. Formatted as 32 hexadecimal digits.
///
/// # Example
///
/// ```
/// use neuroevo_engine::EvolutionSeed;
/// use rand::Rng as _;
///
/// let seed: EvolutionSeed = rand::rng().random();
/// let parsed: EvolutionSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvolutionSeed([u8; 16]);

impl EvolutionSeed {
    #[must_use]
    pub fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl From<[u8; 16]> for EvolutionSeed {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl From<u64> for EvolutionSeed {
    fn from(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }
}

impl fmt::Display for EvolutionSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hexadecimal digits")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for EvolutionSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(invalid());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| invalid())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for EvolutionSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EvolutionSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<EvolutionSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> EvolutionSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        EvolutionSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let seed = EvolutionSeed::from(0xdead_beef_u64);
        assert_eq!(seed.to_string(), "000000000000000000000000deadbeef");
        assert_eq!("000000000000000000000000DEADBEEF".parse(), Ok(seed));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!("deadbeef".parse::<EvolutionSeed>().is_err());
        assert!("zz000000000000000000000000000000".parse::<EvolutionSeed>().is_err());
        let err = "1".parse::<EvolutionSeed>().unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"invalid seed "1": expected 32 hexadecimal digits"#
        );
    }

    #[test]
    fn test_serde_as_hex_string() {
        let seed = EvolutionSeed::from(1_u64);
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, r#""00000000000000000000000000000001""#);
        assert_eq!(serde_json::from_str::<EvolutionSeed>(&json).unwrap(), seed);
        assert!(serde_json::from_str::<EvolutionSeed>(r#""0x1""#).is_err());
    }
}
