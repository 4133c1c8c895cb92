//! Serde-backed configuration, loadable from a JSON file the same way
//! [`crate::tokenizer`] types persist themselves.

use serde::{Deserialize, Serialize};

use crate::normalizer::NormalizerConfig;
use crate::tokenizer::TokenizerKind;

/// Top-level configuration for building a [`crate::finder::Finder`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinderConfig {
    pub normalizer: NormalizerConfig,
    pub tokenizer_kind: TokenizerKind,
    /// Vocabulary entries observed fewer than `min_freq` times across the
    /// training corpus are dropped before indexing. Defaults to `1`, a
    /// no-op that never drops a token and never introduces UNK into an
    /// indexed entry; values above `1` are an explicit, opt-in relaxation
    /// of that guarantee.
    pub min_freq: u32,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerConfig::default(),
            tokenizer_kind: TokenizerKind::Character,
            min_freq: 1,
        }
    }
}

impl FinderConfig {
    pub fn load(path: &std::path::Path) -> Result<Self, crate::error::FinderError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data).expect("config file is not valid JSON"))
    }

    pub fn dump(&self, path: &std::path::Path) -> Result<(), crate::error::FinderError> {
        let data = serde_json::to_string_pretty(self).expect("failed to serialize config");
        std::fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let config = FinderConfig {
            normalizer: NormalizerConfig {
                unicode: true,
                lowercase: true,
                number: false,
            },
            tokenizer_kind: TokenizerKind::Bigram,
            min_freq: 3,
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: FinderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.min_freq, 3);
        assert_eq!(restored.tokenizer_kind, TokenizerKind::Bigram);
    }
}
