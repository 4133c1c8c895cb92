//! Korean jamo tokenizer: each Hangul syllable expands into up to three
//! jamo tokens (initial, medial, final); non-Korean characters pass through
//! as single tokens.
//!
//! Used by the jamo search variant, not by the primary token-ID index.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::hangul::{character_is_korean, decompose};
use crate::normalizer::{NormalizerConfig, NormalizerPipeline};
use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JamoTokenizer {
    normalizer_config: NormalizerConfig,
    /// See [`crate::tokenizer::CharacterTokenizer`]'s field of the same
    /// name; defaults to 1, a no-op.
    min_freq: u32,
    vocab: Vec<String>,
    #[serde(skip)]
    vocab_to_id: HashMap<String, u32>,
}

impl Default for JamoTokenizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default(), 1)
    }
}

impl JamoTokenizer {
    pub fn new(normalizer_config: NormalizerConfig, min_freq: u32) -> Self {
        Self {
            normalizer_config,
            min_freq,
            vocab: Vec::new(),
            vocab_to_id: HashMap::new(),
        }
    }

    fn pipeline(&self) -> NormalizerPipeline {
        NormalizerPipeline::from_config(&self.normalizer_config, Vec::new())
    }

    fn split(s: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for c in s.chars() {
            if character_is_korean(c) {
                let (cho, jung, jong) = decompose(c).expect("character_is_korean guarantees decompose");
                tokens.push(cho.to_string());
                tokens.push(jung.to_string());
                if jong != '\0' {
                    tokens.push(jong.to_string());
                }
            } else {
                tokens.push(c.to_string());
            }
        }
        tokens
    }
}

impl Tokenizer for JamoTokenizer {
    fn is_trained(&self) -> bool {
        !self.vocab.is_empty()
    }

    fn train(&mut self, strings: &[String]) {
        let pipeline = self.pipeline();
        let mut freq: HashMap<String, u32> = HashMap::new();
        for s in strings {
            for token in Self::split(&pipeline.normalize(s)) {
                *freq.entry(token).or_insert(0) += 1;
            }
        }
        let charset: BTreeSet<String> = freq
            .into_iter()
            .filter(|(_, count)| *count >= self.min_freq)
            .map(|(token, _)| token)
            .collect();
        self.vocab = charset.into_iter().collect();
        self.rebuild_index();
    }

    fn tokenize(&self, s: &str) -> Vec<String> {
        Self::split(&self.pipeline().normalize(s))
    }

    fn detokenize(&self, tokens: &[String]) -> String {
        // Jamo decomposition is not reconstructed back into syllables here;
        // this tokenizer is write-only for indexing purposes, not a
        // general-purpose round-tripping tokenizer.
        self.pipeline().denormalize(&tokens.concat())
    }

    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Vec<u32> {
        let unk = self.unk_id();
        tokens
            .iter()
            .map(|t| *self.vocab_to_id.get(t).unwrap_or(&unk))
            .collect()
    }

    fn vocab_len(&self) -> usize {
        self.vocab.len()
    }

    /// Rebuilds `vocab_to_id` from `vocab`. Required after deserializing a
    /// [`JamoTokenizer`], since `vocab_to_id` is `#[serde(skip)]` and comes
    /// back empty otherwise.
    fn rebuild_index(&mut self) {
        self.vocab_to_id = self
            .vocab
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i as u32))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_syllable_with_final_into_three_tokens() {
        let tok = JamoTokenizer::default();
        let tokens = tok.tokenize("강");
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn expands_syllable_without_final_into_two_tokens() {
        let tok = JamoTokenizer::default();
        let tokens = tok.tokenize("가");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn non_korean_passes_through_as_single_tokens() {
        let tok = JamoTokenizer::default();
        assert_eq!(tok.tokenize("ab"), vec!["a", "b"]);
    }
}
