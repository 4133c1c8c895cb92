//! Code-point tokenizer: each token is a single normalized code point.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::normalizer::{NormalizerConfig, NormalizerPipeline};
use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterTokenizer {
    normalizer_config: NormalizerConfig,
    /// Code points observed fewer than this many times across the training
    /// corpus are dropped from the vocabulary. Defaults to 1, a no-op that
    /// keeps every observed token and so guarantees UNK never appears in an
    /// indexed entry's token sequence; values above 1 are an explicit,
    /// opt-in relaxation of that guarantee.
    min_freq: u32,
    vocab: Vec<String>,
    #[serde(skip)]
    vocab_to_id: HashMap<String, u32>,
}

impl Default for CharacterTokenizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default(), 1)
    }
}

impl CharacterTokenizer {
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
}

impl Tokenizer for CharacterTokenizer {
    fn is_trained(&self) -> bool {
        !self.vocab.is_empty()
    }

    fn train(&mut self, strings: &[String]) {
        let pipeline = self.pipeline();
        let mut freq: HashMap<String, u32> = HashMap::new();
        for s in strings {
            for c in pipeline.normalize(s).chars() {
                *freq.entry(c.to_string()).or_insert(0) += 1;
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
        self.pipeline().normalize(s).chars().map(|c| c.to_string()).collect()
    }

    fn detokenize(&self, tokens: &[String]) -> String {
        let joined: String = tokens.concat();
        self.pipeline().denormalize(&joined)
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
    /// [`CharacterTokenizer`], since `vocab_to_id` is `#[serde(skip)]` and
    /// comes back empty otherwise.
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
    fn trains_sorted_vocab() {
        let mut tok = CharacterTokenizer::default();
        tok.train(&["cba".to_string(), "ab".to_string()]);
        assert_eq!(tok.vocab, vec!["a", "b", "c"]);
    }

    #[test]
    fn training_is_idempotent() {
        let strings = vec!["hello".to_string(), "world".to_string()];
        let mut a = CharacterTokenizer::default();
        a.train(&strings);
        let mut b = CharacterTokenizer::default();
        b.train(&strings);
        b.train(&strings);
        assert_eq!(a.vocab, b.vocab);
    }

    #[test]
    fn round_trips_for_any_string() {
        let mut tok = CharacterTokenizer::default();
        tok.train(&["abcd".to_string()]);
        let tokens = tok.tokenize("abcd");
        assert_eq!(tok.detokenize(&tokens), "abcd");
    }

    #[test]
    fn unknown_tokens_map_to_unk() {
        let mut tok = CharacterTokenizer::default();
        tok.train(&["ab".to_string()]);
        let ids = tok.convert_tokens_to_ids(&["a".to_string(), "z".to_string()]);
        assert_eq!(ids, vec![0, tok.unk_id()]);
    }

    #[test]
    fn min_freq_above_one_drops_rare_tokens() {
        let mut tok = CharacterTokenizer::new(NormalizerConfig::default(), 2);
        tok.train(&["aab".to_string()]);
        assert_eq!(tok.vocab, vec!["a"]);
    }

    #[test]
    fn convert_tokens_to_ids_works_after_json_round_trip() {
        let mut tok = CharacterTokenizer::default();
        tok.train(&["ab".to_string()]);
        let json = serde_json::to_string(&tok).unwrap();
        let mut restored: CharacterTokenizer = serde_json::from_str(&json).unwrap();
        restored.rebuild_index();
        let ids = restored.convert_tokens_to_ids(&["a".to_string()]);
        assert_eq!(ids, vec![0]);
    }
}
