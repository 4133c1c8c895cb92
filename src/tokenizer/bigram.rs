//! Overlapping character-bigram tokenizer.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::normalizer::{NormalizerConfig, NormalizerPipeline};
use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BigramTokenizer {
    normalizer_config: NormalizerConfig,
    /// See [`crate::tokenizer::CharacterTokenizer`]'s field of the same
    /// name; defaults to 1, a no-op.
    min_freq: u32,
    vocab: Vec<String>,
    #[serde(skip)]
    vocab_to_id: HashMap<String, u32>,
}

impl Default for BigramTokenizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default(), 1)
    }
}

impl BigramTokenizer {
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

    /// Splits a normalized string into overlapping bigrams. Strings of
    /// fewer than 2 characters fall back to a single token equal to the
    /// whole normalized string.
    fn to_bigrams(s: &str) -> Vec<String> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() < 2 {
            return vec![s.to_string()];
        }
        (0..chars.len() - 1)
            .map(|i| chars[i..i + 2].iter().collect())
            .collect()
    }
}

impl Tokenizer for BigramTokenizer {
    fn is_trained(&self) -> bool {
        !self.vocab.is_empty()
    }

    fn train(&mut self, strings: &[String]) {
        let pipeline = self.pipeline();
        let mut freq: HashMap<String, u32> = HashMap::new();
        for s in strings {
            for bigram in Self::to_bigrams(&pipeline.normalize(s)) {
                *freq.entry(bigram).or_insert(0) += 1;
            }
        }
        let bigrams: BTreeSet<String> = freq
            .into_iter()
            .filter(|(_, count)| *count >= self.min_freq)
            .map(|(token, _)| token)
            .collect();
        self.vocab = bigrams.into_iter().collect();
        self.rebuild_index();
    }

    fn tokenize(&self, s: &str) -> Vec<String> {
        Self::to_bigrams(&self.pipeline().normalize(s))
    }

    fn detokenize(&self, tokens: &[String]) -> String {
        let Some((last, rest)) = tokens.split_last() else {
            return self.pipeline().denormalize("");
        };
        let mut s: String = rest
            .iter()
            .map(|t| t.chars().next().expect("bigram token is never empty"))
            .collect();
        s.push_str(last);
        self.pipeline().denormalize(&s)
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
    /// [`BigramTokenizer`], since `vocab_to_id` is `#[serde(skip)]` and
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
    fn splits_overlapping_bigrams() {
        let tok = BigramTokenizer::default();
        assert_eq!(tok.tokenize("abcd"), vec!["ab", "bc", "cd"]);
    }

    #[test]
    fn short_strings_fall_back_to_one_token() {
        let tok = BigramTokenizer::default();
        assert_eq!(tok.tokenize("a"), vec!["a"]);
        assert_eq!(tok.tokenize(""), vec![""]);
    }

    #[test]
    fn round_trips_for_strings_of_length_two_or_more() {
        let tok = BigramTokenizer::default();
        let tokens = tok.tokenize("abcd");
        assert_eq!(tok.detokenize(&tokens), "abcd");
    }

    #[test]
    fn training_is_idempotent() {
        let strings = vec!["abcd".to_string(), "bcde".to_string()];
        let mut a = BigramTokenizer::default();
        a.train(&strings);
        let mut b = BigramTokenizer::default();
        b.train(&strings);
        b.train(&strings);
        assert_eq!(a.vocab, b.vocab);
    }
}
