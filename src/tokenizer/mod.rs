//! Tokenizer abstraction: maps a normalized string to an ordered sequence of
//! integer token IDs, and owns a vocabulary learned from a corpus.

mod bigram;
mod character;
mod jamo;
mod subword;

pub use bigram::BigramTokenizer;
pub use character::CharacterTokenizer;
pub use jamo::JamoTokenizer;
pub use subword::{SubwordAdapter, SubwordTokenizer};

use serde::{Deserialize, Serialize};

/// Common interface shared by all tokenizer variants.
///
/// Training is idempotent: retraining on the same corpus yields the same
/// vocabulary, since vocabularies are always derived by sorting the observed
/// token set lexicographically.
pub trait Tokenizer {
    /// Whether the vocabulary has been populated (by `train` or otherwise).
    fn is_trained(&self) -> bool;

    /// Learn a vocabulary from the given corpus. Replaces any existing
    /// vocabulary.
    fn train(&mut self, strings: &[String]);

    /// Split a string into tokens.
    fn tokenize(&self, s: &str) -> Vec<String>;

    /// Reconstruct (possibly lossily) the original string from tokens.
    fn detokenize(&self, tokens: &[String]) -> String;

    /// Tokenize and convert to IDs in one step.
    fn encode(&self, s: &str) -> Vec<u32> {
        self.convert_tokens_to_ids(&self.tokenize(s))
    }

    /// Map tokens to their vocabulary IDs. Unknown tokens map to [`Tokenizer::unk_id`].
    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Vec<u32>;

    /// Size of the trained vocabulary, not counting the UNK sentinel.
    fn vocab_len(&self) -> usize;

    /// The sentinel ID for out-of-vocabulary tokens: `vocab_len()`. Never
    /// appears inside an indexed entry's token sequence, only in query
    /// token sequences.
    fn unk_id(&self) -> u32 {
        self.vocab_len() as u32
    }

    /// Rebuilds any `#[serde(skip)]` lookup structures from the serialized
    /// vocabulary fields. Must be called after deserializing a tokenizer
    /// (see [`crate::finder::Finder::loads`]/`load`); a no-op for
    /// tokenizers that have nothing to rebuild.
    fn rebuild_index(&mut self) {}
}

/// A closed tagged union over the built-in (non-adapter) tokenizers, used
/// where a single concrete type is needed — persistence and CLI selection,
/// in particular, since an adapter-backed [`SubwordTokenizer`] crosses a
/// foreign boundary this crate cannot serialize on its behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TokenizerState {
    Character(CharacterTokenizer),
    Bigram(BigramTokenizer),
    Jamo(JamoTokenizer),
}

impl Tokenizer for TokenizerState {
    fn is_trained(&self) -> bool {
        match self {
            TokenizerState::Character(t) => t.is_trained(),
            TokenizerState::Bigram(t) => t.is_trained(),
            TokenizerState::Jamo(t) => t.is_trained(),
        }
    }

    fn train(&mut self, strings: &[String]) {
        match self {
            TokenizerState::Character(t) => t.train(strings),
            TokenizerState::Bigram(t) => t.train(strings),
            TokenizerState::Jamo(t) => t.train(strings),
        }
    }

    fn tokenize(&self, s: &str) -> Vec<String> {
        match self {
            TokenizerState::Character(t) => t.tokenize(s),
            TokenizerState::Bigram(t) => t.tokenize(s),
            TokenizerState::Jamo(t) => t.tokenize(s),
        }
    }

    fn detokenize(&self, tokens: &[String]) -> String {
        match self {
            TokenizerState::Character(t) => t.detokenize(tokens),
            TokenizerState::Bigram(t) => t.detokenize(tokens),
            TokenizerState::Jamo(t) => t.detokenize(tokens),
        }
    }

    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Vec<u32> {
        match self {
            TokenizerState::Character(t) => t.convert_tokens_to_ids(tokens),
            TokenizerState::Bigram(t) => t.convert_tokens_to_ids(tokens),
            TokenizerState::Jamo(t) => t.convert_tokens_to_ids(tokens),
        }
    }

    fn vocab_len(&self) -> usize {
        match self {
            TokenizerState::Character(t) => t.vocab_len(),
            TokenizerState::Bigram(t) => t.vocab_len(),
            TokenizerState::Jamo(t) => t.vocab_len(),
        }
    }

    fn rebuild_index(&mut self) {
        match self {
            TokenizerState::Character(t) => t.rebuild_index(),
            TokenizerState::Bigram(t) => t.rebuild_index(),
            TokenizerState::Jamo(t) => t.rebuild_index(),
        }
    }
}

/// Which built-in tokenizer to construct, used by configuration and the CLI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    Character,
    Bigram,
    Jamo,
}

impl TokenizerKind {
    /// Constructs the chosen tokenizer with the given normalizer
    /// configuration and vocabulary-pruning threshold.
    pub fn build(
        self,
        normalizer_config: crate::normalizer::NormalizerConfig,
        min_freq: u32,
    ) -> TokenizerState {
        match self {
            TokenizerKind::Character => {
                TokenizerState::Character(CharacterTokenizer::new(normalizer_config, min_freq))
            }
            TokenizerKind::Bigram => {
                TokenizerState::Bigram(BigramTokenizer::new(normalizer_config, min_freq))
            }
            TokenizerKind::Jamo => {
                TokenizerState::Jamo(JamoTokenizer::new(normalizer_config, min_freq))
            }
        }
    }
}
