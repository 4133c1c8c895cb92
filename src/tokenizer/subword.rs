//! Thin facade over an externally trained wordpiece/BPE tokenizer.
//!
//! The core does no subword training or merge-rule algorithmic work; it
//! only requires the adapter to produce token IDs in a dense `[0, vocab_len)`
//! range and to accept training over a file path, the same contract a
//! `WordpieceTokenizersWrapper` around a wrapped BERT wordpiece tokenizer
//! would hold its backing model to.

use std::path::Path;

use crate::tokenizer::Tokenizer;

/// Foreign-boundary contract a pluggable subword model must satisfy.
///
/// Implementors own their own training, vocabulary, and model format; this
/// crate defines no on-disk format for them and delegates persistence
/// entirely to the adapter.
pub trait SubwordAdapter: Send + Sync {
    fn is_trained(&self) -> bool;
    fn train(&mut self, corpus_path: &Path);
    fn tokenize(&self, s: &str) -> Vec<String>;
    fn detokenize(&self, tokens: &[String]) -> String;
    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Vec<u32>;
    fn vocab_len(&self) -> usize;
}

/// Adapts a [`SubwordAdapter`] trait object to the core [`Tokenizer`]
/// interface. `train` here requires a corpus *file path*, since subword
/// model training (BPE merges, wordpiece vocabularies) is not something
/// this crate can drive from an in-memory string slice.
pub struct SubwordTokenizer {
    adapter: Box<dyn SubwordAdapter>,
}

impl SubwordTokenizer {
    pub fn new(adapter: Box<dyn SubwordAdapter>) -> Self {
        Self { adapter }
    }

    /// Train the wrapped adapter from a corpus file on disk. Unlike
    /// [`Tokenizer::train`], this is the only entry point that can actually
    /// populate a subword vocabulary, since subword training requires a
    /// file path, not an in-memory string slice.
    pub fn train_from_file(&mut self, corpus_path: &Path) {
        self.adapter.train(corpus_path);
    }
}

impl Tokenizer for SubwordTokenizer {
    fn is_trained(&self) -> bool {
        self.adapter.is_trained()
    }

    /// No-op: subword adapters train from a file path via
    /// [`SubwordTokenizer::train_from_file`], not from an in-memory corpus.
    fn train(&mut self, _strings: &[String]) {}

    fn tokenize(&self, s: &str) -> Vec<String> {
        self.adapter.tokenize(s)
    }

    fn detokenize(&self, tokens: &[String]) -> String {
        self.adapter.detokenize(tokens)
    }

    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Vec<u32> {
        self.adapter.convert_tokens_to_ids(tokens)
    }

    fn vocab_len(&self) -> usize {
        self.adapter.vocab_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// A minimal stub adapter for exercising the facade in tests, standing
    /// in for a real wordpiece/BPE backend.
    struct StubAdapter {
        vocab: HashMap<String, u32>,
        trained: bool,
    }

    impl StubAdapter {
        fn new() -> Self {
            let vocab = [("he".to_string(), 0u32), ("##llo".to_string(), 1u32)]
                .into_iter()
                .collect();
            Self {
                vocab,
                trained: false,
            }
        }
    }

    impl SubwordAdapter for StubAdapter {
        fn is_trained(&self) -> bool {
            self.trained
        }

        fn train(&mut self, _corpus_path: &Path) {
            self.trained = true;
        }

        fn tokenize(&self, _s: &str) -> Vec<String> {
            vec!["he".to_string(), "##llo".to_string()]
        }

        fn detokenize(&self, tokens: &[String]) -> String {
            tokens
                .iter()
                .map(|t| t.strip_prefix("##").unwrap_or(t))
                .collect()
        }

        fn convert_tokens_to_ids(&self, tokens: &[String]) -> Vec<u32> {
            let unk = self.vocab_len() as u32;
            tokens
                .iter()
                .map(|t| *self.vocab.get(t).unwrap_or(&unk))
                .collect()
        }

        fn vocab_len(&self) -> usize {
            self.vocab.len()
        }
    }

    #[test]
    fn delegates_tokenize_and_ids_to_adapter() {
        let tok = SubwordTokenizer::new(Box::new(StubAdapter::new()));
        let tokens = tok.tokenize("hello");
        assert_eq!(tokens, vec!["he", "##llo"]);
        assert_eq!(tok.convert_tokens_to_ids(&tokens), vec![0, 1]);
        assert_eq!(tok.detokenize(&tokens), "hello");
    }

    #[test]
    fn in_memory_train_is_a_no_op() {
        let mut tok = SubwordTokenizer::new(Box::new(StubAdapter::new()));
        assert!(!tok.is_trained());
        tok.train(&["ignored".to_string()]);
        assert!(!tok.is_trained());
    }
}
