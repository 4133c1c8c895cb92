//! Immutable search index: posting lists, per-entry token-ID sequences and
//! lengths, and the original corpus strings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::tokenizer::Tokenizer;

/// The frozen result of indexing a corpus. All fields are read-only after
/// construction; there is no append/delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    /// Original corpus strings, `data[i]` for entry `i`.
    pub(crate) data: Vec<String>,
    /// Token-ID sequence for each entry, in original token order.
    pub(crate) token_ids: Vec<Vec<u32>>,
    /// `lengths[i] = token_ids[i].len()`.
    pub(crate) lengths: Vec<u32>,
    /// `postings[t]` is the ascending, deduplicated list of entry indices
    /// whose token-ID sequence contains token `t`.
    pub(crate) postings: Vec<Vec<u32>>,
    pub(crate) vocab_len: usize,
}

impl Index {
    /// Tokenizes and indexes `strings` using `tokenizer`, training it first
    /// if it has no vocabulary yet.
    ///
    /// When `pretokenized` is true, each entry of `strings` is assumed to
    /// already be whitespace-separated tokens rather than raw text to run
    /// through the tokenizer.
    pub fn build<T: Tokenizer>(
        tokenizer: &mut T,
        strings: &[String],
        pretokenized: bool,
    ) -> Self {
        if !tokenizer.is_trained() {
            tokenizer.train(strings);
        }

        let tokens: Vec<Vec<String>> = strings
            .iter()
            .map(|s| {
                if pretokenized {
                    s.split_whitespace().map(String::from).collect()
                } else {
                    tokenizer.tokenize(s)
                }
            })
            .collect();

        let token_ids: Vec<Vec<u32>> = tokens
            .iter()
            .map(|t| tokenizer.convert_tokens_to_ids(t))
            .collect();

        let lengths: Vec<u32> = tokens.iter().map(|t| t.len() as u32).collect();

        let vocab_len = tokenizer.vocab_len();
        let mut postings: Vec<Vec<u32>> = vec![Vec::new(); vocab_len];
        for (entry_idx, ids) in token_ids.iter().enumerate() {
            let distinct: HashSet<u32> = ids.iter().copied().filter(|&id| (id as usize) < vocab_len).collect();
            for id in distinct {
                postings[id as usize].push(entry_idx as u32);
            }
        }
        for list in &mut postings {
            list.sort_unstable();
        }

        Self {
            data: strings.to_vec(),
            token_ids,
            lengths,
            postings,
            vocab_len,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[String] {
        &self.data
    }

    /// Checks that every entry index in a posting list actually contains
    /// that token, returning the first violation found. Cheap enough to
    /// run in tests but not meant for the hot indexing path.
    pub fn check_invariants(&self) -> Result<(), crate::error::FinderError> {
        for (token, entries) in self.postings.iter().enumerate() {
            for &entry in entries {
                if !self.token_ids[entry as usize].contains(&(token as u32)) {
                    return Err(crate::error::FinderError::InternalInvariantViolation {
                        token: token as u32,
                        entry,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::CharacterTokenizer;

    #[test]
    fn builds_postings_and_lengths() {
        let mut tok = CharacterTokenizer::default();
        let strings: Vec<String> = ["abcd", "abce", "xyz"].iter().map(|s| s.to_string()).collect();
        let index = Index::build(&mut tok, &strings, false);
        assert_eq!(index.len(), 3);
        assert_eq!(index.lengths, vec![4, 4, 3]);
        index.check_invariants().unwrap();
    }

    #[test]
    fn postings_have_no_duplicates_within_a_single_entry() {
        let mut tok = CharacterTokenizer::default();
        let strings = vec!["aaaa".to_string()];
        let index = Index::build(&mut tok, &strings, false);
        // token 'a' should appear exactly once in its posting list.
        let a_id = tok.convert_tokens_to_ids(&["a".to_string()])[0];
        assert_eq!(index.postings[a_id as usize], vec![0]);
    }
}
