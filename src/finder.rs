//! `Finder`: the top-level library facade combining a tokenizer, an index,
//! and the search algorithm.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::error::FinderError;
use crate::index::Index;
use crate::search::{self, Hit};
use crate::tokenizer::Tokenizer;

/// Owns a tokenizer and, once indexed, the frozen [`Index`] built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finder<T> {
    tokenizer: T,
    index: Option<Index>,
}

impl<T: Tokenizer> Finder<T> {
    pub fn new(tokenizer: T) -> Self {
        Self {
            tokenizer,
            index: None,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.index.is_some()
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Trains the tokenizer (if untrained) and builds the search index.
    pub fn index(&mut self, corpus: Corpus, pretokenized: bool) -> Result<(), FinderError> {
        let strings = corpus.into_strings()?;
        log::debug!("indexing {} corpus entries", strings.len());
        let index = Index::build(&mut self.tokenizer, &strings, pretokenized);
        log::debug!(
            "built index: {} entries, vocabulary size {}",
            index.len(),
            self.tokenizer.vocab_len()
        );
        self.index = Some(index);
        Ok(())
    }

    /// Runs an approximate-match search against the built index.
    ///
    /// `verbose` is a purely informational diagnostic channel, logged via
    /// `log`, and never affects the returned hits.
    pub fn search(
        &self,
        query: &str,
        max_distance: u32,
        pretokenized: bool,
        verbose: bool,
    ) -> Result<Vec<Hit>, FinderError> {
        let index = self.index.as_ref().ok_or(FinderError::UntrainedTokenizer)?;
        let started = std::time::Instant::now();

        let (hits, stats) =
            search::search_with_stats(index, &self.tokenizer, query, max_distance, pretokenized);

        if verbose {
            let query_tokens = if pretokenized {
                query.split_whitespace().map(String::from).collect::<Vec<_>>()
            } else {
                self.tokenizer.tokenize(query)
            };
            log::info!("query               : {query}");
            log::info!("tokens              : {query_tokens:?}");
            log::info!("num data            : {}", index.len());
            log::info!("num 1st candidates  : {}", stats.first_candidates);
            log::info!("num final candidates: {}", stats.filtered_candidates);
            log::info!("num similars        : {}", hits.len());
            log::info!("elapsed time        : {:.6} sec", started.elapsed().as_secs_f64());
        }

        Ok(hits)
    }

    /// Opt-in strict check for pretokenized input: returns an error if any
    /// whitespace-split token falls outside the trained vocabulary, instead
    /// of silently letting it map to UNK.
    pub fn check_pretokenized(&self, query: &str) -> Result<(), FinderError> {
        for token in query.split_whitespace() {
            let ids = self.tokenizer.convert_tokens_to_ids(&[token.to_string()]);
            if ids.first() == Some(&self.tokenizer.unk_id()) {
                return Err(FinderError::IncompatibleInput(token.to_string()));
            }
        }
        Ok(())
    }
}

impl<T: Tokenizer + Serialize + DeserializeOwned> Finder<T> {
    pub fn dumps(&self) -> String {
        serde_json::to_string(self).expect("failed to serialize finder")
    }

    pub fn dump(&self, path: &std::path::Path) -> Result<(), FinderError> {
        std::fs::write(path, self.dumps())?;
        Ok(())
    }

    pub fn loads(data: &str) -> Self {
        let mut finder: Self = serde_json::from_str(data).expect("failed to deserialize finder");
        finder.tokenizer.rebuild_index();
        finder
    }

    pub fn load(path: &std::path::Path) -> Result<Self, FinderError> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::loads(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::CharacterTokenizer;

    #[test]
    fn search_before_index_is_untrained_error() {
        let finder = Finder::new(CharacterTokenizer::default());
        let err = finder.search("abc", 1, false, false).unwrap_err();
        assert!(matches!(err, FinderError::UntrainedTokenizer));
    }

    #[test]
    fn index_then_search_round_trips_through_json() {
        let mut finder = Finder::new(CharacterTokenizer::default());
        let strings = vec!["abcd".to_string(), "abce".to_string(), "xyz".to_string()];
        finder.index(Corpus::Strings(strings), false).unwrap();

        let json = finder.dumps();
        let restored: Finder<CharacterTokenizer> = Finder::loads(&json);

        let hits = restored.search("abcf", 1, false, false).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn check_pretokenized_flags_out_of_vocabulary_tokens() {
        let mut finder = Finder::new(CharacterTokenizer::default());
        finder
            .index(Corpus::Strings(vec!["ab cd".to_string()]), true)
            .unwrap();
        // the whitespace-split word "zz" is not itself a single vocabulary
        // code point, so it maps to UNK.
        let err = finder.check_pretokenized("zz").unwrap_err();
        assert!(matches!(err, FinderError::IncompatibleInput(_)));
    }
}
