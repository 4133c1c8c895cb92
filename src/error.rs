//! Error types for indexing and search.

use thiserror::Error;

/// Errors raised while building or querying a [`crate::finder::Finder`].
#[derive(Debug, Error)]
pub enum FinderError {
    /// `search` or `index` was called before the tokenizer had a vocabulary
    /// and no corpus was supplied to train one.
    #[error("tokenizer has not been trained and no corpus was provided")]
    UntrainedTokenizer,

    /// The corpus file could not be read.
    #[error("failed to read corpus file: {0}")]
    InvalidCorpusFile(std::io::Error),

    /// Ambient file I/O failure on index or config persistence, as opposed
    /// to [`FinderError::InvalidCorpusFile`]'s corpus-specific read path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A posting list referenced an entry that does not actually contain the
    /// token it is indexed under. Indicates a bug in the index builder, not
    /// a user-facing condition.
    #[error("posting list for token {token} contains entry {entry}, which does not contain it")]
    InternalInvariantViolation { token: u32, entry: u32 },

    /// `pretokenized` input contained a token outside the trained
    /// vocabulary. Non-fatal in normal search (the token maps to UNK and
    /// simply fails to match any posting list); returned only by
    /// [`crate::finder::Finder::check_pretokenized`], an opt-in strict check.
    #[error("token {0:?} is not in the trained vocabulary")]
    IncompatibleInput(String),
}
