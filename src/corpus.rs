//! Corpus file reading: the one I/O path the core owns directly, kept
//! intentionally thin. Reading a corpus file is a convenience on top of
//! the in-memory `Corpus::Strings` path, not part of the search contract.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::FinderError;

/// Reads a plain UTF-8 text file, one entry per line, trailing whitespace
/// stripped. Blank lines are retained as empty entries.
pub fn read_lines(path: &Path) -> Result<Vec<String>, FinderError> {
    let file = File::open(path).map_err(FinderError::InvalidCorpusFile)?;
    let reader = BufReader::new(file);
    reader
        .lines()
        .map(|line| {
            let line = line.map_err(FinderError::InvalidCorpusFile)?;
            Ok(line.trim_end().to_string())
        })
        .collect()
}

/// Either an in-memory list of strings, or a corpus file to be read with
/// [`read_lines`].
pub enum Corpus {
    Strings(Vec<String>),
    File(std::path::PathBuf),
}

impl Corpus {
    pub fn into_strings(self) -> Result<Vec<String>, FinderError> {
        match self {
            Corpus::Strings(strings) => Ok(strings),
            Corpus::File(path) => read_lines(&path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_lines_and_strips_trailing_whitespace_keeping_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hello  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "world").unwrap();
        let lines = read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["hello", "", "world"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = read_lines(Path::new("/nonexistent/path/to/corpus.txt"));
        assert!(result.is_err());
    }
}
