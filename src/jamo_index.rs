//! Hangul-jamo search variant: a word-level index (not token-ID based)
//! used to rank Korean queries by [`crate::distance::jamo_levenshtein`].
//!
//! Character-level postings for non-Korean characters, and separate
//! per-jamo-position postings (initial/medial/final) for Korean
//! characters.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::distance::jamo_levenshtein;
use crate::hangul::{character_is_korean, decompose};
use crate::search::Hit;

/// Contribution of a single matched cho/jung/jong posting to a jamo search
/// score.
const JAMO_SCORE: f64 = 1.0 / 3.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JamoIndex {
    words: Vec<String>,
    char_index: HashMap<char, Vec<u32>>,
    cho_index: HashMap<char, Vec<u32>>,
    jung_index: HashMap<char, Vec<u32>>,
    jong_index: HashMap<char, Vec<u32>>,
}

impl JamoIndex {
    /// Builds an index over `words`, deduplicating postings per word and
    /// keeping them sorted ascending.
    pub fn build(words: &[String]) -> Self {
        let mut char_index: HashMap<char, HashSet<u32>> = HashMap::new();
        let mut cho_index: HashMap<char, HashSet<u32>> = HashMap::new();
        let mut jung_index: HashMap<char, HashSet<u32>> = HashMap::new();
        let mut jong_index: HashMap<char, HashSet<u32>> = HashMap::new();

        for (idx, word) in words.iter().enumerate() {
            let idx = idx as u32;
            for c in word.chars() {
                char_index.entry(c).or_default().insert(idx);
                if !character_is_korean(c) {
                    continue;
                }
                let (cho, jung, jong) = decompose(c).expect("character_is_korean guarantees decompose");
                cho_index.entry(cho).or_default().insert(idx);
                jung_index.entry(jung).or_default().insert(idx);
                if jong != '\0' {
                    jong_index.entry(jong).or_default().insert(idx);
                }
            }
        }

        let freeze = |m: HashMap<char, HashSet<u32>>| -> HashMap<char, Vec<u32>> {
            m.into_iter()
                .map(|(k, v)| {
                    let mut v: Vec<u32> = v.into_iter().collect();
                    v.sort_unstable();
                    (k, v)
                })
                .collect()
        };

        Self {
            words: words.to_vec(),
            char_index: freeze(char_index),
            cho_index: freeze(cho_index),
            jung_index: freeze(jung_index),
            jong_index: freeze(jong_index),
        }
    }

    /// Plain character-level Levenshtein search (no jamo weighting).
    pub fn search(&self, word: &str, max_distance: u32) -> Vec<Hit> {
        let chars: Vec<char> = word.chars().collect();
        let unique: HashSet<char> = chars.iter().copied().collect();
        let n = chars.len() as i64;
        let u = unique.len() as i64;
        let k = max_distance as i64;

        let mut counts: HashMap<u32, u32> = HashMap::new();
        for c in &unique {
            if let Some(postings) = self.char_index.get(c) {
                for &idx in postings {
                    *counts.entry(idx).or_insert(0) += 1;
                }
            }
        }

        let mut hits: Vec<Hit> = Vec::new();
        for (idx, count) in counts {
            let entry_len = self.words[idx as usize].chars().count() as i64;
            if (entry_len - n).abs() > k || (count as i64 - u).abs() > k {
                continue;
            }
            let distance = crate::distance::levenshtein(
                &self.words[idx as usize].chars().collect::<Vec<_>>(),
                &chars,
            );
            if distance <= max_distance {
                hits.push(Hit {
                    idx,
                    data: self.words[idx as usize].clone(),
                    distance,
                });
            }
        }
        hits.sort_unstable_by_key(|h| (h.distance, h.idx));
        hits
    }

    /// Jamo-weighted search: Korean query characters contribute `1/3` per
    /// matched jamo-position posting instead of 1 per whole-character
    /// posting; results are scored and ordered by
    /// [`jamo_levenshtein`] rather than the plain kernel.
    pub fn search_jamo(&self, word: &str, max_distance: f64) -> Vec<JamoHit> {
        let chars: Vec<char> = word.chars().collect();
        let unique: HashSet<char> = chars.iter().copied().collect();
        let n = chars.len() as f64;

        let mut counts: HashMap<u32, f64> = HashMap::new();
        for &c in &unique {
            if !character_is_korean(c) {
                if let Some(postings) = self.char_index.get(&c) {
                    for &idx in postings {
                        *counts.entry(idx).or_insert(0.0) += 1.0;
                    }
                }
                continue;
            }
            let (cho, jung, jong) = decompose(c).expect("character_is_korean guarantees decompose");
            for (table, key) in [
                (&self.cho_index, cho),
                (&self.jung_index, jung),
                (&self.jong_index, jong),
            ] {
                if key == '\0' {
                    continue;
                }
                if let Some(postings) = table.get(&key) {
                    for &idx in postings {
                        *counts.entry(idx).or_insert(0.0) += JAMO_SCORE;
                    }
                }
            }
        }
        let unique_n = unique.len() as f64;

        let mut hits: Vec<JamoHit> = Vec::new();
        for (idx, count) in counts {
            let entry_len = self.words[idx as usize].chars().count() as f64;
            if (entry_len - n).abs() > max_distance || (count - unique_n).abs() > max_distance {
                continue;
            }
            let distance = jamo_levenshtein(&self.words[idx as usize], word);
            if distance <= max_distance {
                hits.push(JamoHit {
                    idx,
                    data: self.words[idx as usize].clone(),
                    distance,
                });
            }
        }
        hits.sort_unstable_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.idx.cmp(&b.idx))
        });
        hits
    }
}

/// A jamo-search hit. Distance is a fractional score, so it is reported
/// separately from the integer-distance [`Hit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JamoHit {
    pub idx: u32,
    pub data: String,
    pub distance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jamo_search_ranks_closer_syllable_first() {
        let words = vec!["가방".to_string(), "강산".to_string()];
        let index = JamoIndex::build(&words);
        let hits = index.search_jamo("가상", 1.0);
        assert_eq!(hits.len(), 2);
        // "가방" differs only in the second syllable's jamo; "강산" differs
        // more (extra final consonant plus a differing syllable), so
        // "가방" should rank first.
        assert_eq!(hits[0].data, "가방");
    }

    #[test]
    fn plain_search_finds_substitution() {
        let words = vec!["abcd".to_string(), "xyz".to_string()];
        let index = JamoIndex::build(&words);
        let hits = index.search("abce", 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].data, "abcd");
    }
}
