//! Candidate filter + searcher: prunes the corpus to a small superset with
//! an inverted-index token-overlap filter, then runs the exact Levenshtein
//! kernel only on survivors.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::distance::levenshtein;
use crate::index::Index;
use crate::tokenizer::Tokenizer;

/// A single search result: the corpus position, the original string, and
/// its edit distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub idx: u32,
    pub data: String,
    pub distance: u32,
}

/// Candidate counts from the two pruning stages, reported only on the
/// verbose diagnostic channel (spec §6): how many entries shared at least
/// one token with the query (the "1st candidates"), and how many of those
/// survived the length/unique-token prune before the Levenshtein kernel ran.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub first_candidates: usize,
    pub filtered_candidates: usize,
}

/// Runs the full length-prune / unique-token-prune / Levenshtein-confirm
/// pipeline against `index` using `tokenizer` to encode the query. Returns
/// hits sorted ascending by `(distance, idx)`.
pub fn search<T: Tokenizer>(
    index: &Index,
    tokenizer: &T,
    query: &str,
    max_distance: u32,
    pretokenized: bool,
) -> Vec<Hit> {
    search_with_stats(index, tokenizer, query, max_distance, pretokenized).0
}

/// Same as [`search`], but also returns the candidate counts at each prune
/// stage for the verbose diagnostic channel.
pub fn search_with_stats<T: Tokenizer>(
    index: &Index,
    tokenizer: &T,
    query: &str,
    max_distance: u32,
    pretokenized: bool,
) -> (Vec<Hit>, SearchStats) {
    let query_tokens: Vec<String> = if pretokenized {
        query.split_whitespace().map(String::from).collect()
    } else {
        tokenizer.tokenize(query)
    };
    let query_ids = tokenizer.convert_tokens_to_ids(&query_tokens);
    search_ids_with_stats(index, &query_ids, max_distance)
}

/// Same as [`search`], but takes an already-encoded query token-ID
/// sequence. Exposed separately so tests (and the brute-force equivalence
/// check) can drive the filter directly without a tokenizer in hand.
pub fn search_ids(index: &Index, query_ids: &[u32], max_distance: u32) -> Vec<Hit> {
    search_ids_with_stats(index, query_ids, max_distance).0
}

/// Same as [`search_ids`], but also returns [`SearchStats`].
pub fn search_ids_with_stats(
    index: &Index,
    query_ids: &[u32],
    max_distance: u32,
) -> (Vec<Hit>, SearchStats) {
    let n = query_ids.len() as i64;
    let unique_query: HashSet<u32> = query_ids.iter().copied().collect();
    let u = unique_query.len() as i64;
    let k = max_distance as i64;

    // An empty query has no tokens to post against, so the inverted-index
    // filter below would never produce a candidate. Survivors are exactly
    // the entries of length <= k, each at a distance equal to its own
    // length.
    if query_ids.is_empty() {
        let mut hits: Vec<Hit> = index
            .lengths
            .iter()
            .enumerate()
            .filter(|(_, &len)| len as i64 <= k)
            .map(|(idx, &len)| Hit {
                idx: idx as u32,
                data: index.data[idx].clone(),
                distance: len,
            })
            .collect();
        hits.sort_unstable_by_key(|h| (h.distance, h.idx));
        let stats = SearchStats {
            first_candidates: 0,
            filtered_candidates: hits.len(),
        };
        return (hits, stats);
    }

    let mut counts: HashMap<u32, u32> = HashMap::new();
    for &token in &unique_query {
        let Some(postings) = index.postings.get(token as usize) else {
            continue;
        };
        for &entry in postings {
            *counts.entry(entry).or_insert(0) += 1;
        }
    }
    let first_candidates = counts.len();

    let mut hits: Vec<Hit> = Vec::new();
    let mut filtered_candidates = 0;
    for (entry, count) in counts {
        let entry_len = index.lengths[entry as usize] as i64;
        if (entry_len - n).abs() > k {
            continue;
        }
        if (count as i64 - u).abs() > k {
            continue;
        }
        filtered_candidates += 1;
        let distance = levenshtein(&index.token_ids[entry as usize], query_ids);
        if distance <= max_distance {
            hits.push(Hit {
                idx: entry,
                data: index.data[entry as usize].clone(),
                distance,
            });
        }
    }

    hits.sort_unstable_by_key(|h| (h.distance, h.idx));
    (
        hits,
        SearchStats {
            first_candidates,
            filtered_candidates,
        },
    )
}

/// Exhaustive brute-force search used to check the pruned filter's
/// result set for equivalence in tests: `O(N)` distance computations, no
/// inverted-index pruning at all.
#[cfg(test)]
pub(crate) fn brute_force_ids(index: &Index, query_ids: &[u32], max_distance: u32) -> Vec<Hit> {
    let mut hits: Vec<Hit> = index
        .token_ids
        .iter()
        .enumerate()
        .filter_map(|(idx, ids)| {
            let distance = levenshtein(ids, query_ids);
            (distance <= max_distance).then(|| Hit {
                idx: idx as u32,
                data: index.data[idx].clone(),
                distance,
            })
        })
        .collect();
    hits.sort_unstable_by_key(|h| (h.distance, h.idx));
    hits
}
