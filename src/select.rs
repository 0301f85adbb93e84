use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::debug;

use crate::frequency::FrequencyTable;
use crate::models::Representative;

/// Highest-count representatives, at most `n`.
///
/// The sort is stable: equal counts stay in normalizer order, so the stem
/// group formed first wins a tie. That ordering is arbitrary but fixed.
pub fn top_words(reps: &[Representative], n: usize) -> Vec<String> {
    reps.iter()
        .sorted_by_key(|r| Reverse(r.count))
        .take(n)
        .map(|r| r.word.clone())
        .collect()
}

pub fn shuffle_words<R: Rng + ?Sized>(mut words: Vec<String>, rng: &mut R) -> Vec<String> {
    words.shuffle(rng);
    words
}

/// Blank out the `limit` words with the highest global frequency.
///
/// Positions are preserved; a blanked word becomes `""` everywhere it occurs.
/// Frequency ties are broken by first position. `limit == 0` returns the input
/// untouched.
pub fn replace_common_words_with_blanks(
    words: Vec<String>,
    frequencies: &FrequencyTable,
    limit: usize,
) -> Vec<String> {
    if limit == 0 {
        return words;
    }

    let blanked: HashSet<&str> = words
        .iter()
        .map(String::as_str)
        .unique()
        .sorted_by_key(|w| Reverse(frequencies.get(w)))
        .take(limit)
        .collect();

    debug!("Blanking common words - limit={}, words={:?}", limit, blanked);

    words
        .iter()
        .map(|w| {
            if blanked.contains(w.as_str()) {
                String::new()
            } else {
                w.clone()
            }
        })
        .collect()
}

/// Split into consecutive rows of `width`; the last row may be short.
pub fn arrange_into_rows<T: Clone>(items: &[T], width: usize) -> Vec<Vec<T>> {
    items.chunks(width.max(1)).map(<[T]>::to_vec).collect()
}
