use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashMap;
use tracing::debug;

use crate::models::Representative;
use crate::stopwords::StopwordSet;

/// Collapse morphological variants ("makes", "make") into one entry per stem.
///
/// Stopwords are dropped first. Each remaining token is lowercased and stemmed;
/// the most common surface form in a stem group becomes its representative and
/// takes the group's total count. Surface-form ties go to the form seen first.
/// Output keeps the order in which stem groups were first formed, which is what
/// later tie-breaking relies on.
pub fn dedupe_words_with_same_stems<S: AsRef<str>>(
    words: &[S],
    stopwords: &StopwordSet,
) -> Vec<Representative> {
    // Snowball English (Porter2); a few groups differ from classic Porter,
    // e.g. "news" stays apart from "new" and "dying" joins "die"
    let stemmer = Stemmer::create(Algorithm::English);

    let mut group_of: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<&str>> = Vec::new();
    let mut dropped = 0usize;

    for word in words {
        let word = word.as_ref();
        if stopwords.contains(word) {
            dropped += 1;
            continue;
        }
        // stemmer expects lowercase input
        let stem = stemmer.stem(&word.to_lowercase()).into_owned();
        let idx = *group_of.entry(stem).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[idx].push(word);
    }

    debug!(
        "Stem grouping - tokens={}, stopwords_dropped={}, groups={}",
        words.len(),
        dropped,
        groups.len()
    );

    groups
        .into_iter()
        .map(|forms| Representative {
            word: most_common_form(&forms).to_string(),
            count: forms.len(),
        })
        .collect()
}

fn most_common_form<'a>(forms: &[&'a str]) -> &'a str {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for &f in forms {
        match tally.iter_mut().find(|(w, _)| *w == f) {
            Some((_, n)) => *n += 1,
            None => tally.push((f, 1)),
        }
    }
    // strict > keeps the earliest form on ties
    let mut best = tally[0];
    for &(w, n) in &tally[1..] {
        if n > best.1 {
            best = (w, n);
        }
    }
    best.0
}
