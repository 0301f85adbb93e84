//! Stopword set used to drop filler words before counting.
//!
//! Built once per run and handed to the normalizer by reference.

use std::collections::HashSet;

/// Standard English stopword list (NLTK corpus, 179 entries).
const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Filler tokens that show up in transcripts. The empty string catches tokens
/// that were pure punctuation before extraction stripped them.
const TRANSCRIPT_FILLER: &[&str] = &["", "v", "was", "us", "this", "said"];

#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>, // lowercase
}

impl StopwordSet {
    pub fn english() -> Self {
        Self::from_list(ENGLISH.iter().chain(TRANSCRIPT_FILLER))
    }

    pub fn from_list<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// Case-insensitive membership.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::english()
    }
}
