use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{BingoError, Result};

/// Global corpus counts ("word count" per line), used to spot words too
/// generic to be worth a square.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    pub fn load(path: &Path) -> Result<Self> {
        let start = std::time::Instant::now();
        let file = File::open(path).map_err(|e| BingoError::data_file(path, e.to_string()))?;
        let table = Self::from_reader(BufReader::new(file), path)?;
        info!(
            "Frequency table loaded - path={}, words={}, duration={:.2}s",
            path.display(),
            table.len(),
            start.elapsed().as_secs_f32()
        );
        Ok(table)
    }

    /// Parse any buffered source; `origin` only labels errors and logs.
    pub fn from_reader<R: BufRead>(reader: R, origin: &Path) -> Result<Self> {
        let mut counts = HashMap::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| BingoError::data_file(origin, e.to_string()))?;
            let mut fields = line.split_whitespace();
            let (word, count) = match (fields.next(), fields.next(), fields.next()) {
                (None, _, _) => continue,
                (Some(w), Some(c), None) => (w, c),
                _ => {
                    return Err(BingoError::data_file(
                        origin,
                        format!("line {}: expected `word count`, got {:?}", i + 1, line),
                    ))
                }
            };
            let count: u64 = count.parse().map_err(|_| {
                BingoError::data_file(
                    origin,
                    format!("line {}: count {:?} is not a non-negative integer", i + 1, count),
                )
            })?;
            counts.insert(word.to_string(), count);
        }
        debug!("Parsed frequency table - origin={}, words={}", origin.display(), counts.len());
        Ok(Self { counts })
    }

    /// Exact-match lookup; unknown words count as 0.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }
}
