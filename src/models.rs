use serde::{Deserialize, Serialize};

/// Number of words placed on a card (before blanking).
pub const CARD_WORDS: usize = 25;
/// Cells per row.
pub const ROW_WIDTH: usize = 5;

/// Most frequent surface form of a stem group, carrying the whole group's count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representative {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BingoCard {
    pub rows: Vec<Vec<String>>, // "" = blank square
}

impl BingoCard {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row; short trailing rows are padded to this when rendered.
    pub fn columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }

    pub fn blank_count(&self) -> usize {
        self.cells().filter(|c| c.is_empty()).count()
    }
}
