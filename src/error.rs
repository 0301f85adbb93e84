// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BingoError>;

#[derive(Error, Debug)]
pub enum BingoError {
    /// Network failure or timeout while downloading the sermon
    #[error("Request failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered, but not with a success status
    #[error("HTTP {status} for {url}")]
    FetchStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Missing or malformed common-word frequency table
    #[error("Frequency table {}: {reason}", path.display())]
    DataFile { path: PathBuf, reason: String },

    /// No paragraph text survived extraction and filtering
    #[error("No candidate words found in document (no <p> text after filtering)")]
    EmptyDocument,

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BingoError {
    pub fn data_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        BingoError::DataFile {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<printpdf::Error> for BingoError {
    fn from(e: printpdf::Error) -> Self {
        BingoError::Render(e.to_string())
    }
}
