//! Error types shared by the catalog builder, dataset loader and widget.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickerError {
    /// A category present in the dataset has no priority.
    #[error("category `{category}` has no entry in the section order table")]
    Configuration { category: String },

    #[error("emoji record #{index} is missing required attribute `{attribute}`")]
    InvalidRecord { index: usize, attribute: &'static str },

    /// Never produced by the query engine: queries are matched as literal
    /// substrings, so no input string can fail to compile.
    #[error("malformed query: {0}")]
    Query(String),

    #[error("unknown emoji provider: {0}")]
    UnknownProvider(String),

    #[error("no picker with id {0}")]
    UnknownPicker(usize),

    #[error("no catalog entry with id {0}")]
    UnknownEntry(usize),

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PickerError>;
