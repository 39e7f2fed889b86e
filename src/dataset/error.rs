//! @ai:module:intent Define error types for dataset and prediction loading
//! @ai:module:layer domain
//! @ai:module:public_api DatasetError, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Error raised while reading a gold or prediction JSONL file
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON at {path}:{line}: {source}")]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Line {line} of {path} is not a JSON object")]
    NotAnObject { path: PathBuf, line: usize },

    #[error("Record at {path}:{line} is missing required field `{field}`")]
    MissingField {
        path: PathBuf,
        line: usize,
        field: &'static str,
    },

    #[error("Record `{id}` at {path}:{line} has neither error_sentence nor correct_sentence")]
    MissingSentence {
        path: PathBuf,
        line: usize,
        id: String,
    },

    #[error("Failed to write predictions: {0}")]
    Write(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
