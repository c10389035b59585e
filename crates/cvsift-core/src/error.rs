//! Error types for cvsift.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Acquisition error: {0}")]
    Acquisition(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
