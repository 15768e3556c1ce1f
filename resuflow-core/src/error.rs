use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Compression error: {0}")]
    CompressionError(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;
