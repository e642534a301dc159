use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoverageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to open source {path}: {source}", path = path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read source {path}: {source}", path = path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create output directory: {0}")]
    OutputDirCreation(std::io::Error),
    #[error("failed to write output file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read analysis file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize analysis: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize analysis: {0}")]
    Deserialization(serde_json::Error),
}

pub type CoverageResult<T> = std::result::Result<T, CoverageError>;
