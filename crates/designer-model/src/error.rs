use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesignerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid dashboard config at {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DesignerError>;
