use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChecklistError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid story document: {0}")]
    InvalidStory(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChecklistError>;
