//! Data loading error types.

use std::path::PathBuf;

/// Errors that can occur while loading a map data layer.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Failed to open or read the file.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed while streaming lines from an already open reader.
    #[error("failed to read data: {0}")]
    Io(#[from] std::io::Error),

    /// The cities table has no header row.
    #[error("cities table is empty")]
    MissingHeader,

    /// The cities header lacks a required column.
    #[error("cities header has no `{0}` column")]
    MissingColumn(&'static str),
}
