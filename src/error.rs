use std::io;
use std::path::PathBuf;

/// Errors produced while inspecting a buildpackage archive.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("failed to open buildpackage {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to fetch archived file {0}")]
    NotFound(String),

    #[error("index.json lists no manifests")]
    EmptyIndex,

    #[error("failed to decode {file}: {source}")]
    Json {
        file: String,
        source: serde_json::Error,
    },

    #[error("failed to read buildpack gzip for layer {digest}: {source}")]
    Gzip { digest: String, source: io::Error },

    #[error("failed to decode buildpack.toml in layer {digest}: {source}")]
    Toml {
        digest: String,
        source: toml::de::Error,
    },
}

impl InspectError {
    /// True when a requested file was absent from a tar stream.
    pub fn is_not_found(&self) -> bool {
        matches!(self, InspectError::NotFound(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InspectError>;
