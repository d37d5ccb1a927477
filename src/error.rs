use std::path::PathBuf;

/// Errors raised while building label sets, loading files or validating config.
///
/// Frame updates never fail; everything here happens before the engine runs.
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    #[error("label must not be empty")]
    EmptyLabel,

    #[error("duplicate label: {0}")]
    DuplicateLabel(String),

    #[error("invalid weight {weight} for label {label:?} (must be finite and >= 0)")]
    InvalidWeight { label: String, weight: f32 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid site url: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;
