use thiserror::Error;

/// Why a fetch against a data source did not produce a value.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("data source request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("data source responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("response body is not valid JSON for this endpoint: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog file could not be read: {0}")]
    Catalog(#[from] std::io::Error),
}

impl FetchError {
    /// Coarse classification used in diagnostics: the source was unreachable
    /// or answered with something unusable.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) | FetchError::Status(_) | FetchError::Catalog(_) => {
                "transport"
            }
            FetchError::Parse(_) => "parse",
        }
    }
}
