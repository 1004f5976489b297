use std::path::PathBuf;

use thiserror::Error;

/// Per-attempt failure carried inside an outcome. Never fatal to a run.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("cannot open body '{path}': {source}")]
    BodySource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("response body read failed: {source}")]
    Body {
        #[source]
        source: reqwest::Error,
    },
}

impl DispatchError {
    /// Whether the underlying transport gave up because of the client timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport { source } | Self::Body { source } => source.is_timeout(),
            Self::BodySource { .. } => false,
        }
    }
}
