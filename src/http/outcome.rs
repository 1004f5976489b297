use bytes::Bytes;
use reqwest::header::HeaderMap;

use crate::error::DispatchError;
use crate::stats::Category;

/// What happened to one attempt. Exactly one variant per attempt.
#[derive(Debug)]
pub enum Outcome {
    /// Status line, headers and the whole body were received.
    Success {
        status: u16,
        headers: HeaderMap,
        body: Bytes,
    },
    /// No response was obtained.
    RequestError { cause: DispatchError },
    /// A response arrived but its body could not be read to the end.
    ReadError {
        status: u16,
        headers: HeaderMap,
        cause: DispatchError,
    },
}

impl Outcome {
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Outcome::Success { .. } => Category::Success,
            Outcome::RequestError { .. } => Category::RequestError,
            Outcome::ReadError { .. } => Category::ReadError,
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Outcome::Success { status, .. } | Outcome::ReadError { status, .. } => Some(*status),
            Outcome::RequestError { .. } => None,
        }
    }
}
