use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use reqwest::{Client, Response};

use crate::error::DispatchError;

use super::outcome::Outcome;
use super::request::RequestSpec;

/// Upper bound on the body buffer reserved up front from `Content-Length`.
const MAX_BODY_PREALLOC: usize = 1_048_576;

/// Executes one round trip for a request spec.
///
/// Implementations never fail: every problem is folded into the returned
/// [`Outcome`].
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(&self, spec: &RequestSpec) -> Outcome;
}

/// Dispatcher backed by a shared `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: Client,
}

impl HttpDispatcher {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Dispatch for HttpDispatcher {
    async fn dispatch(&self, spec: &RequestSpec) -> Outcome {
        let request = match spec.to_request().await {
            Ok(request) => request,
            Err(cause) => return Outcome::RequestError { cause },
        };

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                return Outcome::RequestError {
                    cause: DispatchError::Transport { source: err },
                };
            }
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        match read_body(response).await {
            Ok(body) => Outcome::Success {
                status,
                headers,
                body,
            },
            Err(err) => Outcome::ReadError {
                status,
                headers,
                cause: DispatchError::Body { source: err },
            },
        }
    }
}

// Draining to the end lets the connection go back to the pool.
async fn read_body(response: Response) -> Result<Bytes, reqwest::Error> {
    let capacity = response
        .content_length()
        .and_then(|len| usize::try_from(len).ok())
        .unwrap_or_default()
        .min(MAX_BODY_PREALLOC);
    let mut body = BytesMut::with_capacity(capacity);
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok(body.freeze())
}
