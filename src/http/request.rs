use std::path::{Path, PathBuf};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Body, Method, Request, Url};

use crate::args::ClientArgs;
use crate::error::{AppError, AppResult, DispatchError, HttpError};

/// Where the request body comes from on each attempt.
#[derive(Debug, Clone)]
pub enum BodySource {
    /// The same bytes for every attempt.
    Bytes(Bytes),
    /// A file that is opened and read afresh for every attempt.
    File(PathBuf),
}

impl BodySource {
    /// Produces the body for one attempt.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing file cannot be read.
    pub async fn open(&self) -> Result<Bytes, DispatchError> {
        match self {
            BodySource::Bytes(bytes) => Ok(bytes.clone()),
            BodySource::File(path) => tokio::fs::read(path)
                .await
                .map(Bytes::from)
                .map_err(|err| DispatchError::BodySource {
                    path: path.clone(),
                    source: err,
                }),
        }
    }
}

/// Immutable description of the request every worker repeats.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    target: Url,
    headers: HeaderMap,
    body: Option<BodySource>,
}

impl RequestSpec {
    #[must_use]
    pub fn new(method: Method, target: Url) -> Self {
        Self {
            method,
            target,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Appends a header; repeated names keep every value in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error when the name or value is not valid HTTP.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, HttpError> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|_err| HttpError::InvalidHeaderName {
                name: name.to_owned(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_err| HttpError::InvalidHeaderValue {
                name: name.to_owned(),
            })?;
        self.headers.append(header_name, header_value);
        Ok(self)
    }

    #[must_use]
    pub fn with_body(mut self, body: BodySource) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub const fn target(&self) -> &Url {
        &self.target
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub const fn body(&self) -> Option<&BodySource> {
        self.body.as_ref()
    }

    /// Materializes a fresh request for one attempt.
    pub(crate) async fn to_request(&self) -> Result<Request, DispatchError> {
        let mut request = Request::new(self.method.clone(), self.target.clone());
        *request.headers_mut() = self.headers.clone();
        if let Some(body) = self.body.as_ref() {
            let bytes = body.open().await?;
            *request.body_mut() = Some(Body::from(bytes));
        }
        Ok(request)
    }
}

/// Validates the arguments and builds the request spec for a run.
///
/// # Errors
///
/// Returns an error for a missing or invalid URL, an invalid method or
/// header, or a body file that cannot be opened.
pub fn build_request_spec(args: &ClientArgs) -> AppResult<RequestSpec> {
    let raw_url = args
        .url
        .as_deref()
        .ok_or_else(|| AppError::http(HttpError::MissingUrl))?;
    let target = Url::parse(raw_url).map_err(|err| {
        AppError::http(HttpError::InvalidUrl {
            url: raw_url.to_owned(),
            source: err,
        })
    })?;
    if !matches!(target.scheme(), "http" | "https") {
        return Err(AppError::http(HttpError::UnsupportedScheme {
            scheme: target.scheme().to_owned(),
        }));
    }

    let method_name = args.method.trim().to_ascii_uppercase();
    let method = Method::from_bytes(method_name.as_bytes()).map_err(|_err| {
        AppError::http(HttpError::InvalidMethod {
            method: args.method.clone(),
        })
    })?;

    let mut spec = RequestSpec::new(method, target);
    for (name, value) in &args.headers {
        spec = spec.with_header(name, value)?;
    }

    if let Some(path) = args.data_file.as_deref() {
        let path = Path::new(path);
        ensure_readable(path)?;
        spec = spec.with_body(BodySource::File(path.to_path_buf()));
    } else if let Some(data) = args.data.as_ref() {
        spec = spec.with_body(BodySource::Bytes(Bytes::from(data.clone())));
    }

    Ok(spec)
}

fn ensure_readable(path: &Path) -> AppResult<()> {
    std::fs::File::open(path).map(drop).map_err(|err| {
        AppError::http(HttpError::ReadBodyFile {
            path: path.to_path_buf(),
            source: err,
        })
    })
}
