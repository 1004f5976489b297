use super::*;
use crate::args::ClientArgs;
use crate::error::{AppError, DispatchError, HttpError};
use clap::Parser;
use reqwest::Method;
use std::future::Future;
use std::io::Write;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn args_from(argv: &[&str]) -> Result<ClientArgs, String> {
    let mut full = vec!["httpt"];
    full.extend_from_slice(argv);
    ClientArgs::try_parse_from(full).map_err(|err| err.to_string())
}

fn expect_http_error(
    result: Result<RequestSpec, AppError>,
    check: fn(&HttpError) -> bool,
) -> Result<(), String> {
    match result {
        Err(AppError::Http(err)) if check(&err) => Ok(()),
        Err(other) => Err(format!("Unexpected error: {}", other)),
        Ok(spec) => Err(format!("Expected failure, got {:?}", spec)),
    }
}

fn body_bytes(request: &reqwest::Request) -> Option<Vec<u8>> {
    request
        .body()
        .and_then(reqwest::Body::as_bytes)
        .map(<[u8]>::to_vec)
}

#[test]
fn build_request_spec_requires_url() -> Result<(), String> {
    let args = args_from(&[])?;
    expect_http_error(build_request_spec(&args), |err| {
        matches!(err, HttpError::MissingUrl)
    })
}

#[test]
fn build_request_spec_rejects_invalid_url() -> Result<(), String> {
    let args = args_from(&["not a url"])?;
    expect_http_error(build_request_spec(&args), |err| {
        matches!(err, HttpError::InvalidUrl { .. })
    })
}

#[test]
fn build_request_spec_rejects_non_http_scheme() -> Result<(), String> {
    let args = args_from(&["ftp://example.com/file"])?;
    expect_http_error(build_request_spec(&args), |err| {
        matches!(err, HttpError::UnsupportedScheme { scheme } if scheme == "ftp")
    })
}

#[test]
fn build_request_spec_rejects_invalid_method() -> Result<(), String> {
    let args = args_from(&["http://localhost/", "--method", "GE T"])?;
    expect_http_error(build_request_spec(&args), |err| {
        matches!(err, HttpError::InvalidMethod { .. })
    })
}

#[test]
fn build_request_spec_rejects_invalid_header_name() -> Result<(), String> {
    let args = args_from(&["http://localhost/", "-H", "Bad Name: value"])?;
    expect_http_error(build_request_spec(&args), |err| {
        matches!(err, HttpError::InvalidHeaderName { name } if name == "Bad Name")
    })
}

#[test]
fn build_request_spec_rejects_missing_body_file() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let missing = dir.path().join("nope.bin");
    let missing = missing.to_string_lossy().into_owned();
    let args = args_from(&["http://localhost/", "--data-file", &missing])?;
    expect_http_error(build_request_spec(&args), |err| {
        matches!(err, HttpError::ReadBodyFile { .. })
    })
}

#[test]
fn build_request_spec_normalizes_method_and_keeps_duplicates() -> Result<(), String> {
    let args = args_from(&[
        "http://localhost:8080/path?q=1",
        "--method",
        "post",
        "-H",
        "X-Tag: one",
        "-H",
        "X-Tag: two",
        "-H",
        "Accept=text/plain",
    ])?;
    let spec = build_request_spec(&args).map_err(|err| err.to_string())?;

    if spec.method() != Method::POST {
        return Err(format!("Unexpected method: {}", spec.method()));
    }
    if spec.target().as_str() != "http://localhost:8080/path?q=1" {
        return Err(format!("Unexpected target: {}", spec.target()));
    }
    let tags: Vec<&str> = spec
        .headers()
        .get_all("x-tag")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    if tags != ["one", "two"] {
        return Err(format!("Unexpected duplicate headers: {:?}", tags));
    }
    if spec.headers().get("accept").and_then(|v| v.to_str().ok()) != Some("text/plain") {
        return Err("Missing accept header".to_owned());
    }
    if spec.body().is_some() {
        return Err("Expected no body".to_owned());
    }
    Ok(())
}

#[test]
fn inline_body_is_sent_unchanged() -> Result<(), String> {
    run_async_test(async {
        let args = args_from(&["http://localhost/", "-X", "PUT", "-d", "{\"a\":1}"])?;
        let spec = build_request_spec(&args).map_err(|err| err.to_string())?;
        let request = spec.to_request().await.map_err(|err| err.to_string())?;

        if request.method() != Method::PUT {
            return Err("Unexpected method".to_owned());
        }
        if body_bytes(&request).as_deref() != Some(b"{\"a\":1}".as_slice()) {
            return Err("Unexpected body".to_owned());
        }
        Ok(())
    })
}

#[test]
fn body_file_is_read_on_every_attempt() -> Result<(), String> {
    run_async_test(async {
        let mut file = tempfile::NamedTempFile::new().map_err(|err| err.to_string())?;
        file.write_all(b"first").map_err(|err| err.to_string())?;
        let path = file.path().to_string_lossy().into_owned();

        let args = args_from(&["http://localhost/", "--data-file", &path])?;
        let spec = build_request_spec(&args).map_err(|err| err.to_string())?;
        let first = spec.to_request().await.map_err(|err| err.to_string())?;
        if body_bytes(&first).as_deref() != Some(b"first".as_slice()) {
            return Err("Unexpected first body".to_owned());
        }

        std::fs::write(file.path(), b"second").map_err(|err| err.to_string())?;
        let second = spec.to_request().await.map_err(|err| err.to_string())?;
        if body_bytes(&second).as_deref() != Some(b"second".as_slice()) {
            return Err("Body file was not reread".to_owned());
        }
        Ok(())
    })
}

#[test]
fn vanished_body_file_becomes_request_error() -> Result<(), String> {
    run_async_test(async {
        let file = tempfile::NamedTempFile::new().map_err(|err| err.to_string())?;
        let path = file.path().to_string_lossy().into_owned();
        let args = args_from(&["http://localhost/", "--data-file", &path])?;
        let spec = build_request_spec(&args).map_err(|err| err.to_string())?;
        file.close().map_err(|err| err.to_string())?;

        let client = reqwest::Client::new();
        let outcome = HttpDispatcher::new(client).dispatch(&spec).await;
        match outcome {
            Outcome::RequestError {
                cause: DispatchError::BodySource { .. },
            } => Ok(()),
            other => Err(format!("Unexpected outcome: {:?}", other)),
        }
    })
}

#[test]
fn build_client_requires_key_with_cert() -> Result<(), String> {
    let args = args_from(&["http://localhost/", "--client-cert", "cert.pem"])?;
    match build_client(&args) {
        Err(AppError::Http(HttpError::MissingClientKey)) => Ok(()),
        Err(other) => Err(format!("Unexpected error: {}", other)),
        Ok(_) => Err("Expected missing key error".to_owned()),
    }
}

#[test]
fn build_client_requires_cert_with_key() -> Result<(), String> {
    let args = args_from(&["http://localhost/", "--client-key", "key.pem"])?;
    match build_client(&args) {
        Err(AppError::Http(HttpError::MissingClientCert)) => Ok(()),
        Err(other) => Err(format!("Unexpected error: {}", other)),
        Ok(_) => Err("Expected missing cert error".to_owned()),
    }
}

#[test]
fn build_client_reports_unreadable_cacert() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let missing = dir.path().join("ca.pem").to_string_lossy().into_owned();
    let args = args_from(&["http://localhost/", "--cacert", &missing])?;
    match build_client(&args) {
        Err(AppError::Http(HttpError::ReadCacert { .. })) => Ok(()),
        Err(other) => Err(format!("Unexpected error: {}", other)),
        Ok(_) => Err("Expected cacert error".to_owned()),
    }
}

#[test]
fn build_client_accepts_plain_options() -> Result<(), String> {
    let args = args_from(&[
        "http://localhost/",
        "--insecure",
        "--disable-keepalive",
        "--timeout",
        "2s",
    ])?;
    build_client(&args).map(drop).map_err(|err| err.to_string())
}

#[test]
fn outcome_category_and_status() -> Result<(), String> {
    let read_error = Outcome::ReadError {
        status: 502,
        headers: reqwest::header::HeaderMap::new(),
        cause: DispatchError::BodySource {
            path: "x".into(),
            source: std::io::Error::other("gone"),
        },
    };
    if read_error.category() != crate::stats::Category::ReadError {
        return Err("Unexpected category".to_owned());
    }
    if read_error.status() != Some(502) {
        return Err("Unexpected status".to_owned());
    }
    Ok(())
}
