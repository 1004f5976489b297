use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Certificate, Client, Identity};

use crate::args::ClientArgs;
use crate::error::{AppError, AppResult, HttpError};

/// Builds the shared client used by every worker.
///
/// # Errors
///
/// Returns an error when certificate material cannot be read or parsed, or
/// when the client itself cannot be built.
pub fn build_client(args: &ClientArgs) -> AppResult<Client> {
    let mut client_builder = Client::builder();

    if !args.timeout.is_zero() {
        client_builder = client_builder.timeout(args.timeout);
    }

    if args.disable_keepalive {
        client_builder = client_builder
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Some(Duration::from_secs(0)));
    }

    if let Some(path) = args.cacert.as_ref() {
        let path = PathBuf::from(path);
        let bytes = std::fs::read(&path).map_err(|err| {
            AppError::http(HttpError::ReadCacert {
                path: path.clone(),
                source: err,
            })
        })?;
        let cert = Certificate::from_pem(&bytes)
            .map_err(|err| AppError::http(HttpError::InvalidCacert { path, source: err }))?;
        client_builder = client_builder.add_root_certificate(cert);
    }

    if let Some(identity) = load_identity(args.client_cert.as_deref(), args.client_key.as_deref())? {
        client_builder = client_builder.identity(identity);
    }

    if args.insecure {
        client_builder = client_builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    client_builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

fn load_identity(cert: Option<&str>, key: Option<&str>) -> AppResult<Option<Identity>> {
    let (cert_path, key_path) = match (cert, key) {
        (None, None) => return Ok(None),
        (Some(_), None) => return Err(AppError::http(HttpError::MissingClientKey)),
        (None, Some(_)) => return Err(AppError::http(HttpError::MissingClientCert)),
        (Some(cert), Some(key)) => (Path::new(cert), Path::new(key)),
    };

    let cert_bytes = std::fs::read(cert_path).map_err(|err| {
        AppError::http(HttpError::ReadCert {
            path: cert_path.to_path_buf(),
            source: err,
        })
    })?;
    let key_bytes = std::fs::read(key_path).map_err(|err| {
        AppError::http(HttpError::ReadKey {
            path: key_path.to_path_buf(),
            source: err,
        })
    })?;
    let identity = Identity::from_pkcs8_pem(&cert_bytes, &key_bytes)
        .map_err(|err| AppError::http(HttpError::InvalidIdentity { source: err }))?;
    Ok(Some(identity))
}
