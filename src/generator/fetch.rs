//! Fetching of template and signature resources.
//!
//! A resource reference is one of three shapes: a `data:` URI carrying a
//! base64 payload (the form a drawing pad exports), an `http(s)://` URL,
//! or a filesystem path. The caller decides what a failure means; this
//! module only resolves bytes.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

/// Errors raised while resolving a resource reference.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request for '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("data URI is malformed or not base64-encoded")]
    MalformedDataUri,
    #[error("failed to decode base64 payload: {0}")]
    Base64(#[source] base64::DecodeError),
}

/// Resolve a resource reference to its bytes.
pub async fn fetch_resource(reference: &str) -> Result<Vec<u8>, FetchError> {
    if let Some(rest) = reference.strip_prefix("data:") {
        return decode_data_uri(rest);
    }

    if reference.starts_with("http://") || reference.starts_with("https://") {
        return fetch_url(reference).await;
    }

    tokio::fs::read(reference)
        .await
        .map_err(|source| FetchError::Io {
            path: reference.to_string(),
            source,
        })
}

/// Decode the payload of a `data:` URI (the part after the scheme).
fn decode_data_uri(rest: &str) -> Result<Vec<u8>, FetchError> {
    let (media_type, payload) = rest.split_once(',').ok_or(FetchError::MalformedDataUri)?;
    if !media_type.ends_with(";base64") {
        return Err(FetchError::MalformedDataUri);
    }
    BASE64.decode(payload.as_bytes()).map_err(FetchError::Base64)
}

async fn fetch_url(url: &str) -> Result<Vec<u8>, FetchError> {
    let wrap = |source: reqwest::Error| FetchError::Http {
        url: url.to_string(),
        source,
    };

    let response = reqwest::get(url).await.map_err(wrap)?;
    let response = response.error_for_status().map_err(wrap)?;
    let bytes = response.bytes().await.map_err(wrap)?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_data_uri_round_trip() {
        let payload = BASE64.encode(b"signature bytes");
        let reference = format!("data:image/png;base64,{}", payload);
        let bytes = fetch_resource(&reference).await.unwrap();
        assert_eq!(bytes, b"signature bytes");
    }

    #[tokio::test]
    async fn test_data_uri_without_base64_marker_is_rejected() {
        let result = fetch_resource("data:image/png,rawpayload").await;
        assert!(matches!(result, Err(FetchError::MalformedDataUri)));
    }

    #[tokio::test]
    async fn test_data_uri_with_bad_payload_is_rejected() {
        let result = fetch_resource("data:image/png;base64,@@@").await;
        assert!(matches!(result, Err(FetchError::Base64(_))));
    }

    #[tokio::test]
    async fn test_path_reference_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-stub").unwrap();
        let bytes = fetch_resource(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(bytes, b"%PDF-stub");
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let result = fetch_resource("/nonexistent/certificate.pdf").await;
        match result {
            Err(FetchError::Io { path, .. }) => assert_eq!(path, "/nonexistent/certificate.pdf"),
            other => panic!("expected Io error, got {:?}", other.map(|b| b.len())),
        }
    }
}
