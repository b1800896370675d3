//! S3-compatible remote store implementation.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::config::RemoteCredentials;

use super::sigv4::{self, RequestSigner};
use super::{RemoteConfig, RemoteError, RemoteObject, RemoteStore};

/// Object store client speaking the S3 REST API with SigV4 auth.
pub struct S3Store {
    client: Client,
    config: RemoteConfig,
    credentials: RemoteCredentials,
}

impl S3Store {
    /// Create a new store client for a bucket.
    pub fn new(config: RemoteConfig, credentials: RemoteCredentials) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            credentials,
        }
    }

    /// Resolves URL, host header value and canonical URI for an object key.
    ///
    /// Virtual-host addressing against the regional endpoint by default;
    /// path-style when a custom endpoint is configured.
    fn request_parts(&self, key: &str) -> (String, String, String) {
        let encoded = sigv4::encode_key(key);
        match &self.config.endpoint {
            Some(endpoint) => {
                let endpoint = endpoint.trim_end_matches('/');
                let host = endpoint
                    .split_once("://")
                    .map(|(_, rest)| rest)
                    .unwrap_or(endpoint)
                    .to_string();
                let canonical_uri = format!("/{}/{}", self.config.bucket, encoded);
                let url = format!("{}{}", endpoint, canonical_uri);
                (url, host, canonical_uri)
            }
            None => {
                let host = format!(
                    "{}.s3.{}.amazonaws.com",
                    self.config.bucket, self.credentials.region
                );
                let canonical_uri = format!("/{}", encoded);
                let url = format!("https://{}{}", host, canonical_uri);
                (url, host, canonical_uri)
            }
        }
    }

    fn signer(&self) -> RequestSigner<'_> {
        RequestSigner {
            access_key_id: &self.credentials.access_key_id,
            secret_access_key: &self.credentials.secret_access_key,
            region: &self.credentials.region,
        }
    }

    fn map_send_error(e: reqwest::Error) -> RemoteError {
        if e.is_timeout() {
            RemoteError::Timeout
        } else if e.is_connect() {
            RemoteError::ConnectionFailed(e.to_string())
        } else {
            RemoteError::ApiError(e.to_string())
        }
    }
}

#[async_trait]
impl RemoteStore for S3Store {
    fn name(&self) -> &str {
        "s3"
    }

    async fn head(&self, key: &str) -> Result<Option<RemoteObject>, RemoteError> {
        let (url, host, canonical_uri) = self.request_parts(key);
        let payload_hash = sigv4::payload_hash(b"");
        let signed = sigv4::sign(
            &self.signer(),
            "HEAD",
            &host,
            &canonical_uri,
            &payload_hash,
            Utc::now(),
        );

        let response = self
            .client
            .head(&url)
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-content-sha256", &signed.content_sha256)
            .header("authorization", &signed.authorization)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status == StatusCode::FORBIDDEN {
            return Err(RemoteError::AccessDenied(format!("HEAD {} rejected", key)));
        }
        if !status.is_success() {
            return Err(RemoteError::ApiError(format!(
                "HEAD {}: HTTP {}",
                key, status
            )));
        }

        let etag = response
            .headers()
            .get("etag")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .trim_matches('"')
            .to_string();
        let size_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        Ok(Some(RemoteObject {
            key: key.to_string(),
            etag,
            size_bytes,
        }))
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), RemoteError> {
        let (url, host, canonical_uri) = self.request_parts(key);
        let payload_hash = sigv4::payload_hash(&body);
        let signed = sigv4::sign(
            &self.signer(),
            "PUT",
            &host,
            &canonical_uri,
            &payload_hash,
            Utc::now(),
        );

        debug!("PUT {} ({} bytes)", key, body.len());

        let response = self
            .client
            .put(&url)
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-content-sha256", &signed.content_sha256)
            .header("authorization", &signed.authorization)
            .header("content-type", content_type)
            .body(body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(RemoteError::AccessDenied(format!("PUT {} rejected", key)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::ApiError(format!(
                "PUT {}: HTTP {} {}",
                key,
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        Ok(())
    }
}
