//! Mock remote store for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::remote::{RemoteError, RemoteObject, RemoteStore};

/// A stored object for test assertions.
#[derive(Debug, Clone)]
struct StoredObject {
    body: Vec<u8>,
    etag: String,
    content_type: String,
}

/// Mock implementation of the RemoteStore trait.
///
/// Stores objects in memory, reports md5 ETags like a real store, and can
/// be told to fail uploads.
#[derive(Debug, Clone, Default)]
pub struct MockRemoteStore {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    put_failure: Option<String>,
}

impl MockRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent put fail with an access-denied error.
    pub fn with_put_failure(mut self, message: impl Into<String>) -> Self {
        self.put_failure = Some(message.into());
        self
    }

    /// Whether an object exists under a key.
    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }

    /// Number of stored objects.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    /// The stored body for a key.
    pub async fn body(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(key).map(|o| o.body.clone())
    }

    /// The content type an object was uploaded with.
    pub async fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| o.content_type.clone())
    }
}

#[async_trait]
impl RemoteStore for MockRemoteStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn head(&self, key: &str) -> Result<Option<RemoteObject>, RemoteError> {
        Ok(self.objects.read().await.get(key).map(|o| RemoteObject {
            key: key.to_string(),
            etag: o.etag.clone(),
            size_bytes: o.body.len() as u64,
        }))
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), RemoteError> {
        if let Some(ref message) = self.put_failure {
            return Err(RemoteError::AccessDenied(message.clone()));
        }
        let etag = format!("{:x}", md5::compute(&body));
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                body,
                etag,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_head_reports_md5_etag() {
        let store = MockRemoteStore::new();
        store
            .put("a/index.html", b"<html></html>".to_vec(), "text/html")
            .await
            .unwrap();

        let object = store.head("a/index.html").await.unwrap().unwrap();
        assert_eq!(object.etag, format!("{:x}", md5::compute(b"<html></html>")));
        assert_eq!(object.size_bytes, 13);
        assert_eq!(
            store.content_type("a/index.html").await.as_deref(),
            Some("text/html")
        );
    }

    #[tokio::test]
    async fn test_head_missing_key_is_none() {
        let store = MockRemoteStore::new();
        assert!(store.head("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_failure() {
        let store = MockRemoteStore::new().with_put_failure("denied");
        let err = store.put("k", vec![1], "text/plain").await.unwrap_err();
        assert!(matches!(err, RemoteError::AccessDenied(_)));
        assert_eq!(store.object_count().await, 0);
    }
}
