//! S3-compatible HTTP object store mirror.

use std::path::Path;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, info};

use super::service::{MirrorError, MirrorResult, RemoteMirror};

/// Mirror backed by an S3-compatible object store over HTTP.
///
/// Objects are addressed path-style as `{endpoint}/{bucket}/{object}`:
/// `HEAD` answers the existence check, `PUT` uploads the full file body,
/// `GET` downloads it. An optional bearer token covers token-authenticated
/// deployments; anything fancier (signing, retries, multipart) is out of
/// scope for this client.
pub struct HttpMirror {
    client: Client,
    endpoint: String,
    bucket: String,
    access_token: Option<String>,
}

impl HttpMirror {
    /// Creates a mirror client for the given endpoint and bucket.
    ///
    /// No connection is made here; transport failures surface from the
    /// first capability call instead.
    pub fn new(endpoint: &str, bucket: &str, access_token: Option<String>) -> Self {
        info!("Mirroring to {}/{}", endpoint.trim_end_matches('/'), bucket);

        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            access_token,
        }
    }

    /// Constructs the full path-style object URL.
    fn object_url(&self, object_name: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, object_name)
    }

    /// Attaches the bearer token when one is configured.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl RemoteMirror for HttpMirror {
    async fn exists(&self, object_name: &str) -> MirrorResult<bool> {
        let url = self.object_url(object_name);

        let response = self
            .authorize(self.client.head(&url))
            .send()
            .await
            .map_err(|e| MirrorError::ConnectionError(format!("HEAD {} failed: {}", url, e)))?;

        match response.status() {
            status if status.is_success() => {
                debug!("Remote object {} exists", object_name);
                Ok(true)
            }
            StatusCode::NOT_FOUND => {
                debug!("Remote object {} not found", object_name);
                Ok(false)
            }
            status => Err(MirrorError::OperationError(format!(
                "HEAD {} returned {}",
                url, status
            ))),
        }
    }

    async fn upload(&self, object_name: &str, local_path: &Path) -> MirrorResult<()> {
        let body = tokio::fs::read(local_path).await.map_err(|e| {
            MirrorError::OperationError(format!("cannot read {}: {}", local_path.display(), e))
        })?;

        let url = self.object_url(object_name);

        let response = self
            .authorize(self.client.put(&url))
            .body(body)
            .send()
            .await
            .map_err(|e| MirrorError::ConnectionError(format!("PUT {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(MirrorError::OperationError(format!(
                "PUT {} returned {}",
                url,
                response.status()
            )));
        }

        debug!("Uploaded {} to remote mirror", object_name);
        Ok(())
    }

    async fn download(&self, object_name: &str, local_path: &Path) -> MirrorResult<()> {
        let url = self.object_url(object_name);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| MirrorError::ConnectionError(format!("GET {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(MirrorError::OperationError(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            MirrorError::ConnectionError(format!("GET {} body failed: {}", url, e))
        })?;

        tokio::fs::write(local_path, &bytes).await.map_err(|e| {
            MirrorError::OperationError(format!("cannot write {}: {}", local_path.display(), e))
        })?;

        debug!("Downloaded {} from remote mirror", object_name);
        Ok(())
    }
}
