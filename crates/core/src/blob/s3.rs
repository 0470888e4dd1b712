use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use super::{BlobError, BlobStore, PutObject};

/// Where objects live. `endpoint` switches to path-style addressing for
/// S3-compatible services.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: Client,
    settings: S3Settings,
}

impl S3BlobStore {
    /// Build a client from the standard AWS credential chain.
    pub async fn connect(settings: S3Settings) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            settings,
        }
    }

    fn backend_error<E>(operation: &'static str, key: &str, err: E) -> BlobError
    where
        E: std::error::Error,
    {
        BlobError::Backend {
            operation,
            key: key.to_string(),
            message: DisplayErrorContext(&err).to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, object: PutObject) -> Result<(), BlobError> {
        let mut request = self
            .client
            .put_object()
            .bucket(&self.settings.bucket)
            .key(&object.key)
            .content_type(&object.content_type)
            .content_disposition("inline")
            .body(ByteStream::from(object.bytes));
        for (name, value) in object.metadata {
            request = request.metadata(name, value);
        }
        request
            .send()
            .await
            .map_err(|e| Self::backend_error("put", &object.key, e))?;
        tracing::debug!(key = %object.key, "stored object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        self.client
            .delete_object()
            .bucket(&self.settings.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Self::backend_error("delete", key, e))?;
        tracing::debug!(key, "deleted object");
        Ok(())
    }

    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<String, BlobError> {
        let presigning =
            PresigningConfig::expires_in(expires_in).map_err(|e| Self::backend_error("sign", key, e))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.settings.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| Self::backend_error("sign", key, e))?;
        Ok(request.uri().to_string())
    }

    fn public_url(&self, key: &str) -> String {
        object_url(&self.settings, key)
    }
}

fn object_url(settings: &S3Settings, key: &str) -> String {
    match &settings.endpoint {
        Some(endpoint) => format!(
            "{}/{}/{}",
            endpoint.trim_end_matches('/'),
            settings.bucket,
            key
        ),
        None => format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            settings.bucket, settings.region, key
        ),
    }
}
