//! S3-compatible artifact store. Works against AWS S3 and against
//! R2/MinIO style endpoints via a custom endpoint URL.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use super::{ArtifactStore, StoreError};

pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the ambient AWS environment, optionally
    /// pointed at a non-AWS endpoint. Path-style addressing is required
    /// by most S3-compatible services.
    pub async fn connect(
        bucket: impl Into<String>,
        endpoint_url: Option<&str>,
        region: Option<String>,
    ) -> Self {
        let mut loader = aws_config::from_env();
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared).force_path_style(true);
        if let Some(url) = endpoint_url {
            builder = builder.endpoint_url(url);
        }
        let client = aws_sdk_s3::Client::from_conf(builder.build());
        Self::new(client, bucket)
    }
}

#[async_trait]
impl ArtifactStore for S3Store {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| StoreError::new(key, e))?;
        Ok(())
    }
}
