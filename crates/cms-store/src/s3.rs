//! # S3-Compatible Bucket
//!
//! [`Bucket`] over the AWS S3 API. Works against AWS itself, MinIO and
//! similar servers, and Google Cloud Storage through its S3 interoperability
//! endpoint (`https://storage.googleapis.com` with HMAC keys).
//!
//! The client's own retry policy is disabled; a failed call surfaces
//! immediately as [`StoreError::Backend`].

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{
    Credentials, Region, RequestChecksumCalculation, ResponseChecksumValidation,
};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::bucket::Bucket;
use crate::error::{StoreError, StoreResult};

/// Connection settings for [`S3Bucket::connect`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Config {
    /// Bucket name.
    pub bucket: String,
    /// Region. Falls back to the default AWS provider chain when unset.
    pub region: Option<String>,
    /// Custom endpoint URL for non-AWS servers.
    pub endpoint: Option<String>,
    /// Address the bucket as a path segment rather than a subdomain.
    pub force_path_style: bool,
    /// Static access key. Both halves must be set to take effect.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// A bucket on an S3-compatible service.
#[derive(Debug, Clone)]
pub struct S3Bucket {
    client: Client,
    bucket: String,
}

impl S3Bucket {
    /// Build a client from `config` and the ambient AWS environment.
    pub async fn connect(config: &S3Config) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id.clone(),
                secret.clone(),
                None,
                None,
                "cms-config",
            ));
        }
        let shared = loader.load().await;

        // Third-party endpoints reject the flexible checksum headers.
        let mut builder = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.force_path_style)
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .response_checksum_validation(ResponseChecksumValidation::WhenRequired);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }

        Self::from_client(Client::from_conf(builder.build()), config.bucket.clone())
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl Bucket for S3Bucket {
    fn kind(&self) -> &'static str {
        "s3"
    }

    async fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false)
                {
                    return Ok(None);
                }
                return Err(StoreError::backend("read", key, DisplayErrorContext(&err)));
            }
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::backend("read", key, e))?;
        Ok(Some(body.into_bytes().to_vec()))
    }

    async fn write(&self, key: &str, body: Vec<u8>) -> StoreResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/json")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StoreError::backend("write", key, DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StoreError::backend("remove", key, DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page =
                page.map_err(|e| StoreError::backend("list", prefix, DisplayErrorContext(&e)))?;
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );
        }
        Ok(keys)
    }
}
