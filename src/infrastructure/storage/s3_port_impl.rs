use anyhow::{Context, anyhow};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{Client, error::SdkError};

use crate::application::ports::object_storage::ObjectStorage;
use crate::bootstrap::config::StorageConfig;

/// Work image containers backed by S3-compatible buckets.
pub struct S3ObjectStorage {
    client: Client,
    urls: ObjectUrlBuilder,
}

impl S3ObjectStorage {
    pub async fn new(cfg: &StorageConfig) -> anyhow::Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &cfg.s3_region {
            loader = loader.region(Region::new(region.clone()));
        }

        let shared_config = loader.load().await;
        let region = shared_config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "us-east-1".to_string());

        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);

        if let (Some(access), Some(secret)) = (&cfg.s3_access_key, &cfg.s3_secret_key) {
            let creds = Credentials::new(
                access.clone(),
                secret.clone(),
                None,
                None,
                "obras-s3-static",
            );
            builder = builder.credentials_provider(creds);
        }

        if let Some(endpoint) = &cfg.s3_endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }

        if cfg.s3_use_path_style {
            builder = builder.force_path_style(true);
        }

        let client = Client::from_conf(builder.build());

        Ok(Self {
            client,
            urls: ObjectUrlBuilder {
                public_base_url: cfg.public_base_url.clone(),
                endpoint: cfg.s3_endpoint.clone(),
                region,
            },
        })
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn ensure_container(&self, container: &str) -> anyhow::Result<()> {
        ensure_bucket(&self.client, container).await
    }

    async fn upload(
        &self,
        container: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> anyhow::Result<String> {
        let mut req = self
            .client
            .put_object()
            .bucket(container)
            .key(key)
            .body(ByteStream::from(bytes));
        if let Some(ct) = content_type {
            req = req.content_type(ct);
        }
        req.send()
            .await
            .with_context(|| format!("failed to upload {container}/{key}"))?;
        Ok(self.urls.url_for(container, key))
    }

    async fn delete_object(&self, container: &str, key: &str) -> anyhow::Result<()> {
        self.client
            .delete_object()
            .bucket(container)
            .key(key)
            .send()
            .await
            .with_context(|| format!("failed to delete object {container}/{key}"))?;
        Ok(())
    }
}

/// Durable URL of a stored object, recorded in `imagenes.url`.
#[derive(Debug, Clone)]
pub struct ObjectUrlBuilder {
    pub public_base_url: Option<String>,
    pub endpoint: Option<String>,
    pub region: String,
}

impl ObjectUrlBuilder {
    pub fn url_for(&self, container: &str, key: &str) -> String {
        let key = key.trim_start_matches('/');
        if let Some(base) = self.public_base_url.as_deref() {
            format!("{}/{}/{}", base.trim_end_matches('/'), container, key)
        } else if let Some(endpoint) = self.endpoint.as_deref() {
            format!("{}/{}/{}", endpoint.trim_end_matches('/'), container, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                container, self.region, key
            )
        }
    }
}

async fn ensure_bucket(client: &Client, bucket: &str) -> anyhow::Result<()> {
    match client.head_bucket().bucket(bucket).send().await {
        Ok(_) => return Ok(()),
        Err(SdkError::ServiceError(service_err)) => {
            if !matches!(service_err.err(), HeadBucketError::NotFound(_)) {
                return Err(anyhow!(service_err.err().to_string()));
            }
        }
        Err(err) => return Err(anyhow!(err.to_string())),
    }

    match client.create_bucket().bucket(bucket).send().await {
        Ok(_) => {
            tracing::info!(%bucket, "container_created");
            Ok(())
        }
        Err(SdkError::ServiceError(service_err)) => match service_err.err() {
            CreateBucketError::BucketAlreadyOwnedByYou(_) => Ok(()),
            CreateBucketError::BucketAlreadyExists(_) => Ok(()),
            other => Err(anyhow!(other.to_string())),
        },
        Err(err) => Err(anyhow!(err.to_string())),
    }
}
