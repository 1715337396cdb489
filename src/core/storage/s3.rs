//! S3 object store construction.

use std::sync::Arc;

use aws_config::SdkConfig;
use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use tracing::debug;

use super::credentials::SdkCredentialProvider;
use crate::config::StorageConfig;
use crate::errors::{AppError, AppResult};

/// Build an S3 store bound to `bucket`.
///
/// Region and credentials come from the shared SDK configuration; `AWS_*`
/// variables `object_store` understands (e.g. `AWS_ENDPOINT`) still apply
/// underneath the explicit [`StorageConfig`] settings.
pub fn build_s3_store(
    sdk_config: &SdkConfig,
    storage: &StorageConfig,
    bucket: &str,
) -> AppResult<Arc<dyn ObjectStore>> {
    let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

    if let Some(region) = sdk_config.region() {
        builder = builder.with_region(region.to_string());
    }

    if let Some(provider) = sdk_config.credentials_provider() {
        builder = builder.with_credentials(Arc::new(SdkCredentialProvider::new(provider)));
    }

    if let Some(ref endpoint) = storage.endpoint {
        builder = builder.with_endpoint(endpoint);
    }

    if storage.allow_http {
        builder = builder.with_allow_http(true);
    }

    let store = builder.build().map_err(|e| {
        AppError::Config(format!("Failed to build S3 store for bucket '{bucket}': {e}"))
    })?;

    debug!(
        bucket = bucket,
        endpoint = storage.endpoint.as_deref().unwrap_or("default"),
        "S3 object store ready"
    );

    Ok(Arc::new(store))
}
