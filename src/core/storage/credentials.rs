//! Credential bridge from the AWS SDK to `object_store`.
//!
//! `object_store` resolves S3 credentials on its own and does not read the
//! shared `~/.aws` profile files. Wrapping the SDK's provider chain lets the
//! store sign requests with exactly the credentials Polly uses.

use std::sync::Arc;

use async_trait::async_trait;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use object_store::CredentialProvider;
use object_store::aws::AwsCredential;
use tracing::debug;

#[derive(Debug)]
pub struct SdkCredentialProvider {
    inner: SharedCredentialsProvider,
}

impl SdkCredentialProvider {
    pub fn new(inner: SharedCredentialsProvider) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CredentialProvider for SdkCredentialProvider {
    type Credential = AwsCredential;

    async fn get_credential(&self) -> object_store::Result<Arc<AwsCredential>> {
        let credentials = self.inner.provide_credentials().await.map_err(|e| {
            object_store::Error::Generic {
                store: "S3",
                source: Box::new(e),
            }
        })?;

        debug!(
            has_session_token = credentials.session_token().is_some(),
            "Resolved AWS credentials for object store"
        );

        Ok(Arc::new(AwsCredential {
            key_id: credentials.access_key_id().to_string(),
            secret_key: credentials.secret_access_key().to_string(),
            token: credentials.session_token().map(str::to_string),
        }))
    }
}
