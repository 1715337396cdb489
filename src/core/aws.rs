//! Shared AWS configuration.
//!
//! Loaded once per run and handed to both the Polly client and the S3 store,
//! so the two services always agree on region and credentials.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

/// Load the ambient AWS configuration (environment, profile files, IAM roles).
///
/// `region` overrides whatever region the default chain would pick.
pub async fn load_sdk_config(region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }

    let sdk_config = loader.load().await;

    debug!(
        region = ?sdk_config.region(),
        has_credentials = sdk_config.credentials_provider().is_some(),
        "Loaded AWS configuration"
    );

    sdk_config
}
