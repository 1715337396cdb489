//! Artifact storage.
//!
//! - `artifact`: run timestamp, artifact name and destination template
//! - `uploader`: scratch file handling and the object store upload
//! - `s3`: construction of the S3 backed store
//! - `credentials`: AWS SDK credentials for `object_store`

mod artifact;
mod credentials;
mod s3;
mod uploader;

pub use artifact::{ARTIFACT_PREFIX, ArtifactName, DestinationTemplate, PLACEHOLDER, RunTimestamp};
pub use credentials::SdkCredentialProvider;
pub use s3::build_s3_store;
pub use uploader::{ArtifactUploader, SCRATCH_PREFIX, UploadOutcome};
