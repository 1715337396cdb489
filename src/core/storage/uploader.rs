//! Artifact uploader.
//!
//! Drains the synthesized audio into a scratch file, then uploads that file
//! to the object store under `<folder>/PollyAudio_<timestamp>`. The scratch
//! file is unique per run and is removed when the upload finishes or fails.
//!
//! The object path is resolved with [`ArtifactUploader::location`] before
//! any audio is requested, so a bad destination costs no synthesis call.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use object_store::path::Path as ObjectPath;
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore, PutOptions, PutPayload};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::artifact::{ArtifactName, DestinationTemplate};
use crate::core::tts::SynthesisResponse;
use crate::errors::{AppError, AppResult};

/// Prefix of local scratch files.
pub const SCRATCH_PREFIX: &str = "polly-boto";

/// What an upload attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The artifact was stored under `key`
    Uploaded { key: String, bytes: usize },
    /// The response carried no audio; nothing was written or uploaded
    NoAudio,
}

/// Writes synthesized audio locally and uploads it to one bucket.
#[derive(Debug)]
pub struct ArtifactUploader {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    artifact_name: ArtifactName,
    scratch_dir: PathBuf,
    extension: String,
    local_copy: Option<PathBuf>,
    content_type: Option<String>,
}

impl ArtifactUploader {
    /// Create an uploader writing scratch files to the OS temp directory.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        artifact_name: ArtifactName,
    ) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            artifact_name,
            scratch_dir: std::env::temp_dir(),
            extension: ".mp3".to_string(),
            local_copy: None,
            content_type: None,
        }
    }

    pub fn with_scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = scratch_dir.into();
        self
    }

    /// Set the scratch file extension, leading dot included.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Keep a copy of the audio at `path` after the run.
    pub fn with_local_copy(mut self, path: Option<PathBuf>) -> Self {
        self.local_copy = path;
        self
    }

    /// Content type stored with the object when the response reports none.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Object path of this run's artifact under `destination`.
    pub fn location(&self, destination: &DestinationTemplate) -> AppResult<ObjectPath> {
        let key = destination.render(&self.artifact_name);
        ObjectPath::parse(&key).map_err(|source| AppError::InvalidDestination { key, source })
    }

    /// Store the audio carried by `response` at `location`.
    ///
    /// A response without an audio stream is a no-op.
    pub async fn upload(
        &self,
        response: SynthesisResponse,
        location: &ObjectPath,
    ) -> AppResult<UploadOutcome> {
        let Some(stream) = response.audio_stream else {
            debug!("No audio stream in synthesis response, skipping upload");
            return Ok(UploadOutcome::NoAudio);
        };

        let audio = stream
            .collect()
            .await
            .map_err(|e| AppError::AudioStream(e.to_string()))?
            .into_bytes();

        let scratch = self.write_scratch_file(&audio)?;

        if let Some(ref copy_path) = self.local_copy {
            std::fs::copy(scratch.path(), copy_path).map_err(|source| AppError::LocalWrite {
                path: copy_path.clone(),
                source,
            })?;
            debug!(path = %copy_path.display(), "Kept local copy of audio");
        }

        let payload = tokio::fs::read(scratch.path())
            .await
            .map_err(|source| AppError::LocalWrite {
                path: scratch.path().to_path_buf(),
                source,
            })?;
        let bytes = payload.len();

        let mut attributes = Attributes::new();
        if let Some(content_type) = response.content_type.or_else(|| self.content_type.clone()) {
            attributes.insert(Attribute::ContentType, AttributeValue::from(content_type));
        }
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let key = location.to_string();
        debug!(bucket = %self.bucket, key = %key, bytes = bytes, "Uploading artifact");

        self.store
            .put_opts(location, PutPayload::from(payload), options)
            .await
            .map_err(|source| AppError::Upload {
                bucket: self.bucket.clone(),
                source,
            })?;

        info!(bucket = %self.bucket, key = %key, bytes = bytes, "Artifact uploaded");

        Ok(UploadOutcome::Uploaded { key, bytes })
    }

    fn write_scratch_file(&self, audio: &[u8]) -> AppResult<NamedTempFile> {
        let mut scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(&self.extension)
            .tempfile_in(&self.scratch_dir)
            .map_err(|source| AppError::LocalWrite {
                path: self
                    .scratch_dir
                    .join(format!("{SCRATCH_PREFIX}{}", self.extension)),
                source,
            })?;

        scratch
            .write_all(audio)
            .and_then(|_| scratch.flush())
            .map_err(|source| AppError::LocalWrite {
                path: scratch.path().to_path_buf(),
                source,
            })?;

        debug!(
            path = %scratch.path().display(),
            bytes = audio.len(),
            "Wrote audio to scratch file"
        );

        Ok(scratch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::RunTimestamp;
    use aws_sdk_polly::primitives::ByteStream;
    use object_store::memory::InMemory;
    use std::path::Path;
    use tempfile::TempDir;
    use time::macros::datetime;

    const FAKE_MP3: &[u8] = b"ID3\x04\x00fake-mpeg-frames";

    fn artifact_name() -> ArtifactName {
        ArtifactName::from_timestamp(&RunTimestamp::from_datetime(datetime!(
            2024-03-07 09:05:02 UTC
        )))
    }

    fn uploader(store: Arc<InMemory>, scratch: &Path) -> ArtifactUploader {
        ArtifactUploader::new(store, "my-bucket", artifact_name()).with_scratch_dir(scratch)
    }

    fn audio_folder(uploader: &ArtifactUploader) -> ObjectPath {
        uploader
            .location(&DestinationTemplate::for_folder("audio"))
            .unwrap()
    }

    fn scratch_entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_upload_stores_audio_under_rendered_key() {
        let store = Arc::new(InMemory::new());
        let scratch = TempDir::new().unwrap();
        let uploader = uploader(store.clone(), scratch.path());

        let response = SynthesisResponse::with_audio(
            ByteStream::from_static(FAKE_MP3),
            Some("audio/mpeg".to_string()),
        );
        let location = audio_folder(&uploader);
        let outcome = uploader.upload(response, &location).await.unwrap();

        assert_eq!(
            outcome,
            UploadOutcome::Uploaded {
                key: "audio/PollyAudio_07-03-24 09:05:02".to_string(),
                bytes: FAKE_MP3.len(),
            }
        );

        let stored = store
            .get(&ObjectPath::parse("audio/PollyAudio_07-03-24 09:05:02").unwrap())
            .await
            .unwrap();
        let content_type = stored.attributes.get(&Attribute::ContentType).cloned();
        assert_eq!(content_type, Some(AttributeValue::from("audio/mpeg")));
        assert_eq!(stored.bytes().await.unwrap().as_ref(), FAKE_MP3);
    }

    #[tokio::test]
    async fn test_upload_without_audio_is_noop() {
        let store = Arc::new(InMemory::new());
        let scratch = TempDir::new().unwrap();
        let uploader = uploader(store.clone(), scratch.path());

        let location = audio_folder(&uploader);
        let outcome = uploader
            .upload(SynthesisResponse::empty(), &location)
            .await
            .unwrap();

        assert_eq!(outcome, UploadOutcome::NoAudio);
        assert_eq!(scratch_entries(scratch.path()), 0);
        let listed = store.list_with_delimiter(None).await.unwrap();
        assert!(listed.objects.is_empty());
    }

    #[tokio::test]
    async fn test_scratch_file_removed_after_upload() {
        let store = Arc::new(InMemory::new());
        let scratch = TempDir::new().unwrap();
        let uploader = uploader(store, scratch.path());

        let response = SynthesisResponse::with_audio(ByteStream::from_static(FAKE_MP3), None);
        let location = audio_folder(&uploader);
        uploader.upload(response, &location).await.unwrap();

        assert_eq!(scratch_entries(scratch.path()), 0);
    }

    #[tokio::test]
    async fn test_configured_content_type_when_response_has_none() {
        let store = Arc::new(InMemory::new());
        let scratch = TempDir::new().unwrap();
        let uploader = uploader(store.clone(), scratch.path()).with_content_type("audio/ogg");

        let response = SynthesisResponse::with_audio(ByteStream::from_static(FAKE_MP3), None);
        let location = audio_folder(&uploader);
        uploader.upload(response, &location).await.unwrap();

        let stored = store
            .get(&ObjectPath::parse("audio/PollyAudio_07-03-24 09:05:02").unwrap())
            .await
            .unwrap();
        assert_eq!(
            stored.attributes.get(&Attribute::ContentType).cloned(),
            Some(AttributeValue::from("audio/ogg"))
        );
    }

    #[tokio::test]
    async fn test_local_copy_is_kept() {
        let store = Arc::new(InMemory::new());
        let scratch = TempDir::new().unwrap();
        let keep = TempDir::new().unwrap();
        let copy_path = keep.path().join("polly-boto.mp3");
        let uploader =
            uploader(store, scratch.path()).with_local_copy(Some(copy_path.clone()));

        let response = SynthesisResponse::with_audio(ByteStream::from_static(FAKE_MP3), None);
        let location = audio_folder(&uploader);
        uploader.upload(response, &location).await.unwrap();

        assert_eq!(std::fs::read(&copy_path).unwrap(), FAKE_MP3);
        assert_eq!(scratch_entries(scratch.path()), 0);
    }

    #[tokio::test]
    async fn test_local_write_failure_skips_upload() {
        let store = Arc::new(InMemory::new());
        let scratch = TempDir::new().unwrap();
        let missing = scratch.path().join("does-not-exist");
        let uploader = uploader(store.clone(), &missing);

        let response = SynthesisResponse::with_audio(ByteStream::from_static(FAKE_MP3), None);
        let location = audio_folder(&uploader);
        let err = uploader.upload(response, &location).await.unwrap_err();

        assert!(matches!(err, AppError::LocalWrite { .. }));
        assert_eq!(err.exit_code(), crate::errors::EXIT_LOCAL_WRITE);
        let listed = store.list_with_delimiter(None).await.unwrap();
        assert!(listed.objects.is_empty());
        assert!(listed.common_prefixes.is_empty());
    }

    #[test]
    fn test_location_invalid_segment() {
        let store = Arc::new(InMemory::new());
        let scratch = TempDir::new().unwrap();
        let uploader = uploader(store, scratch.path());

        let err = uploader
            .location(&DestinationTemplate::for_folder("audio/../other"))
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidDestination { .. }));
        assert_eq!(err.exit_code(), crate::errors::EXIT_FAILURE);
    }

    #[tokio::test]
    async fn test_reported_key_matches_stored_location() {
        for (folder, expected) in [
            ("audio", "audio/PollyAudio_07-03-24 09:05:02"),
            ("audio/", "audio/PollyAudio_07-03-24 09:05:02"),
            ("/audio", "audio/PollyAudio_07-03-24 09:05:02"),
            ("", "PollyAudio_07-03-24 09:05:02"),
            ("a//b", "a/b/PollyAudio_07-03-24 09:05:02"),
        ] {
            let store = Arc::new(InMemory::new());
            let scratch = TempDir::new().unwrap();
            let uploader = uploader(store.clone(), scratch.path());

            let location = uploader
                .location(&DestinationTemplate::for_folder(folder))
                .unwrap();
            let response =
                SynthesisResponse::with_audio(ByteStream::from_static(FAKE_MP3), None);
            let outcome = uploader.upload(response, &location).await.unwrap();

            assert_eq!(
                outcome,
                UploadOutcome::Uploaded {
                    key: expected.to_string(),
                    bytes: FAKE_MP3.len(),
                },
                "folder {folder:?}"
            );
            let stored = store.get(&ObjectPath::from(expected)).await.unwrap();
            assert_eq!(stored.bytes().await.unwrap().as_ref(), FAKE_MP3);
        }
    }

    #[tokio::test]
    async fn test_same_second_runs_use_distinct_scratch_files() {
        let store = Arc::new(InMemory::new());
        let scratch = TempDir::new().unwrap();
        let uploader = uploader(store, scratch.path());

        let first = uploader.write_scratch_file(b"first").unwrap();
        let second = uploader.write_scratch_file(b"second").unwrap();

        assert_ne!(first.path(), second.path());
        assert_eq!(std::fs::read(first.path()).unwrap(), b"first");
        assert_eq!(std::fs::read(second.path()).unwrap(), b"second");
        let name = first.path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with(SCRATCH_PREFIX));
        assert!(name.ends_with(".mp3"));
    }
}
