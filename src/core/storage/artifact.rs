//! Artifact naming.
//!
//! The object key of an upload is `<folder>/PollyAudio_<DD-MM-YY HH:MM:SS>`,
//! where the timestamp is captured once when the process starts. Empty
//! folder segments are dropped, so `audio/`, `/audio` and `audio` all name
//! the same folder and an empty folder puts the artifact at the bucket root.

use std::fmt;

use time::OffsetDateTime;

/// Prefix of every artifact name.
pub const ARTIFACT_PREFIX: &str = "PollyAudio_";

/// Placeholder the artifact name is substituted into.
pub const PLACEHOLDER: &str = "{}";

/// Wall-clock time captured once at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTimestamp(OffsetDateTime);

impl RunTimestamp {
    /// Capture the current local time.
    ///
    /// Falls back to UTC when the local offset cannot be determined, which
    /// `time` refuses to do once the process has several threads.
    pub fn now() -> Self {
        Self(OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()))
    }

    pub fn from_datetime(datetime: OffsetDateTime) -> Self {
        Self(datetime)
    }

    pub fn datetime(&self) -> OffsetDateTime {
        self.0
    }

    /// `DD-MM-YY HH:MM:SS`
    pub fn formatted(&self) -> String {
        let dt = self.0;
        format!(
            "{:02}-{:02}-{:02} {:02}:{:02}:{:02}",
            dt.day(),
            u8::from(dt.month()),
            dt.year().rem_euclid(100),
            dt.hour(),
            dt.minute(),
            dt.second()
        )
    }
}

/// Name of the uploaded artifact, without the folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName(String);

impl ArtifactName {
    pub fn from_timestamp(timestamp: &RunTimestamp) -> Self {
        Self(format!("{ARTIFACT_PREFIX}{}", timestamp.formatted()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A folder path with a trailing placeholder for the artifact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationTemplate(String);

impl DestinationTemplate {
    /// Template placing the artifact directly under `folder`.
    pub fn for_folder(folder: &str) -> Self {
        let folder = folder
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/");

        if folder.is_empty() {
            Self(PLACEHOLDER.to_string())
        } else {
            Self(format!("{folder}/{PLACEHOLDER}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute `name` for the trailing placeholder.
    ///
    /// Braces inside the folder itself are left alone.
    pub fn render(&self, name: &ArtifactName) -> String {
        let folder = self
            .0
            .strip_suffix(PLACEHOLDER)
            .unwrap_or(self.0.as_str());
        format!("{folder}{name}")
    }
}
