use serde::Deserialize;
use std::path::Path;

use super::SynthesisFailurePolicy;

/// Complete YAML configuration structure
///
/// Every field is optional; anything left out falls back to the environment
/// and then to the built-in defaults.
///
/// # Example YAML structure
/// ```yaml
/// aws:
///   region: "eu-west-1"
///
/// storage:
///   endpoint: "http://localhost:9000"
///   allow_http: true
///
/// audio:
///   scratch_dir: "/var/tmp/polly"
///   local_copy: "polly-boto.mp3"
///
/// synthesis:
///   on_unreachable: "abort"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub aws: Option<AwsYaml>,
    pub storage: Option<StorageYaml>,
    pub audio: Option<AudioYaml>,
    pub synthesis: Option<SynthesisYaml>,
}

/// AWS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AwsYaml {
    /// Region override for both Polly and S3
    pub region: Option<String>,
}

/// Object store configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageYaml {
    /// Custom S3-compatible endpoint (MinIO, LocalStack, ...)
    pub endpoint: Option<String>,
    /// Allow plain HTTP endpoints
    pub allow_http: Option<bool>,
}

/// Local audio file configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AudioYaml {
    /// Directory scratch files are created in
    pub scratch_dir: Option<String>,
    /// Path a copy of the audio is kept at after the run
    pub local_copy: Option<String>,
}

/// Synthesis configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SynthesisYaml {
    /// What to do when the synthesis endpoint cannot be reached
    pub on_unreachable: Option<SynthesisFailurePolicy>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the YAML is malformed.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config {}: {e}", path.display()))
    }
}
