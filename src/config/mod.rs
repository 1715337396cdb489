//! Configuration module for the uploader
//!
//! Configuration comes from a YAML file, environment variables (including a
//! `.env` file loaded at startup) and defaults. Priority: YAML > ENV vars >
//! defaults. AWS credentials are never part of it; the SDK's ambient
//! credential chain supplies them.
//!
//! # Example
//! ```rust,no_run
//! use polly_uploader::config::UploaderConfig;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = UploaderConfig::from_env()?;
//!
//! // Load from YAML file with environment variables as fallback
//! let config = UploaderConfig::from_file(Path::new("uploader.yaml"))?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

mod env;
mod yaml;

pub use env::{
    ENV_LOCAL_COPY, ENV_ON_UNREACHABLE, ENV_REGION, ENV_S3_ALLOW_HTTP, ENV_S3_ENDPOINT,
    ENV_SCRATCH_DIR,
};
pub use yaml::YamlConfig;

use crate::errors::{AppError, AppResult};
use env::EnvConfig;

/// What the pipeline does when the synthesis endpoint cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisFailurePolicy {
    /// Report the error and carry on with an empty response (nothing is uploaded)
    #[default]
    Continue,
    /// Report the error and fail the run
    Abort,
}

impl SynthesisFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Abort => "abort",
        }
    }
}

impl FromStr for SynthesisFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continue" => Ok(Self::Continue),
            "abort" => Ok(Self::Abort),
            other => Err(format!(
                "Unknown synthesis failure policy '{other}', expected 'continue' or 'abort'"
            )),
        }
    }
}

impl fmt::Display for SynthesisFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object store settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// S3-compatible endpoint replacing the AWS default
    pub endpoint: Option<String>,
    /// Allow plain HTTP endpoints
    pub allow_http: bool,
}

/// Local audio file settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioConfig {
    /// Directory scratch files are created in (OS temp dir when unset)
    pub scratch_dir: Option<PathBuf>,
    /// Where to keep a copy of the audio after the run
    pub local_copy: Option<PathBuf>,
}

impl AudioConfig {
    /// Effective scratch directory.
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Uploader configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploaderConfig {
    /// Region override for Polly and S3
    pub region: Option<String>,
    pub storage: StorageConfig,
    pub audio: AudioConfig,
    /// Behaviour when the synthesis endpoint is unreachable
    pub on_unreachable: SynthesisFailurePolicy,
}

impl UploaderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        let env = EnvConfig::from_lookup(|key| std::env::var(key).ok()).map_err(AppError::Config)?;
        Ok(Self::merge(None, env))
    }

    /// Load configuration from a YAML file, falling back to environment variables.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let yaml = YamlConfig::from_file(path).map_err(AppError::Config)?;
        let env = EnvConfig::from_lookup(|key| std::env::var(key).ok()).map_err(AppError::Config)?;
        Ok(Self::merge(Some(yaml), env))
    }

    fn merge(yaml: Option<YamlConfig>, env: EnvConfig) -> Self {
        let yaml = yaml.unwrap_or_default();
        let aws = yaml.aws.unwrap_or_default();
        let storage = yaml.storage.unwrap_or_default();
        let audio = yaml.audio.unwrap_or_default();
        let synthesis = yaml.synthesis.unwrap_or_default();

        Self {
            region: aws.region.or(env.region),
            storage: StorageConfig {
                endpoint: storage.endpoint.or(env.s3_endpoint),
                allow_http: storage.allow_http.or(env.s3_allow_http).unwrap_or(false),
            },
            audio: AudioConfig {
                scratch_dir: audio.scratch_dir.map(PathBuf::from).or(env.scratch_dir),
                local_copy: audio.local_copy.map(PathBuf::from).or(env.local_copy),
            },
            on_unreachable: synthesis
                .on_unreachable
                .or(env.on_unreachable)
                .unwrap_or_default(),
        }
    }
}
