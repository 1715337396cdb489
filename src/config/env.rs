use std::path::PathBuf;

use super::SynthesisFailurePolicy;

pub const ENV_REGION: &str = "POLLY_UPLOADER_REGION";
pub const ENV_S3_ENDPOINT: &str = "S3_ENDPOINT";
pub const ENV_S3_ALLOW_HTTP: &str = "S3_ALLOW_HTTP";
pub const ENV_SCRATCH_DIR: &str = "POLLY_SCRATCH_DIR";
pub const ENV_LOCAL_COPY: &str = "POLLY_LOCAL_COPY";
pub const ENV_ON_UNREACHABLE: &str = "POLLY_ON_UNREACHABLE";

/// Values read from environment variables. Empty values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub s3_allow_http: Option<bool>,
    pub scratch_dir: Option<PathBuf>,
    pub local_copy: Option<PathBuf>,
    pub on_unreachable: Option<SynthesisFailurePolicy>,
}

impl EnvConfig {
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let s3_allow_http = get(ENV_S3_ALLOW_HTTP)
            .map(|v| parse_bool(&v).ok_or_else(|| invalid(ENV_S3_ALLOW_HTTP, &v)))
            .transpose()?;

        let on_unreachable = get(ENV_ON_UNREACHABLE)
            .map(|v| v.parse::<SynthesisFailurePolicy>())
            .transpose()
            .map_err(|e| format!("{ENV_ON_UNREACHABLE}: {e}"))?;

        Ok(Self {
            region: get(ENV_REGION),
            s3_endpoint: get(ENV_S3_ENDPOINT),
            s3_allow_http,
            scratch_dir: get(ENV_SCRATCH_DIR).map(PathBuf::from),
            local_copy: get(ENV_LOCAL_COPY).map(PathBuf::from),
            on_unreachable,
        })
    }
}

fn invalid(key: &str, value: &str) -> String {
    format!("Invalid value '{value}' for {key}")
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
