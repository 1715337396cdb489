//! Top-level error type for the uploader.
//!
//! Every failure the pipeline can surface ends up as an [`AppError`]. The
//! variant decides the process exit code through [`AppError::exit_code`]:
//! usage errors and every failure the pipeline does not recover from exit
//! with `1`, a local scratch-file write failure exits with `255`.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::tts::SynthesisError;
use crate::input::UsageError;

/// Result type for pipeline operations
pub type AppResult<T> = Result<T, AppError>;

/// Exit code for usage errors and unrecovered failures.
pub const EXIT_FAILURE: u8 = 1;

/// Exit code for a failed local write (`-1` as seen by the shell).
pub const EXIT_LOCAL_WRITE: u8 = 255;

#[derive(Error, Debug)]
pub enum AppError {
    /// A required positional argument is missing
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// The input text file could not be opened or read
    #[error("Failed to read input file {}: {source}", path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Speech synthesis failed and the pipeline did not continue
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// The audio stream returned by the synthesis service could not be read
    #[error("Failed to read audio stream: {0}")]
    AudioStream(String),

    /// The local scratch copy of the audio could not be written
    #[error("Failed to write audio file {}: {source}", path.display())]
    LocalWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rendered object key is not a valid object store path
    #[error("Invalid destination key '{key}': {source}")]
    InvalidDestination {
        key: String,
        #[source]
        source: object_store::path::Error,
    },

    /// The object store rejected the upload
    #[error("Failed to upload to bucket '{bucket}': {source}")]
    Upload {
        bucket: String,
        #[source]
        source: object_store::Error,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::LocalWrite { .. } => EXIT_LOCAL_WRITE,
            _ => EXIT_FAILURE,
        }
    }

    /// Whether the message belongs on standard output rather than standard error.
    ///
    /// Local write failures and unreachable-endpoint messages are printed to
    /// stdout; everything else is a diagnostic.
    pub fn prints_to_stdout(&self) -> bool {
        matches!(
            self,
            Self::LocalWrite { .. } | Self::Synthesis(SynthesisError::Connectivity(_))
        )
    }
}
