//! Command-line input resolution.
//!
//! Turns the three positional arguments into a [`ResolvedInputs`] value. All
//! three are checked before anything touches the filesystem or the network;
//! the text file is only opened later, by the pipeline.

use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::storage::DestinationTemplate;
use crate::errors::{AppError, AppResult};

/// A required positional argument is missing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    #[error("No text file specified")]
    MissingTextFile,
    #[error("No S3 bucket specified")]
    MissingBucket,
    #[error("No folder on S3 specified")]
    MissingFolder,
}

/// The validated positional arguments of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    /// Text file whose contents are synthesized
    pub text_file: PathBuf,
    /// Destination bucket
    pub bucket: String,
    /// Folder template the artifact name is substituted into
    pub destination: DestinationTemplate,
}

impl ResolvedInputs {
    /// Resolve the positional arguments, reporting the first one missing.
    pub fn resolve(
        text_file: Option<PathBuf>,
        bucket: Option<String>,
        folder: Option<String>,
    ) -> Result<Self, UsageError> {
        let text_file = text_file.ok_or(UsageError::MissingTextFile)?;
        let bucket = bucket.ok_or(UsageError::MissingBucket)?;
        let folder = folder.ok_or(UsageError::MissingFolder)?;

        Ok(Self {
            text_file,
            bucket,
            destination: DestinationTemplate::for_folder(&folder),
        })
    }

    /// Open the text file for reading.
    pub fn open_text_file(&self) -> AppResult<InputFile> {
        InputFile::open(&self.text_file).map_err(|source| AppError::InputFile {
            path: self.text_file.clone(),
            source,
        })
    }
}

/// How an [`InputFile`] handle was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
}

/// An open handle on the input text file.
#[derive(Debug)]
pub struct InputFile {
    path: PathBuf,
    file: File,
    mode: AccessMode,
}

impl InputFile {
    /// Open `path` in read mode.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Self::with_mode(path, AccessMode::Read)
    }

    /// Open `path` with an explicit access mode.
    ///
    /// Write mode creates the file if needed and never truncates it.
    pub fn with_mode(path: impl AsRef<Path>, mode: AccessMode) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = match mode {
            AccessMode::Read => File::open(&path)?,
            AccessMode::Write => OpenOptions::new().write(true).create(true).open(&path)?,
        };
        Ok(Self { path, file, mode })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Read the whole file as text.
    ///
    /// Returns `Ok(None)` when the handle was not opened for reading.
    pub fn read_text(&mut self) -> AppResult<Option<String>> {
        if self.mode != AccessMode::Read {
            debug!(path = %self.path.display(), mode = ?self.mode, "Input not opened for reading");
            return Ok(None);
        }

        let mut contents = String::new();
        self.file
            .read_to_string(&mut contents)
            .map_err(|source| AppError::InputFile {
                path: self.path.clone(),
                source,
            })?;

        Ok(Some(contents))
    }
}
