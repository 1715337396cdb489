//! Read, synthesize, upload.
//!
//! [`Pipeline`] sequences one run: resolve the object path, open the input
//! file, synthesize its text, decide what to do with an unreachable synthesis
//! endpoint, then hand the response to the uploader.

use tracing::{debug, warn};

use crate::config::SynthesisFailurePolicy;
use crate::core::storage::{ArtifactUploader, DestinationTemplate, UploadOutcome};
use crate::core::tts::{SpeechSynthesizer, SynthesisResponse};
use crate::errors::AppResult;
use crate::input::{InputFile, ResolvedInputs};

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The artifact was stored under `key`
    Uploaded { key: String, bytes: usize },
    /// Synthesis produced no audio, so nothing was uploaded
    NoAudio,
    /// The input was not readable text and synthesis never ran
    SynthesisSkipped,
}

impl From<UploadOutcome> for RunOutcome {
    fn from(outcome: UploadOutcome) -> Self {
        match outcome {
            UploadOutcome::Uploaded { key, bytes } => Self::Uploaded { key, bytes },
            UploadOutcome::NoAudio => Self::NoAudio,
        }
    }
}

pub struct Pipeline {
    synthesizer: Box<dyn SpeechSynthesizer>,
    uploader: ArtifactUploader,
    on_unreachable: SynthesisFailurePolicy,
}

impl Pipeline {
    pub fn new(
        synthesizer: Box<dyn SpeechSynthesizer>,
        uploader: ArtifactUploader,
        on_unreachable: SynthesisFailurePolicy,
    ) -> Self {
        Self {
            synthesizer,
            uploader,
            on_unreachable,
        }
    }

    /// Run once for `inputs`.
    ///
    /// The uploader is already bound to the bucket in `inputs`; only the
    /// text file and destination template are read from it here.
    pub async fn run(&self, inputs: &ResolvedInputs) -> AppResult<RunOutcome> {
        let input = inputs.open_text_file()?;
        self.run_with_input(input, &inputs.destination).await
    }

    /// Run once on an already opened input handle.
    pub async fn run_with_input(
        &self,
        mut input: InputFile,
        destination: &DestinationTemplate,
    ) -> AppResult<RunOutcome> {
        let location = self.uploader.location(destination)?;

        let Some(text) = input.read_text()? else {
            debug!(path = %input.path().display(), "Skipping synthesis");
            return Ok(RunOutcome::SynthesisSkipped);
        };

        debug!(
            provider = self.synthesizer.provider_name(),
            characters = text.chars().count(),
            "Input text loaded"
        );

        let response = match self.synthesizer.synthesize(&text).await {
            Ok(response) => response,
            Err(err) if err.is_connectivity() => match self.on_unreachable {
                SynthesisFailurePolicy::Continue => {
                    println!("{err}");
                    warn!(
                        policy = %self.on_unreachable,
                        "Synthesis endpoint unreachable, continuing without audio"
                    );
                    SynthesisResponse::empty()
                }
                SynthesisFailurePolicy::Abort => return Err(err.into()),
            },
            Err(err) => return Err(err.into()),
        };

        let outcome = self.uploader.upload(response, &location).await?;
        Ok(outcome.into())
    }
}
