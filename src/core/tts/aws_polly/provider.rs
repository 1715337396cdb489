//! Amazon Polly synthesizer.
//!
//! Wraps the SynthesizeSpeech operation of the AWS SDK for Rust. Credentials,
//! region and endpoint all come from the [`SdkConfig`] the client is built
//! from, so the ambient AWS configuration (environment, profile files, IAM
//! roles) applies unchanged.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_polly::Client as PollyClient;
use aws_sdk_polly::error::{DisplayErrorContext, SdkError};
use tracing::{debug, error, info};

use super::config::PollySpeechConfig;
use crate::core::tts::base::{
    SpeechSynthesizer, SynthesisError, SynthesisResponse, SynthesisResult,
};

/// Amazon Polly speech synthesizer.
#[derive(Debug, Clone)]
pub struct PollySynthesizer {
    client: PollyClient,
    config: PollySpeechConfig,
}

impl PollySynthesizer {
    /// Create a synthesizer using the default speech configuration.
    pub fn new(client: PollyClient) -> Self {
        Self::with_config(client, PollySpeechConfig::default())
    }

    pub fn with_config(client: PollyClient, config: PollySpeechConfig) -> Self {
        Self { client, config }
    }

    /// Build the Polly client from a shared AWS configuration.
    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self::new(PollyClient::new(sdk_config))
    }

    pub fn speech_config(&self) -> &PollySpeechConfig {
        &self.config
    }
}

/// Split SDK failures into "never reached the service" and everything else.
fn classify_error<E, R>(err: SdkError<E, R>) -> SynthesisError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            SynthesisError::Connectivity(message)
        }
        _ => SynthesisError::Service(message),
    }
}

#[async_trait]
impl SpeechSynthesizer for PollySynthesizer {
    async fn synthesize(&self, text: &str) -> SynthesisResult<SynthesisResponse> {
        self.config.validate_text(text)?;

        debug!(
            text_len = text.len(),
            voice = self.config.voice.as_str(),
            output_format = self.config.output_format.as_str(),
            "Synthesizing text with Amazon Polly"
        );

        let output = self
            .client
            .synthesize_speech()
            .output_format(self.config.output_format.clone())
            .text(text)
            .text_type(self.config.text_type.clone())
            .voice_id(self.config.voice.clone())
            .send()
            .await
            .map_err(|e| {
                let err = classify_error(e);
                error!(error = %err, "Polly API error");
                err
            })?;

        info!(
            request_characters = output.request_characters(),
            content_type = output.content_type().unwrap_or("unknown"),
            "Amazon Polly synthesis complete"
        );

        let content_type = output.content_type().map(str::to_string);
        Ok(SynthesisResponse::with_audio(output.audio_stream, content_type))
    }

    fn provider_name(&self) -> &'static str {
        "aws-polly"
    }
}
