//! Speech synthesis abstraction.

use async_trait::async_trait;
use aws_sdk_polly::primitives::ByteStream;
use thiserror::Error;

/// Result type for synthesis operations
pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Errors returned by a [`SpeechSynthesizer`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// The synthesis endpoint could not be reached
    #[error("Could not connect to the endpoint URL: {0}")]
    Connectivity(String),

    /// The service answered with an error
    #[error("Speech synthesis failed: {0}")]
    Service(String),

    /// The text exceeds what a single request accepts
    #[error("Text length {length} exceeds maximum {max} characters")]
    TextTooLong { length: usize, max: usize },
}

impl SynthesisError {
    /// Whether the failure happened before the service could answer.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}

/// Result of a synthesis call.
///
/// The audio stream is optional: an empty response is what the pipeline
/// hands to the uploader when it continues past an unreachable endpoint.
#[derive(Debug, Default)]
pub struct SynthesisResponse {
    /// Encoded audio, when the service produced any
    pub audio_stream: Option<ByteStream>,
    /// MIME type reported by the service
    pub content_type: Option<String>,
}

impl SynthesisResponse {
    /// A response carrying an audio stream.
    pub fn with_audio(audio_stream: ByteStream, content_type: Option<String>) -> Self {
        Self {
            audio_stream: Some(audio_stream),
            content_type,
        }
    }

    /// A response without audio.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A remote text-to-speech capability.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with the synthesizer's fixed voice and format.
    async fn synthesize(&self, text: &str) -> SynthesisResult<SynthesisResponse>;

    /// Short provider name used in logs.
    fn provider_name(&self) -> &'static str;
}
