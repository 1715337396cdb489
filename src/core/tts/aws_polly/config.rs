//! Request configuration for Amazon Polly.
//!
//! The uploader always asks for the same thing: plain text read by `Salli`,
//! returned as mp3. [`PollySpeechConfig::default`] is that configuration.

use aws_sdk_polly::types::{OutputFormat, TextType, VoiceId};

use crate::core::tts::base::{SynthesisError, SynthesisResult};

/// Maximum billed characters accepted by a single SynthesizeSpeech request.
pub const MAX_TEXT_LENGTH: usize = 3000;

/// Voice, format and text type sent with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollySpeechConfig {
    /// Voice reading the text
    pub voice: VoiceId,
    /// Encoding of the returned audio
    pub output_format: OutputFormat,
    /// Whether the input is plain text or SSML
    pub text_type: TextType,
}

impl Default for PollySpeechConfig {
    fn default() -> Self {
        Self {
            voice: VoiceId::Salli,
            output_format: OutputFormat::Mp3,
            text_type: TextType::Text,
        }
    }
}

impl PollySpeechConfig {
    /// MIME type of the audio this configuration produces.
    pub fn mime_type(&self) -> &'static str {
        match self.output_format {
            OutputFormat::Mp3 => "audio/mpeg",
            OutputFormat::OggVorbis => "audio/ogg",
            OutputFormat::Pcm => "audio/pcm",
            _ => "application/octet-stream",
        }
    }

    /// File extension, with the leading dot, for local copies of the audio.
    pub fn file_extension(&self) -> &'static str {
        match self.output_format {
            OutputFormat::Mp3 => ".mp3",
            OutputFormat::OggVorbis => ".ogg",
            OutputFormat::Pcm => ".pcm",
            _ => ".bin",
        }
    }

    /// Reject text longer than one request can carry.
    pub fn validate_text(&self, text: &str) -> SynthesisResult<()> {
        let length = text.chars().count();
        if length > MAX_TEXT_LENGTH {
            return Err(SynthesisError::TextTooLong {
                length,
                max: MAX_TEXT_LENGTH,
            });
        }
        Ok(())
    }
}
