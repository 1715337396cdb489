//! Amazon Polly speech synthesis.
//!
//! Every request uses the same fixed configuration: plain text input, the
//! `Salli` voice and mp3 output. The SDK client handles request signing and
//! credential resolution.
//!
//! # Example
//!
//! ```rust,ignore
//! use polly_uploader::core::tts::{PollySynthesizer, SpeechSynthesizer};
//!
//! let sdk_config = aws_config::load_from_env().await;
//! let synthesizer = PollySynthesizer::from_sdk_config(&sdk_config);
//! let response = synthesizer.synthesize("Hello world").await?;
//! ```

mod config;
mod provider;

#[cfg(test)]
mod tests;

pub use config::{MAX_TEXT_LENGTH, PollySpeechConfig};
pub use provider::PollySynthesizer;
