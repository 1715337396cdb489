pub mod aws_polly;
mod base;

pub use aws_polly::{MAX_TEXT_LENGTH, PollySpeechConfig, PollySynthesizer};
pub use base::{SpeechSynthesizer, SynthesisError, SynthesisResponse, SynthesisResult};
