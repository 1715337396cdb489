pub mod aws;
pub mod storage;
pub mod tts;

pub use aws::load_sdk_config;
pub use storage::{
    ArtifactName, ArtifactUploader, DestinationTemplate, RunTimestamp, UploadOutcome,
    build_s3_store,
};
pub use tts::{
    PollySynthesizer, SpeechSynthesizer, SynthesisError, SynthesisResponse, SynthesisResult,
};
