pub mod config;
pub mod core;
pub mod errors;
pub mod input;
pub mod pipeline;

// Re-export commonly used items for convenience
pub use config::{SynthesisFailurePolicy, UploaderConfig};
pub use core::*;
pub use errors::app_error::{AppError, AppResult};
pub use input::{InputFile, ResolvedInputs, UsageError};
pub use pipeline::{Pipeline, RunOutcome};
