pub mod app_error;

pub use app_error::{AppError, AppResult, EXIT_FAILURE, EXIT_LOCAL_WRITE};
