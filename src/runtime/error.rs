//! Error types for the shell lifecycle.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShellError {
    /// A background task owned by the shell panicked.
    #[error("Shell task failed: {0}")]
    TaskFailed(String),
}
