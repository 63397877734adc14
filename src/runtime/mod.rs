//! Runtime wiring and lifecycle management.
//!
//! # Main Components
//!
//! - [`StorefrontShell`] - Builds every controller from injected [`Collaborators`] and shuts them down
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure
//! - [`ShellError`] - Lifecycle failures

pub mod error;
pub mod shell;
pub mod tracing;

pub use error::*;
pub use shell::*;
pub use self::tracing::*;
