//! Builder API for session construction.
//!
//! Sessions are assembled with a fluent builder that validates the target
//! duration and configuration before a session can exist.

pub mod config;
pub mod error;
pub mod session;

pub use config::SessionConfig;
pub use error::BuildError;
pub use session::SessionBuilder;
