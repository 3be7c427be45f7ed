//! # SprintQA Telemetry
//!
//! Structured logging for SprintQA using `tracing`.
//!
//! ## Usage
//!
//! ```rust
//! use sprintqa_telemetry::{LogFormat, info, init_telemetry};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     init_telemetry("sprintqa", LogFormat::Text)?;
//!     info!("ready");
//!     Ok(())
//! }
//! ```

pub mod init;
pub mod spans;

// Re-export tracing macros for convenience
pub use tracing::{Instrument, Span, debug, error, info, instrument, trace, warn};

pub use init::{DEFAULT_FILTER, LogFormat, init_telemetry};
pub use spans::*;
