//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! analyzer / presenter / config produce:
//!     → tracing events with structured fields
//!     → logging.rs (subscriber, env filter, stderr)
//! ```
//!
//! # Design Decisions
//! - Structured fields over formatted messages
//! - One span per analysis carrying method and URL

pub mod logging;
