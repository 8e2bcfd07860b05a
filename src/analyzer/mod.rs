//! Routing analysis subsystem.
//!
//! # Data Flow
//! ```text
//! root Router + HttpRequest
//!     → tree.rs (depth-first walk, first match wins)
//!         → presenter::resolve (winning params → SourceReference)
//!     → record.rs (DiagnosticRecord per leaf, AnalysisResult)
//!     → report / JSON output
//! ```
//!
//! # Design Decisions
//! - Analysis is pure and deterministic for deterministic routers
//! - Exactly zero or one record is `yes`
//! - Nothing is cached between analyses

pub mod record;
pub mod tree;

pub use record::{AnalysisResult, DiagnosticRecord, MatchStatus};
pub use tree::{analyze, Analyzer};
