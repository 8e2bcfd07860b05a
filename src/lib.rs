//! Routing diagnostics panel library.
//!
//! Analyzes a nested router tree against one request and reports which
//! routers matched, which did not and why, and where the winning match
//! would be handled.

pub mod analyzer;
pub mod config;
pub mod observability;
pub mod presenter;
pub mod report;
pub mod routing;

pub use analyzer::{analyze, AnalysisResult, Analyzer, DiagnosticRecord, MatchStatus};
pub use config::PanelConfig;
pub use presenter::{PresenterFactory, PresenterRegistry, SourceReference};
pub use routing::{HttpRequest, Router};
