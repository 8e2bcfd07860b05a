//! Analysis output types.

use serde::Serialize;

use crate::presenter::SourceReference;
use crate::routing::params::Params;

/// How a router relates to the analyzed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Did not match, failed, or is unreachable because an ancestor list
    /// did not match.
    No,
    /// Matched, but an earlier router already won.
    May,
    /// The winning match.
    Yes,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::No => "no",
            MatchStatus::May => "may",
            MatchStatus::Yes => "yes",
        }
    }
}

/// Diagnostic row for one leaf router, in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticRecord {
    /// Nesting level; children of the root list sit at 0.
    pub depth: usize,

    pub status: MatchStatus,

    /// Router kind tag.
    pub kind: String,

    /// Default parameters, empty when the kind has none.
    pub defaults: Params,

    pub mask: Option<String>,

    /// Matched parameters, with the module applied to `presenter`.
    pub params: Option<Params>,

    /// Accumulated module prefix without the trailing `:`.
    pub module: String,

    /// Failure raised by the router while matching.
    pub error: Option<String>,

    /// Distance to the enclosing list's level when this row opens a list.
    pub gutter_top: Option<usize>,

    /// Distance to the enclosing list's level when this row closes a list.
    pub gutter_bottom: Option<usize>,
}

/// Everything one analysis produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub records: Vec<DiagnosticRecord>,

    /// Parameters of the winning match.
    pub matched: Option<Params>,

    /// Handler the winning match resolves to.
    pub source: Option<SourceReference>,
}

impl AnalysisResult {
    pub fn is_matched(&self) -> bool {
        self.matched.is_some()
    }

    /// The record of the winning router.
    pub fn winner(&self) -> Option<&DiagnosticRecord> {
        self.records.iter().find(|r| r.status == MatchStatus::Yes)
    }

    /// True when any router sits under a module.
    pub fn has_module(&self) -> bool {
        self.records.iter().any(|r| !r.module.is_empty())
    }

    /// Count of records with the given status.
    pub fn count(&self, status: MatchStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }
}
