//! Depth-first route tree analysis.
//!
//! # Responsibilities
//! - Evaluate every leaf router against one request
//! - Classify leaves as `no`, `may` or `yes`
//! - Resolve the first successful match to its handler
//! - Attach gutter spans to the rows that open and close each list
//!
//! # Design Decisions
//! - Per-call `Traversal` state; the analyzer itself holds no results
//! - Router failures are recorded on their row and never abort the walk
//! - Leaves under a list that did not match are listed but not evaluated
//! - A list whose own match raises is treated as reachable
//! - Lists get no row of their own

use crate::analyzer::record::{AnalysisResult, DiagnosticRecord, MatchStatus};
use crate::presenter::{resolve, PresenterFactory, SourceReference};
use crate::routing::params::{ParamValue, Params, PRESENTER_KEY};
use crate::routing::request::HttpRequest;
use crate::routing::route_list::RouteList;
use crate::routing::router::Router;

/// Analyzes router trees, resolving winners through a presenter factory.
#[derive(Clone, Copy)]
pub struct Analyzer<'a> {
    factory: &'a dyn PresenterFactory,
}

impl<'a> Analyzer<'a> {
    pub fn new(factory: &'a dyn PresenterFactory) -> Self {
        Self { factory }
    }

    /// Walk `router` against `request`. Never fails.
    pub fn analyze(&self, router: &dyn Router, request: &HttpRequest) -> AnalysisResult {
        let span = tracing::info_span!("analyze", method = request.method(), url = %request.url());
        let _enter = span.enter();

        let mut traversal = Traversal {
            request,
            factory: self.factory,
            records: Vec::new(),
            matched: None,
            source: None,
        };
        // The root list sits one level above its children.
        traversal.visit(router, "", true, -1);

        let result = AnalysisResult {
            records: traversal.records,
            matched: traversal.matched,
            source: traversal.source,
        };
        tracing::info!(
            routers = result.records.len(),
            matched = result.is_matched(),
            source = result.source.as_ref().map(tracing::field::display),
            "Routing analysis complete"
        );
        result
    }
}

/// Analyze `router` against `request` with a one-off analyzer.
pub fn analyze(
    router: &dyn Router,
    request: &HttpRequest,
    factory: &dyn PresenterFactory,
) -> AnalysisResult {
    Analyzer::new(factory).analyze(router, request)
}

struct Traversal<'a> {
    request: &'a HttpRequest,
    factory: &'a dyn PresenterFactory,
    records: Vec<DiagnosticRecord>,
    matched: Option<Params>,
    source: Option<SourceReference>,
}

impl Traversal<'_> {
    fn visit(&mut self, router: &dyn Router, module: &str, ancestors_matched: bool, level: isize) {
        match router.as_route_list() {
            Some(list) => self.visit_list(list, module, ancestors_matched, level),
            None => self.visit_leaf(router, module, ancestors_matched, level),
        }
    }

    fn visit_list(
        &mut self,
        list: &RouteList,
        module: &str,
        ancestors_matched: bool,
        level: isize,
    ) {
        // A list whose match raises stays reachable so the raising router
        // shows up on its own row.
        let matched = ancestors_matched
            && match list.match_request(self.request) {
                Ok(params) => params.is_some(),
                Err(e) => {
                    tracing::warn!(
                        module = list.module(),
                        error = %e,
                        "Route list failed while matching"
                    );
                    true
                }
            };

        let next = self.records.len();
        let child_module = format!("{}{}", module, list.module());
        for child in list.routers() {
            self.visit(child.as_ref(), &child_module, matched, level + 1);
        }

        if self.records.len() > next {
            let base = depth_of(level);
            let first = &mut self.records[next];
            first.gutter_top = Some(base.abs_diff(first.depth));
            if let Some(last) = self.records.last_mut() {
                last.gutter_bottom = Some(base.abs_diff(last.depth));
            }
        }
    }

    fn visit_leaf(
        &mut self,
        router: &dyn Router,
        module: &str,
        ancestors_matched: bool,
        level: isize,
    ) {
        let mut params = None;
        let mut error = None;
        if ancestors_matched {
            match router.match_request(self.request) {
                Ok(matched) => params = matched,
                Err(e) => {
                    tracing::debug!(
                        kind = router.kind(),
                        error = %e,
                        "Router failed while matching"
                    );
                    error = Some(e.to_string());
                }
            }
        }

        let mut status = MatchStatus::No;
        if let Some(params) = params.as_mut() {
            if !module.is_empty() {
                if let Some(ParamValue::String(presenter)) = params.get_mut(PRESENTER_KEY) {
                    presenter.insert_str(0, module);
                }
            }

            status = MatchStatus::May;
            if self.matched.is_none() {
                self.source = resolve(params, self.factory);
                self.matched = Some(params.clone());
                status = MatchStatus::Yes;
            }
        }

        tracing::debug!(
            kind = router.kind(),
            mask = router.mask(),
            status = status.as_str(),
            "Router evaluated"
        );

        self.records.push(DiagnosticRecord {
            depth: depth_of(level),
            status,
            kind: router.kind().to_string(),
            defaults: router.defaults().cloned().unwrap_or_default(),
            mask: router.mask().map(str::to_string),
            params,
            module: module.trim_end_matches(':').to_string(),
            error,
            gutter_top: None,
            gutter_bottom: None,
        });
    }
}

fn depth_of(level: isize) -> usize {
    usize::try_from(level).unwrap_or(0)
}
