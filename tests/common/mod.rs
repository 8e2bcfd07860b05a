//! Shared stub routers and fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use routing_panel::presenter::{PresenterClass, PresenterRegistry};
use routing_panel::routing::params::{ParamValue, Params};
use routing_panel::routing::{HttpRequest, MatchError, Router};

/// A leaf router with a fixed outcome that counts how often it was asked.
#[derive(Debug, Clone)]
pub struct StubRouter {
    outcome: Result<Option<Params>, MatchError>,
    calls: Arc<AtomicUsize>,
}

impl StubRouter {
    /// Always matches with the given params.
    pub fn hit(pairs: &[(&str, &str)]) -> Self {
        Self::with_outcome(Ok(Some(params(pairs))))
    }

    /// Never matches.
    pub fn miss() -> Self {
        Self::with_outcome(Ok(None))
    }

    /// Always raises.
    pub fn failing(message: &str) -> Self {
        Self::with_outcome(Err(MatchError::Router(message.to_string())))
    }

    fn with_outcome(outcome: Result<Option<Params>, MatchError>) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter, usable after the stub moved into a tree.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl Router for StubRouter {
    fn match_request(&self, _request: &HttpRequest) -> Result<Option<Params>, MatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn kind(&self) -> &'static str {
        "StubRouter"
    }
}

pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), ParamValue::from(*v)))
        .collect()
}

pub fn get(url: &str) -> HttpRequest {
    HttpRequest::get(url).unwrap()
}

/// Registry with a `Home` presenter that only has a render view.
pub fn registry() -> PresenterRegistry {
    PresenterRegistry::new()
        .register(PresenterClass::ui("HomePresenter", ["renderDefault", "handleLogout"]))
        .register(PresenterClass::ui(
            "AdminModule\\UsersModule\\EditPresenter",
            ["actionDefault", "renderDefault"],
        ))
}
