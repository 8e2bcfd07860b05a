//! Router abstraction.
//!
//! # Responsibilities
//! - Define the matching contract shared by every router kind
//! - Expose optional capabilities (children, defaults, mask) without reflection
//!
//! # Design Decisions
//! - Routers are immutable trait objects shared by reference
//! - `match_request` returns `Ok(None)` for "no match" and `Err` only when
//!   the router itself fails
//! - Capability queries default to `None`; kinds opt in by overriding them

use std::fmt;

use thiserror::Error;

use crate::routing::params::Params;
use crate::routing::request::HttpRequest;
use crate::routing::route_list::RouteList;

/// Errors raised by a router while matching a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The router matched but produced no presenter to dispatch to.
    #[error("Missing presenter in route parameters")]
    MissingPresenter,

    /// The matched presenter value cannot be a presenter name.
    #[error("Invalid presenter name '{0}'")]
    InvalidPresenter(String),

    /// Any other router-specific failure.
    #[error("Router failure: {0}")]
    Router(String),
}

/// A component deciding whether and how a request maps to named parameters.
pub trait Router: Send + Sync + fmt::Debug {
    /// Match the request, returning the extracted parameters on success.
    fn match_request(&self, request: &HttpRequest) -> Result<Option<Params>, MatchError>;

    /// Identifying tag of the router kind.
    fn kind(&self) -> &'static str;

    /// Narrow to a composite router.
    fn as_route_list(&self) -> Option<&RouteList> {
        None
    }

    /// Default parameters, for kinds that carry them.
    fn defaults(&self) -> Option<&Params> {
        None
    }

    /// Pattern mask, for kinds that carry one.
    fn mask(&self) -> Option<&str> {
        None
    }
}
