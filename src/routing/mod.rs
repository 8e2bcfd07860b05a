//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! HttpRequest (method, url)
//!     → router.rs (Router trait: match_request → Params | no match | MatchError)
//!         → route_list.rs (composite: first matching sub-router, module prefix)
//!         → route.rs (mask leaf, compiled by mask.rs)
//!         → simple.rs (query-string leaf)
//!     → Return: Params or no match
//! ```
//!
//! # Design Decisions
//! - Router trees are built once and never mutated
//! - Deterministic: same request always yields the same params
//! - First match wins (list order is precedence)

pub mod mask;
pub mod params;
pub mod request;
pub mod route;
pub mod route_list;
pub mod router;
pub mod simple;

pub use params::{ParamValue, Params};
pub use request::HttpRequest;
pub use route::Route;
pub use route_list::RouteList;
pub use router::{MatchError, Router};
pub use simple::SimpleRouter;
