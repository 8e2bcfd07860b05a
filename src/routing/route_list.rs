//! Composite router.

use crate::routing::params::{ParamValue, Params, PRESENTER_KEY};
use crate::routing::request::HttpRequest;
use crate::routing::router::{MatchError, Router};

/// An ordered list of sub-routers with an optional module prefix.
///
/// Order is precedence: the first sub-router that matches wins. The module
/// (e.g. `"Admin:"`) is prepended to the `presenter` of whatever matched.
/// A list bound to a host matches nothing on other hosts.
#[derive(Debug, Default)]
pub struct RouteList {
    module: Option<String>,
    host: Option<String>,
    routers: Vec<Box<dyn Router>>,
}

impl RouteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list whose matches live under `module`.
    pub fn with_module(module: impl Into<String>) -> Self {
        Self {
            module: Some(module.into()),
            ..Self::default()
        }
    }

    /// Restrict the list to one host (case-insensitive).
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into().to_lowercase());
        self
    }

    /// Append a sub-router (lowest precedence so far).
    pub fn add(mut self, router: impl Router + 'static) -> Self {
        self.routers.push(Box::new(router));
        self
    }

    /// Append an already boxed sub-router.
    pub fn push(&mut self, router: Box<dyn Router>) {
        self.routers.push(router);
    }

    /// Module prefix, empty when none was set.
    pub fn module(&self) -> &str {
        self.module.as_deref().unwrap_or_default()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn routers(&self) -> &[Box<dyn Router>] {
        &self.routers
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }
}

impl Router for RouteList {
    fn match_request(&self, request: &HttpRequest) -> Result<Option<Params>, MatchError> {
        if let Some(host) = &self.host {
            let matches = request
                .url()
                .host_str()
                .map(|h| h.to_lowercase() == *host)
                .unwrap_or(false);
            if !matches {
                return Ok(None);
            }
        }

        for router in &self.routers {
            if let Some(mut params) = router.match_request(request)? {
                let module = self.module();
                if !module.is_empty() {
                    if let Some(ParamValue::String(presenter)) = params.get_mut(PRESENTER_KEY) {
                        presenter.insert_str(0, module);
                    }
                }
                return Ok(Some(params));
            }
        }
        Ok(None)
    }

    fn kind(&self) -> &'static str {
        "RouteList"
    }

    fn as_route_list(&self) -> Option<&RouteList> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::route::Route;

    #[test]
    fn test_first_match_wins() {
        let list = RouteList::new()
            .add(Route::new("about").unwrap().with_default("presenter", "About"))
            .add(Route::new("<presenter>").unwrap());

        let req = HttpRequest::get("http://example.com/about").unwrap();
        let params = list.match_request(&req).unwrap().unwrap();
        assert_eq!(params["presenter"], ParamValue::from("About"));
    }

    #[test]
    fn test_module_is_prepended() {
        let list = RouteList::with_module("Admin:")
            .add(RouteList::with_module("Users:").add(Route::new("<presenter>").unwrap()));

        let req = HttpRequest::get("http://example.com/edit").unwrap();
        let params = list.match_request(&req).unwrap().unwrap();
        assert_eq!(params["presenter"], ParamValue::from("Admin:Users:Edit"));
    }

    #[test]
    fn test_host_restriction() {
        let list = RouteList::new()
            .with_host("Admin.Example.com")
            .add(Route::new("<presenter>").unwrap());

        let req = HttpRequest::get("http://admin.example.com/dashboard").unwrap();
        assert!(list.match_request(&req).unwrap().is_some());

        let req = HttpRequest::get("http://www.example.com/dashboard").unwrap();
        assert_eq!(list.match_request(&req).unwrap(), None);
        assert_eq!(list.host(), Some("admin.example.com"));
    }

    #[test]
    fn test_no_match() {
        let list =
            RouteList::new().add(Route::new("about").unwrap().with_default("presenter", "About"));
        let req = HttpRequest::get("http://example.com/contact").unwrap();
        assert_eq!(list.match_request(&req).unwrap(), None);
        assert_eq!(list.kind(), "RouteList");
        assert!(list.as_route_list().is_some());
    }
}
