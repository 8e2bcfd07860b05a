//! Query-string leaf router.

use crate::routing::params::{ParamValue, Params, PRESENTER_KEY};
use crate::routing::request::HttpRequest;
use crate::routing::router::{MatchError, Router};

/// Routes `/?presenter=Product&action=show` style URLs.
///
/// Only requests to the base path match; everything else is read from the
/// query string on top of the defaults.
#[derive(Debug, Clone)]
pub struct SimpleRouter {
    base_path: String,
    defaults: Params,
}

impl SimpleRouter {
    pub fn new(defaults: Params) -> Self {
        Self {
            base_path: "/".to_string(),
            defaults,
        }
    }

    /// Match under `base_path` instead of `/`.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        let mut base_path = base_path.into();
        if !base_path.starts_with('/') {
            base_path.insert(0, '/');
        }
        self.base_path = base_path;
        self
    }
}

impl Default for SimpleRouter {
    fn default() -> Self {
        Self::new(Params::new())
    }
}

impl Router for SimpleRouter {
    fn match_request(&self, request: &HttpRequest) -> Result<Option<Params>, MatchError> {
        if request.path() != self.base_path {
            return Ok(None);
        }

        let mut params = self.defaults.clone();
        for (key, value) in request.query() {
            params.insert(key, ParamValue::String(value));
        }

        match params.get(PRESENTER_KEY) {
            Some(ParamValue::String(p)) if !p.is_empty() => Ok(Some(params)),
            _ => Err(MatchError::MissingPresenter),
        }
    }

    fn kind(&self) -> &'static str {
        "SimpleRouter"
    }

    fn defaults(&self) -> Option<&Params> {
        Some(&self.defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Params {
        let mut params = Params::new();
        params.insert("presenter".into(), "Home".into());
        params.insert("action".into(), "default".into());
        params
    }

    #[test]
    fn test_query_overrides_defaults() {
        let router = SimpleRouter::new(defaults());
        let req = HttpRequest::get("http://x/?presenter=Product&id=3").unwrap();
        let params = router.match_request(&req).unwrap().unwrap();
        assert_eq!(params["presenter"], ParamValue::from("Product"));
        assert_eq!(params["action"], ParamValue::from("default"));
        assert_eq!(params["id"], ParamValue::from("3"));
    }

    #[test]
    fn test_other_paths_do_not_match() {
        let router = SimpleRouter::new(defaults()).with_base_path("index.php");
        let req = HttpRequest::get("http://x/about").unwrap();
        assert_eq!(router.match_request(&req).unwrap(), None);

        let req = HttpRequest::get("http://x/index.php").unwrap();
        assert!(router.match_request(&req).unwrap().is_some());
    }

    #[test]
    fn test_presenter_required() {
        let router = SimpleRouter::default();
        let req = HttpRequest::get("http://x/").unwrap();
        assert_eq!(router.match_request(&req), Err(MatchError::MissingPresenter));
        assert!(router.mask().is_none());
        assert!(router.defaults().unwrap().is_empty());
    }
}
