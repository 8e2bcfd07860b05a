//! Mask-based leaf router.
//!
//! # Responsibilities
//! - Match the request path against a compiled mask
//! - Merge mask defaults, explicit defaults, captured values and query
//! - Normalize `presenter` and `action` values from their URL form
//!
//! # Design Decisions
//! - Captured values override defaults; query parameters never override
//!   either
//! - A URL may stop before trailing parameters only when defaults fill them
//! - A route restricted to methods never matches other methods
//! - A match that yields no presenter is an error, not a silent no-match

use std::collections::BTreeSet;

use crate::routing::mask::{CompiledMask, MaskError};
use crate::routing::params::{ParamValue, Params, ACTION_KEY, PRESENTER_KEY};
use crate::routing::request::HttpRequest;
use crate::routing::router::{MatchError, Router};

/// A route defined by a mask such as `<presenter>/<action>[/<id>]`.
#[derive(Debug, Clone)]
pub struct Route {
    mask: CompiledMask,
    defaults: Params,
    methods: BTreeSet<String>,
}

impl Route {
    /// Compile `mask` into a route. Defaults written in the mask are recorded.
    pub fn new(mask: &str) -> Result<Self, MaskError> {
        let mask = CompiledMask::new(mask)?;
        let defaults = mask
            .params()
            .iter()
            .filter_map(|p| {
                p.default
                    .as_ref()
                    .map(|d| (p.name.clone(), ParamValue::from(d.as_str())))
            })
            .collect();

        Ok(Self {
            mask,
            defaults,
            methods: BTreeSet::new(),
        })
    }

    /// Add or replace a default parameter.
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Merge a whole default mapping, replacing existing keys.
    pub fn with_defaults(mut self, defaults: Params) -> Self {
        self.defaults.extend(defaults);
        self
    }

    /// Restrict the route to the given HTTP methods.
    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.methods = methods
            .into_iter()
            .map(|m| m.as_ref().to_ascii_uppercase())
            .collect();
        self
    }
}

impl Router for Route {
    fn match_request(&self, request: &HttpRequest) -> Result<Option<Params>, MatchError> {
        if !self.methods.is_empty() && !self.methods.contains(request.method()) {
            return Ok(None);
        }

        let Some(captured) = self.mask.captures(request.path()) else {
            return Ok(None);
        };
        let complete = self
            .mask
            .params()
            .iter()
            .filter(|p| p.required)
            .all(|p| captured.contains_key(&p.name) || self.defaults.contains_key(&p.name));
        if !complete {
            return Ok(None);
        }

        let mut params = self.defaults.clone();
        for (key, value) in captured {
            params.insert(key, ParamValue::String(value));
        }
        for (key, value) in request.query() {
            params.entry(key).or_insert(ParamValue::String(value));
        }

        match params.get_mut(PRESENTER_KEY) {
            Some(ParamValue::String(presenter)) if !presenter.is_empty() => {
                let normalized = presenter_from_url(presenter)
                    .ok_or_else(|| MatchError::InvalidPresenter(presenter.clone()))?;
                *presenter = normalized;
            }
            _ => return Err(MatchError::MissingPresenter),
        }
        if let Some(ParamValue::String(action)) = params.get_mut(ACTION_KEY) {
            *action = action_from_url(action);
        }

        Ok(Some(params))
    }

    fn kind(&self) -> &'static str {
        "Route"
    }

    fn defaults(&self) -> Option<&Params> {
        Some(&self.defaults)
    }

    fn mask(&self) -> Option<&str> {
        Some(self.mask.as_str())
    }
}

/// `admin.user-list` → `Admin:UserList`.
///
/// Returns `None` when a module segment would be empty.
pub fn presenter_from_url(value: &str) -> Option<String> {
    value
        .split('.')
        .map(|segment| {
            let name = camelize(segment, true);
            (!name.is_empty()).then_some(name)
        })
        .collect::<Option<Vec<_>>>()
        .map(|segments| segments.join(":"))
}

/// `edit-user` → `editUser`.
pub fn action_from_url(value: &str) -> String {
    camelize(value, false)
}

fn camelize(value: &str, upper_first: bool) -> String {
    let mut out = String::with_capacity(value.len());
    let mut upper = upper_first;
    for c in value.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
