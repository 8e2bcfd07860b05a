//! Matched route parameters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Key under which routers report the target presenter.
pub const PRESENTER_KEY: &str = "presenter";

/// Key under which routers report the presenter action.
pub const ACTION_KEY: &str = "action";

/// Key under which routers report a signal to be handled.
pub const SIGNAL_KEY: &str = "signal";

/// Ordered parameter mapping produced by a successful match.
///
/// A `BTreeMap` keeps iteration order stable so two analyses of the same
/// request compare equal.
pub type Params = BTreeMap<String, ParamValue>;

/// A scalar parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ParamValue {
    /// Returns the value as a string slice if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => write!(f, "null"),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

/// Non-empty string value stored under `key`, if any.
pub fn string_param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .and_then(ParamValue::as_str)
        .filter(|s| !s.is_empty())
}

/// Renders params as `key=value` pairs joined by `, `.
pub fn format_params(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_deserialize() {
        let params: Params =
            toml::from_str("presenter = \"Home\"\nid = 5\nactive = true").unwrap();
        assert_eq!(params["presenter"], ParamValue::from("Home"));
        assert_eq!(params["id"], ParamValue::Int(5));
        assert_eq!(params["active"], ParamValue::Bool(true));
    }

    #[test]
    fn test_string_param_skips_empty() {
        let mut params = Params::new();
        params.insert("action".into(), "".into());
        params.insert("presenter".into(), "Home".into());
        assert_eq!(string_param(&params, "presenter"), Some("Home"));
        assert_eq!(string_param(&params, "action"), None);
        assert_eq!(string_param(&params, "missing"), None);
    }

    #[test]
    fn test_format_params_is_ordered() {
        let mut params = Params::new();
        params.insert("presenter".into(), "Home".into());
        params.insert("action".into(), "default".into());
        params.insert("id".into(), ParamValue::Int(3));
        assert_eq!(format_params(&params), "action=default, id=3, presenter=Home");
    }
}
