//! Handler resolution for a winning match.
//!
//! # Responsibilities
//! - Resolve the matched presenter identifier to its class
//! - Pick the signal, action or render method the request would run
//!
//! # Design Decisions
//! - An unresolvable presenter yields no source reference, never an error
//! - Signals take precedence over actions
//! - A missing `action<Name>` falls back to `render<Name>`

use std::fmt;

use serde::Serialize;

use crate::presenter::class::{format_action_method, format_render_method, format_signal_method};
use crate::presenter::factory::PresenterFactory;
use crate::routing::params::{string_param, Params, ACTION_KEY, PRESENTER_KEY, SIGNAL_KEY};

/// Where a request would be handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceReference {
    Class { class: String },
    Method { class: String, method: String },
}

impl SourceReference {
    pub fn class(&self) -> &str {
        match self {
            SourceReference::Class { class } | SourceReference::Method { class, .. } => class,
        }
    }

    pub fn method(&self) -> Option<&str> {
        match self {
            SourceReference::Class { .. } => None,
            SourceReference::Method { method, .. } => Some(method),
        }
    }
}

impl fmt::Display for SourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceReference::Class { class } => write!(f, "{}", class),
            SourceReference::Method { class, method } => write!(f, "{}::{}()", class, method),
        }
    }
}

/// Resolve matched params to the class or method that would handle them.
pub fn resolve(params: &Params, factory: &dyn PresenterFactory) -> Option<SourceReference> {
    let presenter = string_param(params, PRESENTER_KEY).unwrap_or_default();
    let class = match factory.class_for(presenter) {
        Ok(class) => class,
        Err(e) => {
            tracing::debug!(presenter, error = %e, "Presenter not resolvable");
            return None;
        }
    };

    let mut method = None;
    if class.is_interactive() {
        if let Some(signal) = string_param(params, SIGNAL_KEY) {
            method = Some(format_signal_method(signal));
        } else if let Some(action) = string_param(params, ACTION_KEY) {
            let action_method = format_action_method(action);
            method = Some(if class.has_method(&action_method) {
                action_method
            } else {
                format_render_method(action)
            });
        }
    }

    let source = match method.filter(|m| class.has_method(m)) {
        Some(method) => SourceReference::Method {
            class: class.name.clone(),
            method,
        },
        None => SourceReference::Class {
            class: class.name.clone(),
        },
    };
    Some(source)
}
