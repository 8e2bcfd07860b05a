//! Presenter class descriptors.
//!
//! A presenter class declares its method table explicitly; the resolver
//! looks method names up here instead of inspecting code at runtime.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// What kind of handler a presenter class is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenterKind {
    /// Interactive presenter with actions, render views and signals.
    #[default]
    Ui,
    /// Any other handler; only the class itself can be pointed at.
    Plain,
}

/// A concrete presenter class and the methods it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenterClass {
    /// Fully qualified class name, e.g. `App\Presenters\HomePresenter`.
    pub name: String,

    #[serde(default)]
    pub kind: PresenterKind,

    #[serde(default)]
    pub methods: BTreeSet<String>,
}

impl PresenterClass {
    pub fn new(name: impl Into<String>, kind: PresenterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            methods: BTreeSet::new(),
        }
    }

    /// Interactive presenter with the given methods.
    pub fn ui<I, S>(name: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, PresenterKind::Ui).with_methods(methods)
    }

    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods.extend(methods.into_iter().map(Into::into));
        self
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    pub fn is_interactive(&self) -> bool {
        self.kind == PresenterKind::Ui
    }
}

/// `show` → `actionShow`.
pub fn format_action_method(action: &str) -> String {
    format!("action{}", upper_first(action))
}

/// `show` → `renderShow`.
pub fn format_render_method(view: &str) -> String {
    format!("render{}", upper_first(view))
}

/// `logout` → `handleLogout`.
pub fn format_signal_method(signal: &str) -> String {
    format!("handle{}", upper_first(signal))
}

fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
