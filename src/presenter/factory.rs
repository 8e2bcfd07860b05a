//! Presenter lookup.
//!
//! # Responsibilities
//! - Validate presenter identifiers (`Admin:Users:Edit`)
//! - Map identifiers to class names through module mappings
//! - Look the class up in the registry
//!
//! # Design Decisions
//! - The mapping for the first module segment wins over `*`
//! - Registry is read-only once built

use std::collections::BTreeMap;

use thiserror::Error;

use crate::presenter::class::PresenterClass;

/// Errors raised when a presenter identifier cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenterError {
    #[error("Presenter name '{0}' must be alphanumeric with ':' separated modules")]
    InvalidName(String),

    #[error("Cannot load presenter '{name}', class '{class}' was not found")]
    NotFound { name: String, class: String },

    #[error("Invalid presenter mapping '{0}'")]
    InvalidMapping(String),
}

/// Capability to turn a presenter identifier into its class.
pub trait PresenterFactory {
    fn class_for(&self, name: &str) -> Result<&PresenterClass, PresenterError>;
}

/// A parsed mapping mask such as `App\*Module\Presenters\*Presenter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenterMapping {
    prefix: String,
    module: String,
    presenter: String,
}

impl PresenterMapping {
    /// Parse a mapping mask.
    ///
    /// With two `*` the backslash segment holding the first one formats
    /// modules; with a single `*` modules use the `*Module\` default.
    pub fn parse(mask: &str) -> Result<Self, PresenterError> {
        let mask = mask.trim_start_matches('\\');
        let invalid = || PresenterError::InvalidMapping(mask.to_string());

        match mask.matches('*').count() {
            1 => Ok(Self {
                prefix: String::new(),
                module: "*Module\\".to_string(),
                presenter: mask.to_string(),
            }),
            2 => {
                let star = mask.find('*').ok_or_else(invalid)?;
                let start = mask[..star].rfind('\\').map_or(0, |i| i + 1);
                let end = mask[star..]
                    .find('\\')
                    .map(|i| star + i + 1)
                    .ok_or_else(invalid)?;
                Ok(Self {
                    prefix: mask[..start].to_string(),
                    module: mask[start..end].to_string(),
                    presenter: mask[end..].to_string(),
                })
            }
            _ => Err(invalid()),
        }
    }

    fn format(&self, parts: &[&str]) -> String {
        let mut class = self.prefix.clone();
        if let Some((presenter, modules)) = parts.split_last() {
            for module in modules {
                class.push_str(&self.module.replacen('*', module, 1));
            }
            class.push_str(&self.presenter.replacen('*', presenter, 1));
        }
        class
    }
}

impl Default for PresenterMapping {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            module: "*Module\\".to_string(),
            presenter: "*Presenter".to_string(),
        }
    }
}

/// In-memory presenter factory.
#[derive(Debug, Clone)]
pub struct PresenterRegistry {
    mappings: BTreeMap<String, PresenterMapping>,
    classes: BTreeMap<String, PresenterClass>,
}

impl Default for PresenterRegistry {
    fn default() -> Self {
        let mut mappings = BTreeMap::new();
        mappings.insert("*".to_string(), PresenterMapping::default());
        Self {
            mappings,
            classes: BTreeMap::new(),
        }
    }
}

impl PresenterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mapping used for presenters under `module` (`*` for all).
    pub fn with_mapping(
        mut self,
        module: impl Into<String>,
        mask: &str,
    ) -> Result<Self, PresenterError> {
        self.mappings.insert(module.into(), PresenterMapping::parse(mask)?);
        Ok(self)
    }

    /// Register a class, replacing any class with the same name.
    pub fn register(mut self, class: PresenterClass) -> Self {
        self.classes.insert(class.name.clone(), class);
        self
    }

    /// Class name a presenter identifier maps to.
    pub fn format_class(&self, name: &str) -> Result<String, PresenterError> {
        validate_name(name)?;
        let mut parts: Vec<&str> = name.split(':').collect();

        let mapping = match self.mappings.get(parts[0]) {
            Some(mapping) if parts.len() > 1 => {
                parts.remove(0);
                mapping
            }
            _ => self
                .mappings
                .get("*")
                .ok_or_else(|| PresenterError::InvalidMapping("*".to_string()))?,
        };
        Ok(mapping.format(&parts))
    }
}

impl PresenterFactory for PresenterRegistry {
    fn class_for(&self, name: &str) -> Result<&PresenterClass, PresenterError> {
        let class = self.format_class(name)?;
        self.classes.get(&class).ok_or_else(|| PresenterError::NotFound {
            name: name.to_string(),
            class,
        })
    }
}

fn validate_name(name: &str) -> Result<(), PresenterError> {
    let starts_alpha = name.chars().next().is_some_and(|c| c.is_alphabetic());
    let valid_chars = name.chars().all(|c| c.is_alphanumeric() || c == ':');
    let no_empty_parts = name.split(':').all(|part| !part.is_empty());

    if starts_alpha && valid_chars && no_empty_parts {
        Ok(())
    } else {
        Err(PresenterError::InvalidName(name.to_string()))
    }
}
