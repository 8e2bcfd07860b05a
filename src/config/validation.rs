//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check masks compile and modules are well formed
//! - Check presenter mappings parse and class names are unique
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PanelConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::BTreeSet;

use thiserror::Error;

use crate::config::schema::{PanelConfig, RouterConfig};
use crate::presenter::factory::PresenterMapping;
use crate::routing::mask::CompiledMask;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{path}: mask must not be empty")]
    EmptyMask { path: String },

    #[error("{path}: invalid mask '{mask}': {reason}")]
    InvalidMask {
        path: String,
        mask: String,
        reason: String,
    },

    #[error("{path}: module '{module}' must be alphanumeric and end with ':'")]
    InvalidModule { path: String, module: String },

    #[error("presenter mapping for '{module}' is invalid: '{mask}'")]
    InvalidMapping { module: String, mask: String },

    #[error("presenter class '{name}' is declared more than once")]
    DuplicateClass { name: String },

    #[error("unknown log level '{level}'")]
    InvalidLogLevel { level: String },
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &PanelConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel {
            level: config.observability.log_level.clone(),
        });
    }

    for (module, mask) in &config.presenters.mapping {
        if PresenterMapping::parse(mask).is_err() {
            errors.push(ValidationError::InvalidMapping {
                module: module.clone(),
                mask: mask.clone(),
            });
        }
    }

    let mut seen = BTreeSet::new();
    for class in &config.presenters.classes {
        if !seen.insert(class.name.as_str()) {
            errors.push(ValidationError::DuplicateClass {
                name: class.name.clone(),
            });
        }
    }

    validate_router(&config.router, "router", &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_router(router: &RouterConfig, path: &str, errors: &mut Vec<ValidationError>) {
    match router {
        RouterConfig::List {
            module, routers, ..
        } => {
            if let Some(module) = module {
                if !is_valid_module(module) {
                    errors.push(ValidationError::InvalidModule {
                        path: path.to_string(),
                        module: module.clone(),
                    });
                }
            }
            for (i, child) in routers.iter().enumerate() {
                validate_router(child, &format!("{}.routers[{}]", path, i), errors);
            }
        }
        RouterConfig::Route { mask, .. } => {
            if mask.trim().is_empty() {
                errors.push(ValidationError::EmptyMask {
                    path: path.to_string(),
                });
            } else if let Err(e) = CompiledMask::new(mask) {
                errors.push(ValidationError::InvalidMask {
                    path: path.to_string(),
                    mask: mask.clone(),
                    reason: e.to_string(),
                });
            }
        }
        RouterConfig::Simple { .. } => {}
    }
}

/// `Admin:` and `Admin:Users:` are valid modules.
fn is_valid_module(module: &str) -> bool {
    let Some(body) = module.strip_suffix(':') else {
        return false;
    };
    !body.is_empty()
        && body.split(':').all(|part| {
            part.chars().next().is_some_and(char::is_alphabetic)
                && part.chars().all(char::is_alphanumeric)
        })
}
