//! Configuration schema definitions.
//!
//! This module defines the route tree and presenter registry as they are
//! written in the panel's TOML file. All types derive Serde traits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::loader::ConfigError;
use crate::presenter::{PresenterClass, PresenterRegistry};
use crate::routing::params::Params;
use crate::routing::{Route, RouteList, Router, SimpleRouter};

/// Root configuration for the routing panel.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PanelConfig {
    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Presenter mappings and classes.
    pub presenters: PresentersConfig,

    /// Root of the router tree.
    pub router: RouterConfig,
}

impl PanelConfig {
    /// Build the router tree.
    pub fn build_router(&self) -> Result<Box<dyn Router>, ConfigError> {
        self.router.build()
    }

    /// Build the presenter registry.
    pub fn build_registry(&self) -> Result<PresenterRegistry, ConfigError> {
        self.presenters.build()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Presenter registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PresentersConfig {
    /// Module name (or `*`) to class mask, e.g. `App\*Module\Presenters\*Presenter`.
    pub mapping: BTreeMap<String, String>,

    /// Known presenter classes.
    pub classes: Vec<PresenterClass>,
}

impl PresentersConfig {
    pub fn build(&self) -> Result<PresenterRegistry, ConfigError> {
        let mut registry = PresenterRegistry::new();
        for (module, mask) in &self.mapping {
            registry = registry.with_mapping(module.clone(), mask)?;
        }
        Ok(self
            .classes
            .iter()
            .cloned()
            .fold(registry, PresenterRegistry::register))
    }
}

/// A node of the router tree.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RouterConfig {
    /// Composite router.
    List {
        /// Module prefix such as `Admin:`.
        #[serde(default)]
        module: Option<String>,

        /// Host the list is bound to.
        #[serde(default)]
        host: Option<String>,

        #[serde(default)]
        routers: Vec<RouterConfig>,
    },

    /// Mask-based route.
    Route {
        mask: String,

        #[serde(default)]
        defaults: Params,

        /// Allowed HTTP methods; empty means any.
        #[serde(default)]
        methods: Vec<String>,
    },

    /// Query-string router.
    Simple {
        #[serde(default)]
        defaults: Params,

        #[serde(default)]
        base_path: Option<String>,
    },
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig::List {
            module: None,
            host: None,
            routers: Vec::new(),
        }
    }
}

impl RouterConfig {
    /// Build the router this node describes, recursively.
    pub fn build(&self) -> Result<Box<dyn Router>, ConfigError> {
        match self {
            RouterConfig::List {
                module,
                host,
                routers,
            } => {
                let mut list = match module {
                    Some(module) => RouteList::with_module(module.clone()),
                    None => RouteList::new(),
                };
                if let Some(host) = host {
                    list = list.with_host(host.clone());
                }
                for router in routers {
                    list.push(router.build()?);
                }
                Ok(Box::new(list))
            }
            RouterConfig::Route {
                mask,
                defaults,
                methods,
            } => {
                let route = Route::new(mask)
                    .map_err(|source| ConfigError::Mask {
                        mask: mask.clone(),
                        source,
                    })?
                    .with_defaults(defaults.clone())
                    .with_methods(methods);
                Ok(Box::new(route))
            }
            RouterConfig::Simple {
                defaults,
                base_path,
            } => {
                let mut router = SimpleRouter::new(defaults.clone());
                if let Some(base_path) = base_path {
                    router = router.with_base_path(base_path.clone());
                }
                Ok(Box::new(router))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::params::ParamValue;
    use crate::routing::HttpRequest;

    const CONFIG: &str = r#"
[observability]
log_level = "debug"

[presenters]
mapping = { "*" = 'App\*Module\Presenters\*Presenter' }

[[presenters.classes]]
name = 'App\Presenters\HomePresenter'
methods = ["renderDefault"]

[router]
type = "list"

[[router.routers]]
type = "list"
module = "Admin:"

[[router.routers.routers]]
type = "route"
mask = "admin/<presenter>[/<action>]"
defaults = { action = "default" }

[[router.routers]]
type = "route"
mask = "<presenter>[/<action>[/<id \\d+>]]"
defaults = { presenter = "Home", action = "default" }
methods = ["GET"]

[[router.routers]]
type = "simple"
defaults = { presenter = "Home" }
"#;

    #[test]
    fn test_parse_tree() {
        let config: PanelConfig = toml::from_str(CONFIG).unwrap();
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.presenters.classes.len(), 1);

        let RouterConfig::List { routers, .. } = &config.router else {
            panic!("root must be a list");
        };
        assert_eq!(routers.len(), 3);
        assert!(matches!(&routers[0], RouterConfig::List { module: Some(m), .. } if m == "Admin:"));
        assert!(matches!(&routers[2], RouterConfig::Simple { .. }));
    }

    #[test]
    fn test_build_router() {
        let config: PanelConfig = toml::from_str(CONFIG).unwrap();
        let router = config.build_router().unwrap();
        let list = router.as_route_list().unwrap();
        assert_eq!(list.routers().len(), 3);

        let req = HttpRequest::get("http://example.com/admin/users").unwrap();
        let params = router.match_request(&req).unwrap().unwrap();
        assert_eq!(params["presenter"], ParamValue::from("Admin:Users"));
    }

    #[test]
    fn test_build_registry() {
        use crate::presenter::PresenterFactory;

        let config: PanelConfig = toml::from_str(CONFIG).unwrap();
        let registry = config.build_registry().unwrap();
        assert_eq!(
            registry.class_for("Home").unwrap().name,
            "App\\Presenters\\HomePresenter"
        );
    }

    #[test]
    fn test_invalid_mask_fails_build() {
        let config = RouterConfig::Route {
            mask: "a[b".into(),
            defaults: Params::new(),
            methods: Vec::new(),
        };
        assert!(matches!(config.build(), Err(ConfigError::Mask { .. })));
    }

    #[test]
    fn test_defaults() {
        let config = PanelConfig::default();
        assert_eq!(config.observability.log_level, "info");
        let router = config.build_router().unwrap();
        assert!(router.as_route_list().unwrap().is_empty());
    }
}
