//! Route table implementation
//!
//! Registration validates paths at startup; lookup is an exact string
//! match with no prefix or pattern semantics.

use crate::config::RouteSpec;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while building the route table
///
/// All of these are startup configuration errors and fatal to the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route path must be non-empty and start with '/': {0:?}")]
    InvalidPath(String),
    #[error("route {0:?} references an empty template id")]
    EmptyTemplate(String),
    #[error("duplicate route registration for {0:?}")]
    DuplicatePath(String),
}

/// Exact-match mapping from URL path to template identifier
///
/// Built once at startup and never mutated afterwards, so request
/// handling shares it behind an `Arc` without locking.
#[derive(Debug, Default)]
pub struct TemplateRouter {
    routes: HashMap<String, String>,
}

impl TemplateRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a router from configured route entries
    pub fn from_routes(specs: &[RouteSpec]) -> Result<Self, RouteError> {
        let mut router = Self::new();
        for spec in specs {
            router.register(&spec.path, &spec.template)?;
        }
        Ok(router)
    }

    /// Register a path -> template binding
    ///
    /// Paths must be non-empty, absolute, and unique. A second
    /// registration for an existing path is rejected, not merged.
    pub fn register(&mut self, path: &str, template_id: &str) -> Result<(), RouteError> {
        if path.is_empty() || !path.starts_with('/') {
            return Err(RouteError::InvalidPath(path.to_string()));
        }
        if template_id.is_empty() {
            return Err(RouteError::EmptyTemplate(path.to_string()));
        }
        if self.routes.contains_key(path) {
            return Err(RouteError::DuplicatePath(path.to_string()));
        }
        self.routes
            .insert(path.to_string(), template_id.to_string());
        Ok(())
    }

    /// Look up the template bound to a path (exact match only)
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.routes.get(path).map(String::as_str)
    }

    /// Iterate over registered bindings (for startup logging)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes
            .iter()
            .map(|(path, template)| (path.as_str(), template.as_str()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_router() -> TemplateRouter {
        let mut router = TemplateRouter::new();
        router.register("/", "index").unwrap();
        router.register("/showcase", "showcase").unwrap();
        router
    }

    #[test]
    fn test_lookup_registered_paths() {
        let router = make_router();
        assert_eq!(router.lookup("/"), Some("index"));
        assert_eq!(router.lookup("/showcase"), Some("showcase"));
    }

    #[test]
    fn test_lookup_is_exact_match_only() {
        let router = make_router();
        assert_eq!(router.lookup("/missing"), None);
        assert_eq!(router.lookup("/showcase/"), None);
        assert_eq!(router.lookup("/show"), None);
        assert_eq!(router.lookup(""), None);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut router = make_router();
        let err = router.register("/", "other").unwrap_err();
        assert_eq!(err, RouteError::DuplicatePath("/".to_string()));
        // First binding is untouched
        assert_eq!(router.lookup("/"), Some("index"));
    }

    #[test]
    fn test_invalid_path_rejected() {
        let mut router = TemplateRouter::new();
        assert_eq!(
            router.register("", "index"),
            Err(RouteError::InvalidPath(String::new()))
        );
        assert_eq!(
            router.register("showcase", "showcase"),
            Err(RouteError::InvalidPath("showcase".to_string()))
        );
    }

    #[test]
    fn test_empty_template_rejected() {
        let mut router = TemplateRouter::new();
        assert_eq!(
            router.register("/", ""),
            Err(RouteError::EmptyTemplate("/".to_string()))
        );
    }

    #[test]
    fn test_from_routes_builds_table() {
        let specs = vec![
            RouteSpec {
                path: "/".to_string(),
                template: "index".to_string(),
            },
            RouteSpec {
                path: "/showcase".to_string(),
                template: "showcase".to_string(),
            },
        ];
        let router = TemplateRouter::from_routes(&specs).unwrap();
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn test_from_routes_rejects_duplicates() {
        let specs = vec![
            RouteSpec {
                path: "/".to_string(),
                template: "index".to_string(),
            },
            RouteSpec {
                path: "/".to_string(),
                template: "showcase".to_string(),
            },
        ];
        let err = TemplateRouter::from_routes(&specs).unwrap_err();
        assert_eq!(err, RouteError::DuplicatePath("/".to_string()));
    }
}
