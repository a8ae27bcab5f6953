//! Route registry - holds the static route definition tree.
//!
//! The tree is loaded once at startup from YAML or JSON and then shared
//! read-only by the menu builder, the authorization gate, and the router.

use std::path::Path;
use std::sync::Arc;

use labnav_sdk::types::RouteNode;
use tracing::debug;

use crate::error::{NavError, NavResult};

/// Immutable, cheaply cloneable route definition tree.
#[derive(Debug, Clone)]
pub struct RouteRegistry {
    routes: Arc<[RouteNode]>,
}

impl RouteRegistry {
    /// Wrap an already-built route tree.
    pub fn new(routes: Vec<RouteNode>) -> Self {
        let registry = Self {
            routes: routes.into(),
        };
        debug!(
            top_level = registry.routes.len(),
            nodes = registry.len(),
            "registered route tree"
        );
        registry
    }

    /// Parse a YAML route document (a sequence of route nodes).
    pub fn from_yaml_str(yaml: &str) -> NavResult<Self> {
        let routes: Vec<RouteNode> = serde_yml::from_str(yaml)?;
        Ok(Self::new(routes))
    }

    /// Parse a JSON route document (an array of route nodes).
    pub fn from_json_str(json: &str) -> NavResult<Self> {
        let routes: Vec<RouteNode> = serde_json::from_str(json)?;
        Ok(Self::new(routes))
    }

    /// Load a route file, picking the format from its extension.
    pub fn load(path: &Path) -> NavResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            other => Err(NavError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// The top-level route nodes.
    pub fn routes(&self) -> &[RouteNode] {
        &self.routes
    }

    /// Shared handle to the route tree.
    pub fn shared(&self) -> Arc<[RouteNode]> {
        Arc::clone(&self.routes)
    }

    /// Total number of route nodes at every depth.
    pub fn len(&self) -> usize {
        self.routes.iter().map(RouteNode::subtree_len).sum()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
