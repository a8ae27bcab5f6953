//! Permission filtering over route trees, and actor permission sources.

use std::path::PathBuf;

use async_trait::async_trait;
use labnav_sdk::types::{ActorPermissions, Permission, PermissionId, PermissionRule, RouteNode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{NavError, NavResult};

/// Check a single access rule against the actor's tokens.
///
/// - No rule (or an empty one) always allows.
/// - Any excluded token held by the actor denies, even if also included.
/// - A non-empty include set requires at least one held token.
pub fn check_permissions(rule: Option<&PermissionRule>, actor: &ActorPermissions) -> bool {
    let Some(rule) = rule else {
        return true;
    };

    if !rule.exclude.is_empty() && actor.holds_any(&rule.exclude) {
        return false;
    }

    if !rule.include.is_empty() && !actor.holds_any(&rule.include) {
        return false;
    }

    true
}

/// Whether `actor` passes the node's own access rule.
///
/// Ancestors are not consulted; callers walking a tree prune at the first
/// node that fails.
pub fn is_visible(node: &RouteNode, actor: &ActorPermissions) -> bool {
    check_permissions(node.permissions.as_ref(), actor)
}

/// Prune the route tree down to the nodes `actor` may see.
///
/// Returns a new tree in the original sibling order. A dropped node takes
/// its whole subtree with it; the input is never modified.
///
/// This is the entry point for router-side callers that need the pruned
/// definitions themselves. `build_menu` applies the same predicate while
/// it resolves paths, so it does not go through here.
pub fn filter_visible(nodes: &[RouteNode], actor: &ActorPermissions) -> Vec<RouteNode> {
    nodes
        .iter()
        .filter(|node| is_visible(node, actor))
        .map(|node| RouteNode {
            path: node.path.clone(),
            index: node.index,
            redirect: node.redirect.clone(),
            menu: node.menu.clone(),
            permissions: node.permissions.clone(),
            children: filter_visible(&node.children, actor),
        })
        .collect()
}

/// Supplies the permission records of the current actor.
#[async_trait]
pub trait PermissionSource: Send + Sync {
    async fn fetch(&self) -> NavResult<Vec<Permission>>;
}

/// Fixed permission tokens, e.g. from the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    tokens: Vec<String>,
}

impl StaticPermissions {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl PermissionSource for StaticPermissions {
    async fn fetch(&self) -> NavResult<Vec<Permission>> {
        Ok(self
            .tokens
            .iter()
            .enumerate()
            .map(|(i, token)| Permission {
                id: PermissionId::Number(i as i64),
                code: Some(token.clone()),
                name: token.clone(),
            })
            .collect())
    }
}

/// Response envelope of the permissions endpoint.
#[derive(Debug, Deserialize)]
struct PermissionEnvelope {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Vec<Permission>>,
}

impl PermissionEnvelope {
    fn into_permissions(self) -> NavResult<Vec<Permission>> {
        match self.code {
            Some(0) => Ok(self.data.unwrap_or_default()),
            code => Err(NavError::PermissionEndpoint {
                code: code.unwrap_or(-1),
                message: self.message.unwrap_or_default(),
            }),
        }
    }
}

/// Parse a permissions endpoint response body.
pub fn permissions_from_json_str(body: &str) -> NavResult<Vec<Permission>> {
    serde_json::from_str::<PermissionEnvelope>(body)?.into_permissions()
}

/// A saved permissions endpoint response on disk.
#[derive(Debug, Clone)]
pub struct FilePermissions {
    path: PathBuf,
}

impl FilePermissions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PermissionSource for FilePermissions {
    async fn fetch(&self) -> NavResult<Vec<Permission>> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| NavError::Io {
                path: self.path.clone(),
                source,
            })?;
        permissions_from_json_str(&body)
    }
}

/// Resolve the actor's permission tokens.
///
/// A failing source yields the empty set so the shell still renders the
/// rule-free parts of the menu.
pub async fn load_actor_permissions(source: &dyn PermissionSource) -> ActorPermissions {
    match source.fetch().await {
        Ok(permissions) => {
            let actor: ActorPermissions = permissions.iter().map(Permission::token).collect();
            debug!(tokens = actor.len(), "loaded actor permissions");
            actor
        }
        Err(e) => {
            warn!(error = %e, "failed to load permissions, falling back to none");
            ActorPermissions::new()
        }
    }
}
