//! Per-actor navigation cache.
//!
//! Menus are pure functions of the route tree and the actor's permission
//! set, so each distinct set is projected once and shared afterwards.
//! Keys compare by value: re-fetching an equal set of tokens is a hit.

use std::sync::Arc;

use labnav_sdk::types::{ActorPermissions, RouteNode};
use moka::sync::Cache;
use serde::Serialize;
use tracing::debug;

use crate::gate::{Access, authorize};
use crate::menu::{MenuNode, NavItem, build_menu, display_items};

/// Default number of distinct permission sets kept.
pub const DEFAULT_CAPACITY: u64 = 64;

/// Everything the shell layout needs to draw navigation for one actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Resolved, permission-filtered menu tree.
    pub menu: Vec<MenuNode>,
    /// Entries as rendered.
    pub items: Vec<NavItem>,
}

impl Navigation {
    /// Project `routes` for `actor`.
    pub fn build(routes: &[RouteNode], actor: &ActorPermissions) -> Self {
        let menu = build_menu(routes, actor);
        let items = display_items(&menu);
        Self { menu, items }
    }
}

/// Memoizing navigation builder shared across callers.
#[derive(Clone)]
pub struct NavigationCache {
    inner: Arc<NavigationCacheInner>,
}

struct NavigationCacheInner {
    /// Static route tree, shared with the router.
    routes: Arc<[RouteNode]>,

    /// Permission set -> projected navigation.
    local: Cache<ActorPermissions, Arc<Navigation>>,
}

impl NavigationCache {
    /// Create a cache over `routes` holding at most `capacity` permission sets.
    pub fn new(routes: Arc<[RouteNode]>, capacity: u64) -> Self {
        let local = Cache::builder().max_capacity(capacity).build();

        Self {
            inner: Arc::new(NavigationCacheInner { routes, local }),
        }
    }

    /// Navigation for `actor`, projecting it on first request.
    pub fn navigation_for(&self, actor: &ActorPermissions) -> Arc<Navigation> {
        self.inner.local.get_with_by_ref(actor, || {
            debug!(tokens = actor.len(), "navigation cache miss");
            Arc::new(Navigation::build(&self.inner.routes, actor))
        })
    }

    /// Gate a requested path for `actor`.
    pub fn authorize(&self, actor: &ActorPermissions, pathname: &str) -> Access {
        authorize(&self.inner.routes, actor, pathname)
    }

    /// The route tree this cache projects.
    pub fn routes(&self) -> &[RouteNode] {
        &self.inner.routes
    }

    /// Drop every cached navigation.
    pub fn invalidate_all(&self) {
        self.inner.local.invalidate_all();
    }

    /// Number of cached permission sets (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.inner.local.run_pending_tasks();
        self.inner.local.entry_count()
    }
}
