//! Authorization gate for requested locations.
//!
//! Classifies a URL against the full route definition tree: it either
//! matches no route, matches one the actor may not enter, or is granted.
//! The tree is walked as declared, so routes hidden from the actor's menu
//! still produce `Forbidden` rather than `NotFound`. When several sibling
//! routes match, literal segments win over `:param` ones, as in the router.

use std::collections::HashMap;

use labnav_sdk::types::{ActorPermissions, ROOT, RouteNode};
use serde::Serialize;
use tracing::debug;

use crate::menu::{Specificity, match_pattern, match_prefix, resolve_path, specificity};
use crate::permissions::is_visible;

/// Outcome of gating a requested path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum Access {
    /// The actor may enter the matched route.
    Granted {
        /// Resolved pattern of the matched route.
        route: String,
        /// Parameters captured from the requested path.
        params: HashMap<String, String>,
        /// Concrete location to navigate to instead, for redirecting index routes.
        #[serde(skip_serializing_if = "Option::is_none")]
        redirect: Option<String>,
    },
    /// A route on the matched chain denies the actor.
    Forbidden {
        /// Resolved pattern of the first denying route.
        route: String,
    },
    /// No route matches.
    NotFound,
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted { .. })
    }
}

struct Hop<'a> {
    node: &'a RouteNode,
    path: String,
}

/// Gate `pathname` for `actor` against the declared route tree.
pub fn authorize(routes: &[RouteNode], actor: &ActorPermissions, pathname: &str) -> Access {
    let Some(mut chain) = find_chain(routes, ROOT, pathname) else {
        debug!(%pathname, "no route matches");
        return Access::NotFound;
    };
    chain.reverse();

    if let Some(denied) = chain
        .iter()
        .find(|hop| !is_visible(hop.node, actor))
    {
        debug!(%pathname, route = %denied.path, "route denies actor");
        return Access::Forbidden {
            route: denied.path.clone(),
        };
    }

    let Some(leaf) = chain.pop() else {
        return Access::NotFound;
    };
    let params = match_pattern(&leaf.path, pathname).unwrap_or_default();
    let redirect = leaf
        .node
        .redirect
        .as_deref()
        .map(|to| fill_params(&resolve_path(to, &leaf.path), &params));

    Access::Granted {
        route: leaf.path,
        params,
        redirect,
    }
}

// Returns the matched chain leaf-first. Among matching siblings the one
// whose leaf pattern is most specific wins; ties go to declaration order.
fn find_chain<'a>(nodes: &'a [RouteNode], parent: &str, pathname: &str) -> Option<Vec<Hop<'a>>> {
    nodes
        .iter()
        .filter_map(|node| chain_through(node, parent, pathname))
        .fold(None, |best: Option<(Specificity, Vec<Hop<'a>>)>, candidate| match best {
            Some(best) if best.0 >= candidate.0 => Some(best),
            _ => Some(candidate),
        })
        .map(|(_, chain)| chain)
}

fn chain_through<'a>(
    node: &'a RouteNode,
    parent: &str,
    pathname: &str,
) -> Option<(Specificity, Vec<Hop<'a>>)> {
    let path = resolve_path(node.segment(), parent);
    match_prefix(&path, pathname)?;

    if let Some(mut chain) = find_chain(&node.children, &path, pathname) {
        let rank = chain.first().map(|leaf| specificity(&leaf.path))?;
        chain.push(Hop { node, path });
        return Some((rank, chain));
    }

    match_pattern(&path, pathname)?;
    Some((specificity(&path), vec![Hop { node, path }]))
}

/// Substitute captured parameters into a resolved route pattern.
fn fill_params(pattern: &str, params: &HashMap<String, String>) -> String {
    let filled: Vec<&str> = pattern
        .split('/')
        .map(|segment| {
            let key = segment.strip_prefix(':').unwrap_or(segment);
            if segment.starts_with(':') || segment == "*" {
                params.get(key).map_or(segment, String::as_str)
            } else {
                segment
            }
        })
        .collect();
    filled.join("/")
}
