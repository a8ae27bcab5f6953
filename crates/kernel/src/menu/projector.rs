//! Projection of the route definition tree into a resolved menu tree.

use labnav_sdk::types::{ActorPermissions, MenuMetadata, ROOT, RouteNode};
use serde::Serialize;
use tracing::debug;

use super::path::resolve_path;
use crate::permissions::is_visible;

/// A route node the actor may see, with its path fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    /// Absolute path, always starting with `/`.
    pub absolute_path: String,

    /// Display metadata, copied from the route. Structural nodes have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<MenuMetadata>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub index: bool,

    /// Resolved navigate-on-entry target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Display name, if the node carries one.
    pub fn name(&self) -> Option<&str> {
        self.menu.as_ref().and_then(|m| m.name.as_deref())
    }

    /// Whether the navigation component would render this entry itself.
    pub fn is_displayable(&self) -> bool {
        match &self.menu {
            Some(menu) => menu.name.is_some() && !menu.hide_in_menu && !menu.flat_menu,
            None => false,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(MenuNode::subtree_len).sum::<usize>()
    }
}

/// Build the menu tree for `actor`, rooted at `/`.
pub fn build_menu(nodes: &[RouteNode], actor: &ActorPermissions) -> Vec<MenuNode> {
    let menu = build_menu_at(nodes, actor, ROOT);
    debug!(
        top_level = menu.len(),
        nodes = menu.iter().map(MenuNode::subtree_len).sum::<usize>(),
        tokens = actor.len(),
        "built menu tree"
    );
    menu
}

/// Build the menu tree for `actor` under an already-resolved parent path.
///
/// Nodes the actor may not see are pruned with their subtrees. Surviving
/// nodes keep their sibling order; nodes without menu metadata are still
/// emitted so their descendants resolve against them.
pub fn build_menu_at(nodes: &[RouteNode], actor: &ActorPermissions, parent: &str) -> Vec<MenuNode> {
    nodes
        .iter()
        .filter(|node| is_visible(node, actor))
        .map(|node| project(node, actor, parent))
        .collect()
}

fn project(node: &RouteNode, actor: &ActorPermissions, parent: &str) -> MenuNode {
    let absolute_path = resolve_path(node.segment(), parent);
    let redirect = node
        .redirect
        .as_deref()
        .map(|to| resolve_path(to, &absolute_path));
    let children = build_menu_at(&node.children, actor, &absolute_path);

    MenuNode {
        absolute_path,
        menu: node.menu.clone(),
        index: node.index,
        redirect,
        children,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn actor(tokens: &[&str]) -> ActorPermissions {
        tokens.iter().copied().collect()
    }

    #[test]
    fn index_node_takes_parent_path() {
        let routes = vec![
            RouteNode::new("/dashboard")
                .menu(MenuMetadata::flat())
                .child(RouteNode::new("").menu(MenuMetadata::named("Home"))),
        ];
        let menu = build_menu(&routes, &actor(&[]));
        assert_eq!(menu[0].children[0].absolute_path, "/dashboard");
        assert_eq!(menu[0].children[0].name(), Some("Home"));
    }

    #[test]
    fn include_without_match_drops_node() {
        let routes = vec![RouteNode::new("list").include(["role:admin"])];
        assert!(build_menu(&routes, &actor(&["role:viewer"])).is_empty());
    }

    #[test]
    fn absolute_escape_deep_in_tree() {
        let routes = vec![RouteNode::new("/a").child(
            RouteNode::new("b").child(
                RouteNode::new("c").child(
                    RouteNode::new("/standalone")
                        .child(RouteNode::new("detail"))
                        .child(RouteNode::index()),
                ),
            ),
        )];
        let menu = build_menu(&routes, &actor(&[]));
        let c = &menu[0].children[0].children[0];
        assert_eq!(c.absolute_path, "/a/b/c");

        let escaped = &c.children[0];
        assert_eq!(escaped.absolute_path, "/standalone");
        assert_eq!(escaped.children[0].absolute_path, "/standalone/detail");
        assert_eq!(escaped.children[1].absolute_path, "/standalone");
        assert!(escaped.children[1].index);
    }

    #[test]
    fn excluded_sibling_removed_order_kept() {
        let routes = vec![
            RouteNode::new("first").exclude(["role:banned"]),
            RouteNode::new("second"),
        ];
        let menu = build_menu(&routes, &actor(&["role:banned"]));
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].absolute_path, "/second");
    }

    #[test]
    fn trailing_separator_parent() {
        let routes = vec![RouteNode::new("x")];
        let menu = build_menu_at(&routes, &actor(&[]), "/a/");
        assert_eq!(menu[0].absolute_path, "/a/x");
    }

    #[test]
    fn absent_path_is_index_like() {
        let routes = vec![RouteNode::new("/tasks").child(RouteNode::default())];
        let menu = build_menu(&routes, &actor(&[]));
        assert_eq!(menu[0].children[0].absolute_path, "/tasks");
    }

    #[test]
    fn structural_nodes_are_emitted() {
        let routes = vec![RouteNode::new("/").child(
            RouteNode::new("workbench").child(RouteNode::new("task").child(
                RouteNode::new("list").menu(MenuMetadata::named("Tasks")),
            )),
        )];
        let menu = build_menu(&routes, &actor(&[]));
        assert!(menu[0].menu.is_none());
        let list = &menu[0].children[0].children[0].children[0];
        assert_eq!(list.absolute_path, "/workbench/task/list");
    }

    #[test]
    fn redirect_resolves_against_node() {
        let routes = vec![RouteNode::new("/task/:device_id")
            .child(RouteNode::index().redirect("test-progress"))];
        let menu = build_menu(&routes, &actor(&[]));
        assert_eq!(
            menu[0].children[0].redirect.as_deref(),
            Some("/task/:device_id/test-progress")
        );
    }

    #[test]
    fn build_is_deterministic() {
        let routes = vec![
            RouteNode::new("a").child(RouteNode::new("b")),
            RouteNode::new("c").include(["x"]),
        ];
        let viewer = actor(&["x"]);
        assert_eq!(build_menu(&routes, &viewer), build_menu(&routes, &viewer));
    }
}
