//! Display projection: the entries the navigation component renders.

use serde::Serialize;

use super::projector::MenuNode;

/// A rendered navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub path: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Flatten a resolved menu tree into displayable entries.
///
/// Hidden entries vanish with their subtree. Structural, unnamed and
/// flat entries are replaced in place by their own displayable children.
pub fn display_items(menu: &[MenuNode]) -> Vec<NavItem> {
    let mut items = Vec::new();
    for node in menu {
        push_items(node, &mut items);
    }
    items
}

fn push_items(node: &MenuNode, out: &mut Vec<NavItem>) {
    let Some(meta) = &node.menu else {
        if !node.index {
            out.extend(display_items(&node.children));
        }
        return;
    };

    if meta.hide_in_menu {
        return;
    }

    let name = match &meta.name {
        Some(name) if !meta.flat_menu => name.clone(),
        _ => {
            if !node.index {
                out.extend(display_items(&node.children));
            }
            return;
        }
    };

    let children = if meta.hide_children_in_menu {
        Vec::new()
    } else {
        display_items(&node.children)
    };

    out.push(NavItem {
        path: node.absolute_path.clone(),
        name,
        icon: meta.icon.clone(),
        children,
    });
}

/// Print entries as an indented outline, one per line.
pub fn outline(items: &[NavItem]) -> String {
    let mut out = String::new();
    write_outline(items, 0, &mut out);
    out
}

fn write_outline(items: &[NavItem], depth: usize, out: &mut String) {
    for item in items {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&item.name);
        out.push_str("  ");
        out.push_str(&item.path);
        out.push('\n');
        write_outline(&item.children, depth + 1, out);
    }
}
