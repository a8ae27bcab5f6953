//! Locating the menu entry that corresponds to the current URL.

use super::path::{Specificity, match_pattern, match_prefix, specificity};
use super::projector::MenuNode;

/// Chain of menu nodes from the top level down to the deepest node whose
/// path matches `pathname`. Empty when nothing matches.
pub fn active_trail<'a>(menu: &'a [MenuNode], pathname: &str) -> Vec<&'a MenuNode> {
    let mut trail = find_trail(menu, pathname).unwrap_or_default();
    trail.reverse();
    trail
}

// Builds the chain leaf-first; `active_trail` reverses it once. Matching
// siblings are ranked by the specificity of their deepest match, earlier
// siblings winning ties.
fn find_trail<'a>(nodes: &'a [MenuNode], pathname: &str) -> Option<Vec<&'a MenuNode>> {
    nodes
        .iter()
        .filter_map(|node| trail_through(node, pathname))
        .fold(None, |best: Option<(Specificity, Vec<&'a MenuNode>)>, candidate| match best {
            Some(best) if best.0 >= candidate.0 => Some(best),
            _ => Some(candidate),
        })
        .map(|(_, trail)| trail)
}

fn trail_through<'a>(node: &'a MenuNode, pathname: &str) -> Option<(Specificity, Vec<&'a MenuNode>)> {
    match_prefix(&node.absolute_path, pathname)?;

    if let Some(mut trail) = find_trail(&node.children, pathname) {
        let rank = trail.first().map(|leaf| specificity(&leaf.absolute_path))?;
        trail.push(node);
        return Some((rank, trail));
    }

    match_pattern(&node.absolute_path, pathname)?;
    Some((specificity(&node.absolute_path), vec![node]))
}

/// The entry the navigation component should highlight for `pathname`.
///
/// This is the deepest rendered entry on the active trail. Entries below a
/// hidden node (or below one that hides its children) are never rendered,
/// so the walk stops there.
pub fn selected_entry<'a>(menu: &'a [MenuNode], pathname: &str) -> Option<&'a MenuNode> {
    let mut selected = None;

    for node in active_trail(menu, pathname) {
        if let Some(meta) = &node.menu {
            if meta.hide_in_menu {
                break;
            }
            if node.is_displayable() {
                selected = Some(node);
            }
            if meta.hide_children_in_menu {
                break;
            }
        }
    }

    selected
}
