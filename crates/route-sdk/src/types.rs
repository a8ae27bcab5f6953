//! Core types for labnav route definitions.
//!
//! Route trees are authored once (in code or as YAML/JSON configuration)
//! and shared read-only between the menu builder and the URL router.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Path separator used by every resolved path.
pub const SEPARATOR: char = '/';

/// Root path, the implicit parent of top-level routes.
pub const ROOT: &str = "/";

/// One navigable location in the route definition tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    /// Path fragment. May be absolute (leading `/`), relative, or empty.
    /// Absent is treated as the empty string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Index route: renders at its parent's own path.
    #[serde(default, skip_serializing_if = "is_false")]
    pub index: bool,

    /// Navigate-on-entry target, resolved relative to this node's path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    /// Display metadata. Absent means a structural node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<MenuMetadata>,

    /// Access predicate. Absent means always visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// An index route with no path of its own.
    pub fn index() -> Self {
        Self {
            index: true,
            ..Self::default()
        }
    }

    /// The path fragment, with an absent path read as `""`.
    pub fn segment(&self) -> &str {
        self.path.as_deref().unwrap_or_default()
    }

    pub fn menu(mut self, menu: MenuMetadata) -> Self {
        self.menu = Some(menu);
        self
    }

    pub fn redirect(mut self, to: impl Into<String>) -> Self {
        self.redirect = Some(to.into());
        self
    }

    /// Require at least one of `tokens`.
    pub fn include<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions
            .get_or_insert_with(PermissionRule::default)
            .include
            .extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Hide from actors holding any of `tokens`.
    pub fn exclude<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions
            .get_or_insert_with(PermissionRule::default)
            .exclude
            .extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn child(mut self, child: RouteNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = RouteNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(RouteNode::subtree_len).sum::<usize>()
    }
}

/// Display metadata for a menu entry.
///
/// Serialized in the navigation layout's camelCase shape; the snake_case
/// spellings are accepted on input as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Icon token understood by the navigation renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Omit this entry and everything below it from the rendered menu.
    #[serde(default, alias = "hide_in_menu", skip_serializing_if = "is_false")]
    pub hide_in_menu: bool,

    /// Show this entry but none of its descendants.
    #[serde(
        default,
        alias = "hide_children_in_menu",
        skip_serializing_if = "is_false"
    )]
    pub hide_children_in_menu: bool,

    /// Do not show this entry; lift its children to its level instead.
    #[serde(default, alias = "flat_menu", skip_serializing_if = "is_false")]
    pub flat_menu: bool,
}

impl MenuMetadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Metadata for a container whose children are shown in its place.
    pub fn flat() -> Self {
        Self {
            flat_menu: true,
            ..Self::default()
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hide_in_menu = true;
        self
    }

    pub fn hide_children(mut self) -> Self {
        self.hide_children_in_menu = true;
        self
    }
}

/// Include/exclude access predicate over permission tokens.
///
/// Exclusion is checked first: a token present in both sets hides the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRule {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub include: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub exclude: BTreeSet<String>,
}

impl PermissionRule {
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

/// The permission tokens held by the current actor.
///
/// Equality and hashing are by value, so two fetches of the same set of
/// tokens compare equal regardless of order or duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorPermissions(BTreeSet<String>);

impl ActorPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holds(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Whether the actor holds at least one of `tokens`.
    pub fn holds_any(&self, tokens: &BTreeSet<String>) -> bool {
        // Iterate the smaller set.
        if tokens.len() <= self.0.len() {
            tokens.iter().any(|t| self.0.contains(t))
        } else {
            self.0.iter().any(|t| tokens.contains(t))
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ActorPermissions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Identifier of a permission record; the endpoint emits numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionId {
    Number(i64),
    Text(String),
}

/// A permission record as served by the authorization endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub name: String,
}

impl Permission {
    /// The token this permission contributes: its code, else its name.
    pub fn token(&self) -> &str {
        self.code.as_deref().unwrap_or(&self.name)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
