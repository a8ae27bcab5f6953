//! Menu system for navigation and route resolution.
//!
//! The static route tree is projected per actor into:
//! - A menu tree with every path resolved to an absolute URL
//! - The flattened entries the navigation component renders
//! - The active trail and highlighted entry for the current URL

mod active;
mod display;
mod path;
mod projector;
mod registry;

pub use active::{active_trail, selected_entry};
pub use display::{NavItem, display_items, outline};
pub use path::{Specificity, match_pattern, match_prefix, resolve_path, specificity};
pub use projector::{MenuNode, build_menu, build_menu_at};
pub use registry::RouteRegistry;
