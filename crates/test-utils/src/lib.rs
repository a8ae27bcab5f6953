//! Labnav test utilities.
//!
//! Fixtures for integration testing: the lab administration route tree,
//! actor permission sets, and shorthand builders for menu entries.

use labnav_sdk::types::{ActorPermissions, MenuMetadata, RouteNode};

/// Permission token granting the system settings section.
pub const ROLE_ADMIN: &str = "role:admin";

/// Permission token granting laboratory resource management.
pub const LAB_MANAGE: &str = "lab:manage";

/// Permission token granting test execution.
pub const TASK_DO: &str = "task:do";

/// Permission token that hides the statistics dashboard.
pub const ROLE_GUEST: &str = "role:guest";

/// Build an actor holding `tokens`.
pub fn actor(tokens: &[&str]) -> ActorPermissions {
    tokens.iter().copied().collect()
}

/// A named, visible menu entry at `path`.
pub fn entry(path: &str, name: &str) -> RouteNode {
    RouteNode::new(path).menu(MenuMetadata::named(name))
}

/// A named entry that is routable but never shown in the menu.
pub fn hidden_entry(path: &str, name: &str) -> RouteNode {
    RouteNode::new(path).menu(MenuMetadata::named(name).hidden())
}

/// A flat container whose children are shown in its place.
pub fn flat(path: &str) -> RouteNode {
    RouteNode::new(path).menu(MenuMetadata::flat())
}

/// A `<section>/list` pair: a flat container with a single list page.
pub fn list_section(path: &str, name: &str) -> RouteNode {
    flat(path).child(entry("list", name))
}

/// The route tree of the lab administration shell.
///
/// Layout:
/// - `/dashboard` (flat) with an index entry, hidden from guests
/// - `/` (flat) holding the workbench, test info, laboratory info and
///   system settings sections
/// - `/login` and a `*` catch-all without menu metadata
pub fn lab_admin_routes() -> Vec<RouteNode> {
    vec![
        flat("/dashboard")
            .exclude([ROLE_GUEST])
            .child(RouteNode::new("").menu(MenuMetadata::named("Dashboard").icon("dashboard"))),
        flat("/").children([
            RouteNode::new("workbench")
                .menu(MenuMetadata::named("Workbench").icon("carry-out"))
                .child(
                    flat("task")
                        .child(entry("list", "Task list"))
                        .child(
                            hidden_entry(":device_id", "Task")
                                .child(RouteNode::index().redirect("test-progress"))
                                .child(entry("test", "Test"))
                                .child(entry("test-progress", "Test progress"))
                                .child(entry("action-record", "Action history")),
                        )
                        .child(entry("my-action-record", "My actions"))
                        .child(entry("do", "Run tests").include([TASK_DO])),
                ),
            RouteNode::new("test-info")
                .menu(MenuMetadata::named("Test info").icon("experiment"))
                .children([
                    list_section("test-plan", "Test plans"),
                    list_section("test-item", "Test items").child(
                        hidden_entry(":id", "Test items")
                            .child(entry("field/list", "Test item fields"))
                            .child(entry("layout/editor", "Test item layout")),
                    ),
                    list_section("test-limit", "Test limits").child(
                        hidden_entry(":id", "Test limits")
                            .child(entry("item/list", "Test limit items")),
                    ),
                    list_section("product-category", "Product categories"),
                    list_section("producer", "Producers"),
                    list_section("customer", "Customers"),
                    list_section("print-template", "Print templates"),
                ]),
            RouteNode::new("laboratory-info")
                .menu(MenuMetadata::named("Laboratory info").icon("file-exclamation"))
                .include([LAB_MANAGE, ROLE_ADMIN])
                .children([
                    list_section("test-area", "Test areas").child(
                        hidden_entry(":id", "Test areas")
                            .child(entry("station/list", "Test stations")),
                    ),
                    list_section("test-instrument", "Test instruments"),
                    list_section("test-instrument-type", "Instrument types"),
                    list_section("standard", "Standards"),
                ]),
            RouteNode::new("system-settings")
                .menu(MenuMetadata::named("System settings").icon("setting"))
                .include([ROLE_ADMIN])
                .children([
                    list_section("department", "Departments"),
                    list_section("role", "Roles"),
                ]),
        ]),
        RouteNode::new("/login"),
        RouteNode::new("*"),
    ]
}
