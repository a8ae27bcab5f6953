#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Navigation integration tests.
//!
//! Builds menus, rendered entries and gate decisions for the lab
//! administration route tree across several actors.

use labnav_kernel::menu::{
    MenuNode, active_trail, build_menu, build_menu_at, display_items, resolve_path, selected_entry,
};
use labnav_kernel::permissions::filter_visible;
use labnav_kernel::{Access, NavigationCache, RouteNode, authorize};
use labnav_sdk::types::MenuMetadata;
use labnav_test_utils::{
    LAB_MANAGE, ROLE_ADMIN, ROLE_GUEST, TASK_DO, actor, entry, lab_admin_routes,
};

fn strip_rules(nodes: &[RouteNode]) -> Vec<RouteNode> {
    nodes
        .iter()
        .map(|node| RouteNode {
            permissions: None,
            children: strip_rules(&node.children),
            ..node.clone()
        })
        .collect()
}

/// Resolve paths by hand, one level at a time, for comparison.
fn expected_paths(nodes: &[RouteNode], parent: &str, out: &mut Vec<String>) {
    for node in nodes {
        let path = resolve_path(node.segment(), parent);
        out.push(path.clone());
        expected_paths(&node.children, &path, out);
    }
}

fn menu_paths(nodes: &[MenuNode], out: &mut Vec<String>) {
    for node in nodes {
        out.push(node.absolute_path.clone());
        menu_paths(&node.children, out);
    }
}

fn item_names(items: &[labnav_kernel::menu::NavItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

#[test]
fn unrestricted_tree_round_trips() {
    let routes = strip_rules(&lab_admin_routes());
    let menu = build_menu(&routes, &actor(&[]));

    let mut expected = Vec::new();
    expected_paths(&routes, "/", &mut expected);
    let mut actual = Vec::new();
    menu_paths(&menu, &mut actual);

    assert_eq!(actual, expected);
    assert_eq!(
        menu.iter().map(MenuNode::subtree_len).sum::<usize>(),
        routes.iter().map(RouteNode::subtree_len).sum::<usize>()
    );
}

#[test]
fn filter_then_build_matches_build() {
    let routes = lab_admin_routes();
    let viewer = actor(&["role:viewer"]);
    let filtered = filter_visible(&routes, &viewer);
    assert_eq!(
        build_menu(&filtered, &actor(&[])),
        build_menu(&routes, &viewer)
    );
}

#[test]
fn admin_sees_every_section() {
    let menu = build_menu(&lab_admin_routes(), &actor(&[ROLE_ADMIN, TASK_DO]));
    let items = display_items(&menu);
    assert_eq!(
        item_names(&items),
        [
            "Dashboard",
            "Workbench",
            "Test info",
            "Laboratory info",
            "System settings"
        ]
    );

    let workbench = &items[1];
    assert_eq!(
        item_names(&workbench.children),
        ["Task list", "My actions", "Run tests"]
    );
    assert_eq!(workbench.children[0].path, "/workbench/task/list");

    let settings = &items[4];
    assert_eq!(settings.children[1].path, "/system-settings/role/list");
    assert_eq!(items[0].path, "/dashboard");
}

#[test]
fn viewer_sees_unrestricted_sections_only() {
    let menu = build_menu(&lab_admin_routes(), &actor(&["role:viewer"]));
    let items = display_items(&menu);
    assert_eq!(item_names(&items), ["Dashboard", "Workbench", "Test info"]);
    assert_eq!(item_names(&items[1].children), ["Task list", "My actions"]);
    assert_eq!(items[2].children.len(), 7);
}

#[test]
fn guest_loses_dashboard() {
    let menu = build_menu(&lab_admin_routes(), &actor(&[ROLE_GUEST, LAB_MANAGE]));
    let items = display_items(&menu);
    assert_eq!(
        item_names(&items),
        ["Workbench", "Test info", "Laboratory info"]
    );
}

#[test]
fn input_tree_is_untouched() {
    let routes = lab_admin_routes();
    let before = routes.clone();
    let _ = build_menu(&routes, &actor(&[ROLE_GUEST]));
    let _ = filter_visible(&routes, &actor(&[]));
    let _ = authorize(&routes, &actor(&[]), "/system-settings/role/list");
    assert_eq!(routes, before);
}

#[test]
fn scenario_index_at_parent_path() {
    let routes = vec![RouteNode::new("").menu(MenuMetadata::named("Home"))];
    let menu = build_menu_at(&routes, &actor(&[]), "/dashboard");
    assert_eq!(menu[0].absolute_path, "/dashboard");
}

#[test]
fn scenario_include_mismatch_dropped() {
    let routes = vec![RouteNode::new("list").include(["role:admin"])];
    assert!(build_menu(&routes, &actor(&["role:viewer"])).is_empty());
}

#[test]
fn scenario_absolute_escape_with_children() {
    let routes = vec![
        RouteNode::new("/standalone")
            .child(entry("detail", "Detail"))
            .child(RouteNode::new("").menu(MenuMetadata::named("Overview"))),
    ];
    let menu = build_menu_at(&routes, &actor(&[]), "/a/b/c");
    assert_eq!(menu[0].absolute_path, "/standalone");
    assert_eq!(menu[0].children[0].absolute_path, "/standalone/detail");
    assert_eq!(menu[0].children[1].absolute_path, "/standalone");
}

#[test]
fn scenario_excluded_sibling() {
    let routes = vec![
        RouteNode::new("first").exclude(["role:banned"]),
        RouteNode::new("second"),
    ];
    let menu = build_menu(&routes, &actor(&["role:banned"]));
    let paths: Vec<&str> = menu.iter().map(|n| n.absolute_path.as_str()).collect();
    assert_eq!(paths, ["/second"]);
}

#[test]
fn scenario_trailing_separator() {
    assert_eq!(resolve_path("x", "/a/"), "/a/x");
}

#[test]
fn active_entry_for_detail_pages() {
    let menu = build_menu(&lab_admin_routes(), &actor(&[ROLE_ADMIN]));

    let trail = active_trail(&menu, "/test-info/test-item/3/field/list");
    assert_eq!(
        trail.last().unwrap().absolute_path,
        "/test-info/test-item/:id/field/list"
    );
    assert_eq!(
        selected_entry(&menu, "/test-info/test-item/3/field/list")
            .unwrap()
            .absolute_path,
        "/test-info"
    );
    assert_eq!(
        selected_entry(&menu, "/test-info/producer/list")
            .unwrap()
            .name(),
        Some("Producers")
    );
}

#[test]
fn gate_decisions_follow_rules() {
    let routes = lab_admin_routes();

    assert_eq!(
        authorize(&routes, &actor(&[]), "/laboratory-info/test-area/5/station/list"),
        Access::Forbidden {
            route: "/laboratory-info".to_string()
        }
    );

    let Access::Granted { route, params, .. } = authorize(
        &routes,
        &actor(&[LAB_MANAGE]),
        "/laboratory-info/test-area/5/station/list",
    ) else {
        panic!("lab manager should be granted");
    };
    assert_eq!(route, "/laboratory-info/test-area/:id/station/list");
    assert_eq!(params.get("id").map(String::as_str), Some("5"));

    assert_eq!(
        authorize(&routes, &actor(&[ROLE_GUEST]), "/dashboard"),
        Access::Forbidden {
            route: "/dashboard".to_string()
        }
    );
    assert!(authorize(&routes, &actor(&[]), "/login").is_granted());
}

#[test]
fn gate_redirects_task_index() {
    let routes = lab_admin_routes();
    let Access::Granted { redirect, .. } = authorize(&routes, &actor(&[]), "/workbench/task/88")
    else {
        panic!("task detail should be granted");
    };
    assert_eq!(
        redirect.as_deref(),
        Some("/workbench/task/88/test-progress")
    );
}

#[test]
fn literal_task_pages_are_not_device_ids() {
    let routes = lab_admin_routes();
    assert_eq!(
        authorize(&routes, &actor(&[]), "/workbench/task/do"),
        Access::Forbidden {
            route: "/workbench/task/do".to_string()
        }
    );
    let Access::Granted { route, redirect, .. } =
        authorize(&routes, &actor(&[TASK_DO]), "/workbench/task/do")
    else {
        panic!("task runner should be granted");
    };
    assert_eq!(route, "/workbench/task/do");
    assert!(redirect.is_none());

    let menu = build_menu(&routes, &actor(&[TASK_DO]));
    assert_eq!(
        selected_entry(&menu, "/workbench/task/my-action-record")
            .unwrap()
            .name(),
        Some("My actions")
    );
    assert_eq!(
        selected_entry(&menu, "/workbench/task/do").unwrap().name(),
        Some("Run tests")
    );
}

#[test]
fn unknown_location_hits_catch_all() {
    let routes = lab_admin_routes();
    let Access::Granted { route, .. } = authorize(&routes, &actor(&[]), "/does/not/exist") else {
        panic!("catch-all should match");
    };
    assert_eq!(route, "/*");
}

#[test]
fn cache_serves_equal_permission_sets_once() {
    let cache = NavigationCache::new(lab_admin_routes().into(), 8);
    let a = cache.navigation_for(&actor(&[ROLE_ADMIN, TASK_DO]));
    let b = cache.navigation_for(&actor(&[TASK_DO, ROLE_ADMIN, ROLE_ADMIN]));
    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(a.items.len(), 5);
}

#[test]
fn menu_serializes_resolved_paths() {
    let menu = build_menu(&lab_admin_routes(), &actor(&[]));
    let json = serde_json::to_value(&menu).unwrap();
    assert_eq!(json[0]["absolutePath"], "/dashboard");
    assert_eq!(json[0]["menu"]["flatMenu"], true);
    assert!(json[0].get("absolute_path").is_none());
    assert_eq!(json[0]["children"][0]["menu"]["name"], "Dashboard");
}
