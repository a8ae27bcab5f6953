//! Labnav Kernel Library
//!
//! Builds the permission-filtered navigation of the lab administration
//! shell from its static route definition tree, and gates requested
//! locations. The `labnav` binary exposes the same operations on the
//! command line.

pub mod cache;
pub mod config;
pub mod error;
pub mod gate;
pub mod menu;
pub mod permissions;

pub use cache::{Navigation, NavigationCache};
pub use config::Config;
pub use error::{NavError, NavResult};
pub use gate::{Access, authorize};
pub use labnav_sdk::types::{ActorPermissions, MenuMetadata, PermissionRule, RouteNode};
