//! Labnav Route SDK
//!
//! Types and builder APIs for declaring the admin shell's route
//! definition tree. The kernel consumes these to build permission-filtered
//! menus and authorization decisions.

pub mod types;

pub mod prelude {
    pub use crate::types::*;
}
