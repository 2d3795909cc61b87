//! Application services shared across route handlers.

pub mod permissions;

pub use permissions::check_group_permissions;
