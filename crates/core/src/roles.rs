//! Well-known role name constants.
//!
//! These must match the `role` check constraint on `admin_users`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// All roles an account may hold.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];
