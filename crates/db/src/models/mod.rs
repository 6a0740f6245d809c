//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` create/update DTOs as received from the API

pub mod admin_user;
pub mod card;
pub mod category;
pub mod detail_page;
pub mod dynamic_table;
pub mod session;
pub mod study_page;
