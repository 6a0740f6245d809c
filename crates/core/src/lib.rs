//! Wayfarer domain core.
//!
//! Pure domain logic with no I/O: error taxonomy, shared id/timestamp types,
//! content helpers, list pagination math, and the dynamic table engine
//! (schema model, boundary validation, builder, generic renderer).

pub mod content;
pub mod dynamic_table;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
