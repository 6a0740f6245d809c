//! Admin authentication: token issuing, password hashing and the
//! startup bootstrap account.

pub mod bootstrap;
pub mod jwt;
pub mod password;
