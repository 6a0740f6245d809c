//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_user_repo;
pub mod card_repo;
pub mod category_repo;
pub mod detail_page_repo;
pub mod dynamic_table_repo;
pub mod session_repo;
pub mod study_page_repo;

pub use admin_user_repo::AdminUserRepo;
pub use card_repo::CardRepo;
pub use category_repo::CategoryRepo;
pub use detail_page_repo::DetailPageRepo;
pub use dynamic_table_repo::DynamicTableRepo;
pub use session_repo::SessionRepo;
pub use study_page_repo::StudyPageRepo;
