//! Port contracts for the menu catalog.

pub mod repository;

pub use repository::{MenuRepository, MenuRepositoryError, MenuRepositoryResult};
