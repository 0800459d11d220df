//! Port contracts for the order lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces used by the role services.

pub mod repository;

pub use repository::{OrderRepository, OrderRepositoryError, OrderRepositoryResult};
