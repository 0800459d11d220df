//! Repository port for order persistence and lookup.

use crate::order::domain::{Order, OrderId, OrderNumber, OrderStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for order repository operations.
pub type OrderRepositoryResult<T> = Result<T, OrderRepositoryError>;

/// Order persistence contract.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Reserves the next counter-facing order number.
    async fn next_order_number(&self) -> OrderRepositoryResult<OrderNumber>;

    /// Stores a new order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderRepositoryError::DuplicateOrder`] when the identifier
    /// already exists or [`OrderRepositoryError::DuplicateOrderNumber`] when
    /// the number is taken.
    async fn store(&self, order: &Order) -> OrderRepositoryResult<()>;

    /// Persists changes to an existing order (items, statuses, timestamps).
    ///
    /// The write only succeeds while the stored order is still at
    /// `expected_revision`, the revision the caller read before mutating.
    ///
    /// # Errors
    ///
    /// Returns [`OrderRepositoryError::NotFound`] when the order does not
    /// exist and [`OrderRepositoryError::Conflict`] when another writer got
    /// there first.
    async fn update(&self, order: &Order, expected_revision: u64) -> OrderRepositoryResult<()>;

    /// Finds an order by identifier.
    async fn find_by_id(&self, id: OrderId) -> OrderRepositoryResult<Option<Order>>;

    /// Finds an order by its counter-facing number.
    async fn find_by_number(&self, number: OrderNumber) -> OrderRepositoryResult<Option<Order>>;

    /// Returns orders whose status is one of `statuses`, oldest first.
    async fn list_by_status(&self, statuses: &[OrderStatus]) -> OrderRepositoryResult<Vec<Order>>;

    /// Returns orders created in `[start, end)`, oldest first.
    async fn list_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> OrderRepositoryResult<Vec<Order>>;
}

/// Errors returned by order repository implementations.
#[derive(Debug, Clone, Error)]
pub enum OrderRepositoryError {
    /// An order with the same identifier already exists.
    #[error("duplicate order identifier: {0}")]
    DuplicateOrder(OrderId),

    /// An order with the same number already exists.
    #[error("duplicate order number: {0}")]
    DuplicateOrderNumber(OrderNumber),

    /// The order was not found.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The stored order changed since it was read.
    #[error("order {order_id} changed concurrently (revision {actual}, expected {expected})")]
    Conflict {
        /// Order that was written concurrently.
        order_id: OrderId,
        /// Revision the writer read.
        expected: u64,
        /// Revision currently stored.
        actual: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl OrderRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
