//! Repository port for payment records.

use crate::order::domain::OrderId;
use crate::payment::domain::Payment;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for payment repository operations.
pub type PaymentRepositoryResult<T> = Result<T, PaymentRepositoryError>;

/// Payment persistence contract.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Stores a payment record.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentRepositoryError::AlreadyPaid`] when the order already
    /// has a payment record.
    async fn store(&self, payment: &Payment) -> PaymentRepositoryResult<()>;

    /// Finds the payment recorded for an order.
    async fn find_by_order(&self, order_id: OrderId) -> PaymentRepositoryResult<Option<Payment>>;
}

/// Errors returned by payment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PaymentRepositoryError {
    /// A payment for the order already exists.
    #[error("order {0} already has a payment record")]
    AlreadyPaid(OrderId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PaymentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
