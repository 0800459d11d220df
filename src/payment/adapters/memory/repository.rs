//! In-memory payment record store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::order::domain::OrderId;
use crate::payment::{
    domain::Payment,
    ports::{PaymentRepository, PaymentRepositoryError, PaymentRepositoryResult},
};

/// Thread-safe in-memory payment repository keyed by order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<OrderId, Payment>>>,
}

impl InMemoryPaymentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> PaymentRepositoryError {
    PaymentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn store(&self, payment: &Payment) -> PaymentRepositoryResult<()> {
        let mut payments = self.payments.write().map_err(lock_error)?;
        if payments.contains_key(&payment.order_id()) {
            return Err(PaymentRepositoryError::AlreadyPaid(payment.order_id()));
        }
        payments.insert(payment.order_id(), payment.clone());
        Ok(())
    }

    async fn find_by_order(&self, order_id: OrderId) -> PaymentRepositoryResult<Option<Payment>> {
        let payments = self.payments.read().map_err(lock_error)?;
        Ok(payments.get(&order_id).cloned())
    }
}
