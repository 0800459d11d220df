//! In-memory repository for orders.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::order::{
    domain::{Order, OrderId, OrderNumber, OrderStatus},
    ports::{OrderRepository, OrderRepositoryError, OrderRepositoryResult},
};

/// Thread-safe in-memory order repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    state: Arc<RwLock<InMemoryOrderState>>,
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: HashMap<OrderId, Order>,
    number_index: HashMap<OrderNumber, OrderId>,
    last_number: u64,
}

impl InMemoryOrderRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> OrderRepositoryError {
    OrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Collects matching orders sorted by creation time, then number.
fn collect_oldest_first<'a>(orders: impl Iterator<Item = &'a Order>) -> Vec<Order> {
    let mut matched: Vec<Order> = orders.cloned().collect();
    matched.sort_by_key(|order| (order.created_at(), order.number()));
    matched
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn next_order_number(&self) -> OrderRepositoryResult<OrderNumber> {
        let mut state = self.state.write().map_err(lock_error)?;
        let next = state.last_number.saturating_add(1);
        let number = OrderNumber::new(next).map_err(OrderRepositoryError::persistence)?;
        state.last_number = next;
        Ok(number)
    }

    async fn store(&self, order: &Order) -> OrderRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.orders.contains_key(&order.id()) {
            return Err(OrderRepositoryError::DuplicateOrder(order.id()));
        }
        if state.number_index.contains_key(&order.number()) {
            return Err(OrderRepositoryError::DuplicateOrderNumber(order.number()));
        }
        state.number_index.insert(order.number(), order.id());
        state.orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order, expected_revision: u64) -> OrderRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .orders
            .get_mut(&order.id())
            .ok_or(OrderRepositoryError::NotFound(order.id()))?;
        if slot.revision() != expected_revision {
            return Err(OrderRepositoryError::Conflict {
                order_id: order.id(),
                expected: expected_revision,
                actual: slot.revision(),
            });
        }
        *slot = order.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> OrderRepositoryResult<Option<Order>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.orders.get(&id).cloned())
    }

    async fn find_by_number(&self, number: OrderNumber) -> OrderRepositoryResult<Option<Order>> {
        let state = self.state.read().map_err(lock_error)?;
        let order = state
            .number_index
            .get(&number)
            .and_then(|order_id| state.orders.get(order_id))
            .cloned();
        Ok(order)
    }

    async fn list_by_status(&self, statuses: &[OrderStatus]) -> OrderRepositoryResult<Vec<Order>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect_oldest_first(
            state
                .orders
                .values()
                .filter(|order| statuses.contains(&order.status())),
        ))
    }

    async fn list_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> OrderRepositoryResult<Vec<Order>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect_oldest_first(state.orders.values().filter(|order| {
            order.created_at() >= start && order.created_at() < end
        })))
    }
}
