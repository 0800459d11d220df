//! Kitchen order queue and preparation transitions.

use super::error::{OrderServiceError, OrderServiceResult, find_order_or_error};
use crate::order::{
    domain::{Order, OrderDomainError, OrderId, OrderStatus, PaymentStatus},
    ports::OrderRepository,
};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Statuses shown in the kitchen queue.
const QUEUE_STATUSES: [OrderStatus; 2] = [OrderStatus::Confirmed, OrderStatus::Preparing];

/// Admission rules for kitchen work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KitchenPolicy {
    /// Refuse to start preparation until payment is completed.
    pub require_settled_payment: bool,
}

/// Kitchen-facing order service.
#[derive(Clone)]
pub struct KitchenService<O, C>
where
    O: OrderRepository,
    C: Clock + Send + Sync,
{
    orders: Arc<O>,
    clock: Arc<C>,
    policy: KitchenPolicy,
}

impl<O, C> KitchenService<O, C>
where
    O: OrderRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new kitchen service.
    #[must_use]
    pub const fn new(orders: Arc<O>, clock: Arc<C>, policy: KitchenPolicy) -> Self {
        Self {
            orders,
            clock,
            policy,
        }
    }

    /// Returns the confirmed and in-preparation orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn order_queue(&self) -> OrderServiceResult<Vec<Order>> {
        Ok(self.orders.list_by_status(&QUEUE_STATUSES).await?)
    }

    /// Starts preparing a confirmed order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidStateTransition`] unless the order
    /// is `confirmed`, and [`OrderDomainError::PaymentNotSettled`] when the
    /// policy requires payment first.
    pub async fn start_preparation(&self, order_id: OrderId) -> OrderServiceResult<Order> {
        self.apply(order_id, OrderStatus::Preparing).await
    }

    /// Marks an order in preparation as ready for pickup.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidStateTransition`] unless the order
    /// is exactly `preparing`.
    pub async fn mark_ready(&self, order_id: OrderId) -> OrderServiceResult<Order> {
        self.apply(order_id, OrderStatus::Ready).await
    }

    /// Cancels an order that has not reached `ready`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidStateTransition`] for `ready`,
    /// `completed` and `cancelled` orders.
    pub async fn cancel(&self, order_id: OrderId) -> OrderServiceResult<Order> {
        self.apply(order_id, OrderStatus::Cancelled).await
    }

    /// Applies a status received by name from the kitchen display.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::InvalidStatus`] for unknown names,
    /// [`OrderServiceError::UnsupportedKitchenStatus`] for statuses the
    /// kitchen does not own, and the errors of the matching transition.
    pub async fn update_status(
        &self,
        order_id: OrderId,
        status: &str,
    ) -> OrderServiceResult<Order> {
        let target = OrderStatus::try_from(status)?;
        match target {
            OrderStatus::Preparing | OrderStatus::Ready | OrderStatus::Cancelled => {
                self.apply(order_id, target).await
            }
            other => Err(OrderServiceError::UnsupportedKitchenStatus(other)),
        }
    }

    async fn apply(&self, order_id: OrderId, target: OrderStatus) -> OrderServiceResult<Order> {
        let mut order = find_order_or_error(&*self.orders, order_id).await?;
        let revision = order.revision();
        if target == OrderStatus::Preparing
            && self.policy.require_settled_payment
            && order.payment_status() != PaymentStatus::Completed
        {
            warn!(%order_id, "preparation refused until payment completes");
            return Err(OrderDomainError::PaymentNotSettled(order_id).into());
        }
        let from = order.status();
        if let Err(err) = order.transition_to(target, &*self.clock) {
            warn!(%order_id, %from, to = %target, error = %err, "kitchen transition rejected");
            return Err(err.into());
        }
        self.orders.update(&order, revision).await?;
        info!(%order_id, number = %order.number(), %from, to = %target, "kitchen status changed");
        Ok(order)
    }
}
