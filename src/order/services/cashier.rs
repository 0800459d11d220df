//! Cashier counter payments and order handover.

use super::error::{OrderServiceError, OrderServiceResult, find_order_or_error};
use crate::order::{
    domain::{Order, OrderId, OrderNumber, OrderStatus, PaymentPath, PaymentStatus},
    ports::OrderRepository,
};
use crate::payment::{
    domain::{Payment, PaymentMethod},
    ports::PaymentRepository,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Statuses in which an order may still owe a counter payment.
const PAYABLE_STATUSES: [OrderStatus; 3] = [
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
];

/// Request payload for settling an order at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterPaymentRequest {
    order_id: OrderId,
    method: PaymentMethod,
}

impl CounterPaymentRequest {
    /// Creates a counter payment request.
    #[must_use]
    pub const fn new(order_id: OrderId, method: PaymentMethod) -> Self {
        Self { order_id, method }
    }
}

/// Order and payment record after a successful counter payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledPayment {
    /// Order with payment `completed`.
    pub order: Order,
    /// Stored payment record.
    pub payment: Payment,
}

/// Cashier-facing order service.
#[derive(Clone)]
pub struct CashierService<O, P, C>
where
    O: OrderRepository,
    P: PaymentRepository,
    C: Clock + Send + Sync,
{
    orders: Arc<O>,
    payments: Arc<P>,
    clock: Arc<C>,
}

impl<O, P, C> CashierService<O, P, C>
where
    O: OrderRepository,
    P: PaymentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new cashier service.
    #[must_use]
    pub const fn new(orders: Arc<O>, payments: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            orders,
            payments,
            clock,
        }
    }

    /// Lists confirmed counter orders that still owe payment, oldest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn pending_counter_payments(&self) -> OrderServiceResult<Vec<Order>> {
        let orders = self.orders.list_by_status(&PAYABLE_STATUSES).await?;
        Ok(orders
            .into_iter()
            .filter(|order| {
                order.payment_path() == Some(PaymentPath::Counter)
                    && order.payment_status().is_outstanding()
            })
            .collect())
    }

    /// Finds an order by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::NotFound`] when the order does not exist.
    pub async fn find_order(&self, order_id: OrderId) -> OrderServiceResult<Order> {
        debug!(%order_id, "cashier order lookup");
        find_order_or_error(&*self.orders, order_id).await
    }

    /// Finds an order by the number the customer reads out.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::NumberNotFound`] when no order has the
    /// number.
    pub async fn find_by_number(&self, number: OrderNumber) -> OrderServiceResult<Order> {
        debug!(%number, "cashier order lookup by number");
        self.orders
            .find_by_number(number)
            .await?
            .ok_or(OrderServiceError::NumberNotFound(number))
    }

    /// Settles an order's payment at the counter.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::NotCounterMethod`] for `system`,
    /// [`crate::order::domain::OrderDomainError::PaymentNotAccepted`] for
    /// orders that are not at least confirmed or already closed, and
    /// [`crate::order::domain::OrderDomainError::InvalidPaymentTransition`]
    /// for orders that are already paid.
    pub async fn complete_counter_payment(
        &self,
        request: CounterPaymentRequest,
    ) -> OrderServiceResult<SettledPayment> {
        if !request.method.is_counter_method() {
            return Err(OrderServiceError::NotCounterMethod(request.method));
        }
        let mut order = find_order_or_error(&*self.orders, request.order_id).await?;
        let revision = order.revision();
        order.ensure_payment_outstanding()?;
        order.reopen_payment(&*self.clock)?;
        order.transition_payment_to(PaymentStatus::Completed, &*self.clock)?;

        let payment = Payment::captured(
            order.id(),
            order.total(),
            request.method,
            None,
            &*self.clock,
        );
        self.orders.update(&order, revision).await?;
        self.payments.store(&payment).await?;
        info!(
            order_id = %order.id(),
            number = %order.number(),
            method = %request.method,
            amount = %payment.amount(),
            "counter payment completed"
        );
        Ok(SettledPayment { order, payment })
    }

    /// Hands a ready, paid order to the customer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::order::domain::OrderDomainError::InvalidStateTransition`]
    /// unless the order is `ready`, and
    /// [`crate::order::domain::OrderDomainError::PaymentNotSettled`] while
    /// payment is outstanding.
    pub async fn complete_pickup(&self, order_id: OrderId) -> OrderServiceResult<Order> {
        let mut order = find_order_or_error(&*self.orders, order_id).await?;
        let revision = order.revision();
        order.transition_to(OrderStatus::Completed, &*self.clock)?;
        self.orders.update(&order, revision).await?;
        info!(%order_id, number = %order.number(), "order handed over");
        Ok(order)
    }
}
