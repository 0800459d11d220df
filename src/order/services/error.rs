//! Service-level errors shared by the customer, cashier and kitchen roles.

use crate::menu::{domain::MenuItemId, ports::MenuRepositoryError};
use crate::order::{
    domain::{Order, OrderDomainError, OrderId, OrderNumber, OrderStatus, ParseOrderStatusError},
    ports::{OrderRepository, OrderRepositoryError},
};
use crate::payment::{domain::PaymentMethod, ports::PaymentRepositoryError};
use thiserror::Error;

/// Errors returned by the order role services.
#[derive(Debug, Error)]
pub enum OrderServiceError {
    /// A lifecycle or validation rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] OrderDomainError),
    /// Order repository operation failed.
    #[error(transparent)]
    Repository(#[from] OrderRepositoryError),
    /// Menu repository operation failed.
    #[error(transparent)]
    Menu(#[from] MenuRepositoryError),
    /// Payment repository operation failed.
    #[error(transparent)]
    PaymentRecord(#[from] PaymentRepositoryError),
    /// No order exists with the given identifier.
    #[error("order {0} not found")]
    NotFound(OrderId),
    /// No order exists with the given number.
    #[error("order {0} not found")]
    NumberNotFound(OrderNumber),
    /// The referenced menu item does not exist.
    #[error("menu item {0} not found")]
    MenuItemNotFound(MenuItemId),
    /// The status string could not be parsed.
    #[error(transparent)]
    InvalidStatus(#[from] ParseOrderStatusError),
    /// The kitchen cannot set this status directly.
    #[error("the kitchen cannot move orders to {0}")]
    UnsupportedKitchenStatus(OrderStatus),
    /// The processor captured funds but the order stopped accepting payment
    /// while the capture was in flight.
    #[error("payment {reference} for order {order_id} was captured but not applied: {source}")]
    CaptureNotApplied {
        /// Order the capture was for.
        order_id: OrderId,
        /// Processor reference of the captured funds.
        reference: String,
        /// Lifecycle rule that rejected the payment.
        source: OrderDomainError,
    },
    /// The method cannot be taken at the counter.
    #[error("{0} is not a counter payment method")]
    NotCounterMethod(PaymentMethod),
}

/// Result type for order role services.
pub type OrderServiceResult<T> = Result<T, OrderServiceError>;

pub(super) async fn find_order_or_error<O: OrderRepository>(
    repository: &O,
    order_id: OrderId,
) -> OrderServiceResult<Order> {
    repository
        .find_by_id(order_id)
        .await?
        .ok_or(OrderServiceError::NotFound(order_id))
}
