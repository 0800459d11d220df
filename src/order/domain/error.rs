//! Error types for order domain validation and parsing.

use super::{OrderId, OrderItemId, OrderStatus, PaymentStatus};
use thiserror::Error;

/// Errors returned by the order aggregate and its value objects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderDomainError {
    /// The quantity is outside the accepted range.
    #[error("invalid quantity {0}, expected a positive integer")]
    InvalidQuantity(u32),

    /// The customization text exceeds the accepted length.
    #[error("customization is {length} characters long, at most {max} are allowed")]
    CustomizationTooLong {
        /// Length of the rejected text in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The order number is zero.
    #[error("invalid order number {0}, expected a positive integer")]
    InvalidOrderNumber(u64),

    /// The requested order status transition is not allowed.
    #[error("order {order_id} cannot move from {from} to {to}")]
    InvalidStateTransition {
        /// Order identifier.
        order_id: OrderId,
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },

    /// The requested payment status transition is not allowed.
    #[error("payment for order {order_id} cannot move from {from} to {to}")]
    InvalidPaymentTransition {
        /// Order identifier.
        order_id: OrderId,
        /// Current payment status.
        from: PaymentStatus,
        /// Requested payment status.
        to: PaymentStatus,
    },

    /// Items were changed after the order left the `pending` status.
    #[error("items of order {order_id} cannot change while it is {status}")]
    ItemsLocked {
        /// Order identifier.
        order_id: OrderId,
        /// Current status.
        status: OrderStatus,
    },

    /// The order has no items.
    #[error("order {0} has no items")]
    EmptyOrder(OrderId),

    /// The order line does not exist.
    #[error("order {order_id} has no item {item_id}")]
    OrderItemNotFound {
        /// Order identifier.
        order_id: OrderId,
        /// Missing line identifier.
        item_id: OrderItemId,
    },

    /// Payment was changed on an order that does not accept payments.
    #[error("order {order_id} is {status} and does not accept payment changes")]
    PaymentNotAccepted {
        /// Order identifier.
        order_id: OrderId,
        /// Current status.
        status: OrderStatus,
    },

    /// The operation requires a completed payment.
    #[error("payment for order {0} has not been completed")]
    PaymentNotSettled(OrderId),
}

/// Error returned while parsing order statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

/// Error returned while parsing payment statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown payment status: {0}")]
pub struct ParsePaymentStatusError(pub String);

/// Error returned while parsing payment paths.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown payment path: {0}, expected system or counter")]
pub struct ParsePaymentPathError(pub String);
