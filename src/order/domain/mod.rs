//! Domain model for the order lifecycle.
//!
//! Two state machines live on the [`Order`] aggregate: the order status,
//! driven by customers and the kitchen, and the payment status, driven by
//! the payment flows. Both reject invalid transitions without mutating
//! anything.

mod error;
mod ids;
mod item;
mod order;
mod status;

pub use error::{
    OrderDomainError, ParseOrderStatusError, ParsePaymentPathError, ParsePaymentStatusError,
};
pub use ids::{OrderId, OrderItemId, OrderNumber};
pub use item::{Customization, OrderItem, Quantity};
pub use order::Order;
pub use status::{OrderStatus, PaymentPath, PaymentStatus};
