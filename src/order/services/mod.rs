//! Role-scoped application services for the order lifecycle.
//!
//! Each role gets its own service object; they share ports through `Arc`
//! rather than through process-wide singletons.

mod cashier;
mod customer;
mod error;
mod kitchen;

pub use cashier::{CashierService, CounterPaymentRequest, SettledPayment};
pub use customer::{
    AddOrderItemRequest, CustomerService, EditOrderItemRequest, PaymentOutcome,
    SystemPaymentRequest,
};
pub use error::{OrderServiceError, OrderServiceResult};
pub use kitchen::{KitchenPolicy, KitchenService};
