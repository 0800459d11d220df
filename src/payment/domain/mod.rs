//! Domain model for captured payments.

mod error;
mod payment;

pub use error::ParsePaymentMethodError;
pub use payment::{Payment, PaymentId, PaymentMethod};
